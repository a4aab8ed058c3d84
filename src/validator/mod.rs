mod hard_constraints;
mod soft_constraints;

pub use hard_constraints::*;
pub use soft_constraints::*;

use crate::config::TimetableConfig;
use crate::types::{Catalog, Solution};

/// Result of post-solve validation against a produced `Solution`.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub hard_violations: Vec<Violation>,
    pub soft_scores: Vec<SoftScore>,
    pub total_score: f64,
}

/// A constraint violation.
#[derive(Debug, Clone)]
pub struct Violation {
    pub constraint: String,
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

/// Score for a soft, quality-oriented property.
#[derive(Debug, Clone)]
pub struct SoftScore {
    pub constraint: String,
    pub score: f64,
    pub max_score: f64,
    pub details: String,
}

/// Validate a produced solution against the catalog it was built from
/// and the configuration it was solved under.
pub fn validate_solution(solution: &Solution, catalog: &Catalog, config: &TimetableConfig) -> ValidationReport {
    let mut hard_violations = Vec::new();

    hard_violations.extend(check_teacher_conflicts(&solution.master_schedule));
    hard_violations.extend(check_cohort_conflicts(&solution.master_schedule));
    hard_violations.extend(check_room_conflicts(&solution.master_schedule));
    hard_violations.extend(check_reserved_window_compliance(&solution.master_schedule, config));
    hard_violations.extend(check_required_hours_met(&solution.master_schedule, catalog));
    hard_violations.extend(check_teacher_hour_cap(&solution.teacher_workload, config));

    let soft_scores = calculate_soft_scores(&solution.master_schedule, catalog, config);

    let total_score = if hard_violations.iter().any(|v| v.severity == Severity::Error) {
        0.0
    } else {
        let soft_total: f64 = soft_scores.iter().map(|s| s.score).sum();
        let soft_max: f64 = soft_scores.iter().map(|s| s.max_score).sum();
        if soft_max > 0.0 {
            (soft_total / soft_max) * 100.0
        } else {
            100.0
        }
    };

    ValidationReport {
        is_valid: hard_violations.iter().all(|v| v.severity != Severity::Error),
        hard_violations,
        soft_scores,
        total_score,
    }
}
