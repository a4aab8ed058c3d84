mod assistants;
mod constraints;
mod feasibility;
mod ilp_solver;
mod objective;
mod rooms;
mod variables;

pub use assistants::assign_assistants;
pub use feasibility::{audit as audit_feasibility, FeasibilityError, FeasibilityReport, FeasibilityStats, FeasibilityWarning};
pub use ilp_solver::{solve, SearchResult};
pub use rooms::{room_weighted_penalty, RoomFitter, RoomRequest};

use crate::config::TimetableConfig;
use crate::error::{Result, TimetableError};
use crate::types::{Catalog, Solution};
use indicatif::{ProgressBar, ProgressStyle};

/// End-to-end pipeline: audit feasibility, solve the timetable, assign
/// lab assistants. Mirrors the teacher's phase-by-phase progress-bar
/// idiom, generalized from its five phases to this domain's three.
pub fn generate_schedule(catalog: &Catalog, config: &TimetableConfig, quiet: bool) -> Result<Solution> {
    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(100);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb
    };

    progress.set_message("Auditing feasibility...");
    progress.set_position(10);
    let feasibility = audit_feasibility(catalog, config);
    if !feasibility.is_feasible() {
        let errors = feasibility.errors.iter().map(|e| e.message.clone()).collect();
        return Err(TimetableError::FeasibilityFailed { errors }.into());
    }
    if !quiet {
        for warning in &feasibility.warnings {
            progress.println(format!("warning: {}", warning.message));
        }
    }

    progress.set_message("Building and solving the timetable model...");
    progress.set_position(30);
    let SearchResult { schedule, statistics } = solve(catalog, config)?;

    progress.set_message("Assigning lab assistants...");
    progress.set_position(85);
    let (assistant_assignments, teacher_workload) = assign_assistants(&schedule, catalog, config);

    progress.set_message("Complete!");
    progress.set_position(100);
    progress.finish_with_message("Timetable generated successfully");

    Ok(Solution {
        master_schedule: schedule,
        assistant_assignments,
        teacher_workload,
        statistics,
        generated_at: chrono::Utc::now().to_rfc3339(),
    })
}
