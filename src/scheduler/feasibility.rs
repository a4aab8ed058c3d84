//! Feasibility Auditor: static capacity checks run before the solver
//! starts, so an impossible catalog fails fast with a specific reason
//! instead of spending the solver's time budget discovering
//! infeasibility on its own. Grounded on the four checks in the source
//! program's feasibility checker: teacher load, reserved-window
//! capacity, room supply, and consecutive-slot supply for practicals.
//!
//! Every check runs to completion and contributes to one collected
//! `FeasibilityReport` rather than returning on the first failure, so a
//! catalog with several independent problems reports all of them in a
//! single pass, plus the utilization stats an operator needs to judge
//! how tight the fit actually is.

use crate::config::TimetableConfig;
use crate::error::TimetableError;
use crate::types::{Catalog, SubjectCategory};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct FeasibilityError {
    pub check: &'static str,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct FeasibilityWarning {
    pub check: &'static str,
    pub message: String,
}

/// Utilization fractions (0.0-1.0+) surfaced for operator judgment,
/// independent of whether any check actually failed.
#[derive(Debug, Clone, Default)]
pub struct FeasibilityStats {
    pub teacher_utilization: BTreeMap<String, f64>,
    pub reserved_window_utilization: BTreeMap<String, f64>,
    pub classroom_utilization: f64,
    pub lab_utilization: f64,
    pub consecutive_pair_utilization: f64,
}

#[derive(Debug, Clone, Default)]
pub struct FeasibilityReport {
    pub errors: Vec<FeasibilityError>,
    pub warnings: Vec<FeasibilityWarning>,
    pub stats: FeasibilityStats,
}

impl FeasibilityReport {
    pub fn is_feasible(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Run every static capacity check, collecting errors, warnings, and
/// utilization stats into one report rather than stopping at the first
/// blocking problem.
pub fn audit(catalog: &Catalog, config: &TimetableConfig) -> FeasibilityReport {
    let mut report = FeasibilityReport::default();
    check_teacher_load(catalog, config, &mut report);
    check_reserved_window_capacity(catalog, config, &mut report);
    check_room_supply(catalog, config, &mut report);
    check_consecutive_pair_supply(catalog, config, &mut report);
    report
}

/// Teacher load: blocks on any teacher exceeding `max_hours_per_teacher`,
/// warns on low utilization (<80%) and reports 90-100% as informational.
fn check_teacher_load(catalog: &Catalog, config: &TimetableConfig, report: &mut FeasibilityReport) {
    let mut hours: BTreeMap<&str, f64> = BTreeMap::new();
    for subject in &catalog.subjects {
        let total = subject.taught.total() as f64;
        for teacher in subject.present_teachers() {
            *hours.entry(teacher.0.as_str()).or_insert(0.0) += total;
        }
    }

    for (teacher, total) in hours {
        let cap = config.max_hours_per_teacher as f64;
        let utilization = if cap > 0.0 { total / cap } else { 0.0 };
        report.stats.teacher_utilization.insert(teacher.to_string(), utilization);

        if total > cap {
            report.errors.push(FeasibilityError {
                check: "teacher_load",
                message: TimetableError::TeacherOverload {
                    teacher: teacher.to_string(),
                    hours: total,
                    cap: config.max_hours_per_teacher,
                }
                .to_string(),
            });
        } else if utilization < 0.8 {
            report.warnings.push(FeasibilityWarning {
                check: "teacher_load",
                message: format!(
                    "teacher '{teacher}' under-utilized: {total} of {cap} hours ({:.0}%)",
                    utilization * 100.0
                ),
            });
        } else if utilization >= 0.9 {
            report.warnings.push(FeasibilityWarning {
                check: "teacher_load",
                message: format!(
                    "teacher '{teacher}' near optimal load: {total} of {cap} hours ({:.0}%)",
                    utilization * 100.0
                ),
            });
        }
    }
}

/// Reserved-window capacity per category: blocks on overflow, warns when
/// a category is at or above 80% of its window's slot-instances.
fn check_reserved_window_capacity(catalog: &Catalog, config: &TimetableConfig, report: &mut FeasibilityReport) {
    for category in SubjectCategory::ALL {
        if !category.is_reserved() {
            continue;
        }
        let required: u32 = catalog
            .subjects
            .iter()
            .filter(|s| s.category == category)
            .map(|s| s.taught.total() as u32)
            .sum();
        if required == 0 {
            continue;
        }
        let available = config.reserved_windows.get(&category).map(|w| w.len() as u32).unwrap_or(0);
        let utilization = if available > 0 { required as f64 / available as f64 } else { f64::INFINITY };
        report.stats.reserved_window_utilization.insert(category.token().to_string(), utilization);

        if required > available {
            report.errors.push(FeasibilityError {
                check: "reserved_window_capacity",
                message: TimetableError::ReservedWindowOverflow {
                    category: category.token().to_string(),
                    required,
                    available,
                }
                .to_string(),
            });
        } else if utilization >= 0.8 {
            report.warnings.push(FeasibilityWarning {
                check: "reserved_window_capacity",
                message: format!(
                    "reserved window for category '{}' is at {:.0}% capacity ({required} of {available} slot-instances)",
                    category.token(),
                    utilization * 100.0
                ),
            });
        }
    }
}

/// Classroom/lab supply for non-reserved categories: blocks if either
/// pool is oversubscribed.
fn check_room_supply(catalog: &Catalog, config: &TimetableConfig, report: &mut FeasibilityReport) {
    let classroom_sessions_required: u32 = catalog
        .subjects
        .iter()
        .filter(|s| !s.category.is_reserved())
        .map(|s| (s.taught.lecture + s.taught.tutorial) as u32)
        .sum();
    let classroom_slots_available = config.classrooms().count() as u32 * config.time_grid.total_slots() as u32;
    report.stats.classroom_utilization = if classroom_slots_available > 0 {
        classroom_sessions_required as f64 / classroom_slots_available as f64
    } else {
        f64::INFINITY
    };

    if classroom_sessions_required > classroom_slots_available {
        report.errors.push(FeasibilityError {
            check: "room_supply",
            message: TimetableError::RoomShortage {
                required: classroom_sessions_required,
                available: classroom_slots_available,
            }
            .to_string(),
        });
    }

    let lab_sessions_required: u32 =
        catalog.subjects.iter().filter(|s| s.has_lab).map(|s| s.taught.practical as u32 / 2).sum();
    let lab_count = config.rooms.iter().filter(|r| r.kind == crate::types::RoomKind::Lab).count() as u32;
    let lab_slots_available = lab_count * config.time_grid.total_slots() as u32;
    report.stats.lab_utilization = if lab_slots_available > 0 {
        lab_sessions_required as f64 / lab_slots_available as f64
    } else if lab_sessions_required > 0 {
        f64::INFINITY
    } else {
        0.0
    };

    if lab_sessions_required > lab_slots_available {
        report.errors.push(FeasibilityError {
            check: "room_supply",
            message: TimetableError::RoomShortage { required: lab_sessions_required, available: lab_slots_available }
                .to_string(),
        });
    }
}

/// Consecutive-slot-pair supply for 2-hour practical blocks: blocks if
/// the week's open pairs (times labs, when a lab is needed) fall short
/// of the practical sessions the catalog requires.
fn check_consecutive_pair_supply(catalog: &Catalog, config: &TimetableConfig, report: &mut FeasibilityReport) {
    let practical_sessions_required: u32 = catalog
        .subjects
        .iter()
        .filter(|s| s.taught.practical > 0)
        .map(|s| s.taught.practical as u32 / 2)
        .sum();
    if practical_sessions_required == 0 {
        report.stats.consecutive_pair_utilization = 0.0;
        return;
    }

    let mut available_pairs = 0u32;
    for &day in &config.time_grid.days {
        for slot in 0..config.time_grid.slots_per_day.saturating_sub(1) {
            let start = crate::types::Period::new(day, slot);
            let next = crate::types::Period::new(day, slot + 1);
            let any_reserved_blocks =
                |p: &crate::types::Period| config.reserved_windows.values().any(|w| w.contains(p));
            if !any_reserved_blocks(&start) && !any_reserved_blocks(&next) {
                available_pairs += 1;
            }
        }
    }

    let labs_needed = catalog.subjects.iter().any(|s| s.has_lab);
    let lab_rooms = config.rooms.iter().filter(|r| r.kind == crate::types::RoomKind::Lab).count() as u32;
    let available = if labs_needed { available_pairs * lab_rooms.max(1) } else { available_pairs };
    report.stats.consecutive_pair_utilization =
        if available > 0 { practical_sessions_required as f64 / available as f64 } else { f64::INFINITY };

    if practical_sessions_required > available {
        report.errors.push(FeasibilityError {
            check: "consecutive_pair_supply",
            message: TimetableError::ConsecutivePairShortage { required: practical_sessions_required, available }
                .to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CourseId, HourTuple, Subject, SubjectCategory, SubjectId, Teacher, TeacherId};

    fn overloaded_catalog() -> Catalog {
        Catalog {
            subjects: (0..10)
                .map(|i| Subject {
                    id: SubjectId(format!("s{i}")),
                    course: CourseId("c".into()),
                    semester: 1,
                    section: Some('A'),
                    name: format!("Subject {i}"),
                    category: SubjectCategory::CoreReq,
                    department: "CS".into(),
                    has_lab: false,
                    required: HourTuple { lecture: 4, tutorial: 0, practical: 0 },
                    taught: HourTuple { lecture: 4, tutorial: 0, practical: 0 },
                    primary_teacher: TeacherId("T1".into()),
                    co_teachers: vec![],
                    split_group: None,
                    merge_group: None,
                    student_count: 40,
                    lab_department: None,
                })
                .collect(),
            teachers: vec![Teacher { id: TeacherId("T1".into()), name: "One".into() }],
            rooms: TimetableConfig::default().rooms,
            courses: vec![],
        }
    }

    #[test]
    fn overloaded_teacher_fails_audit() {
        let catalog = overloaded_catalog();
        let config = TimetableConfig::default();
        let report = audit(&catalog, &config);
        assert!(!report.is_feasible());
        assert!(report.errors.iter().any(|e| e.check == "teacher_load"));
    }

    #[test]
    fn reasonable_catalog_passes_audit() {
        let config = TimetableConfig::default();
        let catalog = Catalog {
            subjects: vec![Subject {
                id: SubjectId("s1".into()),
                course: CourseId("c".into()),
                semester: 1,
                section: Some('A'),
                name: "X".into(),
                category: SubjectCategory::CoreReq,
                department: "CS".into(),
                has_lab: false,
                required: HourTuple { lecture: 3, tutorial: 1, practical: 0 },
                taught: HourTuple { lecture: 3, tutorial: 1, practical: 0 },
                primary_teacher: TeacherId("T1".into()),
                co_teachers: vec![],
                split_group: None,
                merge_group: None,
                student_count: 40,
                lab_department: None,
            }],
            teachers: vec![Teacher { id: TeacherId("T1".into()), name: "One".into() }],
            rooms: config.rooms.clone(),
            courses: vec![],
        };
        let report = audit(&catalog, &config);
        assert!(report.is_feasible());
    }

    #[test]
    fn low_teacher_utilization_produces_a_warning_not_an_error() {
        let config = TimetableConfig::default();
        let catalog = Catalog {
            subjects: vec![Subject {
                id: SubjectId("s1".into()),
                course: CourseId("c".into()),
                semester: 1,
                section: Some('A'),
                name: "X".into(),
                category: SubjectCategory::CoreReq,
                department: "CS".into(),
                has_lab: false,
                required: HourTuple { lecture: 2, tutorial: 0, practical: 0 },
                taught: HourTuple { lecture: 2, tutorial: 0, practical: 0 },
                primary_teacher: TeacherId("T1".into()),
                co_teachers: vec![],
                split_group: None,
                merge_group: None,
                student_count: 40,
                lab_department: None,
            }],
            teachers: vec![Teacher { id: TeacherId("T1".into()), name: "One".into() }],
            rooms: config.rooms.clone(),
            courses: vec![],
        };
        let report = audit(&catalog, &config);
        assert!(report.is_feasible());
        assert!(report.warnings.iter().any(|w| w.check == "teacher_load"));
    }
}
