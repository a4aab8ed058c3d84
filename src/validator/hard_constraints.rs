use crate::config::TimetableConfig;
use crate::types::{Catalog, MasterSchedule, TeacherWorkload};
use crate::validator::{Severity, Violation};
use std::collections::{HashMap, HashSet};

/// Check for teacher double-booking.
pub fn check_teacher_conflicts(schedule: &MasterSchedule) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (period, blocks) in &schedule.blocks {
        let mut seen: HashSet<&str> = HashSet::new();
        for block in blocks {
            for teacher in &block.teachers_present {
                if !seen.insert(teacher.0.as_str()) {
                    violations.push(Violation {
                        constraint: "NoTeacherConflict".to_string(),
                        message: format!("Teacher '{teacher}' double-booked at {period}"),
                        severity: Severity::Error,
                    });
                }
            }
        }
    }
    violations
}

/// Check for cohort double-booking: the same (course, semester,
/// section) cannot attend two classes in the same period.
pub fn check_cohort_conflicts(schedule: &MasterSchedule) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (period, blocks) in &schedule.blocks {
        let mut seen: HashSet<&str> = HashSet::new();
        for block in blocks {
            if !seen.insert(block.course_semester_section.as_str()) {
                violations.push(Violation {
                    constraint: "NoCohortConflict".to_string(),
                    message: format!(
                        "Cohort '{}' double-booked at {period}",
                        block.course_semester_section
                    ),
                    severity: Severity::Error,
                });
            }
        }
    }
    violations
}

/// Check for room double-booking.
pub fn check_room_conflicts(schedule: &MasterSchedule) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (period, blocks) in &schedule.blocks {
        let mut seen: HashSet<&str> = HashSet::new();
        for block in blocks {
            if !seen.insert(block.room.0.as_str()) {
                violations.push(Violation {
                    constraint: "NoRoomConflict".to_string(),
                    message: format!("Room '{}' double-booked at {period}", block.room),
                    severity: Severity::Error,
                });
            }
        }
    }
    violations
}

/// Reserved categories (GE/SEC/VAC/AEC) may only appear inside the
/// configured reserved window for their category.
pub fn check_reserved_window_compliance(schedule: &MasterSchedule, config: &TimetableConfig) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (period, blocks) in &schedule.blocks {
        for block in blocks {
            if !block.category.is_reserved() {
                continue;
            }
            let window = config.reserved_windows.get(&block.category);
            let ge_ok = block.category == crate::types::SubjectCategory::GenericElective
                && (config.ge_lecture_window.contains(period) || config.ge_lab_window.contains(period));
            let in_window = window.map(|w| w.contains(period)).unwrap_or(false) || ge_ok;
            if !in_window {
                violations.push(Violation {
                    constraint: "ReservedWindowCompliance".to_string(),
                    message: format!(
                        "Subject '{}' ({}) scheduled at {period}, outside its reserved window",
                        block.subject, block.category
                    ),
                    severity: Severity::Error,
                });
            }
        }
    }
    violations
}

/// Every subject's required lecture/tutorial/practical hours must be
/// fully represented in the schedule.
pub fn check_required_hours_met(schedule: &MasterSchedule, catalog: &Catalog) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut scheduled: HashMap<&str, (u32, u32, u32)> = HashMap::new();

    for (_, block) in schedule.iter() {
        if block.is_continuation {
            continue;
        }
        let entry = scheduled.entry(block.subject_id.0.as_str()).or_default();
        match block.kind {
            crate::types::ClassKind::Lecture => entry.0 += 1,
            crate::types::ClassKind::Tutorial => entry.1 += 1,
            crate::types::ClassKind::Practical => entry.2 += 1,
        }
    }

    for subject in &catalog.subjects {
        let (lecture, tutorial, practical_sessions) =
            scheduled.get(subject.id.0.as_str()).copied().unwrap_or((0, 0, 0));
        let expected_practical_sessions = (subject.taught.practical as u32).div_ceil(2);
        if lecture != subject.taught.lecture as u32
            || tutorial != subject.taught.tutorial as u32
            || practical_sessions != expected_practical_sessions
        {
            violations.push(Violation {
                constraint: "RequiredHoursMet".to_string(),
                message: format!(
                    "Subject '{}' scheduled {lecture}L/{tutorial}T/{practical_sessions}P sessions, required {}L/{}T/{}P",
                    subject.id, subject.taught.lecture, subject.taught.tutorial, expected_practical_sessions
                ),
                severity: Severity::Error,
            });
        }
    }
    violations
}

/// No teacher's post-assignment workload may exceed the configured cap.
pub fn check_teacher_hour_cap(workload: &TeacherWorkload, config: &TimetableConfig) -> Vec<Violation> {
    workload
        .after
        .iter()
        .filter(|(_, hours)| **hours > config.max_hours_per_teacher as f64)
        .map(|(teacher, hours)| Violation {
            constraint: "TeacherHourCap".to_string(),
            message: format!("Teacher '{teacher}' carries {hours} hours, cap is {}", config.max_hours_per_teacher),
            severity: Severity::Error,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassBlock, ClassKind, Day, Period, RoomId, RoomKind, SubjectCategory, SubjectId, TeacherId};

    fn block(subject_id: &str, teacher: &str, cohort: &str, room: &str) -> ClassBlock {
        ClassBlock {
            subject: subject_id.into(),
            subject_id: SubjectId(subject_id.into()),
            primary_teacher: TeacherId(teacher.into()),
            teachers_present: vec![TeacherId(teacher.into())],
            course_semester_section: cohort.into(),
            kind: ClassKind::Lecture,
            room: RoomId(room.into()),
            room_kind: RoomKind::Classroom,
            category: SubjectCategory::CoreReq,
            section: Some('A'),
            is_continuation: false,
        }
    }

    #[test]
    fn detects_teacher_conflict() {
        let mut schedule = MasterSchedule::default();
        let period = Period::new(Day::Mon, 0);
        schedule.push(period, block("s1", "T1", "c1", "R-1"));
        schedule.push(period, block("s2", "T1", "c2", "R-2"));
        assert!(!check_teacher_conflicts(&schedule).is_empty());
    }

    #[test]
    fn detects_room_conflict() {
        let mut schedule = MasterSchedule::default();
        let period = Period::new(Day::Mon, 0);
        schedule.push(period, block("s1", "T1", "c1", "R-1"));
        schedule.push(period, block("s2", "T2", "c2", "R-1"));
        assert!(!check_room_conflicts(&schedule).is_empty());
    }

    #[test]
    fn no_conflict_when_distinct() {
        let mut schedule = MasterSchedule::default();
        let period = Period::new(Day::Mon, 0);
        schedule.push(period, block("s1", "T1", "c1", "R-1"));
        schedule.push(period, block("s2", "T2", "c2", "R-2"));
        assert!(check_teacher_conflicts(&schedule).is_empty());
        assert!(check_room_conflicts(&schedule).is_empty());
        assert!(check_cohort_conflicts(&schedule).is_empty());
    }
}
