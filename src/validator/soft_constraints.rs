use crate::config::TimetableConfig;
use crate::types::{Catalog, ClassKind, Day};
use crate::validator::SoftScore;

/// Calculate all soft constraint scores, mirroring the four objective
/// weights the solver itself minimizes against: isolated practicals,
/// GE practicals misusing the lecture window, Saturday usage, and how
/// late in the week the schedule runs.
pub fn calculate_soft_scores(
    schedule: &crate::types::MasterSchedule,
    _catalog: &Catalog,
    config: &TimetableConfig,
) -> Vec<SoftScore> {
    vec![
        score_consecutive_practicals(schedule),
        score_ge_window_discipline(schedule, config),
        score_day_usage(schedule),
        score_latest_slot(schedule, config),
    ]
}

/// Score for how many practical hours landed in a proper 2-hour block
/// rather than an isolated single hour.
fn score_consecutive_practicals(schedule: &crate::types::MasterSchedule) -> SoftScore {
    let mut total = 0usize;
    let mut isolated = 0usize;

    for (period, block) in schedule.iter() {
        if block.kind != ClassKind::Practical || block.is_continuation {
            continue;
        }
        total += 1;
        let next = crate::types::Period::new(period.day, period.slot + 1);
        let has_continuation = schedule.at(&next).iter().any(|b| b.kind == ClassKind::Practical && b.is_continuation);
        if !has_continuation {
            isolated += 1;
        }
    }
    let consecutive = total - isolated;

    SoftScore {
        constraint: "ConsecutivePracticals".to_string(),
        score: consecutive as f64,
        max_score: total as f64,
        details: format!("{consecutive}/{total} practical blocks held as a consecutive 2-hour session"),
    }
}

/// Score for GE practicals that avoided spilling into the GE lecture
/// window, where they compete with theory for the same slots.
fn score_ge_window_discipline(schedule: &crate::types::MasterSchedule, config: &TimetableConfig) -> SoftScore {
    let mut total = 0usize;
    let mut misused = 0usize;

    for (period, block) in schedule.iter() {
        if block.kind != ClassKind::Practical || block.category != crate::types::SubjectCategory::GenericElective {
            continue;
        }
        total += 1;
        if config.ge_lecture_window.contains(period) {
            misused += 1;
        }
    }
    let clean = total - misused;

    SoftScore {
        constraint: "GeWindowDiscipline".to_string(),
        score: clean as f64,
        max_score: total as f64,
        details: format!("{clean}/{total} GE practical hours kept out of the GE lecture window"),
    }
}

/// Score for keeping non-reserved classes off Saturday, the most
/// constrained and least-desirable day on the grid.
fn score_day_usage(schedule: &crate::types::MasterSchedule) -> SoftScore {
    let mut total = 0usize;
    let mut saturday = 0usize;

    for (period, block) in schedule.iter() {
        if block.category.is_reserved() {
            continue;
        }
        total += 1;
        if period.day == Day::Sat {
            saturday += 1;
        }
    }
    let clean = total - saturday;

    SoftScore {
        constraint: "DayUsage".to_string(),
        score: clean as f64,
        max_score: total as f64,
        details: format!("{clean}/{total} class-hours held on a weekday instead of Saturday"),
    }
}

/// Score for how early in the week the schedule finishes: the later
/// the latest occupied slot, the lower the score.
fn score_latest_slot(schedule: &crate::types::MasterSchedule, config: &TimetableConfig) -> SoftScore {
    let max_slot = config.time_grid.slots_per_day.saturating_sub(1) as f64;
    let latest = schedule.latest_used_slot().unwrap_or(0) as f64;

    let score = if max_slot > 0.0 { (max_slot - latest).max(0.0) } else { 0.0 };

    SoftScore {
        constraint: "LatestSlot".to_string(),
        score,
        max_score: max_slot,
        details: format!("latest occupied slot is {latest} of {max_slot}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassBlock, MasterSchedule, Period, RoomId, RoomKind, SubjectCategory, SubjectId, TeacherId};

    fn practical_block(continuation: bool) -> ClassBlock {
        ClassBlock {
            subject: "Systems Lab".into(),
            subject_id: SubjectId("lab1".into()),
            primary_teacher: TeacherId("T1".into()),
            teachers_present: vec![TeacherId("T1".into())],
            course_semester_section: "bsc-cs-S3-A".into(),
            kind: ClassKind::Practical,
            room: RoomId("Lab-1".into()),
            room_kind: RoomKind::Lab,
            category: SubjectCategory::CoreReq,
            section: Some('A'),
            is_continuation: continuation,
        }
    }

    #[test]
    fn consecutive_practical_scores_full_marks() {
        let mut schedule = MasterSchedule::default();
        schedule.push(Period::new(Day::Mon, 0), practical_block(false));
        schedule.push(Period::new(Day::Mon, 1), practical_block(true));
        let score = score_consecutive_practicals(&schedule);
        assert_eq!(score.score, score.max_score);
    }

    #[test]
    fn isolated_practical_loses_points() {
        let mut schedule = MasterSchedule::default();
        schedule.push(Period::new(Day::Mon, 0), practical_block(false));
        let score = score_consecutive_practicals(&schedule);
        assert_eq!(score.score, 0.0);
        assert_eq!(score.max_score, 1.0);
    }

    #[test]
    fn day_usage_penalizes_saturday() {
        let mut schedule = MasterSchedule::default();
        let mut block = practical_block(false);
        block.kind = ClassKind::Lecture;
        schedule.push(Period::new(Day::Sat, 0), block);
        let score = score_day_usage(&schedule);
        assert_eq!(score.score, 0.0);
    }
}
