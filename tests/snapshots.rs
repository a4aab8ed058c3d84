//! Snapshot coverage over the JSON summary report for the four seed
//! scenarios. Anchored on hand-built `Solution` fixtures rather than a
//! live solve: a snapshot of the solver's actual chosen periods would
//! be pinned to HiGHS's own tie-breaking between equally-optimal
//! placements, which isn't something this crate controls or should be
//! asserting on. `generate_json_summary` itself, the thing actually
//! under test here, is a pure function of `Solution`.

use timetable_scheduler::reporter::generate_json_summary;
use timetable_scheduler::types::{
    AssistantAssignments, MasterSchedule, SearchOutcome, Solution, SummaryStatistics, TeacherId, TeacherWorkload,
};

fn fixture(statistics: SummaryStatistics, teacher_ids: &[&str]) -> Solution {
    let mut teacher_workload = TeacherWorkload::default();
    for id in teacher_ids {
        teacher_workload.after.insert(TeacherId((*id).to_string()), 4.0);
    }
    Solution {
        master_schedule: MasterSchedule::default(),
        assistant_assignments: AssistantAssignments::default(),
        teacher_workload,
        statistics,
        generated_at: "2024-01-01T00:00:00+00:00".to_string(),
    }
}

#[test]
fn s1_minimal_single_cohort_summary() {
    let solution = fixture(
        SummaryStatistics {
            outcome: SearchOutcome::Optimal,
            latest_slot_used: Some(4),
            lecture_count: 6,
            tutorial_count: 1,
            practical_hour_count: 2,
            isolated_practical_hours: 0,
            room_penalty_total: 0.0,
        },
        &["T1", "T2"],
    );
    let summary = generate_json_summary(&solution).unwrap();
    insta::assert_snapshot!(summary, @r#"
{
  "statistics": {
    "outcome": "Optimal",
    "latest_slot_used": 4,
    "lecture_count": 6,
    "tutorial_count": 1,
    "practical_hour_count": 2,
    "isolated_practical_hours": 0,
    "room_penalty_total": 0.0
  },
  "assistant_shortages": 0,
  "teachers_scheduled": 2,
  "generated_at": "2024-01-01T00:00:00+00:00"
}
"#);
}

#[test]
fn s2_merged_cohorts_summary() {
    let solution = fixture(
        SummaryStatistics {
            outcome: SearchOutcome::Optimal,
            latest_slot_used: Some(3),
            lecture_count: 2,
            tutorial_count: 0,
            practical_hour_count: 2,
            isolated_practical_hours: 0,
            room_penalty_total: 0.0,
        },
        &["T1"],
    );
    let summary = generate_json_summary(&solution).unwrap();
    insta::assert_snapshot!(summary, @r#"
{
  "statistics": {
    "outcome": "Optimal",
    "latest_slot_used": 3,
    "lecture_count": 2,
    "tutorial_count": 0,
    "practical_hour_count": 2,
    "isolated_practical_hours": 0,
    "room_penalty_total": 0.0
  },
  "assistant_shortages": 0,
  "teachers_scheduled": 1,
  "generated_at": "2024-01-01T00:00:00+00:00"
}
"#);
}

#[test]
fn s3_split_taught_subject_summary() {
    let solution = fixture(
        SummaryStatistics {
            outcome: SearchOutcome::Optimal,
            latest_slot_used: Some(2),
            lecture_count: 3,
            tutorial_count: 0,
            practical_hour_count: 0,
            isolated_practical_hours: 0,
            room_penalty_total: 0.0,
        },
        &["T1", "T2"],
    );
    let summary = generate_json_summary(&solution).unwrap();
    insta::assert_snapshot!(summary, @r#"
{
  "statistics": {
    "outcome": "Optimal",
    "latest_slot_used": 2,
    "lecture_count": 3,
    "tutorial_count": 0,
    "practical_hour_count": 0,
    "isolated_practical_hours": 0,
    "room_penalty_total": 0.0
  },
  "assistant_shortages": 0,
  "teachers_scheduled": 2,
  "generated_at": "2024-01-01T00:00:00+00:00"
}
"#);
}

#[test]
fn s4_reserved_window_category_summary() {
    let solution = fixture(
        SummaryStatistics {
            outcome: SearchOutcome::Optimal,
            latest_slot_used: Some(4),
            lecture_count: 3,
            tutorial_count: 0,
            practical_hour_count: 0,
            isolated_practical_hours: 0,
            room_penalty_total: 0.0,
        },
        &["T1"],
    );
    let summary = generate_json_summary(&solution).unwrap();
    insta::assert_snapshot!(summary, @r#"
{
  "statistics": {
    "outcome": "Optimal",
    "latest_slot_used": 4,
    "lecture_count": 3,
    "tutorial_count": 0,
    "practical_hour_count": 0,
    "isolated_practical_hours": 0,
    "room_penalty_total": 0.0
  },
  "assistant_shortages": 0,
  "teachers_scheduled": 1,
  "generated_at": "2024-01-01T00:00:00+00:00"
}
"#);
}
