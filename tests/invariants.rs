//! Property-based invariant checks: for any small, feasible catalog
//! the Search Driver accepts, the resulting schedule must carry no
//! hard violations. Each case solves a real ILP model, so the case
//! count is kept low relative to the cheaper unit-level property
//! tests elsewhere in the corpus.

use proptest::prelude::*;
use timetable_scheduler::config::TimetableConfig;
use timetable_scheduler::scheduler::generate_schedule;
use timetable_scheduler::types::{
    Catalog, CourseId, HourTuple, Subject, SubjectCategory, SubjectId, Teacher, TeacherId,
};
use timetable_scheduler::validator::validate_solution;

/// `n` independent single-section core-requirement subjects, one
/// teacher apiece, lecture-only so every instance is trivially
/// feasible against the default grid regardless of `lecture_hours`.
fn independent_catalog(n: usize, lecture_hours: u8) -> Catalog {
    let subjects: Vec<Subject> = (0..n)
        .map(|i| Subject {
            id: SubjectId(format!("s{i}")),
            course: CourseId("A".into()),
            semester: 1,
            section: Some('A'),
            name: format!("Subject {i}"),
            category: SubjectCategory::CoreReq,
            department: "D1".into(),
            has_lab: false,
            required: HourTuple { lecture: lecture_hours, tutorial: 0, practical: 0 },
            taught: HourTuple { lecture: lecture_hours, tutorial: 0, practical: 0 },
            primary_teacher: TeacherId(format!("t{i}")),
            co_teachers: vec![],
            split_group: None,
            merge_group: None,
            student_count: 30,
            lab_department: None,
        })
        .collect();

    let teachers = subjects.iter().map(|s| Teacher { id: s.primary_teacher.clone(), name: s.primary_teacher.0.clone() }).collect();
    let config = TimetableConfig::default();

    Catalog { subjects, teachers, rooms: config.rooms, courses: vec![] }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn solved_schedule_never_violates_a_hard_constraint(
        n in 2usize..6,
        lecture_hours in 1u8..4,
    ) {
        let config = TimetableConfig::default();
        let catalog = independent_catalog(n, lecture_hours);

        let solution = generate_schedule(&catalog, &config, true).unwrap();
        let validation = validate_solution(&solution, &catalog, &config);

        prop_assert!(validation.hard_violations.is_empty(), "{:?}", validation.hard_violations);
        prop_assert_eq!(solution.statistics.lecture_count, n * lecture_hours as usize);
    }

    #[test]
    fn resolving_the_same_catalog_twice_is_idempotent_in_shape(
        n in 2usize..5,
        lecture_hours in 1u8..3,
    ) {
        let config = TimetableConfig::default();
        let catalog = independent_catalog(n, lecture_hours);

        let first = generate_schedule(&catalog, &config, true).unwrap();
        let second = generate_schedule(&catalog, &config, true).unwrap();

        prop_assert_eq!(first.statistics.lecture_count, second.statistics.lecture_count);
        prop_assert_eq!(first.statistics.tutorial_count, second.statistics.tutorial_count);
        prop_assert_eq!(first.statistics.practical_hour_count, second.statistics.practical_hour_count);
    }
}
