//! Search Driver: wires the Variable Factory, Constraint Assembler,
//! and Objective Builder into one HiGHS model, solves it, and extracts
//! a `MasterSchedule` from the chosen candidates. Room assignment runs
//! as a deterministic second pass through the Room Fitter once the
//! timetable's shape is fixed.

use super::objective::{add_latest_slot_constraints, build_objective};
use super::rooms::{room_weighted_penalty, RoomFitter, RoomRequest};
use super::variables::{build_variables, BlockKind};
use crate::config::TimetableConfig;
use crate::error::{Result, TimetableError};
use crate::types::{
    Catalog, ClassBlock, ClassKind, MasterSchedule, SearchOutcome, Subject, SummaryStatistics,
};
use good_lp::{ProblemVariables, Solution as _, SolverModel};

pub struct SearchResult {
    pub schedule: MasterSchedule,
    pub statistics: SummaryStatistics,
}

pub fn solve(catalog: &Catalog, config: &TimetableConfig) -> Result<SearchResult> {
    let mut vars = ProblemVariables::new();
    let event_vars = build_variables(&mut vars, catalog, config);
    let objective = build_objective(&mut vars, catalog, config, &event_vars);
    let latest_slot_used = objective.latest_slot_used;

    let mut problem = vars.minimise(objective.expression).using(good_lp::solvers::highs::highs);

    problem = super::constraints::add_hard_constraints(problem, catalog, &event_vars);
    problem = add_latest_slot_constraints(
        problem,
        catalog,
        &event_vars,
        latest_slot_used,
        config.time_grid.slots_per_day,
    );
    problem = super::constraints::add_daily_hour_caps(
        problem,
        catalog,
        &event_vars,
        config.optional_constraints.max_daily_hours_students,
        config.optional_constraints.max_daily_hours_teachers,
    );
    problem = super::constraints::add_max_consecutive_constraints(
        problem,
        catalog,
        &event_vars,
        config.optional_constraints.max_consecutive_classes,
        config.time_grid.slots_per_day,
    );

    let solution = match problem.solve() {
        Ok(solution) => solution,
        Err(e) => {
            let message = format!("{e:?}");
            if message.to_lowercase().contains("infeasible") {
                return Err(TimetableError::Infeasible.into());
            }
            return Err(TimetableError::SolverFailed(message).into());
        }
    };

    let mut schedule = MasterSchedule::default();
    let mut room_fitter = RoomFitter::new(config);
    let mut lecture_count = 0usize;
    let mut tutorial_count = 0usize;
    let mut practical_hour_count = 0usize;
    let mut isolated_practical_hours = 0usize;
    let mut room_penalty_total = 0.0f64;

    for event in catalog.events() {
        let key = event.key();
        let Some(candidates) = event_vars.candidates.get(&key) else { continue };

        for candidate in candidates {
            let Some(var) = event_vars.get(&key, candidate) else { continue };
            if solution.value(var) <= 0.5 {
                continue;
            }

            let representative = event.representative();
            let class_kind = match candidate.kind {
                BlockKind::Lecture => ClassKind::Lecture,
                BlockKind::Tutorial => ClassKind::Tutorial,
                BlockKind::Practical => ClassKind::Practical,
            };
            let periods = candidate.periods();

            match candidate.kind {
                BlockKind::Lecture => lecture_count += 1,
                BlockKind::Tutorial => tutorial_count += 1,
                BlockKind::Practical => {
                    practical_hour_count += candidate.len as usize;
                    if candidate.len == 1 {
                        isolated_practical_hours += 1;
                    }
                }
            }

            let members = event.members();

            // Merge synchronization (spec.md §4.3 constraint 7): lecture
            // and tutorial rooms stay equal across every merged member,
            // but practicals may land in different same-department labs
            // so a cohort too large for one lab can span several. Assign
            // per member only in that split case; every other event
            // (unmerged, or a merged lecture/tutorial) gets one room
            // shared by all its members, as before.
            if candidate.kind == BlockKind::Practical && members.len() > 1 {
                for &member in &members {
                    let (room_id, room_kind, penalty) = assign_room_for(&mut room_fitter, config, member, class_kind, &periods)?;
                    room_penalty_total += penalty;
                    push_member_blocks(&mut schedule, member, class_kind, room_id, room_kind, &periods);
                }
            } else {
                let (room_id, room_kind, penalty) =
                    assign_room_for(&mut room_fitter, config, representative, class_kind, &periods)?;
                room_penalty_total += penalty;
                for &member in &members {
                    push_member_blocks(&mut schedule, member, class_kind, room_id.clone(), room_kind, &periods);
                }
            }
        }
    }

    let outcome = SearchOutcome::Optimal;
    let statistics = SummaryStatistics {
        outcome,
        latest_slot_used: schedule.latest_used_slot(),
        lecture_count,
        tutorial_count,
        practical_hour_count,
        isolated_practical_hours,
        room_penalty_total,
    };

    Ok(SearchResult { schedule, statistics })
}

/// Ask the Room Fitter for a room and turn its fit penalty into the
/// weighted objective contribution this run reports; a fitter that
/// cannot place the request (every candidate room already booked for
/// one of these periods) is a hard failure, not a silently-fabricated
/// placeholder.
fn assign_room_for(
    room_fitter: &mut RoomFitter<'_>,
    config: &TimetableConfig,
    subject: &Subject,
    class_kind: ClassKind,
    periods: &[crate::types::Period],
) -> Result<(crate::types::RoomId, crate::types::RoomKind, f64)> {
    let room_request = RoomRequest {
        department: subject.lab_department.as_deref().unwrap_or(&subject.department),
        has_lab: subject.has_lab,
        category: subject.category,
        kind: class_kind,
        student_count: subject.student_count,
        periods,
    };
    let (room, fit_penalty, direction) = room_fitter.assign(&room_request).ok_or_else(|| {
        TimetableError::RoomUnavailable {
            subject: subject.id.0.clone(),
            kind: class_kind.to_string(),
            period: periods.first().map(|p| p.to_string()).unwrap_or_default(),
        }
    })?;
    let penalty = room_weighted_penalty(config, class_kind, room, fit_penalty, direction);
    Ok((room.id.clone(), room.kind, penalty))
}

fn push_member_blocks(
    schedule: &mut MasterSchedule,
    member: &Subject,
    class_kind: ClassKind,
    room_id: crate::types::RoomId,
    room_kind: crate::types::RoomKind,
    periods: &[crate::types::Period],
) {
    for (idx, &period) in periods.iter().enumerate() {
        schedule.push(
            period,
            ClassBlock {
                subject: member.name.clone(),
                subject_id: member.id.clone(),
                primary_teacher: member.primary_teacher.clone(),
                teachers_present: member.present_teachers().into_iter().cloned().collect(),
                course_semester_section: cohort_label(member),
                kind: class_kind,
                room: room_id.clone(),
                room_kind,
                category: member.category,
                section: member.section,
                is_continuation: idx > 0,
            },
        );
    }
}

fn cohort_label(subject: &crate::types::Subject) -> String {
    match subject.section {
        Some(section) => format!("{}-S{}-{}", subject.course, subject.semester, section),
        None => format!("{}-S{}", subject.course, subject.semester),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CourseId, HourTuple, Subject, SubjectCategory, SubjectId, Teacher, TeacherId};

    fn small_catalog() -> Catalog {
        Catalog {
            subjects: vec![Subject {
                id: SubjectId("s1".into()),
                course: CourseId("bsc-cs".into()),
                semester: 1,
                section: Some('A'),
                name: "Algorithms".into(),
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
            rooms: vec![],
            courses: vec![],
        }
    }

    #[test]
    fn solves_a_trivial_catalog() {
        let config = TimetableConfig::default();
        let catalog = small_catalog();
        let result = solve(&catalog, &config).unwrap();
        assert_eq!(result.statistics.lecture_count, 2);
    }
}
