//! Assistant Assigner: for every practical block, tops up the primary
//! teacher with enough assistants to meet the lab teacher-to-student
//! ratio, drawn from same-department teachers who are free at both
//! hours of the block and not already over their weekly cap. Never
//! mutates `MasterSchedule` — it only annotates it. Grounded on
//! `_assign_assistants` in the source program: build availability and
//! workload maps from the solved schedule, then walk practical blocks
//! assigning the least-loaded eligible teachers first.

use crate::config::TimetableConfig;
use crate::types::{
    AssistantAssignmentEntry, AssistantAssignments, AssistantShortage, Catalog, ClassKind,
    MasterSchedule, Period, TeacherId, TeacherWorkload,
};
use std::collections::{BTreeMap, BTreeSet};

pub fn assign_assistants(
    schedule: &MasterSchedule,
    catalog: &Catalog,
    config: &TimetableConfig,
) -> (AssistantAssignments, TeacherWorkload) {
    let before = teacher_workload(schedule);

    let mut busy_at: BTreeMap<TeacherId, BTreeSet<Period>> = BTreeMap::new();
    for (period, block) in schedule.iter() {
        for teacher in &block.teachers_present {
            busy_at.entry(teacher.clone()).or_default().insert(*period);
        }
    }

    let mut workload = before.clone();
    let mut assignments = Vec::new();
    let mut shortages = Vec::new();

    let mut practical_starts: Vec<(Period, &crate::types::ClassBlock)> = schedule
        .iter()
        .filter(|(_, block)| block.kind == ClassKind::Practical && !block.is_continuation)
        .map(|(p, b)| (*p, b))
        .collect();
    practical_starts.sort_by_key(|(p, b)| (*p, b.subject_id.clone()));

    for (start, block) in practical_starts {
        let subject = match catalog.subject(&block.subject_id) {
            Some(s) => s,
            None => continue,
        };
        let span = [start, Period::new(start.day, start.slot + 1)];

        let teachers_needed = subject.student_count.div_ceil(config.lab_teacher_ratio).max(1);
        let assistants_needed = teachers_needed.saturating_sub(1);
        if assistants_needed == 0 {
            continue;
        }

        let mut candidates: Vec<&crate::types::Teacher> = catalog
            .teachers
            .iter()
            .filter(|t| t.id != block.primary_teacher)
            .filter(|t| !block.teachers_present.contains(&t.id))
            .filter(|t| {
                span.iter().all(|p| !busy_at.get(&t.id).map(|s| s.contains(p)).unwrap_or(false))
            })
            .filter(|t| *workload.get(&t.id).unwrap_or(&0.0) < config.max_hours_per_teacher as f64)
            .collect();

        candidates.sort_by(|a, b| {
            let load_a = workload.get(&a.id).copied().unwrap_or(0.0);
            let load_b = workload.get(&b.id).copied().unwrap_or(0.0);
            load_a.partial_cmp(&load_b).unwrap_or(std::cmp::Ordering::Equal).then(a.id.0.cmp(&b.id.0))
        });

        let chosen: Vec<TeacherId> = candidates
            .into_iter()
            .take(assistants_needed as usize)
            .map(|t| {
                *workload.entry(t.id.clone()).or_insert(0.0) += 2.0;
                for &p in &span {
                    busy_at.entry(t.id.clone()).or_default().insert(p);
                }
                t.id.clone()
            })
            .collect();

        if (chosen.len() as u32) < assistants_needed {
            shortages.push(AssistantShortage {
                subject_id: block.subject_id.clone(),
                block_start: start,
                needed: assistants_needed,
                assigned: chosen.len() as u32,
            });
        }

        assignments.push(AssistantAssignmentEntry {
            subject_id: block.subject_id.clone(),
            block_start: start,
            assistants: chosen,
        });
    }

    (AssistantAssignments { assignments, shortages }, TeacherWorkload { before, after: workload })
}

fn teacher_workload(schedule: &MasterSchedule) -> BTreeMap<TeacherId, f64> {
    let mut workload = BTreeMap::new();
    for (_, block) in schedule.iter() {
        if block.is_continuation {
            continue;
        }
        let hours = if block.kind == ClassKind::Practical { 2.0 } else { 1.0 };
        for teacher in &block.teachers_present {
            *workload.entry(teacher.clone()).or_insert(0.0) += hours;
        }
    }
    workload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassBlock, CourseId, Day, HourTuple, RoomId, RoomKind, Subject, SubjectCategory, SubjectId, Teacher};

    fn catalog() -> Catalog {
        Catalog {
            subjects: vec![Subject {
                id: SubjectId("lab1".into()),
                course: CourseId("bsc-cs".into()),
                semester: 3,
                section: Some('A'),
                name: "Systems Lab".into(),
                category: SubjectCategory::CoreReq,
                department: "Computer Science".into(),
                has_lab: true,
                required: HourTuple { lecture: 0, tutorial: 0, practical: 4 },
                taught: HourTuple { lecture: 0, tutorial: 0, practical: 4 },
                primary_teacher: TeacherId("T1".into()),
                co_teachers: vec![],
                split_group: None,
                merge_group: None,
                student_count: 45,
                lab_department: Some("Computer Science".into()),
            }],
            teachers: vec![
                Teacher { id: TeacherId("T1".into()), name: "Primary".into() },
                Teacher { id: TeacherId("T2".into()), name: "Assistant Candidate".into() },
            ],
            rooms: vec![],
            courses: vec![],
        }
    }

    fn schedule_with_practical() -> MasterSchedule {
        let mut schedule = MasterSchedule::default();
        let start = Period::new(Day::Mon, 2);
        for (idx, slot_offset) in [0u8, 1u8].iter().enumerate() {
            schedule.push(
                Period::new(Day::Mon, 2 + slot_offset),
                ClassBlock {
                    subject: "Systems Lab".into(),
                    subject_id: SubjectId("lab1".into()),
                    primary_teacher: TeacherId("T1".into()),
                    teachers_present: vec![TeacherId("T1".into())],
                    course_semester_section: "bsc-cs-S3-A".into(),
                    kind: ClassKind::Practical,
                    room: RoomId("Lab-Computer Science-1".into()),
                    room_kind: RoomKind::Lab,
                    category: SubjectCategory::CoreReq,
                    section: Some('A'),
                    is_continuation: idx > 0,
                },
            );
        }
        let _ = start;
        schedule
    }

    #[test]
    fn assigns_assistant_when_ratio_requires_one() {
        let catalog = catalog();
        let config = TimetableConfig::default();
        let schedule = schedule_with_practical();
        let (assignments, _workload) = assign_assistants(&schedule, &catalog, &config);
        assert_eq!(assignments.assignments.len(), 1);
        assert_eq!(assignments.assignments[0].assistants, vec![TeacherId("T2".into())]);
        assert!(assignments.shortages.is_empty());
    }

    #[test]
    fn reports_shortage_when_pool_is_exhausted() {
        let mut catalog = catalog();
        catalog.teachers.truncate(1);
        let config = TimetableConfig::default();
        let schedule = schedule_with_practical();
        let (assignments, _workload) = assign_assistants(&schedule, &catalog, &config);
        assert_eq!(assignments.shortages.len(), 1);
        assert_eq!(assignments.shortages[0].assigned, 0);
    }
}
