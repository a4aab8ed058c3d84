use super::{Period, RoomId, RoomKind, SubjectCategory, SubjectId, TeacherId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassKind {
    Lecture,
    Tutorial,
    Practical,
}

impl std::fmt::Display for ClassKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ClassKind::Lecture => "Lecture",
            ClassKind::Tutorial => "Tutorial",
            ClassKind::Practical => "Practical",
        };
        write!(f, "{s}")
    }
}

/// One scheduled class-hour, per the solution output contract in
/// spec.md §6.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassBlock {
    pub subject: String,
    pub subject_id: SubjectId,
    pub primary_teacher: TeacherId,
    pub teachers_present: Vec<TeacherId>,
    pub course_semester_section: String,
    pub kind: ClassKind,
    pub room: RoomId,
    pub room_kind: RoomKind,
    pub category: SubjectCategory,
    pub section: Option<char>,
    pub is_continuation: bool,
}

/// `day -> hour -> blocks scheduled at that hour`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MasterSchedule {
    pub blocks: BTreeMap<Period, Vec<ClassBlock>>,
}

impl MasterSchedule {
    pub fn at(&self, period: &Period) -> &[ClassBlock] {
        self.blocks.get(period).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn push(&mut self, period: Period, block: ClassBlock) {
        self.blocks.entry(period).or_default().push(block);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Period, &ClassBlock)> {
        self.blocks.iter().flat_map(|(p, blocks)| blocks.iter().map(move |b| (p, b)))
    }

    pub fn latest_used_slot(&self) -> Option<u8> {
        self.blocks.keys().map(|p| p.slot).max()
    }
}

/// `(subject-id, block-start-slot) -> assistant teacher ids`, the
/// additive annotation produced by the Assistant Assigner. Never
/// mutates `MasterSchedule`. Kept as a flat, order-stable list (rather
/// than a map keyed by a composite tuple) so it serializes cleanly as
/// JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistantAssignments {
    pub assignments: Vec<AssistantAssignmentEntry>,
    pub shortages: Vec<AssistantShortage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantAssignmentEntry {
    pub subject_id: SubjectId,
    pub block_start: Period,
    pub assistants: Vec<TeacherId>,
}

impl AssistantAssignments {
    pub fn get(&self, subject_id: &SubjectId, block_start: &Period) -> Option<&[TeacherId]> {
        self.assignments
            .iter()
            .find(|e| &e.subject_id == subject_id && &e.block_start == block_start)
            .map(|e| e.assistants.as_slice())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantShortage {
    pub subject_id: SubjectId,
    pub block_start: Period,
    pub needed: u32,
    pub assigned: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeacherWorkload {
    pub before: BTreeMap<TeacherId, f64>,
    pub after: BTreeMap<TeacherId, f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchOutcome {
    Optimal,
    Feasible,
    Infeasible,
    ModelInvalidOrUnknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub outcome: SearchOutcome,
    pub latest_slot_used: Option<u8>,
    pub lecture_count: usize,
    pub tutorial_count: usize,
    pub practical_hour_count: usize,
    pub isolated_practical_hours: usize,
    /// Weighted room-fit penalty actually incurred by the Room Fitter's
    /// choices (`room_undersized`/`room_oversized`/`theory_in_lab`),
    /// spec.md §4.4's two heaviest-weighted objective terms.
    pub room_penalty_total: f64,
}

/// A fully solved, serializable run result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    pub master_schedule: MasterSchedule,
    pub assistant_assignments: AssistantAssignments,
    pub teacher_workload: TeacherWorkload,
    pub statistics: SummaryStatistics,
    pub generated_at: String,
}
