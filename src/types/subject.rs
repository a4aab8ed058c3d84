use super::{CourseId, MergeGroupId, SplitGroupId, SubjectCategory, SubjectId, TeacherId};
use serde::{Deserialize, Serialize};

/// Lecture/tutorial/practical hour counts. `practical` is already in
/// *hours*, not sessions (two hours per 2-hour practical session), per
/// the doubling convention at the catalog ingestion boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourTuple {
    pub lecture: u8,
    pub tutorial: u8,
    pub practical: u8,
}

impl HourTuple {
    pub fn total(&self) -> u16 {
        self.lecture as u16 + self.tutorial as u16 + self.practical as u16
    }
}

/// A single scheduling unit after catalog expansion: one
/// (course, semester, section, subject) with a resolved teacher.
///
/// Reserved-category subjects (GE/SEC/VAC/AEC) use the `"COMMON"`
/// course marker and an `ALL` section, matching the ingestion
/// convention in §6.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub course: CourseId,
    pub semester: u8,
    pub section: Option<char>,
    pub name: String,
    pub category: SubjectCategory,
    pub department: String,
    pub has_lab: bool,
    pub required: HourTuple,
    pub taught: HourTuple,
    pub primary_teacher: TeacherId,
    #[serde(default)]
    pub co_teachers: Vec<TeacherId>,
    #[serde(default)]
    pub split_group: Option<SplitGroupId>,
    #[serde(default)]
    pub merge_group: Option<MergeGroupId>,
    pub student_count: u32,
    #[serde(default)]
    pub lab_department: Option<String>,
}

impl Subject {
    pub fn year(&self) -> u8 {
        SubjectCategory::year_for_semester(self.semester)
    }

    /// All teachers present whenever this subject meets: primary plus
    /// every co-teacher. Split-group partners are a *different*
    /// `Subject` row and are not included here.
    pub fn present_teachers(&self) -> Vec<&TeacherId> {
        std::iter::once(&self.primary_teacher)
            .chain(self.co_teachers.iter())
            .collect()
    }

    /// Stable, human-readable identity used in diagnostics and for the
    /// deterministic Assistant Assigner iteration order.
    pub fn sort_key(&self) -> (CourseId, u8, String) {
        (self.course.clone(), self.semester, self.name.clone())
    }

    /// The key shared by every member of this subject's merge group, or
    /// its own id if it is not merged. Mirrors `_get_event_id` in the
    /// source program: merged subjects collapse to one scheduling event.
    pub fn event_key(&self) -> String {
        match &self.merge_group {
            Some(g) => format!("MERGE_{}", g.0),
            None => self.id.0.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject() -> Subject {
        Subject {
            id: SubjectId("bsc-cs-3-algo".into()),
            course: CourseId("bsc-cs".into()),
            semester: 3,
            section: Some('A'),
            name: "Algorithms".into(),
            category: SubjectCategory::CoreReq,
            department: "Computer Science".into(),
            has_lab: true,
            required: HourTuple { lecture: 3, tutorial: 1, practical: 4 },
            taught: HourTuple { lecture: 3, tutorial: 1, practical: 4 },
            primary_teacher: TeacherId("AB".into()),
            co_teachers: vec![],
            split_group: None,
            merge_group: None,
            student_count: 50,
            lab_department: Some("Computer Science".into()),
        }
    }

    #[test]
    fn event_key_falls_back_to_own_id_when_unmerged() {
        assert_eq!(subject().event_key(), "bsc-cs-3-algo");
    }

    #[test]
    fn event_key_uses_merge_group_when_present() {
        let mut s = subject();
        s.merge_group = Some(MergeGroupId("G1".into()));
        assert_eq!(s.event_key(), "MERGE_G1");
    }

    #[test]
    fn year_derives_from_semester() {
        assert_eq!(subject().year(), 2);
    }
}
