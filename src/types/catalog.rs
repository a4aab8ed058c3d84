use super::{Course, MergeGroupId, Room, SplitGroupId, Subject, SubjectId, Teacher};
use std::collections::BTreeMap;

/// The normalized, validated, immutable in-memory representation built
/// once per run (spec.md §2 item 1 / §3 "Lifecycle"). Nothing downstream
/// mutates a `Catalog`; variables and constraints are read-only
/// consumers of it.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub subjects: Vec<Subject>,
    pub teachers: Vec<Teacher>,
    pub rooms: Vec<Room>,
    pub courses: Vec<Course>,
}

impl Catalog {
    pub fn subject(&self, id: &SubjectId) -> Option<&Subject> {
        self.subjects.iter().find(|s| &s.id == id)
    }

    /// Subjects grouped by merge-group id, in first-seen order.
    pub fn merge_groups(&self) -> BTreeMap<MergeGroupId, Vec<&Subject>> {
        let mut groups: BTreeMap<MergeGroupId, Vec<&Subject>> = BTreeMap::new();
        for subject in &self.subjects {
            if let Some(group) = &subject.merge_group {
                groups.entry(group.clone()).or_default().push(subject);
            }
        }
        groups
    }

    /// Subjects grouped by split-group id.
    pub fn split_groups(&self) -> BTreeMap<SplitGroupId, Vec<&Subject>> {
        let mut groups: BTreeMap<SplitGroupId, Vec<&Subject>> = BTreeMap::new();
        for subject in &self.subjects {
            if let Some(group) = &subject.split_group {
                groups.entry(group.clone()).or_default().push(subject);
            }
        }
        groups
    }

    /// Every distinct scheduling "event": one entry per merge group
    /// (collapsing its members), plus one entry per unmerged subject.
    /// Mirrors `_get_event_id` in the source program.
    pub fn events(&self) -> Vec<Event<'_>> {
        let mut seen_groups = std::collections::BTreeSet::new();
        let mut out = Vec::new();
        for subject in &self.subjects {
            match &subject.merge_group {
                Some(group) if seen_groups.insert(group.clone()) => {
                    let members: Vec<&Subject> = self
                        .subjects
                        .iter()
                        .filter(|s| s.merge_group.as_ref() == Some(group))
                        .collect();
                    out.push(Event::Merged(group.clone(), members));
                }
                Some(_) => {}
                None => out.push(Event::Single(subject)),
            }
        }
        out
    }

    pub fn teacher_names(&self) -> BTreeMap<&str, &str> {
        self.teachers.iter().map(|t| (t.id.0.as_str(), t.name.as_str())).collect()
    }
}

#[derive(Debug, Clone)]
pub enum Event<'a> {
    Single(&'a Subject),
    Merged(MergeGroupId, Vec<&'a Subject>),
}

impl<'a> Event<'a> {
    pub fn key(&self) -> String {
        match self {
            Event::Single(s) => s.id.0.clone(),
            Event::Merged(g, _) => format!("MERGE_{}", g.0),
        }
    }

    pub fn members(&self) -> Vec<&'a Subject> {
        match self {
            Event::Single(s) => vec![s],
            Event::Merged(_, members) => members.clone(),
        }
    }

    /// Representative subject for details shared by every member
    /// (name, category, department, hour totals).
    pub fn representative(&self) -> &'a Subject {
        match self {
            Event::Single(s) => s,
            Event::Merged(_, members) => members[0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CourseId, HourTuple, SubjectCategory, TeacherId};

    fn subject(id: &str, merge: Option<&str>) -> Subject {
        Subject {
            id: SubjectId(id.into()),
            course: CourseId("c".into()),
            semester: 1,
            section: None,
            name: "X".into(),
            category: SubjectCategory::CoreReq,
            department: "D".into(),
            has_lab: false,
            required: HourTuple { lecture: 3, tutorial: 0, practical: 0 },
            taught: HourTuple { lecture: 3, tutorial: 0, practical: 0 },
            primary_teacher: TeacherId("T1".into()),
            co_teachers: vec![],
            split_group: None,
            merge_group: merge.map(|m| MergeGroupId(m.into())),
            student_count: 30,
            lab_department: None,
        }
    }

    #[test]
    fn events_collapse_merge_group_members() {
        let catalog = Catalog {
            subjects: vec![subject("a", Some("G1")), subject("b", Some("G1")), subject("c", None)],
            teachers: vec![],
            rooms: vec![],
            courses: vec![],
        };
        let events = catalog.events();
        assert_eq!(events.len(), 2);
        assert!(events.iter().any(|e| e.key() == "MERGE_G1" && e.members().len() == 2));
        assert!(events.iter().any(|e| e.key() == "c"));
    }
}
