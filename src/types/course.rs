use super::CourseId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A degree program: a long name, short code, and per-semester section
/// counts. Student strength is keyed by "semester:section" (e.g.
/// "3:A") rather than a tuple, since serde_json map keys must be
/// string-like.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    #[serde(default)]
    pub sections_per_semester: BTreeMap<u8, u8>,
    #[serde(default)]
    pub strength: BTreeMap<String, u32>,
}

impl Course {
    pub fn section_count(&self, semester: u8) -> u8 {
        self.sections_per_semester.get(&semester).copied().unwrap_or(0)
    }

    pub fn section_letters(&self, semester: u8) -> Vec<char> {
        (0..self.section_count(semester))
            .map(|i| (b'A' + i) as char)
            .collect()
    }

    fn strength_key(semester: u8, section: char) -> String {
        format!("{semester}:{section}")
    }

    pub fn student_strength(&self, semester: u8, section: char) -> Option<u32> {
        self.strength.get(&Self::strength_key(semester, section)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_letters_expand_in_order() {
        let mut sections = BTreeMap::new();
        sections.insert(3u8, 3u8);
        let course = Course {
            id: CourseId("bsc-cs".into()),
            name: "B.Sc. Computer Science".into(),
            sections_per_semester: sections,
            strength: BTreeMap::default(),
        };
        assert_eq!(course.section_letters(3), vec!['A', 'B', 'C']);
        assert_eq!(course.section_letters(4), Vec::<char>::new());
    }
}
