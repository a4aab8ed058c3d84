use crate::config::TimetableConfig;
use crate::error::{Result, TimetableError};
use crate::types::{
    Catalog, Course, CourseId, HourTuple, MergeGroupId, Room, RoomId, RoomKind, SplitGroupId,
    Subject, SubjectCategory, SubjectId, Teacher, TeacherId,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// One catalog row as it arrives at the ingestion boundary (spec.md
/// §6). Separator-encoded fields (`teachers`, `hours`, a merge clause
/// in `course`) are parsed into typed values during expansion, not at
/// the JSON layer, per the "intertwined classification-and-validation"
/// re-architecture note in spec.md §9.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubjectRow {
    /// Course name, empty for reserved categories, or "A + B" to merge.
    #[serde(default)]
    pub course: String,
    pub semester: u8,
    pub subject: String,
    #[serde(default)]
    pub section: Option<char>,
    /// "AB" (single), "AB,CD" (co-teaching), or "AB|CD" (split teaching).
    pub teachers: String,
    /// "Le,Tu,Pr" (raw sessions, not yet doubled), or pipe-separated
    /// parallel to `teachers` for split teaching.
    pub hours: String,
    pub department: String,
    pub category: String,
    #[serde(default)]
    pub has_lab: bool,
    /// Single count, or "+"-joined parallel to a merge clause.
    #[serde(default)]
    pub student_counts: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TeacherRow {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CourseRow {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sections_per_semester: BTreeMap<u8, u8>,
    /// "semester:section" -> strength, e.g. "3:A" -> 55.
    #[serde(default)]
    pub strength: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoomRow {
    pub id: String,
    pub kind: String,
    pub capacity_min: u32,
    pub capacity_max: u32,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub floor: u8,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CatalogInput {
    pub subjects: Vec<SubjectRow>,
    pub teachers: Vec<TeacherRow>,
    #[serde(default)]
    pub courses: Vec<CourseRow>,
    #[serde(default)]
    pub rooms: Vec<RoomRow>,
}

pub fn load_catalog_input(dir: &Path) -> Result<CatalogInput> {
    load_json_file(&dir.join("catalog.json"))
}

pub fn load_config_or_default(dir: &Path) -> TimetableConfig {
    let path = dir.join("config.toml");
    if path.exists() {
        match fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => TimetableConfig::default(),
        }
    } else {
        TimetableConfig::default()
    }
}

fn load_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let path_str = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| TimetableError::FileRead {
        path: path_str.clone(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| {
        TimetableError::JsonParse {
            file: path_str,
            message: e.to_string(),
        }
        .into()
    })
}

fn parse_hour_tuple(row: usize, s: &str) -> Result<HourTuple> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(TimetableError::UnparseableHours { row, value: s.to_string() }.into());
    }
    let mut values = [0u8; 3];
    for (i, part) in parts.iter().enumerate() {
        values[i] = part
            .trim()
            .parse()
            .map_err(|_| TimetableError::UnparseableHours { row, value: s.to_string() })?;
    }
    Ok(HourTuple {
        lecture: values[0],
        tutorial: values[1],
        // Practical sessions are two hours each (data_loader.py's pr*2
        // convention); stored in hours throughout the rest of the crate.
        practical: values[2] * 2,
    })
}

fn subject_id(course: &str, semester: u8, subject: &str, section: Option<char>, teacher: &TeacherId) -> SubjectId {
    let section_part = section.map(|c| c.to_string()).unwrap_or_default();
    SubjectId(format!("{course}-S{semester}-{section_part}-{subject}-{}", teacher.0))
}

/// Expand raw rows into normalized `Subject`s: resolve merge clauses,
/// split/co-teaching, and non-reserved section expansion. Mirrors
/// `_parse_and_expand_subjects` in the source program.
pub fn expand_catalog(input: CatalogInput, config: &TimetableConfig) -> Result<Catalog> {
    let teachers: Vec<Teacher> = input
        .teachers
        .iter()
        .map(|t| Teacher { id: TeacherId(t.id.clone()), name: t.name.clone() })
        .collect();
    let teacher_ids: std::collections::HashSet<&str> =
        teachers.iter().map(|t| t.id.0.as_str()).collect();

    let courses: Vec<Course> = input
        .courses
        .iter()
        .map(|c| Course {
            id: CourseId(c.id.clone()),
            name: c.name.clone(),
            sections_per_semester: c.sections_per_semester.clone(),
            strength: c.strength.clone(),
        })
        .collect();
    let course_map: BTreeMap<&str, &Course> = courses.iter().map(|c| (c.id.0.as_str(), c)).collect();

    let rooms = if input.rooms.is_empty() {
        config.rooms.clone()
    } else {
        input
            .rooms
            .iter()
            .map(|r| {
                Ok(Room {
                    id: RoomId(r.id.clone()),
                    kind: match r.kind.to_lowercase().as_str() {
                        "classroom" => RoomKind::Classroom,
                        "lab" => RoomKind::Lab,
                        other => return Err(TimetableError::ModelInvalid(format!("unknown room kind '{other}'")).into()),
                    },
                    capacity_min: r.capacity_min,
                    capacity_max: r.capacity_max,
                    department: r.department.clone(),
                    floor: r.floor,
                })
            })
            .collect::<Result<Vec<Room>>>()?
    };

    let mut subjects = Vec::new();
    for (row_idx, row) in input.subjects.iter().enumerate() {
        let category = SubjectCategory::from_str(&row.category)
            .map_err(|_| TimetableError::MissingField { row: row_idx, field: "category".into() })?;
        let year = SubjectCategory::year_for_semester(row.semester);
        if !category.offered_in_year(year) {
            return Err(TimetableError::CategoryDisallowedForYear {
                row: row_idx,
                category: category.token().to_string(),
                year,
            }
            .into());
        }

        let teacher_names: Vec<&str> = if row.teachers.contains('|') {
            row.teachers.split('|').map(str::trim).collect()
        } else {
            row.teachers.split(',').map(str::trim).collect()
        };
        let is_split = row.teachers.contains('|');
        for name in &teacher_names {
            if !teacher_ids.contains(name) {
                return Err(TimetableError::UnknownTeacher { row: row_idx, teacher: name.to_string() }.into());
            }
        }

        let hour_tuples: Vec<HourTuple> = if is_split {
            let parts: Vec<&str> = row.hours.split('|').collect();
            if parts.len() != teacher_names.len() {
                return Err(TimetableError::PipeCountMismatch {
                    row: row_idx,
                    teachers: teacher_names.len(),
                    hours: parts.len(),
                }
                .into());
            }
            parts
                .iter()
                .map(|p| parse_hour_tuple(row_idx, p))
                .collect::<Result<Vec<_>>>()?
        } else {
            vec![parse_hour_tuple(row_idx, &row.hours)?]
        };

        let lab_department = if row.has_lab { Some(row.department.clone()) } else { None };

        if category.is_reserved() {
            // Reserved categories use the COMMON course marker and
            // apply to every cohort of the year; they never expand by
            // section (data_loader.py treats them as single entries).
            let teacher = TeacherId(teacher_names[0].to_string());
            let co_teachers: Vec<TeacherId> =
                if is_split { vec![] } else { teacher_names[1..].iter().map(|n| TeacherId(n.to_string())).collect() };
            let required = hour_tuples[0];
            let id = subject_id("COMMON", row.semester, &row.subject, None, &teacher);
            subjects.push(Subject {
                id,
                course: CourseId("COMMON".into()),
                semester: row.semester,
                section: None,
                name: row.subject.clone(),
                category,
                department: row.department.clone(),
                has_lab: row.has_lab,
                required,
                taught: required,
                primary_teacher: teacher,
                co_teachers,
                split_group: None,
                merge_group: None,
                student_count: row.student_counts.trim().parse().unwrap_or(0),
                lab_department,
            });
            continue;
        }

        // Merge clause: "A + B" declares subjects across courses that
        // must be co-scheduled under one teacher.
        let merge_courses: Vec<&str> = row.course.split('+').map(str::trim).collect();
        let is_merge = merge_courses.len() > 1;
        let merge_group = is_merge.then(|| {
            MergeGroupId(format!("{}-S{}-{}", merge_courses.join("_"), row.semester, row.subject))
        });
        let merge_counts: Vec<u32> = row
            .student_counts
            .split('+')
            .map(|s| s.trim().parse().unwrap_or(0))
            .collect();

        for (course_idx, course_name) in merge_courses.iter().enumerate() {
            if !course_map.contains_key(*course_name) {
                return Err(TimetableError::UnknownCourse { row: row_idx, course: course_name.to_string() }.into());
            }
            let course = course_map[*course_name];
            let student_count = merge_counts.get(course_idx).copied().unwrap_or(0);

            if is_split {
                // Split teaching: one Subject row per teacher, sharing
                // a split-group id; each carries its own hour partition.
                let split_group = SplitGroupId(format!("{course_name}-S{}-{}", row.semester, row.subject));
                for (name, hours) in itertools::izip!(teacher_names.iter(), hour_tuples.iter()) {
                    let teacher = TeacherId(name.to_string());
                    let id = subject_id(course_name, row.semester, &row.subject, row.section, &teacher);
                    subjects.push(Subject {
                        id,
                        course: course.id.clone(),
                        semester: row.semester,
                        section: row.section,
                        name: row.subject.clone(),
                        category,
                        department: row.department.clone(),
                        has_lab: row.has_lab,
                        required: *hours,
                        taught: *hours,
                        primary_teacher: teacher,
                        co_teachers: vec![],
                        split_group: Some(split_group.clone()),
                        merge_group: merge_group.clone(),
                        student_count,
                        lab_department: lab_department.clone(),
                    });
                }
                continue;
            }

            let teacher = TeacherId(teacher_names[0].to_string());
            let co_teachers: Vec<TeacherId> =
                teacher_names[1..].iter().map(|n| TeacherId(n.to_string())).collect();
            let required = hour_tuples[0];

            if is_merge {
                let id = subject_id(course_name, row.semester, &row.subject, None, &teacher);
                subjects.push(Subject {
                    id,
                    course: course.id.clone(),
                    semester: row.semester,
                    section: None,
                    name: row.subject.clone(),
                    category,
                    department: row.department.clone(),
                    has_lab: row.has_lab,
                    required,
                    taught: required,
                    primary_teacher: teacher.clone(),
                    co_teachers: co_teachers.clone(),
                    split_group: None,
                    merge_group: merge_group.clone(),
                    student_count,
                    lab_department: lab_department.clone(),
                });
                continue;
            }

            // Ordinary DSC/DSE row: expand across the course's declared
            // sections for this semester.
            let sections = course.section_letters(row.semester);
            if sections.is_empty() {
                return Err(TimetableError::SectionCountMismatch {
                    course: course_name.to_string(),
                    semester: row.semester,
                    declared: 0,
                    derived: 1,
                }
                .into());
            }
            for section in sections {
                let strength = course.student_strength(row.semester, section).unwrap_or(student_count);
                let id = subject_id(course_name, row.semester, &row.subject, Some(section), &teacher);
                subjects.push(Subject {
                    id,
                    course: course.id.clone(),
                    semester: row.semester,
                    section: Some(section),
                    name: row.subject.clone(),
                    category,
                    department: row.department.clone(),
                    has_lab: row.has_lab,
                    required,
                    taught: required,
                    primary_teacher: teacher.clone(),
                    co_teachers: co_teachers.clone(),
                    split_group: None,
                    merge_group: None,
                    student_count: strength,
                    lab_department: lab_department.clone(),
                });
            }
        }
    }

    Ok(Catalog { subjects, teachers, rooms, courses })
}

pub fn load_catalog_from_dir(dir: &Path, config: &TimetableConfig) -> Result<Catalog> {
    let input = load_catalog_input(dir)?;
    expand_catalog(input, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TimetableConfig {
        TimetableConfig::default()
    }

    fn base_input() -> CatalogInput {
        CatalogInput {
            teachers: vec![
                TeacherRow { id: "T1".into(), name: "Teacher One".into() },
                TeacherRow { id: "T2".into(), name: "Teacher Two".into() },
            ],
            courses: vec![CourseRow {
                id: "bsc-cs".into(),
                name: "B.Sc. Computer Science".into(),
                sections_per_semester: BTreeMap::from([(1u8, 1u8)]),
                strength: BTreeMap::from([("1:A".to_string(), 50u32)]),
            }],
            rooms: vec![],
            subjects: vec![],
        }
    }

    #[test]
    fn expands_core_req_by_section() {
        let mut input = base_input();
        input.subjects.push(SubjectRow {
            course: "bsc-cs".into(),
            semester: 1,
            subject: "Algorithms".into(),
            section: None,
            teachers: "T1".into(),
            hours: "3,1,0".into(),
            department: "CS".into(),
            category: "DSC".into(),
            has_lab: false,
            student_counts: String::new(),
        });
        let catalog = expand_catalog(input, &config()).unwrap();
        assert_eq!(catalog.subjects.len(), 1);
        assert_eq!(catalog.subjects[0].student_count, 50);
        assert_eq!(catalog.subjects[0].section, Some('A'));
    }

    #[test]
    fn doubles_practical_hours() {
        let mut input = base_input();
        input.subjects.push(SubjectRow {
            course: "bsc-cs".into(),
            semester: 1,
            subject: "Lab Work".into(),
            section: None,
            teachers: "T1".into(),
            hours: "0,0,2".into(),
            department: "CS".into(),
            category: "DSC".into(),
            has_lab: true,
            student_counts: String::new(),
        });
        let catalog = expand_catalog(input, &config()).unwrap();
        assert_eq!(catalog.subjects[0].required.practical, 4);
    }

    #[test]
    fn split_teaching_creates_one_subject_per_teacher() {
        let mut input = base_input();
        input.subjects.push(SubjectRow {
            course: "bsc-cs".into(),
            semester: 1,
            subject: "Seminar".into(),
            section: Some('A'),
            teachers: "T1|T2".into(),
            hours: "2,0,0|1,0,0".into(),
            department: "CS".into(),
            category: "DSC".into(),
            has_lab: false,
            student_counts: String::new(),
        });
        let catalog = expand_catalog(input, &config()).unwrap();
        assert_eq!(catalog.subjects.len(), 2);
        assert!(catalog.subjects.iter().all(|s| s.split_group.is_some()));
        assert_eq!(catalog.subjects[0].required.lecture, 2);
        assert_eq!(catalog.subjects[1].required.lecture, 1);
    }

    #[test]
    fn reserved_category_uses_common_marker() {
        let mut input = base_input();
        input.subjects.push(SubjectRow {
            course: String::new(),
            semester: 1,
            subject: "Environmental Science".into(),
            section: None,
            teachers: "T1".into(),
            hours: "3,0,0".into(),
            department: "Env".into(),
            category: "GE".into(),
            has_lab: false,
            student_counts: "0".into(),
        });
        let catalog = expand_catalog(input, &config()).unwrap();
        assert_eq!(catalog.subjects[0].course.0, "COMMON");
    }
}
