use crate::error::Result;
use crate::types::{Catalog, RoomKind};
use std::collections::HashSet;

/// Validation result with collected errors.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }
}

/// Cross-reference checks that only make sense once the full catalog
/// is assembled (duplicate ids, dangling teacher references, missing
/// strengths) — complementary to the per-row checks already enforced
/// during expansion in `parser::json::expand_catalog`.
pub fn validate_catalog(catalog: &Catalog) -> Result<ValidationResult> {
    let mut result = ValidationResult::default();

    check_duplicate_ids(catalog, &mut result);
    check_dangling_teacher_refs(catalog, &mut result);
    check_missing_strengths(catalog, &mut result);
    check_room_shortage(catalog, &mut result);

    if !result.is_valid() {
        return Err(anyhow::anyhow!(
            "Catalog validation failed with {} errors:\n{}",
            result.errors.len(),
            result.errors.join("\n")
        ));
    }

    Ok(result)
}

fn check_duplicate_ids(catalog: &Catalog, result: &mut ValidationResult) {
    let mut seen = HashSet::new();
    for subject in &catalog.subjects {
        if !seen.insert(&subject.id) {
            result.add_error(format!("Duplicate subject ID: '{}'", subject.id));
        }
    }

    let mut seen = HashSet::new();
    for teacher in &catalog.teachers {
        if !seen.insert(&teacher.id) {
            result.add_error(format!("Duplicate teacher ID: '{}'", teacher.id));
        }
    }

    let mut seen = HashSet::new();
    for course in &catalog.courses {
        if !seen.insert(&course.id) {
            result.add_error(format!("Duplicate course ID: '{}'", course.id));
        }
    }

    let mut seen = HashSet::new();
    for room in &catalog.rooms {
        if !seen.insert(&room.id) {
            result.add_error(format!("Duplicate room ID: '{}'", room.id));
        }
    }
}

fn check_dangling_teacher_refs(catalog: &Catalog, result: &mut ValidationResult) {
    let known: HashSet<&str> = catalog.teachers.iter().map(|t| t.id.0.as_str()).collect();
    for subject in &catalog.subjects {
        if !known.contains(subject.primary_teacher.0.as_str()) {
            result.add_error(format!(
                "Subject '{}' references unknown primary teacher '{}'",
                subject.id, subject.primary_teacher
            ));
        }
        for co in &subject.co_teachers {
            if !known.contains(co.0.as_str()) {
                result.add_error(format!("Subject '{}' references unknown co-teacher '{}'", subject.id, co));
            }
        }
    }
}

fn check_missing_strengths(catalog: &Catalog, result: &mut ValidationResult) {
    for subject in &catalog.subjects {
        if subject.student_count == 0 && !subject.category.is_reserved() {
            result.add_warning(format!(
                "Subject '{}' (course {}, semester {}) has zero recorded student strength",
                subject.id, subject.course, subject.semester
            ));
        }
    }
}

fn check_room_shortage(catalog: &Catalog, result: &mut ValidationResult) {
    if catalog.rooms.is_empty() {
        result.add_error("No rooms available in catalog".to_string());
        return;
    }
    let labs_needed = catalog.subjects.iter().any(|s| s.has_lab);
    let has_lab_room = catalog.rooms.iter().any(|r| matches!(r.kind, RoomKind::Lab));
    if labs_needed && !has_lab_room {
        result.add_warning("Catalog has practical subjects but no lab rooms".to_string());
    }
}
