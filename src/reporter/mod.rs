mod json;
mod text;

pub use json::*;
pub use text::*;

use crate::config::TimetableConfig;
use crate::error::Result;
use crate::types::{Catalog, Solution, TeacherId};
use crate::validator::ValidationReport;
use std::fs;
use std::path::Path;

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Json,
    Text,
}

/// Generate all requested reports and write to the output directory.
pub fn generate_reports(
    solution: &Solution,
    catalog: &Catalog,
    config: &TimetableConfig,
    validation: &ValidationReport,
    output_dir: &Path,
    formats: &[OutputFormat],
) -> Result<()> {
    fs::create_dir_all(output_dir)?;

    for format in formats {
        match format {
            OutputFormat::Json => {
                let json = generate_json_report(solution)?;
                fs::write(output_dir.join("schedule.json"), json)?;
            }
            OutputFormat::Text => {
                let txt = generate_text_report(solution, catalog, config, validation);
                fs::write(output_dir.join("schedule.txt"), txt)?;
            }
        }
    }

    Ok(())
}

/// Generate a single teacher's weekly schedule.
pub fn generate_teacher_schedule(solution: &Solution, catalog: &Catalog, teacher_id: &TeacherId) -> Option<String> {
    let teacher = catalog.teachers.iter().find(|t| &t.id == teacher_id)?;

    let mut lines = vec![format!("# Schedule for {} ({})", teacher.name, teacher.id), String::new()];

    let blocks: Vec<_> = solution
        .master_schedule
        .iter()
        .filter(|(_, b)| b.teachers_present.contains(teacher_id) && !b.is_continuation)
        .collect();

    if blocks.is_empty() {
        lines.push("No classes assigned.".to_string());
    } else {
        lines.push(format!("## Teaching {} class-hours\n", blocks.len()));
        for (period, block) in blocks {
            lines.push(format!(
                "- **{}** ({}): {} {} - Room {}",
                block.subject, block.course_semester_section, period, block.kind, block.room
            ));
        }
    }

    Some(lines.join("\n"))
}

/// Generate a single cohort's (course, semester, section) weekly schedule.
pub fn generate_cohort_schedule(solution: &Solution, cohort: &str) -> Option<String> {
    let blocks: Vec<_> = solution
        .master_schedule
        .iter()
        .filter(|(_, b)| b.course_semester_section == cohort && !b.is_continuation)
        .collect();

    if blocks.is_empty() {
        return None;
    }

    let mut lines = vec![format!("# Schedule for {cohort}"), String::new()];
    for (period, block) in blocks {
        lines.push(format!("- {period}: {} ({}) - Room {}", block.subject, block.kind, block.room));
    }

    Some(lines.join("\n"))
}
