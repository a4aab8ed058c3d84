use crate::config::TimetableConfig;
use crate::types::{Catalog, ClassKind, Solution};
use crate::validator::ValidationReport;
use colored::Colorize;

/// Generate a plain text report (with colors for terminal), laid out
/// day-by-day across the configured time grid.
pub fn generate_text_report(
    solution: &Solution,
    catalog: &Catalog,
    config: &TimetableConfig,
    validation: &ValidationReport,
) -> String {
    let mut lines = Vec::new();

    lines.push("═".repeat(60));
    lines.push("               TIMETABLE REPORT".to_string());
    lines.push("═".repeat(60));
    lines.push(String::new());

    lines.push(format!("Generated: {}", solution.generated_at));
    lines.push(format!("Outcome: {:?}", solution.statistics.outcome));
    lines.push(String::new());

    lines.push("─".repeat(40));
    lines.push("STATISTICS".to_string());
    lines.push("─".repeat(40));
    lines.push(format!("  Lectures:            {}", solution.statistics.lecture_count));
    lines.push(format!("  Tutorials:           {}", solution.statistics.tutorial_count));
    lines.push(format!("  Practical hours:     {}", solution.statistics.practical_hour_count));
    lines.push(format!("  Isolated practicals: {}", solution.statistics.isolated_practical_hours));
    lines.push(format!("  Room-fit penalty:    {:.1}", solution.statistics.room_penalty_total));
    lines.push(format!(
        "  Assistant shortages: {}",
        solution.assistant_assignments.shortages.len()
    ));
    lines.push(format!("  Score:               {:.1}/100", validation.total_score));
    lines.push(String::new());

    lines.push("─".repeat(40));
    if validation.is_valid {
        lines.push("VALIDATION: PASSED".green().to_string());
    } else {
        lines.push("VALIDATION: FAILED".red().to_string());
        for v in &validation.hard_violations {
            lines.push(format!("  ! {}: {}", v.constraint, v.message));
        }
    }
    lines.push("─".repeat(40));
    lines.push(String::new());

    lines.push("WEEKLY GRID".to_string());
    lines.push("─".repeat(40));

    for period in config.time_grid.all_periods() {
        let blocks = solution.master_schedule.at(&period);
        let occupied: Vec<_> = blocks.iter().filter(|b| !b.is_continuation).collect();
        if occupied.is_empty() {
            continue;
        }

        lines.push(format!("\n{}", config.time_grid.label(&period).bold()));
        for block in occupied {
            let kind_indicator = match block.kind {
                ClassKind::Lecture => "●".blue(),
                ClassKind::Tutorial => "●".yellow(),
                ClassKind::Practical => "●".green(),
            };
            let teacher_names: Vec<&str> = block
                .teachers_present
                .iter()
                .map(|id| catalog.teachers.iter().find(|t| &t.id == id).map(|t| t.name.as_str()).unwrap_or("TBD"))
                .collect();

            lines.push(format!(
                "  {} {} ({}) | {} | {} | Room {}",
                kind_indicator,
                block.subject,
                block.course_semester_section,
                block.kind,
                teacher_names.join(", "),
                block.room
            ));
        }
    }

    lines.push(String::new());
    lines.push("═".repeat(60));

    lines.join("\n")
}

/// Print a quick summary to stdout.
pub fn print_summary(solution: &Solution, validation: &ValidationReport) {
    println!();
    if validation.is_valid {
        println!("{}", "✓ Timetable generated successfully".green().bold());
    } else {
        println!("{}", "✗ Timetable has validation errors".red().bold());
    }
    println!();
    println!("  Lectures:    {}", solution.statistics.lecture_count);
    println!("  Tutorials:   {}", solution.statistics.tutorial_count);
    println!("  Practicals:  {} hours", solution.statistics.practical_hour_count);
    println!("  Shortages:   {}", solution.assistant_assignments.shortages.len());
    println!("  Score:       {:.1}/100", validation.total_score);
    println!();
}
