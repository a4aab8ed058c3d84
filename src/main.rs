use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use timetable_scheduler::parser::{load_and_validate, load_config_or_default};
use timetable_scheduler::reporter::{
    generate_cohort_schedule, generate_json_summary, generate_reports, generate_teacher_schedule,
    print_summary, OutputFormat,
};
use timetable_scheduler::scheduler::generate_schedule;
use timetable_scheduler::types::{Solution, TeacherId};
use timetable_scheduler::validator::validate_solution;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "timetable-scheduler")]
#[command(about = "Constraint-based university timetable generator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run demo with sample data
    Demo,

    /// Generate a timetable from input data
    Schedule {
        /// Directory containing catalog.json and an optional config.toml
        #[arg(short, long)]
        data: PathBuf,

        /// Output directory for solution files
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Output format(s): json, text, or all
        #[arg(short, long, default_value = "all")]
        format: String,

        /// Suppress progress output, print a JSON summary only
        #[arg(short, long)]
        quiet: bool,
    },

    /// Validate an existing solution
    Validate {
        /// Path to a solution.json file
        #[arg(short, long)]
        solution: PathBuf,

        /// Directory containing the catalog this solution was built from
        #[arg(short, long)]
        data: PathBuf,

        /// Show detailed validation results
        #[arg(short, long)]
        verbose: bool,
    },

    /// Generate reports from a solved timetable
    Report {
        /// Path to a solution.json file
        #[arg(short, long)]
        solution: PathBuf,

        /// Directory containing the catalog this solution was built from
        #[arg(short, long)]
        data: PathBuf,

        /// Generate schedule for a specific teacher ID
        #[arg(long)]
        teacher: Option<String>,

        /// Generate schedule for a specific (course, semester, section) cohort
        #[arg(long)]
        cohort: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo => run_demo(),
        Commands::Schedule { data, output, format, quiet } => run_schedule(&data, &output, &format, quiet),
        Commands::Validate { solution, data, verbose } => run_validate(&solution, &data, verbose),
        Commands::Report { solution, data, teacher, cohort } => run_report(&solution, &data, teacher, cohort),
    }
}

fn run_demo() -> Result<()> {
    println!("{}", "Timetable Scheduler Demo".bold().cyan());
    println!("{}", "─".repeat(40));

    let demo_path = PathBuf::from("demos/demo");
    let output_path = PathBuf::from("output");

    if !demo_path.join("catalog.json").exists() {
        println!("{}", "Demo data not found. Creating sample data...".yellow());
        create_demo_data(&demo_path)?;
    }

    println!("Loading demo data from: {}", demo_path.display());

    let (catalog, config) = load_and_validate(&demo_path).context("Failed to load demo data")?;

    println!(
        "Loaded {} subjects, {} teachers, {} courses, {} rooms",
        catalog.subjects.len(),
        catalog.teachers.len(),
        catalog.courses.len(),
        catalog.rooms.len()
    );

    println!("\nGenerating timetable...\n");
    let solution = generate_schedule(&catalog, &config, false)?;
    let validation = validate_solution(&solution, &catalog, &config);

    print_summary(&solution, &validation);

    generate_reports(&solution, &catalog, &config, &validation, &output_path, &[OutputFormat::Json, OutputFormat::Text])?;
    println!("Reports written to: {}", output_path.display().to_string().green());

    Ok(())
}

fn run_schedule(data: &PathBuf, output: &PathBuf, format: &str, quiet: bool) -> Result<()> {
    let (catalog, config) = load_and_validate(data).context("Failed to load input data")?;

    if !quiet {
        println!(
            "Loaded {} subjects, {} teachers, {} courses, {} rooms",
            catalog.subjects.len(),
            catalog.teachers.len(),
            catalog.courses.len(),
            catalog.rooms.len()
        );
    }

    let solution = generate_schedule(&catalog, &config, quiet)?;
    let validation = validate_solution(&solution, &catalog, &config);

    let formats = parse_formats(format);
    generate_reports(&solution, &catalog, &config, &validation, output, &formats)?;

    if quiet {
        let summary = generate_json_summary(&solution)?;
        println!("{}", summary);
    } else {
        print_summary(&solution, &validation);
        println!("Reports written to: {}", output.display().to_string().green());
    }

    Ok(())
}

fn run_validate(solution_path: &PathBuf, data: &PathBuf, verbose: bool) -> Result<()> {
    let config = load_config_or_default(data);
    let (catalog, _) = load_and_validate(data)?;

    let solution_json = std::fs::read_to_string(solution_path)?;
    let solution: Solution = serde_json::from_str(&solution_json)?;

    let validation = validate_solution(&solution, &catalog, &config);

    if validation.is_valid {
        println!("{}", "✓ Timetable is valid".green().bold());
    } else {
        println!("{}", "✗ Timetable has violations".red().bold());
        for v in &validation.hard_violations {
            println!("  - {}: {}", v.constraint.red(), v.message);
        }
    }

    if verbose {
        println!("\n{}", "Soft Constraint Scores:".bold());
        for score in &validation.soft_scores {
            let pct = if score.max_score > 0.0 { (score.score / score.max_score) * 100.0 } else { 100.0 };
            println!("  {}: {:.1}% ({})", score.constraint, pct, score.details);
        }
    }

    println!("\nOverall Score: {:.1}/100", validation.total_score);

    Ok(())
}

fn run_report(solution_path: &PathBuf, data: &PathBuf, teacher: Option<String>, cohort: Option<String>) -> Result<()> {
    let (catalog, config) = load_and_validate(data)?;

    let solution_json = std::fs::read_to_string(solution_path)?;
    let solution: Solution = serde_json::from_str(&solution_json)?;

    if let Some(teacher_id) = teacher {
        let id = TeacherId(teacher_id);
        match generate_teacher_schedule(&solution, &catalog, &id) {
            Some(report) => println!("{}", report),
            None => println!("Teacher not found"),
        }
    } else if let Some(cohort) = cohort {
        match generate_cohort_schedule(&solution, &cohort) {
            Some(report) => println!("{}", report),
            None => println!("Cohort not found"),
        }
    } else {
        let validation = validate_solution(&solution, &catalog, &config);
        print_summary(&solution, &validation);
    }

    Ok(())
}

fn parse_formats(format: &str) -> Vec<OutputFormat> {
    if format == "all" {
        return vec![OutputFormat::Json, OutputFormat::Text];
    }

    format
        .split(',')
        .filter_map(|f| match f.trim().to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "text" | "txt" => Some(OutputFormat::Text),
            _ => None,
        })
        .collect()
}

fn create_demo_data(path: &PathBuf) -> Result<()> {
    std::fs::create_dir_all(path)?;

    let catalog = serde_json::json!({
        "subjects": [
            {"course": "BSc-CS", "semester": 3, "subject": "Data Structures", "section": "A", "teachers": "RK", "hours": "3,1,2", "department": "Computer Science", "category": "DSC", "has_lab": true, "student_counts": "55"},
            {"course": "BSc-CS", "semester": 3, "subject": "Discrete Mathematics", "section": "A", "teachers": "SM", "hours": "4,0,0", "department": "Computer Science", "category": "DSC", "student_counts": "55"},
            {"course": "BSc-CS", "semester": 3, "subject": "Operating Systems", "section": "A", "teachers": "AP|RK", "hours": "2,0,0|2,0,0", "department": "Computer Science", "category": "DSC", "student_counts": "55"},
            {"course": "", "semester": 3, "subject": "Environmental Science", "teachers": "NB", "hours": "2,0,0", "department": "Environmental Studies", "category": "VAC", "student_counts": "0"},
            {"course": "BSc-Phy", "semester": 3, "subject": "Classical Mechanics", "section": "A", "teachers": "TV", "hours": "3,1,2", "department": "Physics", "category": "DSC", "has_lab": true, "student_counts": "40"}
        ],
        "teachers": [
            {"id": "RK", "name": "Dr. Rekha Kumar"},
            {"id": "SM", "name": "Prof. Suresh Menon"},
            {"id": "AP", "name": "Dr. Anita Patel"},
            {"id": "NB", "name": "Dr. Nandini Basu"},
            {"id": "TV", "name": "Dr. Tariq Verma"},
            {"id": "LA", "name": "Ms. Leela Ayyar"}
        ],
        "courses": [
            {"id": "BSc-CS", "name": "B.Sc. Computer Science", "sections_per_semester": {"3": 1}, "strength": {"3:A": 55}},
            {"id": "BSc-Phy", "name": "B.Sc. Physics", "sections_per_semester": {"3": 1}, "strength": {"3:A": 40}}
        ],
        "rooms": [
            {"id": "R-101", "kind": "Classroom", "capacity_min": 30, "capacity_max": 70, "floor": 1},
            {"id": "R-102", "kind": "Classroom", "capacity_min": 30, "capacity_max": 70, "floor": 1},
            {"id": "L-201", "kind": "Lab", "capacity_min": 20, "capacity_max": 60, "department": "Computer Science", "floor": 2},
            {"id": "L-202", "kind": "Lab", "capacity_min": 20, "capacity_max": 60, "department": "Physics", "floor": 2}
        ]
    });

    std::fs::write(path.join("catalog.json"), serde_json::to_string_pretty(&catalog)?)?;

    println!("{}", "Demo data created successfully!".green());
    Ok(())
}
