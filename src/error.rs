use thiserror::Error;

/// Domain-specific errors, grouped by the taxonomy in spec.md §7.
#[derive(Error, Debug)]
pub enum TimetableError {
    // Input-structure errors
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON in '{file}': {message}")]
    JsonParse { file: String, message: String },

    #[error("row {row}: missing required field '{field}'")]
    MissingField { row: usize, field: String },

    #[error("row {row}: unparseable hours tuple '{value}'")]
    UnparseableHours { row: usize, value: String },

    #[error("row {row}: teacher/hour pipe-count mismatch ({teachers} teachers, {hours} hour partitions)")]
    PipeCountMismatch { row: usize, teachers: usize, hours: usize },

    #[error("row {row}: unknown teacher '{teacher}'")]
    UnknownTeacher { row: usize, teacher: String },

    #[error("row {row}: unknown course '{course}'")]
    UnknownCourse { row: usize, course: String },

    #[error("row {row}: category '{category}' not offered in year {year}")]
    CategoryDisallowedForYear { row: usize, category: String, year: u8 },

    #[error("row {row}: section required but absent for repeated subject '{subject}'")]
    SectionRequired { row: usize, subject: String },

    #[error("row {row}: taught hours exceed category requirement for '{subject}'")]
    TaughtHoursExceedRequirement { row: usize, subject: String },

    // Config-mismatch errors
    #[error("course '{course}' declares {declared} sections for semester {semester} but input implies {derived}")]
    SectionCountMismatch { course: String, semester: u8, declared: u8, derived: u8 },

    #[error("missing student strength for (course={course}, semester={semester}, section={section:?})")]
    MissingStudentStrength { course: String, semester: u8, section: Option<char> },

    // Feasibility-guard errors
    #[error("teacher '{teacher}' overloaded: {hours} hours taught, cap is {cap}")]
    TeacherOverload { teacher: String, hours: f64, cap: u32 },

    #[error("reserved window for category '{category}' overflows: {required} hours required, {available} slot-instances available")]
    ReservedWindowOverflow { category: String, required: u32, available: u32 },

    #[error("classroom/lab shortage for non-reserved categories: {required} sessions required, {available} available")]
    RoomShortage { required: u32, available: u32 },

    #[error("insufficient consecutive-slot pairs for practicals: {required} sessions required, {available} pairs available")]
    ConsecutivePairShortage { required: u32, available: u32 },

    #[error("feasibility audit failed with {} blocking error(s): {}", .errors.len(), .errors.join("; "))]
    FeasibilityFailed { errors: Vec<String> },

    #[error("no room available for subject '{subject}' ({kind}) at {period}: every fitting room is already booked")]
    RoomUnavailable { subject: String, kind: String, period: String },

    // Solver errors
    #[error("solver reported the model is infeasible")]
    Infeasible,

    #[error("solver model is invalid: {0}")]
    ModelInvalid(String),

    #[error("solver timed out after {seconds}s without an incumbent")]
    SolverTimeout { seconds: u32 },

    #[error("solver backend failed: {0}")]
    SolverFailed(String),
}

/// Use anyhow::Result at application boundaries, matching the
/// teacher's crate-boundary convention.
pub type Result<T> = anyhow::Result<T>;
