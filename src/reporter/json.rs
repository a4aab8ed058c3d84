use crate::error::Result;
use crate::types::{Solution, SummaryStatistics};

/// Generate the full JSON solution report per the output contract.
pub fn generate_json_report(solution: &Solution) -> Result<String> {
    Ok(serde_json::to_string_pretty(solution)?)
}

/// Compact summary as JSON, without the full per-period schedule.
#[derive(serde::Serialize)]
pub struct JsonSummary {
    pub statistics: SummaryStatistics,
    pub assistant_shortages: usize,
    pub teachers_scheduled: usize,
    pub generated_at: String,
}

pub fn generate_json_summary(solution: &Solution) -> Result<String> {
    let summary = JsonSummary {
        statistics: solution.statistics.clone(),
        assistant_shortages: solution.assistant_assignments.shortages.len(),
        teachers_scheduled: solution.teacher_workload.after.len(),
        generated_at: solution.generated_at.clone(),
    };

    Ok(serde_json::to_string_pretty(&summary)?)
}
