//! Objective Builder: the weighted penalty terms scored over the
//! timetable's *shape* (which periods each event lands in). Room-fit
//! penalties (`room_undersized`, `room_oversized`, `theory_in_lab`) are
//! scored separately by the Room Fitter once the shape is fixed — see
//! `scheduler::constraints` for why room choice is kept out of this
//! search. The objective built here therefore covers the remaining
//! four weights: `isolated_practical`, `ge_lecture_slot_misuse`,
//! `day_usage`, and `latest_slot`.

use super::variables::{BlockKind, EventVars};
use crate::config::TimetableConfig;
use crate::types::{Catalog, Day, SubjectCategory};
use good_lp::{variable, Expression, ProblemVariables, Variable};

pub struct ObjectiveTerms {
    pub expression: Expression,
    /// Auxiliary integer variable bounding the latest slot index used
    /// anywhere in the week; exposed so the Search Driver can read it
    /// back for `SummaryStatistics::latest_slot_used`.
    pub latest_slot_used: Variable,
}

pub fn build_objective(
    vars: &mut ProblemVariables,
    catalog: &Catalog,
    config: &TimetableConfig,
    event_vars: &EventVars,
) -> ObjectiveTerms {
    let mut expression = Expression::default();
    let weights = &config.weights;

    let max_slot = config.time_grid.slots_per_day.saturating_sub(1) as f64;
    let latest_slot_used = vars.add(variable().min(0.0).max(max_slot));

    for event in catalog.events() {
        let key = event.key();
        let subject = event.representative();
        let Some(candidates) = event_vars.candidates.get(&key) else { continue };

        for candidate in candidates {
            let Some(v) = event_vars.get(&key, candidate) else { continue };

            if candidate.kind == BlockKind::Practical && candidate.len == 1 {
                expression += weights.isolated_practical * v;
            }

            if subject.category == SubjectCategory::GenericElective
                && candidate.kind == BlockKind::Practical
                && config.ge_lecture_window.contains(&candidate.start)
            {
                expression += weights.ge_lecture_slot_misuse * v;
            }

            if !subject.category.is_reserved() && candidate.start.day == Day::Sat {
                expression += weights.day_usage * v;
            }

            // latest_slot_used >= slot index of every period this
            // candidate occupies, enforced below via a big-M constraint
            // per candidate; here we just record the contribution.
            let _ = max_slot;
        }
    }

    expression += weights.latest_slot * latest_slot_used;

    ObjectiveTerms { expression, latest_slot_used }
}

/// Big-M constraints tying `latest_slot_used` to every occupied
/// candidate: `latest_slot_used >= slot - M*(1 - occ)`. Kept separate
/// from `build_objective` because it needs `SolverModel::with`, which
/// is only available after `vars.minimise(...)` has produced a problem.
pub fn add_latest_slot_constraints<P: good_lp::SolverModel>(
    mut problem: P,
    catalog: &Catalog,
    event_vars: &EventVars,
    latest_slot_used: Variable,
    slots_per_day: u8,
) -> P {
    use good_lp::constraint;

    let big_m = slots_per_day as f64;
    for event in catalog.events() {
        let key = event.key();
        let Some(candidates) = event_vars.candidates.get(&key) else { continue };
        for candidate in candidates {
            let Some(v) = event_vars.get(&key, candidate) else { continue };
            for period in candidate.periods() {
                let slot = period.slot as f64;
                problem = problem.with(constraint!(
                    latest_slot_used >= slot - big_m * (1.0 - v)
                ));
            }
        }
    }
    problem
}
