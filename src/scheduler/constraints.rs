//! Constraint Assembler: the always-on hard constraints every
//! solution must satisfy, plus the optional constraints toggled via
//! `TimetableConfig::optional_constraints`.
//!
//! Room-level no-clash is deliberately left out of this ILP: rooms are
//! resolved by the Room Fitter as a second, deterministic pass after
//! the timetable's shape is fixed (see `scheduler::rooms`). Keeping
//! room choice out of the search space keeps one binary variable per
//! (event, candidate) instead of per (event, candidate, room), which
//! would multiply the model size by the room count for no change in
//! the properties this search actually needs to guarantee: the two
//! matching invariants (capacity fit, department fit) that room choice
//! governs are scored and iterated to a local optimum afterward. The
//! Room Fitter itself enforces the one hard room property this search
//! can't see (no two events in the same room at the same time) and now
//! hard-fails rather than silently overbooking when it runs out of fit.

use super::variables::{BlockKind, Candidate, EventVars};
use crate::types::{Catalog, Event, Period};
use good_lp::{constraint, Expression, SolverModel};
use std::collections::BTreeMap;

/// `(subject's course+semester+section) -> events that cohort attends`.
fn cohort_key(course: &str, semester: u8, section: Option<char>) -> String {
    match section {
        Some(c) => format!("{course}-S{semester}-{c}"),
        None => format!("{course}-S{semester}"),
    }
}

/// Sum of every candidate variable (for the given event) whose span
/// covers `period`.
fn occupancy_at(vars: &EventVars, event_key: &str, period: Period) -> Expression {
    vars.candidates
        .get(event_key)
        .into_iter()
        .flatten()
        .filter(|c| c.periods().contains(&period))
        .filter_map(|c| vars.get(event_key, c))
        .map(Expression::from)
        .sum()
}

/// Every distinct period any candidate touches, in deterministic order.
fn all_candidate_periods(vars: &EventVars) -> Vec<Period> {
    let mut periods: std::collections::BTreeSet<Period> = std::collections::BTreeSet::new();
    for candidates in vars.candidates.values() {
        for c in candidates {
            periods.extend(c.periods());
        }
    }
    periods.into_iter().collect()
}

/// Group every event's key by an entity derived from its members (one
/// entry per cohort, or per teacher) — the shared shape behind no-clash,
/// daily-cap, and consecutive-window constraints.
fn group_events_by<F>(catalog: &Catalog, mut key_of: F) -> BTreeMap<String, Vec<String>>
where
    F: FnMut(&Event<'_>) -> Vec<String>,
{
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for event in catalog.events() {
        let event_key = event.key();
        for entity in key_of(&event) {
            groups.entry(entity).or_default().push(event_key.clone());
        }
    }
    for events in groups.values_mut() {
        events.sort();
        events.dedup();
    }
    groups
}

fn cohort_groups(catalog: &Catalog) -> BTreeMap<String, Vec<String>> {
    group_events_by(catalog, |event| {
        event.members().iter().map(|m| cohort_key(&m.course.0, m.semester, m.section)).collect()
    })
}

fn teacher_groups(catalog: &Catalog) -> BTreeMap<String, Vec<String>> {
    group_events_by(catalog, |event| {
        event.representative().present_teachers().iter().map(|t| t.0.clone()).collect()
    })
}

pub fn add_hard_constraints<P: SolverModel>(mut problem: P, catalog: &Catalog, vars: &EventVars) -> P {
    // 1. Required session counts per event per kind.
    for event in catalog.events() {
        let key = event.key();
        let subject = event.representative();
        let candidates = vars.candidates.get(&key).cloned().unwrap_or_default();

        for kind in [BlockKind::Lecture, BlockKind::Tutorial, BlockKind::Practical] {
            let required: u32 = match kind {
                BlockKind::Lecture => subject.taught.lecture as u32,
                BlockKind::Tutorial => subject.taught.tutorial as u32,
                BlockKind::Practical => subject.taught.practical as u32,
            };
            if required == 0 {
                continue;
            }
            let terms: Expression = candidates
                .iter()
                .filter(|c| c.kind == kind)
                .filter_map(|c| vars.get(&key, c).map(|v| c.len as f64 * Expression::from(v)))
                .sum();
            problem = problem.with(constraint!(terms == required as f64));
        }
    }

    let all_periods = all_candidate_periods(vars);

    // 2. Teacher no-clash: a teacher cannot be present at two events in
    //    the same period.
    for events in teacher_groups(catalog).values() {
        if events.len() < 2 {
            continue;
        }
        for &period in &all_periods {
            let sum: Expression = events.iter().map(|e| occupancy_at(vars, e, period)).sum();
            problem = problem.with(constraint!(sum <= 1));
        }
    }

    // 3. Cohort no-clash: a (course, semester, section) cohort cannot
    //    attend two events in the same period. A merged event occupies
    //    the slot for every member course's cohort simultaneously.
    for events in cohort_groups(catalog).values() {
        if events.len() < 2 {
            continue;
        }
        for &period in &all_periods {
            let sum: Expression = events.iter().map(|e| occupancy_at(vars, e, period)).sum();
            problem = problem.with(constraint!(sum <= 1));
        }
    }

    // 4. Same-subject section non-concurrency: two sections of the same
    //    (course, semester, subject name) — CoreReq/Elective only, never
    //    a merge group — cannot meet at the same time, even though they
    //    have different teachers and different cohort keys.
    let mut section_groups: BTreeMap<(String, u8, String), Vec<String>> = BTreeMap::new();
    for event in catalog.events() {
        if let Event::Single(subject) = &event {
            if subject.category.is_reserved() {
                continue;
            }
            let group_key = (subject.course.0.clone(), subject.semester, subject.name.clone());
            section_groups.entry(group_key).or_default().push(event.key());
        }
    }
    for events in section_groups.values() {
        let mut events = events.clone();
        events.sort();
        events.dedup();
        if events.len() < 2 {
            continue;
        }
        for &period in &all_periods {
            let sum: Expression = events.iter().map(|e| occupancy_at(vars, e, period)).sum();
            problem = problem.with(constraint!(sum <= 1));
        }
    }

    problem
}

/// Optional per-day hour caps, applied independently to student cohorts
/// (`max_daily_hours_students`) and teachers (`max_daily_hours_teachers`).
pub fn add_daily_hour_caps<P: SolverModel>(
    problem: P,
    catalog: &Catalog,
    vars: &EventVars,
    max_daily_hours_students: Option<u8>,
    max_daily_hours_teachers: Option<u8>,
) -> P {
    let mut problem = problem;
    if let Some(cap) = max_daily_hours_students {
        problem = apply_daily_cap(problem, &cohort_groups(catalog), vars, cap);
    }
    if let Some(cap) = max_daily_hours_teachers {
        problem = apply_daily_cap(problem, &teacher_groups(catalog), vars, cap);
    }
    problem
}

fn apply_daily_cap<P: SolverModel>(
    mut problem: P,
    events_by_entity: &BTreeMap<String, Vec<String>>,
    vars: &EventVars,
    cap: u8,
) -> P {
    let all_periods = all_candidate_periods(vars);
    for events in events_by_entity.values() {
        for day in crate::types::Day::ALL {
            let day_periods: Vec<Period> = all_periods.iter().copied().filter(|p| p.day == day).collect();
            let sum: Expression =
                events.iter().flat_map(|e| day_periods.iter().map(move |&p| occupancy_at(vars, e, p))).sum();
            problem = problem.with(constraint!(sum <= cap as f64));
        }
    }
    problem
}

/// Optional max-consecutive-classes window: across any `k+1` contiguous
/// same-day slots, a cohort (or a teacher) may be occupied in at most
/// `k` of them — applied to both students and teachers.
pub fn add_max_consecutive_constraints<P: SolverModel>(
    problem: P,
    catalog: &Catalog,
    vars: &EventVars,
    max_consecutive_classes: Option<u8>,
    slots_per_day: u8,
) -> P {
    let Some(k) = max_consecutive_classes else { return problem };
    let window = k.saturating_add(1);
    if window == 0 || window > slots_per_day {
        return problem;
    }

    let problem = apply_consecutive_window(problem, &cohort_groups(catalog), vars, k, window, slots_per_day);
    apply_consecutive_window(problem, &teacher_groups(catalog), vars, k, window, slots_per_day)
}

fn apply_consecutive_window<P: SolverModel>(
    mut problem: P,
    events_by_entity: &BTreeMap<String, Vec<String>>,
    vars: &EventVars,
    k: u8,
    window: u8,
    slots_per_day: u8,
) -> P {
    for events in events_by_entity.values() {
        if events.is_empty() {
            continue;
        }
        for day in crate::types::Day::ALL {
            for start_slot in 0..=(slots_per_day - window) {
                let window_periods: Vec<Period> =
                    (start_slot..start_slot + window).map(|s| Period::new(day, s)).collect();
                let sum: Expression = events
                    .iter()
                    .flat_map(|e| window_periods.iter().map(move |&p| occupancy_at(vars, e, p)))
                    .sum();
                problem = problem.with(constraint!(sum <= k as f64));
            }
        }
    }
    problem
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cohort_key_includes_section_when_present() {
        assert_eq!(cohort_key("bsc-cs", 3, Some('A')), "bsc-cs-S3-A");
        assert_eq!(cohort_key("COMMON", 1, None), "COMMON-S1");
    }

    #[test]
    fn candidate_periods_reports_both_hours_of_a_block() {
        use crate::types::{Day, Period};
        let c = Candidate { kind: BlockKind::Practical, start: Period::new(Day::Mon, 0), len: 2 };
        assert_eq!(c.periods(), vec![Period::new(Day::Mon, 0), Period::new(Day::Mon, 1)]);
    }
}
