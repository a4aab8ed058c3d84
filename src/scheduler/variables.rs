//! Variable Factory: computes the permitted-period set for every
//! scheduling event and creates the decision variables the Constraint
//! Assembler and Objective Builder build on top of.
//!
//! One binary decision variable per (event, kind, candidate start
//! period). Lecture and tutorial sessions are always one hour long.
//! Practical sessions are modeled as "blocks" of length one or two
//! hours; length-one blocks only exist when the consecutive-practical
//! constraint is switched off (`TimetableConfig::optional_constraints`),
//! matching the isolated-practical Open Question resolution.

use crate::config::TimetableConfig;
use crate::types::{Catalog, Event, Period, SubjectCategory};
use good_lp::{variable, Variable};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BlockKind {
    Lecture,
    Tutorial,
    Practical,
}

/// A single candidate placement: which kind, which periods it spans.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Candidate {
    pub kind: BlockKind,
    pub start: Period,
    pub len: u8,
}

impl Candidate {
    pub fn periods(&self) -> Vec<Period> {
        if self.len == 1 {
            vec![self.start]
        } else {
            vec![self.start, Period::new(self.start.day, self.start.slot + 1)]
        }
    }
}

/// Every decision variable, keyed by (event key, candidate).
pub struct EventVars {
    pub vars: BTreeMap<(String, Candidate), Variable>,
    /// Candidates available to each event, in the same deterministic order
    /// variables were created in.
    pub candidates: BTreeMap<String, Vec<Candidate>>,
}

impl EventVars {
    pub fn get(&self, event_key: &str, candidate: &Candidate) -> Option<Variable> {
        self.vars.get(&(event_key.to_string(), candidate.clone())).copied()
    }
}

/// Non-reserved slots available to `CoreReq`/`Elective` events in a
/// given academic year: every grid slot minus every reserved window
/// that applies to that year.
pub fn permitted_open_periods(config: &TimetableConfig, year: u8) -> Vec<Period> {
    let reserved = config.reserved_union_for_year(year);
    config
        .time_grid
        .all_periods()
        .into_iter()
        .filter(|p| !reserved.contains(p))
        .collect()
}

/// When the early-completion optional constraint is on, drop the
/// final slot of each day from the non-reserved candidate set so the
/// week's timetable finishes one hour earlier across the board.
fn apply_early_completion(config: &TimetableConfig, periods: Vec<Period>) -> Vec<Period> {
    if !config.optional_constraints.early_completion {
        return periods;
    }
    let last_slot = config.time_grid.slots_per_day.saturating_sub(1);
    periods.into_iter().filter(|p| p.slot != last_slot).collect()
}

/// Candidate one-hour starts within a period set.
fn single_hour_candidates(kind: BlockKind, periods: &[Period]) -> Vec<Candidate> {
    periods
        .iter()
        .map(|&start| Candidate { kind, start, len: 1 })
        .collect()
}

/// Candidate two-hour block starts: both `start` and its successor
/// must be in the permitted set.
fn two_hour_candidates(kind: BlockKind, periods: &[Period]) -> Vec<Candidate> {
    let set: std::collections::BTreeSet<Period> = periods.iter().copied().collect();
    periods
        .iter()
        .filter(|&&start| set.contains(&Period::new(start.day, start.slot + 1)))
        .map(|&start| Candidate { kind, start, len: 2 })
        .collect()
}

/// The candidate placements permitted for one event, given its
/// representative subject's category and whether it carries a lab
/// component.
pub fn candidates_for_event(config: &TimetableConfig, event: &Event<'_>) -> Vec<Candidate> {
    let subject = event.representative();
    let year = subject.year();
    let mut out = Vec::new();

    let theory_periods = if subject.category == SubjectCategory::GenericElective {
        config.ge_lecture_window.clone()
    } else if subject.category.is_reserved() {
        config.reserved_windows.get(&subject.category).cloned().unwrap_or_default()
    } else {
        apply_early_completion(config, permitted_open_periods(config, year))
    };

    if subject.taught.lecture > 0 {
        out.extend(single_hour_candidates(BlockKind::Lecture, &theory_periods));
    }
    if subject.taught.tutorial > 0 {
        out.extend(single_hour_candidates(BlockKind::Tutorial, &theory_periods));
    }

    if subject.taught.practical > 0 {
        let practical_periods = if subject.category == SubjectCategory::GenericElective {
            // GE practicals may use the dedicated lab window (no
            // penalty) or fall back to the lecture window (penalized
            // in the objective as a misuse of the lecture slot).
            let mut periods = config.ge_lab_window.clone();
            periods.extend(config.ge_lecture_window.iter().copied());
            periods
        } else if subject.category.is_reserved() {
            config.reserved_windows.get(&subject.category).cloned().unwrap_or_default()
        } else {
            apply_early_completion(config, permitted_open_periods(config, year))
        };

        out.extend(two_hour_candidates(BlockKind::Practical, &practical_periods));
        if !config.optional_constraints.practical_consecutive {
            out.extend(single_hour_candidates(BlockKind::Practical, &practical_periods));
        }
    }

    out.sort();
    out.dedup();
    out
}

/// Build one binary variable per (event, candidate) across the whole
/// catalog. Iteration order follows `Catalog::events()`, which is
/// itself deterministic (`BTreeSet`-guarded first-seen order).
pub fn build_variables(
    vars: &mut good_lp::ProblemVariables,
    catalog: &Catalog,
    config: &TimetableConfig,
) -> EventVars {
    let mut out = EventVars { vars: BTreeMap::new(), candidates: BTreeMap::new() };

    for event in catalog.events() {
        let key = event.key();
        let candidates = candidates_for_event(config, &event);
        for candidate in &candidates {
            let v = vars.add(variable().binary());
            out.vars.insert((key.clone(), candidate.clone()), v);
        }
        out.candidates.insert(key, candidates);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CourseId, HourTuple, Subject, SubjectId, TeacherId};

    fn subject(category: SubjectCategory, lecture: u8, practical: u8) -> Subject {
        Subject {
            id: SubjectId("s1".into()),
            course: CourseId("c1".into()),
            semester: 1,
            section: Some('A'),
            name: "X".into(),
            category,
            department: "CS".into(),
            has_lab: practical > 0,
            required: HourTuple { lecture, tutorial: 0, practical },
            taught: HourTuple { lecture, tutorial: 0, practical },
            primary_teacher: TeacherId("T1".into()),
            co_teachers: vec![],
            split_group: None,
            merge_group: None,
            student_count: 40,
            lab_department: None,
        }
    }

    #[test]
    fn core_req_gets_candidates_outside_reserved_windows() {
        let config = TimetableConfig::default();
        let s = subject(SubjectCategory::CoreReq, 3, 0);
        let event = Event::Single(&s);
        let candidates = candidates_for_event(&config, &event);
        assert!(!candidates.is_empty());
        let reserved = config.reserved_union_for_year(1);
        assert!(candidates.iter().all(|c| !reserved.contains(&c.start)));
    }

    #[test]
    fn practical_candidates_are_two_hours_by_default() {
        let config = TimetableConfig::default();
        let s = subject(SubjectCategory::CoreReq, 0, 4);
        let event = Event::Single(&s);
        let candidates = candidates_for_event(&config, &event);
        assert!(candidates.iter().all(|c| c.len == 2));
    }

    #[test]
    fn ge_practicals_may_fall_back_to_lecture_window() {
        let config = TimetableConfig::default();
        let s = subject(SubjectCategory::GenericElective, 0, 4);
        let event = Event::Single(&s);
        let candidates = candidates_for_event(&config, &event);
        assert!(candidates.iter().any(|c| config.ge_lecture_window.contains(&c.start)));
    }
}
