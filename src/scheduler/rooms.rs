//! Room Fitter: assigns a physical room to every scheduled class-hour
//! once the weekly shape is fixed by the Search Driver. Greedy,
//! deterministic, best-fit-first — adapted from the teacher's original
//! room-assignment phase, generalized from a single capacity check to
//! the fit-penalty/department model this catalog needs, and run after
//! time assignment rather than before it, since here the hard part
//! (teacher/cohort no-clash) is what the ILP solves.

use crate::config::TimetableConfig;
use crate::types::{ClassKind, Period, Room, RoomId, RoomKind, SubjectCategory};
use std::collections::{BTreeSet, HashMap};

pub struct RoomRequest<'a> {
    pub department: &'a str,
    pub has_lab: bool,
    pub category: SubjectCategory,
    pub kind: ClassKind,
    pub student_count: u32,
    pub periods: &'a [Period],
}

pub struct RoomFitter<'a> {
    rooms: Vec<&'a Room>,
    occupied: HashMap<&'a RoomId, BTreeSet<Period>>,
}

impl<'a> RoomFitter<'a> {
    pub fn new(config: &'a TimetableConfig) -> Self {
        Self { rooms: config.rooms.iter().collect(), occupied: HashMap::new() }
    }

    /// Assign the best-fit available room for a request, tracking its
    /// occupancy so later requests cannot double-book it. Returns the
    /// chosen room, its fit penalty, and fit direction (0.0/Exact for
    /// an exact fit).
    pub fn assign(&mut self, request: &RoomRequest<'_>) -> Option<(&'a Room, f64, crate::types::FitDirection)> {
        let wants_lab = request.kind == ClassKind::Practical && request.has_lab;

        let mut candidates: Vec<&&Room> = self
            .rooms
            .iter()
            .filter(|r| {
                let department_ok = r.kind != RoomKind::Lab || r.fits_department(request.department);
                let available = request
                    .periods
                    .iter()
                    .all(|p| !self.occupied.get(&r.id).map(|s| s.contains(p)).unwrap_or(false));
                department_ok && available
            })
            .collect();

        // Best fit: prefer a lab for practicals, a classroom otherwise;
        // among equally-kinded rooms, the smallest non-penalizing fit.
        candidates.sort_by_key(|r| {
            let kind_mismatch = if wants_lab { r.kind != RoomKind::Lab } else { r.kind == RoomKind::Lab };
            let (penalty, _) = r.fit_penalty(request.student_count);
            (kind_mismatch, (penalty * 100.0) as i64, r.id.0.clone())
        });

        let chosen = candidates.into_iter().next()?;
        for &period in request.periods {
            self.occupied.entry(&chosen.id).or_default().insert(period);
        }
        let (penalty, direction) = chosen.fit_penalty(request.student_count);
        Some((chosen, penalty, direction))
    }
}

/// Penalty contribution a chosen room adds to the run's reported
/// objective breakdown: `room_undersized`/`room_oversized` from
/// `Room::fit_penalty`, plus `theory_in_lab` when a non-practical class
/// lands in a lab room for lack of a free classroom.
pub fn room_weighted_penalty(
    config: &TimetableConfig,
    kind: ClassKind,
    room: &Room,
    fit_penalty: f64,
    direction: crate::types::FitDirection,
) -> f64 {
    use crate::types::FitDirection;
    let mut total = 0.0;
    if fit_penalty > 0.0 {
        let weight = match direction {
            FitDirection::Undersized => config.weights.room_undersized,
            FitDirection::Oversized => config.weights.room_oversized,
            FitDirection::Exact => 0.0,
        };
        total += weight * fit_penalty;
    }
    if kind != ClassKind::Practical && room.kind == RoomKind::Lab {
        total += config.weights.theory_in_lab;
    }
    total
}
