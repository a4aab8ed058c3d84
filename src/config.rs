//! Immutable, start-up-built configuration. Per the source program's
//! "global/static configuration" design note, this replaces ambient
//! globals with a record that every builder takes explicitly.

use crate::types::{Day, Period, Room, RoomId, RoomKind, SubjectCategory, TimeGrid};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveWeights {
    pub room_undersized: f64,
    pub room_oversized: f64,
    pub theory_in_lab: f64,
    pub isolated_practical: f64,
    pub ge_lecture_slot_misuse: f64,
    pub day_usage: f64,
    pub latest_slot: f64,
}

impl Default for ObjectiveWeights {
    /// Magnitudes are configuration; the ordering below is the
    /// invariant spec.md §4.4 states and is preserved by construction
    /// (each tier is an order of magnitude above the next).
    fn default() -> Self {
        Self {
            room_undersized: 1_000.0,
            theory_in_lab: 100.0,
            room_oversized: 10.0,
            isolated_practical: 5.0,
            ge_lecture_slot_misuse: 2.0,
            day_usage: 0.5,
            latest_slot: 0.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionalConstraints {
    pub practical_consecutive: bool,
    pub max_consecutive_classes: Option<u8>,
    pub max_daily_hours_students: Option<u8>,
    pub max_daily_hours_teachers: Option<u8>,
    pub early_completion: bool,
}

impl Default for OptionalConstraints {
    fn default() -> Self {
        Self {
            practical_consecutive: true,
            max_consecutive_classes: Some(3),
            max_daily_hours_students: Some(6),
            max_daily_hours_teachers: Some(6),
            early_completion: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableConfig {
    pub time_grid: TimeGrid,
    /// Reserved slots per category, shared across every year the
    /// category is offered in (the source program's fixed-slot tables
    /// do not vary the window by year, only whether it applies).
    pub reserved_windows: BTreeMap<SubjectCategory, Vec<Period>>,
    /// Generic-elective lecture vs. lab sub-windows (spec.md §4.2).
    pub ge_lecture_window: Vec<Period>,
    pub ge_lab_window: Vec<Period>,
    pub rooms: Vec<Room>,
    pub max_hours_per_teacher: u32,
    pub solver_budget_seconds: u32,
    pub lab_teacher_ratio: u32,
    pub weights: ObjectiveWeights,
    pub optional_constraints: OptionalConstraints,
}

fn slots(indices: &[u8]) -> impl Iterator<Item = u8> + '_ {
    indices.iter().copied()
}

impl Default for TimetableConfig {
    fn default() -> Self {
        let time_grid = TimeGrid {
            days: Day::ALL.to_vec(),
            slots_per_day: 9,
            slot_labels: (8..17).map(|h| format!("{h}:30-{}:30", h + 1)).collect(),
        };

        let mut reserved_windows = BTreeMap::new();

        // GE: 12:30-13:30 (slot 4), every day.
        let ge: Vec<Period> = Day::ALL.iter().map(|&d| Period::new(d, 4)).collect();
        reserved_windows.insert(SubjectCategory::GenericElective, ge.clone());

        // SEC: Fri slots 5,6; Sat slots 0,1.
        let sec: Vec<Period> = slots(&[5, 6])
            .map(|s| Period::new(Day::Fri, s))
            .chain(slots(&[0, 1]).map(|s| Period::new(Day::Sat, s)))
            .collect();
        reserved_windows.insert(SubjectCategory::Skill, sec);

        // VAC: Fri slots 7,8; Sat slots 2,3.
        let vac: Vec<Period> = slots(&[7, 8])
            .map(|s| Period::new(Day::Fri, s))
            .chain(slots(&[2, 3]).map(|s| Period::new(Day::Sat, s)))
            .collect();
        reserved_windows.insert(SubjectCategory::ValueAdded, vac);

        // AEC: Mon-Fri slot 4; Sat slots 5,6.
        let aec: Vec<Period> = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri]
            .iter()
            .map(|&d| Period::new(d, 4))
            .chain(slots(&[5, 6]).map(|s| Period::new(Day::Sat, s)))
            .collect();
        reserved_windows.insert(SubjectCategory::AbilityEnhancement, aec);

        // GE practicals may additionally use a dedicated lab window
        // (Mon-Thu, the two hours following the lecture slot) rather
        // than the single lecture slot; using the lecture slot instead
        // carries the GE-lecture-slot-misuse penalty (spec.md §4.4.3).
        let ge_lab_window: Vec<Period> = [Day::Mon, Day::Tue, Day::Wed, Day::Thu]
            .iter()
            .flat_map(|&d| [Period::new(d, 4), Period::new(d, 5)])
            .collect();

        Self {
            time_grid,
            reserved_windows,
            ge_lecture_window: ge,
            ge_lab_window,
            rooms: default_rooms(),
            max_hours_per_teacher: 16,
            solver_budget_seconds: 300,
            lab_teacher_ratio: 20,
            weights: ObjectiveWeights::default(),
            optional_constraints: OptionalConstraints::default(),
        }
    }
}

impl TimetableConfig {
    /// Union of every reserved window applicable to the given year
    /// (used to compute the non-reserved permitted-slot set).
    pub fn reserved_union_for_year(&self, year: u8) -> Vec<Period> {
        let mut out = Vec::new();
        for category in SubjectCategory::ALL {
            if category.is_reserved() && category.offered_in_year(year) {
                if let Some(win) = self.reserved_windows.get(&category) {
                    out.extend(win.iter().copied());
                }
            }
        }
        out.sort();
        out.dedup();
        out
    }

    pub fn classrooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(|r| r.kind == RoomKind::Classroom)
    }

    pub fn labs_for_department<'a>(&'a self, department: &'a str) -> impl Iterator<Item = &'a Room> {
        self.rooms
            .iter()
            .filter(move |r| r.kind == RoomKind::Lab && r.fits_department(department))
    }
}

/// Default room catalog, grounded on `ROOM_CAPACITIES`/`DEPARTMENT_LABS`
/// in the source program: 15 classrooms (capacity 60, +/-10 fit
/// window), and department labs (capacity 30, +/-3 fit window per
/// spec.md §4.4).
fn default_rooms() -> Vec<Room> {
    let mut rooms = Vec::new();
    for i in 1..=15 {
        rooms.push(Room {
            id: RoomId(format!("R-{i}")),
            kind: RoomKind::Classroom,
            capacity_min: 50,
            capacity_max: 70,
            department: None,
            floor: 0,
        });
    }
    let labs: [(&str, u32); 5] = [
        ("Physics", 2),
        ("Chemistry", 2),
        ("Biology", 1),
        ("Electronics", 2),
        ("Computer Science", 3),
    ];
    for (department, count) in labs {
        for i in 1..=count {
            rooms.push(Room {
                id: RoomId(format!("Lab-{department}-{i}")),
                kind: RoomKind::Lab,
                capacity_min: 27,
                capacity_max: 33,
                department: Some(department.to_string()),
                floor: 0,
            });
        }
    }
    rooms
}
