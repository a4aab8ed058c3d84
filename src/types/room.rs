use super::RoomId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomKind {
    Classroom,
    Lab,
}

/// A physical room. Classrooms have no department; labs are tagged
/// with the department they serve, matching `DEPARTMENT_LABS` in the
/// source program's room catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub kind: RoomKind,
    pub capacity_min: u32,
    pub capacity_max: u32,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub floor: u8,
}

impl Room {
    pub fn fits_department(&self, department: &str) -> bool {
        match &self.department {
            Some(d) => d == department,
            None => true,
        }
    }

    /// Room-fit penalty for a given headcount: zero inside
    /// `[capacity_min, capacity_max]`, proportional to the shortfall or
    /// overflow otherwise.
    pub fn fit_penalty(&self, students: u32) -> (f64, FitDirection) {
        if students < self.capacity_min {
            ((self.capacity_min - students) as f64, FitDirection::Oversized)
        } else if students > self.capacity_max {
            ((students - self.capacity_max) as f64, FitDirection::Undersized)
        } else {
            (0.0, FitDirection::Exact)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitDirection {
    Undersized,
    Oversized,
    Exact,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> Room {
        Room {
            id: RoomId("R-1".into()),
            kind: RoomKind::Classroom,
            capacity_min: 50,
            capacity_max: 70,
            department: None,
            floor: 0,
        }
    }

    #[test]
    fn exact_fit_has_no_penalty() {
        assert_eq!(room().fit_penalty(60), (0.0, FitDirection::Exact));
    }

    #[test]
    fn undersized_penalizes_overflow() {
        assert_eq!(room().fit_penalty(80), (10.0, FitDirection::Undersized));
    }

    #[test]
    fn oversized_penalizes_waste() {
        assert_eq!(room().fit_penalty(10), (40.0, FitDirection::Oversized));
    }
}
