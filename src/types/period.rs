use serde::{Deserialize, Serialize};

/// Day of the week. The grid is fixed at Mon-Sat; a program that only
/// meets five days simply never emits slots for `Sat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl Day {
    pub const ALL: [Day; 6] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri, Day::Sat];

    pub fn index(&self) -> u8 {
        *self as u8
    }

    pub fn name(&self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
        }
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A slot index within the week: a (day, hour) pair. `slot` is the
/// hour-within-day index, not a clock time; `TimeGrid` maps it to a
/// human label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    pub day: Day,
    pub slot: u8,
}

impl Period {
    pub fn new(day: Day, slot: u8) -> Self {
        Self { day, slot }
    }

    pub fn to_linear(&self, slots_per_day: u8) -> usize {
        (self.day.index() as usize) * (slots_per_day as usize) + (self.slot as usize)
    }

    pub fn from_linear(index: usize, slots_per_day: u8) -> Self {
        let day_idx = (index / slots_per_day as usize) as u8;
        let slot = (index % slots_per_day as usize) as u8;
        Self {
            day: Day::ALL[day_idx as usize],
            slot,
        }
    }

    /// Whether `self` immediately precedes `other`: same day, adjacent hour.
    pub fn is_consecutive_with(&self, other: &Period) -> bool {
        self.day == other.day && other.slot == self.slot + 1
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-S{}", self.day, self.slot + 1)
    }
}

/// Immutable description of the weekly grid: which days meet and how
/// many hour-slots each day has. Built once from configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeGrid {
    pub days: Vec<Day>,
    pub slots_per_day: u8,
    /// Clock-time label per within-day slot, for human-facing output only.
    pub slot_labels: Vec<String>,
}

impl TimeGrid {
    pub fn total_slots(&self) -> usize {
        self.days.len() * self.slots_per_day as usize
    }

    pub fn all_periods(&self) -> Vec<Period> {
        self.days
            .iter()
            .flat_map(|&day| (0..self.slots_per_day).map(move |slot| Period::new(day, slot)))
            .collect()
    }

    pub fn label(&self, period: &Period) -> String {
        let time = self
            .slot_labels
            .get(period.slot as usize)
            .cloned()
            .unwrap_or_default();
        format!("{} {}", period.day, time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_round_trip() {
        let p = Period::new(Day::Wed, 4);
        let idx = p.to_linear(9);
        assert_eq!(Period::from_linear(idx, 9), p);
    }

    #[test]
    fn consecutive_detection() {
        let a = Period::new(Day::Fri, 5);
        let b = Period::new(Day::Fri, 6);
        let c = Period::new(Day::Sat, 6);
        assert!(a.is_consecutive_with(&b));
        assert!(!a.is_consecutive_with(&c));
    }
}
