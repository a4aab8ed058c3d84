use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Subject categories. The four "reserved" categories may only run
/// inside their pre-declared window; `CoreReq`/`Elective` may run
/// anywhere outside every reserved window applicable to their year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SubjectCategory {
    CoreReq,
    Elective,
    GenericElective,
    Skill,
    ValueAdded,
    AbilityEnhancement,
}

impl SubjectCategory {
    pub fn is_reserved(&self) -> bool {
        !matches!(self, SubjectCategory::CoreReq | SubjectCategory::Elective)
    }

    /// Token used at the catalog ingestion boundary (matches the
    /// corpus this crate's configuration tables were derived from).
    pub fn token(&self) -> &'static str {
        match self {
            SubjectCategory::CoreReq => "DSC",
            SubjectCategory::Elective => "DSE",
            SubjectCategory::GenericElective => "GE",
            SubjectCategory::Skill => "SEC",
            SubjectCategory::ValueAdded => "VAC",
            SubjectCategory::AbilityEnhancement => "AEC",
        }
    }

    pub const ALL: [SubjectCategory; 6] = [
        SubjectCategory::CoreReq,
        SubjectCategory::Elective,
        SubjectCategory::GenericElective,
        SubjectCategory::Skill,
        SubjectCategory::ValueAdded,
        SubjectCategory::AbilityEnhancement,
    ];

    /// Academic year derived from a semester number (1-8 -> 1-4).
    pub fn year_for_semester(semester: u8) -> u8 {
        (semester + 1) / 2
    }

    /// Whether this category is offered at all in the given year,
    /// mirroring the year-by-year curriculum tables in the source
    /// program (years 3-4 drop SEC/VAC/AEC progressively).
    pub fn offered_in_year(&self, year: u8) -> bool {
        match self {
            SubjectCategory::CoreReq | SubjectCategory::GenericElective => year <= 4,
            SubjectCategory::Elective => year >= 2,
            SubjectCategory::Skill => year <= 2,
            SubjectCategory::ValueAdded | SubjectCategory::AbilityEnhancement => year <= 2,
        }
    }
}

impl FromStr for SubjectCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DSC" | "" => Ok(SubjectCategory::CoreReq),
            "DSE" => Ok(SubjectCategory::Elective),
            "GE" => Ok(SubjectCategory::GenericElective),
            "SEC" => Ok(SubjectCategory::Skill),
            "VAC" => Ok(SubjectCategory::ValueAdded),
            "AEC" => Ok(SubjectCategory::AbilityEnhancement),
            other => Err(format!("unknown subject category '{other}'")),
        }
    }
}

impl std::fmt::Display for SubjectCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_tokens() {
        assert_eq!("GE".parse::<SubjectCategory>().unwrap(), SubjectCategory::GenericElective);
        assert_eq!("dsc".parse::<SubjectCategory>().unwrap(), SubjectCategory::CoreReq);
    }

    #[test]
    fn rejects_unknown_token() {
        assert!("XYZ".parse::<SubjectCategory>().is_err());
    }

    #[test]
    fn year3_drops_sec_vac_aec() {
        assert!(!SubjectCategory::Skill.offered_in_year(3));
        assert!(SubjectCategory::Elective.offered_in_year(3));
    }
}
