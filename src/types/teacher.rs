use super::TeacherId;
use serde::{Deserialize, Serialize};

/// A teacher: full name plus the unique initials used as their id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
}
