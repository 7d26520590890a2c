//! Shared primitive aliases and query enums.

use serde::{Deserialize, Serialize};

/// ICAO airport code, the primary key of the store.
pub type Icao = String;

/// Elevation in feet.
pub type Feet = i64;

/// Direction applied to a listing sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest value first.
    #[default]
    Asc,
    /// Largest value first.
    Desc,
}

impl SortOrder {
    /// Only the exact, case-sensitive `"desc"` selects descending order.
    pub fn parse(raw: &str) -> Self {
        if raw == "desc" { Self::Desc } else { Self::Asc }
    }
}
