use dwsd_types::Location;
use serde::{Deserialize, Serialize};

pub const WATER_BOARD_MATCH: &str = "water board";
pub const WATER_BOARD_NAME: &str = "Water Board Building";
pub const WATER_BOARD_ADDRESS: &str = "735 Randolph St Detroit, MI 48226";

/// A building the calendar refers to by name instead of by street address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownVenue {
    /// Case-insensitive substring that identifies the building in location text
    pub match_text: String,
    pub name: String,
    pub address: String,
}

impl KnownVenue {
    pub fn water_board() -> Self {
        Self {
            match_text: WATER_BOARD_MATCH.to_string(),
            name: WATER_BOARD_NAME.to_string(),
            address: WATER_BOARD_ADDRESS.to_string(),
        }
    }

    pub fn matches(&self, address: &str) -> bool {
        !self.match_text.is_empty()
            && address
                .to_lowercase()
                .contains(&self.match_text.to_lowercase())
    }

    /// Replace the free-text address with the building's street address
    ///
    /// A leading "Room ..." segment survives as a prefix.
    pub fn rewrite(&self, address: &str) -> Location {
        let first_segment = address.split(", ").next().unwrap_or_default();
        let address = if first_segment.to_lowercase().contains("room") {
            format!("{} {}", first_segment, self.address)
        } else {
            self.address.clone()
        };
        Location::named(self.name.clone(), address)
    }
}
