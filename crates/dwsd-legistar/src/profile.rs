use chrono_tz::Tz;
use dwsd_types::Classification;
use serde::{Deserialize, Serialize};

use crate::venue::KnownVenue;
use crate::{Error, Result};

pub const DEFAULT_SLUG: &str = "det_water_sewage_department";
pub const DEFAULT_AGENCY_NAME: &str = "Detroit Water and Sewage Department";
pub const DEFAULT_TIMEZONE: &str = "America/Detroit";
pub const DEFAULT_CALENDAR_URL: &str = "https://dwsd.legistar.com/Calendar.aspx";

/// Per-agency constants used while normalizing
///
/// Every field is optional when deserialized; missing ones take the DWSD values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgencyProfile {
    /// Prefix of generated event ids
    pub slug: String,
    /// Display name, shown in `check` reports
    pub name: String,
    /// IANA timezone name of the reference clock
    pub timezone: String,
    /// Source URL for meetings whose name carries no link
    pub calendar_url: String,
    pub classification: Classification,
    pub venues: Vec<KnownVenue>,
}

impl Default for AgencyProfile {
    fn default() -> Self {
        Self {
            slug: DEFAULT_SLUG.to_string(),
            name: DEFAULT_AGENCY_NAME.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            calendar_url: DEFAULT_CALENDAR_URL.to_string(),
            classification: Classification::Board,
            venues: vec![KnownVenue::water_board()],
        }
    }
}

impl AgencyProfile {
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| Error::Config(format!("unknown timezone '{}'", self.timezone)))
    }

    /// Check everything that would otherwise fail later
    pub fn validate(&self) -> Result<()> {
        self.tz()?;
        if self.slug.trim().is_empty() {
            return Err(Error::Config("agency slug must not be empty".to_string()));
        }
        if self.calendar_url.trim().is_empty() {
            return Err(Error::Config("calendar_url must not be empty".to_string()));
        }
        Ok(())
    }
}
