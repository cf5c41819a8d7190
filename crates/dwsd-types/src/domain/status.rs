use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Meeting status as published in the event schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Name, description or location text mentions a cancellation or reschedule
    Cancelled,
    /// Upcoming, nothing posted yet
    Tentative,
    /// Upcoming with an agenda posted
    Confirmed,
    /// Start time is in the past
    Passed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Cancelled => "cancelled",
            Status::Tentative => "tentative",
            Status::Confirmed => "confirmed",
            Status::Passed => "passed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cancelled" | "canceled" => Ok(Status::Cancelled),
            "tentative" => Ok(Status::Tentative),
            "confirmed" => Ok(Status::Confirmed),
            "passed" => Ok(Status::Passed),
            other => Err(Error::InvalidField(format!("unknown status '{}'", other))),
        }
    }
}
