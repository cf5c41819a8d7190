use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Governing-body category of a meeting
///
/// Values match the event schema vocabulary exactly, including spacing and case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Classification {
    #[serde(rename = "Advisory Committee")]
    AdvisoryCommittee,
    #[default]
    #[serde(rename = "Board")]
    Board,
    #[serde(rename = "City Council")]
    CityCouncil,
    #[serde(rename = "Commission")]
    Commission,
    #[serde(rename = "Committee")]
    Committee,
    #[serde(rename = "Forum")]
    Forum,
    #[serde(rename = "Police Beat")]
    PoliceBeat,
    #[serde(rename = "Not classified")]
    NotClassified,
}

impl Classification {
    pub const ALL: [Classification; 8] = [
        Classification::AdvisoryCommittee,
        Classification::Board,
        Classification::CityCouncil,
        Classification::Commission,
        Classification::Committee,
        Classification::Forum,
        Classification::PoliceBeat,
        Classification::NotClassified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::AdvisoryCommittee => "Advisory Committee",
            Classification::Board => "Board",
            Classification::CityCouncil => "City Council",
            Classification::Commission => "Commission",
            Classification::Committee => "Committee",
            Classification::Forum => "Forum",
            Classification::PoliceBeat => "Police Beat",
            Classification::NotClassified => "Not classified",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Classification {
    type Err = Error;

    /// Case-insensitive lookup by schema name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Classification::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidField(format!("unknown classification '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_serializes_schema_name() {
        let json = serde_json::to_string(&Classification::Board).unwrap();
        assert_eq!(json, "\"Board\"");

        let json = serde_json::to_string(&Classification::NotClassified).unwrap();
        assert_eq!(json, "\"Not classified\"");
    }

    #[test]
    fn test_classification_from_str() {
        assert_eq!(
            "city council".parse::<Classification>().unwrap(),
            Classification::CityCouncil
        );
        assert!("Parliament".parse::<Classification>().is_err());
    }
}
