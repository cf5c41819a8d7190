use serde::{Deserialize, Serialize};

use super::time::EventTime;
use crate::domain::{Classification, Link, Location, Status};

// NOTE: Schema Shape
//
// The output follows the city-scrapers event schema consumed by the
// documenters aggregator. Key names (`_type`, `event_description`,
// `all_day`) are fixed by that schema.
//
// `end`, `all_day`, `_type` and `event_description` are placeholders: the
// Legistar calendar never carries an end time or description. They are kept
// private so the only way to obtain an `EventDetails` is `EventDetails::new`.

/// Record type tag; the schema has a single value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    #[default]
    Event,
}

/// Every schema field except the derived `status` and `id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetails {
    #[serde(rename = "_type")]
    kind: EventType,
    pub name: String,
    event_description: String,
    pub classification: Classification,
    pub start: EventTime,
    end: EventTime,
    all_day: bool,
    pub location: Location,
    pub sources: Vec<Link>,
    pub documents: Vec<Link>,
}

impl EventDetails {
    pub fn new(
        name: impl Into<String>,
        classification: Classification,
        start: EventTime,
        location: Location,
        sources: Vec<Link>,
        documents: Vec<Link>,
    ) -> Self {
        Self {
            kind: EventType::Event,
            name: name.into(),
            event_description: String::new(),
            classification,
            start,
            end: EventTime::unset(),
            all_day: false,
            location,
            sources,
            documents,
        }
    }

    pub fn kind(&self) -> EventType {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.event_description
    }

    pub fn end(&self) -> &EventTime {
        &self.end
    }

    pub fn all_day(&self) -> bool {
        self.all_day
    }

    /// Document link with the given note (e.g. "Agenda"), if present
    pub fn document(&self, note: &str) -> Option<&Link> {
        self.documents.iter().find(|d| d.note == note)
    }
}

/// Normalized meeting event
///
/// Serializes flat: the `EventDetails` fields followed by `status` and `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(flatten)]
    pub details: EventDetails,
    pub status: Status,
    pub id: String,
}

impl Event {
    pub fn new(details: EventDetails, status: Status, id: impl Into<String>) -> Self {
        Self {
            details,
            status,
            id: id.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn start(&self) -> &EventTime {
        &self.details.start
    }

    pub fn location(&self) -> &Location {
        &self.details.location
    }
}
