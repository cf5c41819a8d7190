use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::{Error, Result};

/// A cell of the Legistar calendar table that may carry a hyperlink
///
/// The scraper renders linked cells as `{"label": ..., "url": ...}` and
/// unlinked ones (e.g. "Not available") as plain strings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LinkField {
    Link {
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        url: Option<String>,
    },
    Text(String),
    /// Anything else the upstream produced; never carries a usable URL
    Other(Value),
}

impl LinkField {
    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        LinkField::Link {
            label: Some(label.into()),
            url: Some(url.into()),
        }
    }

    /// Non-empty URL, only for linked cells
    pub fn url(&self) -> Option<&str> {
        match self {
            LinkField::Link { url: Some(url), .. } if !url.trim().is_empty() => Some(url),
            _ => None,
        }
    }

    /// Visible cell text
    pub fn text(&self) -> String {
        match self {
            LinkField::Link { label, .. } => label.clone().unwrap_or_default(),
            LinkField::Text(text) => text.clone(),
            LinkField::Other(Value::Null) => String::new(),
            LinkField::Other(value) => value.to_string(),
        }
    }
}

/// Linked documents published per meeting, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Agenda,
    Minutes,
    Video,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [
        DocumentKind::Agenda,
        DocumentKind::Minutes,
        DocumentKind::Video,
    ];

    /// Column name in the raw record, also used as the document note
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Agenda => "Agenda",
            DocumentKind::Minutes => "Minutes",
            DocumentKind::Video => "Video",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the Legistar meeting calendar
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawMeetingRecord {
    #[serde(rename = "Name")]
    pub name: LinkField,

    #[serde(rename = "Meeting Date", default)]
    pub meeting_date: Option<String>,

    #[serde(rename = "Meeting Time", default)]
    pub meeting_time: Option<String>,

    #[serde(rename = "Meeting Location", default)]
    pub meeting_location: Option<String>,

    #[serde(rename = "Agenda", default, skip_serializing_if = "Option::is_none")]
    pub agenda: Option<LinkField>,

    #[serde(rename = "Minutes", default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<LinkField>,

    #[serde(rename = "Video", default, skip_serializing_if = "Option::is_none")]
    pub video: Option<LinkField>,

    /// Columns the normalizer does not use ("Meeting Details", "iCalendar", ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawMeetingRecord {
    pub fn document(&self, kind: DocumentKind) -> Option<&LinkField> {
        match kind {
            DocumentKind::Agenda => self.agenda.as_ref(),
            DocumentKind::Minutes => self.minutes.as_ref(),
            DocumentKind::Video => self.video.as_ref(),
        }
    }

    pub fn location_text(&self) -> &str {
        self.meeting_location.as_deref().unwrap_or("")
    }
}

/// The container each upstream item arrives in
///
/// The calendar scraper yields a sequence per meeting whose first element is
/// the record; any trailing elements are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RawEnvelope(pub Vec<Value>);

impl RawEnvelope {
    /// Wrap a single record value
    pub fn wrap(record: Value) -> Self {
        RawEnvelope(vec![record])
    }

    /// Unwrap and deserialize the record
    pub fn into_record(self) -> Result<RawMeetingRecord> {
        let first = self
            .0
            .into_iter()
            .next()
            .ok_or_else(|| Error::Parse("empty record container".to_string()))?;
        Ok(serde_json::from_value(first)?)
    }
}
