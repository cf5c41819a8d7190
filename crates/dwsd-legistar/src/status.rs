use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;
use dwsd_types::{EventDetails, Status};

use crate::schema::DocumentKind;
use crate::traits::StatusClassifier;

/// Substrings that mark a meeting as not happening as listed
pub const CANCELLATION_WORDS: [&str; 3] = ["cancel", "rescheduled", "postpone"];

/// Keyword- and clock-based status
///
/// 1. cancellation words in name, description, start note or location text -> cancelled
/// 2. start before `now` -> passed
/// 3. agenda posted -> confirmed
/// 4. otherwise tentative
#[derive(Debug, Clone, Copy)]
pub struct KeywordStatus {
    now: NaiveDateTime,
}

impl KeywordStatus {
    /// Classify relative to a fixed local wall-clock instant
    pub fn at(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Classify relative to the current wall-clock time in `tz`
    pub fn now_in(tz: Tz) -> Self {
        Self::at(Utc::now().with_timezone(&tz).naive_local())
    }

    pub fn reference(&self) -> NaiveDateTime {
        self.now
    }
}

impl StatusClassifier for KeywordStatus {
    fn classify(&self, details: &EventDetails, location_text: &str) -> Status {
        // The start note carries cell text such as "Canceled" next to the date
        let text = format!(
            "{} {} {} {}",
            details.name,
            details.description(),
            details.start.note,
            location_text
        )
        .to_lowercase();

        if CANCELLATION_WORDS.iter().any(|word| text.contains(word)) {
            return Status::Cancelled;
        }

        match details.start.datetime() {
            Some(start) if start < self.now => Status::Passed,
            _ if details.document(DocumentKind::Agenda.as_str()).is_some() => Status::Confirmed,
            _ => Status::Tentative,
        }
    }
}
