use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Date, time and free-text note for one end of a meeting
///
/// `date` serializes as `YYYY-MM-DD` and `time` as `HH:MM:SS`; both are
/// `null` when unknown.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventTime {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub note: String,
}

impl EventTime {
    pub fn new(date: NaiveDate, time: NaiveTime, note: impl Into<String>) -> Self {
        Self {
            date: Some(date),
            time: Some(time),
            note: note.into(),
        }
    }

    /// The placeholder used for `end`: no date, no time, empty note
    pub fn unset() -> Self {
        Self::default()
    }

    pub fn is_unset(&self) -> bool {
        self.date.is_none() && self.time.is_none() && self.note.is_empty()
    }

    /// Combined date and time; a missing time counts as midnight
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        self.date
            .map(|date| date.and_time(self.time.unwrap_or(NaiveTime::MIN)))
    }
}
