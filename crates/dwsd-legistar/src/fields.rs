//! Field extraction steps
//!
//! Each function maps one part of a [`RawMeetingRecord`] to one part of the
//! output event and can be tested on its own. [`crate::Normalizer`] runs them
//! in sequence.

use chrono::NaiveDate;
use dwsd_types::{EventTime, Link, Location};
use regex::Regex;
use std::sync::LazyLock;

use crate::datetime::parse_fuzzy;
use crate::schema::{DocumentKind, RawMeetingRecord};
use crate::venue::KnownVenue;
use crate::Result;

// Newlines and the site's emphasis markers
static MARKUP_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n|--em--|--em|em--").unwrap());

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Parse the start of a meeting from its date and time cells
///
/// Words that are neither date nor time become the note. Date parts the
/// cells leave out are filled from `today`.
pub fn parse_time(
    date_text: Option<&str>,
    time_text: Option<&str>,
    today: NaiveDate,
) -> Result<EventTime> {
    let combined = format!(
        "{} {}",
        date_text.unwrap_or_default(),
        time_text.unwrap_or_default()
    );
    let parsed = parse_fuzzy(&combined, today)?;
    let note = parsed.note();
    Ok(EventTime::new(parsed.date, parsed.time, note))
}

/// Strip markup noise and collapse whitespace
pub fn clean_address(text: &str) -> String {
    let without_markup = MARKUP_NOISE.replace_all(text, " ");
    WHITESPACE_RUN
        .replace_all(&without_markup, " ")
        .trim()
        .to_string()
}

/// Parse the location cell, rewriting known buildings to street addresses
///
/// The first venue that matches the cleaned text wins.
pub fn parse_location(location_text: &str, venues: &[KnownVenue]) -> Location {
    let address = clean_address(location_text);
    match venues.iter().find(|venue| venue.matches(&address)) {
        Some(venue) => venue.rewrite(&address),
        None => Location::from_address(address),
    }
}

/// Linked documents in Agenda, Minutes, Video order
pub fn parse_documents(record: &RawMeetingRecord) -> Vec<Link> {
    DocumentKind::ALL
        .iter()
        .filter_map(|kind| {
            record
                .document(*kind)
                .and_then(|field| field.url())
                .map(|url| Link::new(url, kind.as_str()))
        })
        .collect()
}

/// The meeting's detail page, or the calendar page when the name is not linked
pub fn parse_sources(record: &RawMeetingRecord, fallback_url: &str) -> Vec<Link> {
    let url = match record.name.url() {
        Some(url) => url.to_string(),
        None => {
            tracing::debug!(name = %record.name.text(), "meeting name has no link, using calendar URL");
            fallback_url.to_string()
        }
    };
    vec![Link::bare(url)]
}
