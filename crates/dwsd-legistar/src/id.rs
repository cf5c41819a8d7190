use dwsd_types::{EventDetails, Status};
use regex::Regex;
use std::sync::LazyLock;

use crate::traits::IdGenerator;

static NON_ALNUM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Lower-case, runs of anything else become a single underscore
pub fn snake_case(text: &str) -> String {
    NON_ALNUM
        .replace_all(&text.to_lowercase(), "_")
        .trim_matches('_')
        .to_string()
}

/// `<agency slug>/<YYYYMMDDHHMM>/x/<snake_case name>`
///
/// The `x` segment stands in for an upstream meeting id, which Legistar
/// calendar rows do not carry.
#[derive(Debug, Clone)]
pub struct SlugId {
    prefix: String,
}

impl SlugId {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl IdGenerator for SlugId {
    fn generate(&self, details: &EventDetails, _status: Status) -> String {
        let date = details
            .start
            .date
            .map(|d| d.format("%Y%m%d").to_string())
            .unwrap_or_else(|| "00000000".to_string());
        let time = details
            .start
            .time
            .map(|t| t.format("%H%M").to_string())
            .unwrap_or_else(|| "0000".to_string());

        let name = snake_case(&details.name);
        let name = if name.is_empty() { "x".to_string() } else { name };

        format!("{}/{}{}/x/{}", self.prefix, date, time, name)
    }
}
