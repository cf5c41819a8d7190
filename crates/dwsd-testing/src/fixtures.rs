//! Fixtures for raw calendar records.
//!
//! Records are built as `serde_json::Value` in the exact shape the Legistar
//! calendar scraper emits, so tests exercise the real deserialization path.

use anyhow::Result;
use serde_json::{Map, Value, json};
use std::fs;
use std::path::{Path, PathBuf};

pub const SAMPLE_DUMP: &str = "dwsd_calendar.json";
pub const SAMPLE_DUMP_JSONL: &str = "dwsd_calendar.jsonl";

/// Builder for one raw calendar row.
///
/// # Example
/// ```
/// use dwsd_testing::RecordBuilder;
///
/// let envelope = RecordBuilder::new("Board of Water Commissioners")
///     .date("8/21/2018")
///     .time("2:00 PM")
///     .agenda("https://dwsd.legistar.com/View.ashx?M=A&ID=1")
///     .envelope();
/// assert!(envelope.is_array());
/// ```
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    fields: Map<String, Value>,
}

impl RecordBuilder {
    /// Row whose name cell is plain text.
    pub fn new(name: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("Name".to_string(), json!(name));
        Self { fields }
    }

    /// Row whose name cell links to a detail page.
    pub fn linked(name: &str, url: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("Name".to_string(), json!({"label": name, "url": url}));
        Self { fields }
    }

    pub fn date(self, date: &str) -> Self {
        self.field("Meeting Date", json!(date))
    }

    pub fn time(self, time: &str) -> Self {
        self.field("Meeting Time", json!(time))
    }

    pub fn location(self, location: &str) -> Self {
        self.field("Meeting Location", json!(location))
    }

    pub fn agenda(self, url: &str) -> Self {
        self.field("Agenda", json!({"label": "Agenda", "url": url}))
    }

    pub fn minutes(self, url: &str) -> Self {
        self.field("Minutes", json!({"label": "Minutes", "url": url}))
    }

    pub fn video(self, url: &str) -> Self {
        self.field("Video", json!({"label": "Video", "url": url}))
    }

    /// Set any column to any JSON value.
    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    /// The bare record object.
    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }

    /// The record wrapped in its single-element container.
    pub fn envelope(self) -> Value {
        json!([self.build()])
    }
}

/// Serialize envelopes as a JSON array dump.
pub fn json_dump(envelopes: &[Value]) -> String {
    Value::Array(envelopes.to_vec()).to_string()
}

/// Serialize envelopes as a JSON Lines dump.
pub fn jsonl_dump(envelopes: &[Value]) -> String {
    envelopes
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Sample file manager for test data.
pub struct SampleFiles {
    samples_dir: PathBuf,
}

impl Default for SampleFiles {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleFiles {
    /// Samples live in `crates/dwsd-legistar/tests/samples/`.
    pub fn new() -> Self {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let samples_dir = manifest_dir
            .parent()
            .map(|crates| crates.join("dwsd-legistar/tests/samples"))
            .unwrap_or_else(|| manifest_dir.join("samples"));

        Self { samples_dir }
    }

    pub fn path(&self, sample_name: &str) -> PathBuf {
        self.samples_dir.join(sample_name)
    }

    /// Copy a sample file to a destination.
    pub fn copy_to(&self, sample_name: &str, dest: &Path) -> Result<()> {
        fs::copy(self.path(sample_name), dest)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_shapes() {
        let record = RecordBuilder::linked("Board", "https://x/board")
            .date("8/21/2018")
            .minutes("https://x/minutes.pdf")
            .build();
        assert_eq!(record["Name"]["url"], "https://x/board");
        assert_eq!(record["Minutes"]["label"], "Minutes");
        assert!(record.get("Agenda").is_none());
    }

    #[test]
    fn test_dump_formats() {
        let envelopes = vec![
            RecordBuilder::new("A").envelope(),
            RecordBuilder::new("B").envelope(),
        ];
        assert_eq!(jsonl_dump(&envelopes).lines().count(), 2);
        assert!(json_dump(&envelopes).starts_with("[[{"));
    }

    #[test]
    fn test_samples_exist() {
        let samples = SampleFiles::new();
        assert!(samples.path(SAMPLE_DUMP).exists());
        assert!(samples.path(SAMPLE_DUMP_JSONL).exists());
    }
}
