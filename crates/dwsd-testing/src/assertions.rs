//! Custom assertions for event schema output.

use anyhow::{Context, Result};
use serde_json::Value;

/// Keys every event carries, in serialization order.
pub const EVENT_KEYS: [&str; 12] = [
    "_type",
    "name",
    "event_description",
    "classification",
    "start",
    "end",
    "all_day",
    "location",
    "sources",
    "documents",
    "status",
    "id",
];

/// Assert one JSON event follows the schema and its fixed placeholders.
pub fn assert_event_shape(event: &Value) -> Result<()> {
    let object = event.as_object().context("Expected event to be an object")?;

    for key in EVENT_KEYS {
        if !object.contains_key(key) {
            anyhow::bail!("Event missing key '{}'", key);
        }
    }

    if event["_type"] != "event" {
        anyhow::bail!("Expected _type 'event', got {}", event["_type"]);
    }
    if event["end"] != serde_json::json!({"date": null, "time": null, "note": ""}) {
        anyhow::bail!("Expected empty end, got {}", event["end"]);
    }
    if event["all_day"] != false {
        anyhow::bail!("Expected all_day false, got {}", event["all_day"]);
    }

    let sources = event["sources"]
        .as_array()
        .context("Expected 'sources' array")?;
    if sources.len() != 1 {
        anyhow::bail!("Expected exactly one source, got {}", sources.len());
    }

    Ok(())
}

/// Parse JSON Lines output and check every line is a schema event.
pub fn parse_event_lines(stdout: &str) -> Result<Vec<Value>> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(i, line)| {
            let event: Value = serde_json::from_str(line)
                .with_context(|| format!("Line {} is not JSON: {}", i + 1, line))?;
            assert_event_shape(&event).with_context(|| format!("Line {}", i + 1))?;
            Ok(event)
        })
        .collect()
}
