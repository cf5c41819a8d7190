use dwsd_types::Event;
use std::path::Path;

use crate::normalizer::Normalizer;
use crate::schema::RawEnvelope;
use crate::traits::{IdGenerator, StatusClassifier};
use crate::{Error, Result};

/// A dump that is one array of envelopes starts `[[` (or is `[]`); a JSON
/// Lines dump starts with an envelope, `[{`
fn is_envelope_array(text: &str) -> bool {
    let mut chars = text.chars().filter(|c| !c.is_whitespace());
    match (chars.next(), chars.next()) {
        (Some('['), Some('[')) => true,
        (Some('['), Some(']')) => chars.next().is_none(),
        _ => false,
    }
}

/// Parse a raw dump: either one JSON array of envelopes or JSON Lines
pub fn parse_envelopes(text: &str) -> Result<Vec<RawEnvelope>> {
    if is_envelope_array(text) {
        return Ok(serde_json::from_str(text)?);
    }

    let mut envelopes = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let envelope: RawEnvelope = serde_json::from_str(line)
            .map_err(|err| Error::Parse(format!("line {}: {}", number + 1, err)))?;
        envelopes.push(envelope);
    }
    Ok(envelopes)
}

/// Read a raw dump from disk
pub fn read_envelopes(path: &Path) -> Result<Vec<RawEnvelope>> {
    let text = std::fs::read_to_string(path)?;
    parse_envelopes(&text)
}

/// Read a raw dump and normalize every record, stopping at the first failure
pub fn normalize_file<S, I>(path: &Path, normalizer: &Normalizer<S, I>) -> Result<Vec<Event>>
where
    S: StatusClassifier,
    I: IdGenerator,
{
    let envelopes = read_envelopes(path)?;
    normalizer.normalize(envelopes).collect()
}
