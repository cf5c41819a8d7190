pub mod check;
pub mod config;
pub mod normalize;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use dwsd_legistar::{AgencyProfile, Normalizer, RawEnvelope, parse_envelopes};
use std::io::Read;

/// Read a dump from a path, or from stdin when `input` is "-"
pub(crate) fn read_input(input: &str) -> Result<Vec<RawEnvelope>> {
    let text = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))?
    };

    let envelopes = parse_envelopes(&text).with_context(|| format!("Failed to parse {}", input))?;
    tracing::debug!(records = envelopes.len(), input, "read raw dump");
    Ok(envelopes)
}

/// Normalizer for the agency, pinned to `now` when given
pub(crate) fn build_normalizer(
    profile: AgencyProfile,
    now: Option<NaiveDateTime>,
) -> Result<Normalizer> {
    Ok(match now {
        Some(now) => Normalizer::at(profile, now),
        None => Normalizer::new(profile)?,
    })
}
