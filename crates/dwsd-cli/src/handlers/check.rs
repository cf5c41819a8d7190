use anyhow::Result;
use chrono::NaiveDateTime;
use dwsd_legistar::AgencyProfile;
use serde::Serialize;

use super::{build_normalizer, read_input};
use crate::types::OutputFormat;

/// Outcome for one record of the dump
#[derive(Debug, Serialize)]
pub struct RecordReport {
    pub index: usize,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub agency: String,
    pub records: Vec<RecordReport>,
    pub ok: usize,
    pub failed: usize,
}

pub fn handle(
    input: &str,
    now: Option<NaiveDateTime>,
    profile: AgencyProfile,
    format: OutputFormat,
) -> Result<()> {
    let envelopes = read_input(input)?;
    let normalizer = build_normalizer(profile, now)?;

    // Each record on its own so one failure does not hide the rest
    let records: Vec<RecordReport> = envelopes
        .into_iter()
        .enumerate()
        .map(|(index, envelope)| match normalizer.normalize_envelope(envelope) {
            Ok(event) => RecordReport {
                index,
                ok: true,
                id: Some(event.id),
                error: None,
            },
            Err(err) => {
                tracing::warn!(index, error = %err, "record failed to normalize");
                RecordReport {
                    index,
                    ok: false,
                    id: None,
                    error: Some(err.to_string()),
                }
            }
        })
        .collect();

    let failed = records.iter().filter(|r| !r.ok).count();
    let report = CheckReport {
        agency: normalizer.profile().name.clone(),
        ok: records.len() - failed,
        failed,
        records,
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Jsonl => {
            for record in &report.records {
                println!("{}", serde_json::to_string(record)?);
            }
        }
        OutputFormat::Plain => {
            for record in &report.records {
                match (&record.id, &record.error) {
                    (Some(id), _) => println!("record {}: ok {}", record.index, id),
                    (_, Some(error)) => println!("record {}: failed: {}", record.index, error),
                    _ => println!("record {}: ok", record.index),
                }
            }
            println!("{}: {} ok, {} failed", report.agency, report.ok, report.failed);
        }
    }

    if report.failed > 0 {
        anyhow::bail!(
            "{} of {} records failed to normalize",
            report.failed,
            report.records.len()
        );
    }
    Ok(())
}
