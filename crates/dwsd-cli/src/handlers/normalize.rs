use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use dwsd_legistar::{AgencyProfile, Normalizer, RawEnvelope};
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use super::{build_normalizer, read_input};
use crate::output::{EventSink, stdout_supports_color};
use crate::types::OutputFormat;

// NOTE: stdout is streamed record by record, so a failing record leaves the
// events before it on stdout. An --output file is staged next to its target
// and only moved into place once every record has normalized.

pub fn handle(
    input: &str,
    output: Option<&Path>,
    now: Option<NaiveDateTime>,
    profile: AgencyProfile,
    format: OutputFormat,
) -> Result<()> {
    let envelopes = read_input(input)?;
    let normalizer = build_normalizer(profile, now)?;

    let count = match output {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let staged = NamedTempFile::new_in(dir)
                .with_context(|| format!("Failed to create {}", path.display()))?;

            let count = write_events(
                &normalizer,
                envelopes,
                EventSink::new(format, BufWriter::new(staged.as_file()), false),
            )?;
            staged
                .persist(path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            count
        }
        None => write_events(
            &normalizer,
            envelopes,
            EventSink::new(
                format,
                BufWriter::new(std::io::stdout().lock()),
                stdout_supports_color(),
            ),
        )?,
    };

    tracing::info!(events = count, "normalized meetings");
    Ok(())
}

fn write_events<W: Write>(
    normalizer: &Normalizer,
    envelopes: Vec<RawEnvelope>,
    mut sink: EventSink<W>,
) -> Result<usize> {
    let mut count = 0usize;
    for event in normalizer.normalize(envelopes) {
        sink.write(event?)?;
        count += 1;
    }
    sink.finish()?;
    Ok(count)
}
