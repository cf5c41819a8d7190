use anyhow::Result;
use dwsd_types::{Event, Status};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::io::Write;

use crate::types::OutputFormat;

/// Writes events in the selected format
///
/// JSONL and plain output stream one event at a time; JSON buffers until
/// `finish` so it can emit a single array.
pub struct EventSink<W: Write> {
    format: OutputFormat,
    writer: W,
    buffered: Vec<Event>,
    color: bool,
}

impl<W: Write> EventSink<W> {
    pub fn new(format: OutputFormat, writer: W, color: bool) -> Self {
        Self {
            format,
            writer,
            buffered: Vec::new(),
            color,
        }
    }

    pub fn write(&mut self, event: Event) -> Result<()> {
        match self.format {
            OutputFormat::Jsonl => {
                serde_json::to_writer(&mut self.writer, &event)?;
                writeln!(self.writer)?;
            }
            OutputFormat::Plain => {
                let line = plain_line(&event, self.color);
                writeln!(self.writer, "{}", line)?;
            }
            OutputFormat::Json => self.buffered.push(event),
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<W> {
        if self.format == OutputFormat::Json {
            serde_json::to_writer_pretty(&mut self.writer, &self.buffered)?;
            writeln!(self.writer)?;
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Color only when writing to a terminal
pub fn stdout_supports_color() -> bool {
    std::io::stdout().is_terminal()
}

fn colored_status(status: Status, color: bool) -> String {
    let label = format!("{:<9}", status.as_str());
    if !color {
        return label;
    }
    match status {
        Status::Cancelled => label.red().to_string(),
        Status::Passed => label.dimmed().to_string(),
        Status::Confirmed => label.green().to_string(),
        Status::Tentative => label.yellow().to_string(),
    }
}

/// `<date> <HH:MM>  <status>  <name>  @ <place>`
pub fn plain_line(event: &Event, color: bool) -> String {
    let start = event.start();
    let date = start
        .date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "----------".to_string());
    let time = start
        .time
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string());

    let location = event.location();
    let place = match (location.name.is_empty(), location.address.is_empty()) {
        (true, true) => String::from("(no location)"),
        (true, false) => location.address.clone(),
        (false, true) => location.name.clone(),
        (false, false) => format!("{}, {}", location.name, location.address),
    };

    let mut line = format!(
        "{} {}  {}  {}  @ {}",
        date,
        time,
        colored_status(event.status, color),
        event.name(),
        place
    );
    if !start.note.is_empty() {
        line.push_str(&format!("  [{}]", start.note));
    }
    line
}
