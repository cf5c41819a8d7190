//! Testing infrastructure for dwsd-events tests.
//!
//! - `fixtures`: raw calendar record builders and the sample dump
//! - `assertions`: checks for the event schema on JSON output
//! - `TestWorld`: isolated temp directory for CLI runs

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use fixtures::{RecordBuilder, SampleFiles};
pub use world::{CliResult, TestWorld};
