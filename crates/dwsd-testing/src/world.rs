//! TestWorld pattern for CLI integration tests.
//!
//! Every world owns a temp directory holding its input dumps and config file,
//! and runs the `dwsd-events` binary with `DWSD_EVENTS_CONFIG` pointing inside
//! it so the user's real configuration never leaks into a test.

use anyhow::Result;
use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures::SampleFiles;

pub const BIN_NAME: &str = "dwsd-events";

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use dwsd_testing::{RecordBuilder, TestWorld};
///
/// let world = TestWorld::new()
///     .with_dump("input.json", &[RecordBuilder::new("Board").date("8/21/2018").envelope()]);
///
/// let result = world.run(&["normalize", "input.json"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    config_path: PathBuf,
    samples: SampleFiles,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");

        Self {
            temp_dir,
            config_path,
            samples: SampleFiles::new(),
        }
    }

    /// Get the temp directory root.
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Write envelopes as a JSON array dump.
    pub fn with_dump(self, name: &str, envelopes: &[serde_json::Value]) -> Self {
        self.with_file(name, &crate::fixtures::json_dump(envelopes))
    }

    /// Write arbitrary file content (relative to temp root).
    pub fn with_file(self, name: &str, content: &str) -> Self {
        std::fs::write(self.dir().join(name), content).expect("Failed to write file");
        self
    }

    /// Copy a sample dump into the world under its own name.
    pub fn with_sample(self, sample_name: &str) -> Self {
        self.samples
            .copy_to(sample_name, &self.dir().join(sample_name))
            .expect("Failed to copy sample");
        self
    }

    /// Write the config file the binary will pick up.
    pub fn with_config(self, toml: &str) -> Self {
        std::fs::write(&self.config_path, toml).expect("Failed to write config");
        self
    }

    /// Build a command running in the temp root with an isolated config path.
    #[allow(deprecated)]
    pub fn command(&self) -> Result<Command> {
        let mut cmd = Command::cargo_bin(BIN_NAME)
            .map_err(|e| anyhow::anyhow!("Failed to find {} binary: {}", BIN_NAME, e))?;
        cmd.current_dir(self.dir());
        cmd.env("DWSD_EVENTS_CONFIG", &self.config_path);
        cmd.env_remove("RUST_LOG");
        Ok(cmd)
    }

    /// Execute the binary with the given arguments.
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = self.command()?;
        cmd.args(args);
        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    /// Execute the binary feeding `stdin`.
    pub fn run_with_stdin(&self, args: &[&str], stdin: &str) -> Result<CliResult> {
        let mut cmd = self.command()?;
        cmd.args(args).write_stdin(stdin.to_string());
        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    /// Get stdout as a string.
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Get stderr as a string.
    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
