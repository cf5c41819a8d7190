use crate::types::LogLevel;
use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber
///
/// `RUST_LOG` takes precedence over `--log-level`. Calling twice is a no-op.
pub fn init(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,dwsd_events={level},dwsd_legistar={level}",
            level = level
        ))
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
