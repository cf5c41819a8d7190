use std::fmt;

/// Result type for dwsd-legistar operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading and normalizing records
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// JSON parsing failed (malformed dump or record of the wrong shape)
    Json(serde_json::Error),

    /// Meeting date/time text had no recognizable date, or an impossible one
    InvalidDate(String),

    /// Structural problem in the dump (empty envelope, bad JSONL line)
    Parse(String),

    /// Agency profile is unusable (unknown timezone, ...)
    Config(String),

    /// Failure while normalizing the record at `index` (0-based)
    Record { index: usize, source: Box<Error> },
}

impl Error {
    /// Attach the position of the failing record
    pub fn at_record(self, index: usize) -> Self {
        Error::Record {
            index,
            source: Box::new(self),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Json(err) => write!(f, "JSON error: {}", err),
            Error::InvalidDate(msg) => write!(f, "Invalid date: {}", msg),
            Error::Parse(msg) => write!(f, "Parse error: {}", msg),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Record { index, source } => write!(f, "Record {}: {}", index, source),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::Record { source, .. } => Some(source.as_ref()),
            Error::InvalidDate(_) | Error::Parse(_) | Error::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
