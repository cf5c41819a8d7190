use serde::{Deserialize, Serialize};

/// A `{url, note}` pair, used for both sources and documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    pub note: String,
}

impl Link {
    pub fn new(url: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            note: note.into(),
        }
    }

    /// Link with an empty note
    pub fn bare(url: impl Into<String>) -> Self {
        Self::new(url, "")
    }
}
