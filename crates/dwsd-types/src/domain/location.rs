use serde::{Deserialize, Serialize};

/// Where a meeting takes place
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    /// Building display name, empty when unknown
    pub name: String,
    pub address: String,
    /// Never populated by the Legistar normalizer
    pub neighborhood: String,
}

impl Location {
    /// Location with only an address
    pub fn from_address(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }

    /// Location at a named building
    pub fn named(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            neighborhood: String::new(),
        }
    }
}
