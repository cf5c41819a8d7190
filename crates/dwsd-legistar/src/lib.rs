// Error types
pub mod error;

// Raw Legistar record schema
pub mod schema;

// Fuzzy date/time parsing
pub mod datetime;

// Per-field extraction steps
pub mod fields;

// Known buildings with address rewrites
pub mod venue;

// Collaborator traits and their default implementations
pub mod traits;
pub mod status;
pub mod id;

// Agency constants
pub mod profile;

// Record -> Event pipeline
pub mod normalizer;

// Raw dump readers
pub mod io;

pub use datetime::{FuzzyDateTime, parse_fuzzy};
pub use error::{Error, Result};
pub use fields::{clean_address, parse_documents, parse_location, parse_sources, parse_time};
pub use id::SlugId;
pub use io::{normalize_file, parse_envelopes, read_envelopes};
pub use normalizer::{Events, Normalizer};
pub use profile::AgencyProfile;
pub use schema::{DocumentKind, LinkField, RawEnvelope, RawMeetingRecord};
pub use status::KeywordStatus;
pub use traits::{IdGenerator, StatusClassifier};
pub use venue::KnownVenue;
