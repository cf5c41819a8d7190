use dwsd_types::{EventDetails, Status};

/// Status derivation
///
/// Responsibilities:
/// - Decide cancelled / passed / confirmed / tentative from the assembled event
/// - Look at the raw location text as well, since cancellations are often noted there
pub trait StatusClassifier {
    fn classify(&self, details: &EventDetails, location_text: &str) -> Status;
}

/// Event identifier generation
///
/// Must be deterministic: the same event always yields the same identifier.
pub trait IdGenerator {
    fn generate(&self, details: &EventDetails, status: Status) -> String;
}

impl<F> StatusClassifier for F
where
    F: Fn(&EventDetails, &str) -> Status,
{
    fn classify(&self, details: &EventDetails, location_text: &str) -> Status {
        self(details, location_text)
    }
}

impl<F> IdGenerator for F
where
    F: Fn(&EventDetails, Status) -> String,
{
    fn generate(&self, details: &EventDetails, status: Status) -> String {
        self(details, status)
    }
}
