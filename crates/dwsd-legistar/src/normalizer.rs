use chrono::{NaiveDate, NaiveDateTime};
use dwsd_types::{Event, EventDetails};

use crate::fields::{parse_documents, parse_location, parse_sources, parse_time};
use crate::id::SlugId;
use crate::profile::AgencyProfile;
use crate::schema::{RawEnvelope, RawMeetingRecord};
use crate::status::KeywordStatus;
use crate::traits::{IdGenerator, StatusClassifier};
use crate::Result;

/// Turns raw calendar records into schema events
///
/// Holds only immutable configuration; the same normalizer can be used for
/// any number of runs.
#[derive(Debug, Clone)]
pub struct Normalizer<S = KeywordStatus, I = SlugId> {
    profile: AgencyProfile,
    /// Fills date parts a record leaves out
    today: NaiveDate,
    status: S,
    ids: I,
}

impl Normalizer {
    /// Default collaborators against the current time in the agency's timezone
    pub fn new(profile: AgencyProfile) -> Result<Self> {
        let now = KeywordStatus::now_in(profile.tz()?).reference();
        Ok(Self::at(profile, now))
    }

    /// Default collaborators pinned to `now`, a wall-clock time in the agency's
    /// timezone: keyword status against `now`, missing date parts from its
    /// date, slug ids prefixed with the agency slug
    pub fn at(profile: AgencyProfile, now: NaiveDateTime) -> Self {
        let ids = SlugId::new(profile.slug.clone());
        Self {
            profile,
            today: now.date(),
            status: KeywordStatus::at(now),
            ids,
        }
    }
}

impl<S, I> Normalizer<S, I>
where
    S: StatusClassifier,
    I: IdGenerator,
{
    /// Swap the status classifier, keeping everything else
    pub fn with_status<S2: StatusClassifier>(self, status: S2) -> Normalizer<S2, I> {
        Normalizer {
            profile: self.profile,
            today: self.today,
            status,
            ids: self.ids,
        }
    }

    /// Swap the id generator, keeping everything else
    pub fn with_ids<I2: IdGenerator>(self, ids: I2) -> Normalizer<S, I2> {
        Normalizer {
            profile: self.profile,
            today: self.today,
            status: self.status,
            ids,
        }
    }

    pub fn profile(&self) -> &AgencyProfile {
        &self.profile
    }

    /// Assemble one event: start, location, sources, documents, then status, then id
    pub fn normalize_record(&self, record: &RawMeetingRecord) -> Result<Event> {
        let start = parse_time(
            record.meeting_date.as_deref(),
            record.meeting_time.as_deref(),
            self.today,
        )?;
        let location = parse_location(record.location_text(), &self.profile.venues);
        let sources = parse_sources(record, &self.profile.calendar_url);
        let documents = parse_documents(record);

        let details = EventDetails::new(
            record.name.text(),
            self.profile.classification,
            start,
            location,
            sources,
            documents,
        );
        let status = self.status.classify(&details, record.location_text());
        let id = self.ids.generate(&details, status);

        tracing::debug!(%id, %status, "normalized meeting");
        Ok(Event::new(details, status, id))
    }

    pub fn normalize_envelope(&self, envelope: RawEnvelope) -> Result<Event> {
        let record = envelope.into_record()?;
        self.normalize_record(&record)
    }

    /// Lazily normalize a sequence of envelopes
    ///
    /// Each item is produced only when pulled. A record that fails yields an
    /// `Err` tagged with its index; collecting into `Result<Vec<_>>` stops
    /// there.
    pub fn normalize<R>(&self, records: R) -> Events<'_, R::IntoIter, S, I>
    where
        R: IntoIterator<Item = RawEnvelope>,
    {
        Events {
            normalizer: self,
            records: records.into_iter(),
            index: 0,
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        let now = KeywordStatus::now_in(chrono_tz::America::Detroit).reference();
        Self::at(AgencyProfile::default(), now)
    }
}

/// Iterator returned by [`Normalizer::normalize`]
pub struct Events<'a, R, S = KeywordStatus, I = SlugId> {
    normalizer: &'a Normalizer<S, I>,
    records: R,
    index: usize,
}

impl<R, S, I> Iterator for Events<'_, R, S, I>
where
    R: Iterator<Item = RawEnvelope>,
    S: StatusClassifier,
    I: IdGenerator,
{
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        let envelope = self.records.next()?;
        let index = self.index;
        self.index += 1;
        Some(
            self.normalizer
                .normalize_envelope(envelope)
                .map_err(|err| err.at_record(index)),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use chrono::NaiveDate;
    use dwsd_types::{Classification, Status};
    use serde_json::json;

    fn fixed_normalizer() -> Normalizer {
        let now = NaiveDate::from_ymd_opt(2018, 8, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Normalizer::at(AgencyProfile::default(), now)
    }

    fn envelope(value: serde_json::Value) -> RawEnvelope {
        RawEnvelope::wrap(value)
    }

    #[test]
    fn test_normalize_record_fields() {
        let normalizer = fixed_normalizer();
        let event = normalizer
            .normalize_envelope(envelope(json!({
                "Name": {"label": "Board of Water Commissioners", "url": "https://dwsd.legistar.com/DepartmentDetail.aspx?ID=1"},
                "Meeting Date": "8/21/2018",
                "Meeting Time": "2:00 PM",
                "Meeting Location": "Water Board Building, 5th Floor",
                "Agenda": {"label": "Agenda", "url": "https://x/agenda.pdf"}
            })))
            .unwrap();

        assert_eq!(event.name(), "Board of Water Commissioners");
        assert_eq!(event.details.classification, Classification::Board);
        assert_eq!(event.location().name, "Water Board Building");
        assert_eq!(event.location().address, "735 Randolph St Detroit, MI 48226");
        assert_eq!(
            event.details.sources[0].url,
            "https://dwsd.legistar.com/DepartmentDetail.aspx?ID=1"
        );
        assert_eq!(event.details.documents.len(), 1);
        assert_eq!(event.status, Status::Confirmed);
        assert_eq!(
            event.id,
            "det_water_sewage_department/201808211400/x/board_of_water_commissioners"
        );
        assert!(event.details.end().is_unset());
        assert!(!event.details.all_day());
    }

    #[test]
    fn test_status_sees_assembled_event() {
        let normalizer = Normalizer::default()
            .with_status(|details: &EventDetails, _: &str| {
                if details.documents.is_empty() {
                    Status::Tentative
                } else {
                    Status::Confirmed
                }
            })
            .with_ids(|details: &EventDetails, status: Status| {
                format!("{}:{}", details.name, status)
            });

        let event = normalizer
            .normalize_envelope(envelope(json!({
                "Name": "Board",
                "Meeting Date": "8/21/2018",
                "Meeting Time": "2:00 PM"
            })))
            .unwrap();
        assert_eq!(event.status, Status::Tentative);
        assert_eq!(event.id, "Board:tentative");
    }

    #[test]
    fn test_missing_location_is_empty() {
        let event = fixed_normalizer()
            .normalize_envelope(envelope(json!({
                "Name": "Board",
                "Meeting Date": "8/21/2018"
            })))
            .unwrap();
        assert_eq!(event.location().address, "");
        assert_eq!(event.location().name, "");
    }

    #[test]
    fn test_iterator_is_lazy_and_indexes_failures() {
        let normalizer = fixed_normalizer();
        let records = vec![
            envelope(json!({"Name": "A", "Meeting Date": "8/21/2018"})),
            envelope(json!({"Name": "B", "Meeting Date": "someday"})),
            envelope(json!({"Name": "C", "Meeting Date": "8/23/2018"})),
        ];

        let mut events = normalizer.normalize(records);
        assert_eq!(events.size_hint(), (3, Some(3)));
        assert_eq!(events.next().unwrap().unwrap().name(), "A");
        match events.next().unwrap() {
            Err(Error::Record { index, source }) => {
                assert_eq!(index, 1);
                assert!(matches!(*source, Error::InvalidDate(_)));
            }
            other => panic!("expected record error, got {:?}", other),
        }
        assert_eq!(events.next().unwrap().unwrap().name(), "C");
        assert!(events.next().is_none());
    }

    #[test]
    fn test_collect_stops_at_first_failure() {
        let normalizer = fixed_normalizer();
        let records = vec![
            envelope(json!({"Name": "A", "Meeting Date": "8/21/2018"})),
            RawEnvelope(vec![]),
        ];
        let result: Result<Vec<Event>> = normalizer.normalize(records).collect();
        assert!(result.unwrap_err().to_string().starts_with("Record 1:"));
    }

    #[test]
    fn test_new_rejects_bad_timezone() {
        let profile = AgencyProfile {
            timezone: "Nowhere/Special".to_string(),
            ..AgencyProfile::default()
        };
        assert!(Normalizer::new(profile).is_err());
    }

    #[test]
    fn test_time_only_record_uses_reference_date() {
        let event = fixed_normalizer()
            .normalize_envelope(envelope(json!({
                "Name": "Audit Committee",
                "Meeting Time": "10:00 AM"
            })))
            .unwrap();
        assert_eq!(event.start().date, NaiveDate::from_ymd_opt(2018, 8, 1));
        assert_eq!(
            event.id,
            "det_water_sewage_department/201808011000/x/audit_committee"
        );
    }

    #[test]
    fn test_profile_is_kept() {
        let normalizer = fixed_normalizer().with_ids(|_: &EventDetails, _: Status| String::new());
        assert_eq!(normalizer.profile(), &AgencyProfile::default());
    }
}
