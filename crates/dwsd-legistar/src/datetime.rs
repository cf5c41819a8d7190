use chrono::{Datelike, NaiveDate, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;

use crate::{Error, Result};

// NOTE: Fuzzy Parsing Rules
//
// Calendar cells mix a date, a time and free text ("8/21/2018 2:00 PM",
// "8/21/2018 Canceled", "Tuesday, August 21st, 2018 at 2 p.m."). The parser
// walks whitespace-separated words left to right:
//
// - the first date-looking word (M/D/Y, ISO, month name + numbers) wins
// - a month name takes its day and year from the numbers right next to it
// - the first time-looking word wins; a following AM/PM word attaches to it
// - weekday names and punctuation are consumed silently
// - every other word is kept verbatim, in order, as the note
//
// A missing time means midnight. Missing date parts (day, year, or the whole
// date when only a time is present) come from the caller's reference date.
// Text with neither a date nor a time is an error.

static SLASH_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4}|\d{2})$").unwrap());

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:T(\d{1,2}):(\d{2})(?::(\d{2}))?)?$").unwrap()
});

static DASH_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})-(\d{1,2})-(\d{4})$").unwrap());

static CLOCK_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d{1,2}):(\d{2})(?::(\d{2}))?(am|pm|a\.m\.?|p\.m\.?)?$").unwrap()
});

static HOUR_MERIDIEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d{1,2})(am|pm|a\.m\.?|p\.m\.?)$").unwrap());

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d{1,4})(st|nd|rd|th)?$").unwrap());

/// Result of a fuzzy parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyDateTime {
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Words that were not part of the date or time, in input order
    pub skipped: Vec<String>,
}

impl FuzzyDateTime {
    /// Skipped words joined by single spaces
    pub fn note(&self) -> String {
        self.skipped.join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    fn parse(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().trim_end_matches('.') {
            "am" | "a.m" => Some(Meridiem::Am),
            "pm" | "p.m" => Some(Meridiem::Pm),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ClockReading {
    hour: u32,
    minute: u32,
    second: u32,
    meridiem: Option<Meridiem>,
}

impl ClockReading {
    fn resolve(self, source: &str) -> Result<NaiveTime> {
        let hour = match self.meridiem {
            Some(_) if !(1..=12).contains(&self.hour) => {
                return Err(Error::InvalidDate(format!(
                    "hour {} out of range for 12-hour clock in '{}'",
                    self.hour, source
                )));
            }
            Some(Meridiem::Am) => self.hour % 12,
            Some(Meridiem::Pm) => self.hour % 12 + 12,
            None => self.hour,
        };
        NaiveTime::from_hms_opt(hour, self.minute, self.second).ok_or_else(|| {
            Error::InvalidDate(format!("time out of range in '{}'", source))
        })
    }
}

fn month_from_name(word: &str) -> Option<u32> {
    let month = match word.to_ascii_lowercase().trim_end_matches('.') {
        "jan" | "january" => 1,
        "feb" | "february" => 2,
        "mar" | "march" => 3,
        "apr" | "april" => 4,
        "may" => 5,
        "jun" | "june" => 6,
        "jul" | "july" => 7,
        "aug" | "august" => 8,
        "sep" | "sept" | "september" => 9,
        "oct" | "october" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        _ => return None,
    };
    Some(month)
}

fn is_weekday(word: &str) -> bool {
    matches!(
        word.to_ascii_lowercase().trim_end_matches('.'),
        "mon"
            | "monday"
            | "tue"
            | "tues"
            | "tuesday"
            | "wed"
            | "wednesday"
            | "thu"
            | "thur"
            | "thurs"
            | "thursday"
            | "fri"
            | "friday"
            | "sat"
            | "saturday"
            | "sun"
            | "sunday"
    )
}

fn expand_year(year: i32, digits: usize) -> i32 {
    if digits > 2 {
        year
    } else if year < 69 {
        2000 + year
    } else {
        1900 + year
    }
}

fn make_date(year: i32, month: u32, day: u32, source: &str) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        Error::InvalidDate(format!(
            "no such date {:04}-{:02}-{:02} in '{}'",
            year, month, day, source
        ))
    })
}

/// `day` pulled back to the last day of the month when the month is shorter
fn clamped_date(year: i32, month: u32, day: u32, source: &str) -> Result<NaiveDate> {
    let last_day = (28..=31)
        .rev()
        .find(|&d| NaiveDate::from_ymd_opt(year, month, d).is_some())
        .unwrap_or(28);
    make_date(year, month, day.min(last_day), source)
}

fn capture_u32(caps: &regex::Captures<'_>, idx: usize) -> u32 {
    caps.get(idx)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// A bare number seen before any full date
#[derive(Debug, Clone)]
struct BareNumber {
    index: usize,
    word: String,
    digits: usize,
    value: i32,
    ordinal: bool,
}

impl BareNumber {
    fn is_day(&self) -> bool {
        self.digits <= 2 && (1..=31).contains(&self.value)
    }

    fn is_year(&self) -> bool {
        !self.ordinal
    }
}

/// Accumulates date and time parts while scanning words
#[derive(Default)]
struct Scan {
    date: Option<NaiveDate>,
    clock: Option<ClockReading>,
    /// Month name and the word index it was found at
    month: Option<(usize, u32)>,
    numbers: Vec<BareNumber>,
    skipped: Vec<(usize, String)>,
    awaiting_meridiem: bool,
}

impl Scan {
    fn skip(&mut self, index: usize, word: &str) {
        self.skipped.push((index, word.to_string()));
    }

    fn take_numeric_date(&mut self, word: &str, source: &str) -> Result<bool> {
        if let Some(caps) = SLASH_DATE.captures(word) {
            let year_digits = caps.get(3).map(|m| m.as_str().len()).unwrap_or(4);
            let year = expand_year(capture_u32(&caps, 3) as i32, year_digits);
            self.date = Some(make_date(
                year,
                capture_u32(&caps, 1),
                capture_u32(&caps, 2),
                source,
            )?);
            return Ok(true);
        }

        if let Some(caps) = ISO_DATE.captures(word) {
            self.date = Some(make_date(
                capture_u32(&caps, 1) as i32,
                capture_u32(&caps, 2),
                capture_u32(&caps, 3),
                source,
            )?);
            if caps.get(4).is_some() && self.clock.is_none() {
                self.clock = Some(ClockReading {
                    hour: capture_u32(&caps, 4),
                    minute: capture_u32(&caps, 5),
                    second: capture_u32(&caps, 6),
                    meridiem: None,
                });
            }
            return Ok(true);
        }

        if let Some(caps) = DASH_DATE.captures(word) {
            self.date = Some(make_date(
                capture_u32(&caps, 3) as i32,
                capture_u32(&caps, 1),
                capture_u32(&caps, 2),
                source,
            )?);
            return Ok(true);
        }

        Ok(false)
    }

    fn take_clock(&mut self, word: &str, next: Option<&str>) -> bool {
        if let Some(caps) = CLOCK_TIME.captures(word) {
            let meridiem = caps.get(4).and_then(|m| Meridiem::parse(m.as_str()));
            self.clock = Some(ClockReading {
                hour: capture_u32(&caps, 1),
                minute: capture_u32(&caps, 2),
                second: capture_u32(&caps, 3),
                meridiem,
            });
            self.awaiting_meridiem = meridiem.is_none();
            return true;
        }

        if let Some(caps) = HOUR_MERIDIEM.captures(word) {
            self.clock = Some(ClockReading {
                hour: capture_u32(&caps, 1),
                minute: 0,
                second: 0,
                meridiem: caps.get(2).and_then(|m| Meridiem::parse(m.as_str())),
            });
            return true;
        }

        // "2 PM": a bare hour directly followed by a meridiem word
        if let Some(hour) = word.parse::<u32>().ok().filter(|h| (1..=12).contains(h))
            && next.and_then(Meridiem::parse).is_some()
        {
            self.clock = Some(ClockReading {
                hour,
                minute: 0,
                second: 0,
                meridiem: None,
            });
            self.awaiting_meridiem = true;
            return true;
        }

        false
    }

    /// Turn a month name and the numbers around it into a date
    ///
    /// The day is the number right after the month ("August 21, 2018") or
    /// right before it ("21 Aug 2018"); the year is the number after that.
    /// When both neighbors could be the day the text is ambiguous. Parts
    /// that are missing come from `today`. Numbers that are not used end up
    /// in the note.
    fn resolve_named_date(&mut self, today: NaiveDate, source: &str) -> Result<()> {
        let numbers = std::mem::take(&mut self.numbers);
        let Some((month_index, month)) = self.month else {
            for number in numbers {
                self.skipped.push((number.index, number.word));
            }
            return Ok(());
        };

        let at = |index: usize| numbers.iter().position(|n| n.index == index);
        let after = at(month_index + 1);
        let before = month_index.checked_sub(1).and_then(at);
        let is_day = |slot: Option<usize>| slot.is_some_and(|i| numbers[i].is_day());
        let as_year = |slot: Option<usize>| slot.filter(|&i| numbers[i].is_year());

        let (day_slot, year_slot) = if is_day(after) {
            if is_day(before) {
                return Err(Error::InvalidDate(format!(
                    "ambiguous day of month in '{}'",
                    source.trim()
                )));
            }
            (after, as_year(at(month_index + 2)))
        } else if is_day(before) {
            (before, as_year(after))
        } else {
            (None, as_year(after))
        };

        let year = match year_slot {
            Some(i) => expand_year(numbers[i].value, numbers[i].digits),
            None => today.year(),
        };
        let date = match day_slot {
            Some(i) => make_date(year, month, numbers[i].value as u32, source)?,
            None => clamped_date(year, month, today.day(), source)?,
        };
        self.date = Some(date);

        for (i, number) in numbers.into_iter().enumerate() {
            if Some(i) != day_slot && Some(i) != year_slot {
                self.skipped.push((number.index, number.word));
            }
        }
        Ok(())
    }
}

/// Parse a date and time out of free text, keeping unrecognized words
///
/// Date parts the text does not mention are taken from `today`. Fails with
/// [`Error::InvalidDate`] when the text holds neither a date nor a time, or
/// when a recognized component is out of range.
pub fn parse_fuzzy(text: &str, today: NaiveDate) -> Result<FuzzyDateTime> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut scan = Scan::default();

    for (index, raw) in words.iter().enumerate() {
        let word = raw.trim_matches(|c: char| c == ',' || c == ';');
        if !word.chars().any(char::is_alphanumeric) {
            scan.awaiting_meridiem = false;
            continue;
        }

        let next = words
            .get(index + 1)
            .map(|w| w.trim_matches(|c: char| c == ',' || c == ';'));

        if let Some(meridiem) = Meridiem::parse(word) {
            if scan.awaiting_meridiem
                && let Some(clock) = scan.clock.as_mut()
            {
                clock.meridiem = Some(meridiem);
                scan.awaiting_meridiem = false;
            } else {
                scan.skip(index, word);
            }
            continue;
        }
        scan.awaiting_meridiem = false;

        let has_full_date = scan.date.is_some() || scan.month.is_some();
        if !has_full_date && scan.take_numeric_date(word, text)? {
            continue;
        }

        if scan.clock.is_none() && scan.take_clock(word, next) {
            continue;
        }

        if is_weekday(word) {
            continue;
        }

        if scan.date.is_none()
            && scan.month.is_none()
            && let Some(month) = month_from_name(word)
        {
            scan.month = Some((index, month));
            continue;
        }

        if scan.date.is_none()
            && let Some(caps) = NUMBER.captures(word)
        {
            scan.numbers.push(BareNumber {
                index,
                word: word.to_string(),
                digits: caps.get(1).map(|m| m.as_str().len()).unwrap_or(0),
                value: capture_u32(&caps, 1) as i32,
                ordinal: caps.get(2).is_some(),
            });
            continue;
        }

        scan.skip(index, word);
    }

    if scan.date.is_none() {
        scan.resolve_named_date(today, text)?;
    }

    let date = match (scan.date, scan.clock) {
        (Some(date), _) => date,
        (None, Some(_)) => today,
        (None, None) => {
            return Err(Error::InvalidDate(format!(
                "no date or time found in '{}'",
                text.trim()
            )));
        }
    };

    let time = match scan.clock {
        Some(clock) => clock.resolve(text)?,
        None => NaiveTime::MIN,
    };

    scan.skipped.sort_by_key(|(index, _)| *index);
    let skipped: Vec<String> = scan.skipped.into_iter().map(|(_, word)| word).collect();
    if !skipped.is_empty() {
        tracing::trace!(?skipped, input = text, "fuzzy date parse kept extra words");
    }

    Ok(FuzzyDateTime {
        date,
        time,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        ymd(2018, 9, 1)
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_legistar_date_and_time() {
        let parsed = parse_fuzzy("8/21/2018 2:00 PM", today()).unwrap();
        assert_eq!(parsed.date, ymd(2018, 8, 21));
        assert_eq!(parsed.time, hm(14, 0));
        assert_eq!(parsed.note(), "");
    }

    #[test]
    fn test_meridiem_edges() {
        assert_eq!(parse_fuzzy("1/2/2019 12:00 AM", today()).unwrap().time, hm(0, 0));
        assert_eq!(parse_fuzzy("1/2/2019 12:30 PM", today()).unwrap().time, hm(12, 30));
        assert_eq!(parse_fuzzy("1/2/2019 9:30am", today()).unwrap().time, hm(9, 30));
        assert_eq!(parse_fuzzy("1/2/2019 2 p.m.", today()).unwrap().time, hm(14, 0));
        assert_eq!(parse_fuzzy("1/2/2019 2pm", today()).unwrap().time, hm(14, 0));
    }

    #[test]
    fn test_twenty_four_hour_clock() {
        let parsed = parse_fuzzy("2018-08-21 14:05:30", today()).unwrap();
        assert_eq!(parsed.date, ymd(2018, 8, 21));
        assert_eq!(parsed.time, NaiveTime::from_hms_opt(14, 5, 30).unwrap());
    }

    #[test]
    fn test_iso_datetime_word() {
        let parsed = parse_fuzzy("2018-08-21T09:15", today()).unwrap();
        assert_eq!(parsed.date, ymd(2018, 8, 21));
        assert_eq!(parsed.time, hm(9, 15));
    }

    #[test]
    fn test_missing_time_is_midnight_with_note() {
        let parsed = parse_fuzzy("8/21/2018 Canceled", today()).unwrap();
        assert_eq!(parsed.time, NaiveTime::MIN);
        assert_eq!(parsed.note(), "Canceled");
    }

    #[test]
    fn test_month_name_forms() {
        let parsed = parse_fuzzy("Tuesday, August 21st, 2018 at 2 p.m.", today()).unwrap();
        assert_eq!(parsed.date, ymd(2018, 8, 21));
        assert_eq!(parsed.time, hm(14, 0));
        assert_eq!(parsed.note(), "at");

        let parsed = parse_fuzzy("21 Sept. 2018", today()).unwrap();
        assert_eq!(parsed.date, ymd(2018, 9, 21));

        let parsed = parse_fuzzy("Dec 3 19", today()).unwrap();
        assert_eq!(parsed.date, ymd(2019, 12, 3));
    }

    #[test]
    fn test_two_digit_years() {
        assert_eq!(parse_fuzzy("3/4/18", today()).unwrap().date, ymd(2018, 3, 4));
        assert_eq!(parse_fuzzy("3/4/75", today()).unwrap().date, ymd(1975, 3, 4));
    }

    #[test]
    fn test_extra_words_keep_order() {
        let parsed = parse_fuzzy("8/21/2018 Special 10:00 AM Session (Rescheduled)", today()).unwrap();
        assert_eq!(parsed.time, hm(10, 0));
        assert_eq!(parsed.note(), "Special Session (Rescheduled)");
    }

    #[test]
    fn test_second_date_goes_to_note() {
        let parsed = parse_fuzzy("8/21/2018 2:00 PM moved from 8/14/2018", today()).unwrap();
        assert_eq!(parsed.date, ymd(2018, 8, 21));
        assert_eq!(parsed.note(), "moved from 8/14/2018");
    }

    #[test]
    fn test_punctuation_is_dropped() {
        let parsed = parse_fuzzy("8/21/2018 - 2:00 PM --", today()).unwrap();
        assert_eq!(parsed.note(), "");
    }

    #[test]
    fn test_no_date_or_time_is_error() {
        assert!(matches!(
            parse_fuzzy("To be announced", today()),
            Err(Error::InvalidDate(_))
        ));
        assert!(matches!(parse_fuzzy(" ", today()), Err(Error::InvalidDate(_))));
        assert!(matches!(
            parse_fuzzy("Room 5", today()),
            Err(Error::InvalidDate(_))
        ));
    }

    #[test]
    fn test_time_only_uses_reference_date() {
        let parsed = parse_fuzzy("2:00 PM", today()).unwrap();
        assert_eq!(parsed.date, today());
        assert_eq!(parsed.time, hm(14, 0));
        assert_eq!(parsed.note(), "");
    }

    #[test]
    fn test_month_without_year_uses_reference_year() {
        let parsed = parse_fuzzy("August 21", today()).unwrap();
        assert_eq!(parsed.date, ymd(2018, 8, 21));

        let parsed = parse_fuzzy("March 2019", today()).unwrap();
        assert_eq!(parsed.date, ymd(2019, 3, 1));
    }

    #[test]
    fn test_reference_day_is_clamped_to_month_end() {
        let parsed = parse_fuzzy("February 2019", ymd(2018, 8, 31)).unwrap();
        assert_eq!(parsed.date, ymd(2019, 2, 28));
    }

    #[test]
    fn test_numbers_before_numeric_date_stay_in_note() {
        let parsed = parse_fuzzy("Session 2 8/21/2018 2:00 PM", today()).unwrap();
        assert_eq!(parsed.date, ymd(2018, 8, 21));
        assert_eq!(parsed.time, hm(14, 0));
        assert_eq!(parsed.note(), "Session 2");
    }

    #[test]
    fn test_ordinals_in_note_are_verbatim() {
        let parsed = parse_fuzzy("August 21, 2018 2:00 PM 2nd Floor", today()).unwrap();
        assert_eq!(parsed.date, ymd(2018, 8, 21));
        assert_eq!(parsed.note(), "2nd Floor");
    }

    #[test]
    fn test_day_and_year_come_from_month_neighbors() {
        let parsed = parse_fuzzy("Room 12 on August 21, 2018", today()).unwrap();
        assert_eq!(parsed.date, ymd(2018, 8, 21));
        assert_eq!(parsed.note(), "Room 12 on");
    }

    #[test]
    fn test_two_day_candidates_is_error() {
        assert!(matches!(
            parse_fuzzy("Room 5, August 21, 2018", today()),
            Err(Error::InvalidDate(_))
        ));
    }

    #[test]
    fn test_out_of_range_components() {
        assert!(parse_fuzzy("13/1/2018", today()).is_err());
        assert!(parse_fuzzy("2/30/2018", today()).is_err());
        assert!(parse_fuzzy("2/3/2018 25:00", today()).is_err());
        assert!(parse_fuzzy("2/3/2018 13:00 PM", today()).is_err());
    }
}
