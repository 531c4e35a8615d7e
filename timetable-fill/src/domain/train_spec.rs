//! Train spec (column entry) type.

use chrono::Weekday;
use std::fmt;

use super::calendar::{gtfs_day_name, parse_gtfs_day};

/// Suffix that hides a train from the column header.
pub const NOHEADER_SUFFIX: &str = "noheader";

/// Error returned when parsing an invalid train spec.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid train spec {input:?}: {reason}")]
pub struct TrainSpecError {
    input: String,
    reason: &'static str,
}

/// One train named in a column header.
///
/// A spec is a GTFS `trip_short_name`, optionally followed by a
/// lowercase GTFS day name to pick between trips that share a number,
/// and optionally by `noheader` to keep the train out of the header.
///
/// # Examples
///
/// ```
/// use timetable_fill::domain::TrainSpec;
/// use chrono::Weekday;
///
/// let spec = TrainSpec::parse("91 monday noheader").unwrap();
/// assert_eq!(spec.number(), "91");
/// assert_eq!(spec.day(), Some(Weekday::Mon));
/// assert!(spec.is_noheader());
/// assert_eq!(spec.key(), "91 monday");
///
/// assert!(TrainSpec::parse("  ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TrainSpec {
    number: String,
    day: Option<Weekday>,
    noheader: bool,
}

impl TrainSpec {
    /// Parse a train spec from header text.
    ///
    /// The number itself may contain spaces ("Thruway 1234").
    pub fn parse(s: &str) -> Result<Self, TrainSpecError> {
        let mut rest = s.trim();

        let noheader = match rest.strip_suffix(NOHEADER_SUFFIX) {
            Some(stripped) if stripped.is_empty() || stripped.ends_with(char::is_whitespace) => {
                rest = stripped.trim_end();
                true
            }
            _ => false,
        };

        let mut day = None;
        if let Some((head, last)) = rest.rsplit_once(char::is_whitespace) {
            if let Some(parsed) = parse_gtfs_day(last) {
                day = Some(parsed);
                rest = head.trim_end();
            }
        }

        if rest.is_empty() {
            return Err(TrainSpecError {
                input: s.to_string(),
                reason: "missing train number",
            });
        }

        Ok(Self {
            number: rest.to_string(),
            day,
            noheader,
        })
    }

    /// The GTFS `trip_short_name`.
    pub fn number(&self) -> &str {
        &self.number
    }

    /// The disambiguating day, if any.
    pub fn day(&self) -> Option<Weekday> {
        self.day
    }

    /// Whether this train is left out of the column header.
    pub fn is_noheader(&self) -> bool {
        self.noheader
    }

    /// Lookup key: the number plus any day, without `noheader`.
    pub fn key(&self) -> String {
        match self.day {
            Some(day) => format!("{} {}", self.number, gtfs_day_name(day)),
            None => self.number.clone(),
        }
    }
}

impl fmt::Debug for TrainSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrainSpec({self})")
    }
}

impl fmt::Display for TrainSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())?;
        if self.noheader {
            write!(f, " {NOHEADER_SUFFIX}")?;
        }
        Ok(())
    }
}

/// Split a column key such as `"59 / 51 noheader"` into train specs.
///
/// Empty pieces are skipped.
///
/// # Examples
///
/// ```
/// use timetable_fill::domain::split_column_key;
///
/// let specs = split_column_key("59/3059 noheader").unwrap();
/// assert_eq!(specs.len(), 2);
/// assert_eq!(specs[0].number(), "59");
/// assert!(specs[1].is_noheader());
/// ```
pub fn split_column_key(key: &str) -> Result<Vec<TrainSpec>, TrainSpecError> {
    key.split('/')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(TrainSpec::parse)
        .collect()
}
