//! GTFS time handling.
//!
//! GTFS provides times as "H:MM:SS" or "HH:MM:SS" strings measured from
//! noon-minus-twelve-hours on the service day, so values past "24:00:00"
//! are legal and mean the following calendar day. This module keeps the
//! raw seconds and converts them into displayable parts once a timezone
//! shift is known.

use chrono::{NaiveDate, Offset, TimeZone};
use chrono_tz::Tz;
use std::fmt;

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: i64 = 24 * SECS_PER_HOUR;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A GTFS stop time, in seconds after the start of the service day.
///
/// # Examples
///
/// ```
/// use timetable_fill::domain::GtfsTime;
///
/// let time = GtfsTime::parse("25:10:00").unwrap();
/// assert_eq!(time.secs(), 25 * 3600 + 10 * 60);
/// assert_eq!(time.to_string(), "25:10:00");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GtfsTime {
    secs: u32,
}

impl GtfsTime {
    /// Create a time from a raw seconds count.
    pub fn from_secs(secs: u32) -> Self {
        Self { secs }
    }

    /// Create a time from hours, minutes and seconds.
    pub fn from_hms(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            secs: hours * 3600 + minutes * 60 + seconds,
        }
    }

    /// Parse a GTFS "H:MM:SS" or "HH:MM:SS" string.
    ///
    /// Hours may exceed 23 for trips running past midnight.
    ///
    /// # Examples
    ///
    /// ```
    /// use timetable_fill::domain::GtfsTime;
    ///
    /// assert!(GtfsTime::parse("8:05:00").is_ok());
    /// assert!(GtfsTime::parse("08:05:00").is_ok());
    /// assert!(GtfsTime::parse("27:59:59").is_ok());
    ///
    /// assert!(GtfsTime::parse("08:05").is_err());
    /// assert!(GtfsTime::parse("08:60:00").is_err());
    /// assert!(GtfsTime::parse("ab:cd:ef").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let mut parts = s.trim().split(':');
        let (Some(h), Some(m), Some(sec), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TimeError::new("expected H:MM:SS format"));
        };

        if h.is_empty() || h.len() > 3 {
            return Err(TimeError::new("hour must have 1-3 digits"));
        }
        let hours = parse_digits(h).ok_or_else(|| TimeError::new("invalid hour digits"))?;

        if m.len() != 2 {
            return Err(TimeError::new("minute must have 2 digits"));
        }
        let minutes = parse_digits(m).ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minutes > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        if sec.len() != 2 {
            return Err(TimeError::new("second must have 2 digits"));
        }
        let seconds = parse_digits(sec).ok_or_else(|| TimeError::new("invalid second digits"))?;
        if seconds > 59 {
            return Err(TimeError::new("second must be 0-59"));
        }

        Ok(Self::from_hms(hours, minutes, seconds))
    }

    /// Returns the raw seconds count.
    pub fn secs(&self) -> u32 {
        self.secs
    }

    /// Split into day offset, hour and minute after applying a zone shift.
    ///
    /// Seconds are dropped, not rounded.
    ///
    /// # Examples
    ///
    /// ```
    /// use timetable_fill::domain::{GtfsTime, ZoneDiff};
    ///
    /// let time = GtfsTime::parse("00:30:00").unwrap();
    /// let parts = time.explode(ZoneDiff::from_hours(-1));
    /// assert_eq!(parts.day, -1);
    /// assert_eq!(parts.hour24, 23);
    /// assert_eq!(parts.minute, 30);
    /// assert!(parts.pm);
    /// ```
    pub fn explode(&self, zone_diff: ZoneDiff) -> TimeParts {
        let total = i64::from(self.secs) + i64::from(zone_diff.secs());
        let day = total.div_euclid(SECS_PER_DAY);
        let rem = total.rem_euclid(SECS_PER_DAY);
        let hour24 = (rem / SECS_PER_HOUR) as u32;
        let minute = ((rem % SECS_PER_HOUR) / SECS_PER_MINUTE) as u32;
        let hour12 = match hour24 % 12 {
            0 => 12,
            h => h,
        };

        TimeParts {
            day: day as i32,
            hour24,
            hour12,
            minute,
            pm: hour24 >= 12,
        }
    }
}

impl fmt::Debug for GtfsTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GtfsTime({self})")
    }
}

impl fmt::Display for GtfsTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = i64::from(self.secs);
        write!(
            f,
            "{:02}:{:02}:{:02}",
            secs / SECS_PER_HOUR,
            (secs % SECS_PER_HOUR) / SECS_PER_MINUTE,
            secs % SECS_PER_MINUTE
        )
    }
}

/// A time split into its displayable parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeParts {
    /// Days after (or before, if negative) the service day.
    pub day: i32,
    /// Hour on a 24-hour clock, 0-23.
    pub hour24: u32,
    /// Hour on a 12-hour clock, 1-12.
    pub hour12: u32,
    /// Minute, 0-59.
    pub minute: u32,
    /// Whether the time is noon or later.
    pub pm: bool,
}

impl TimeParts {
    /// Short 12-hour text, e.g. `" 9:05A"` or `"12:00P"`.
    pub fn short_12(&self) -> String {
        let suffix = if self.pm { "P" } else { "A" };
        format!("{:>2}:{:02}{}", self.hour12, self.minute, suffix)
    }

    /// Short 24-hour text, e.g. `" 9:05"` or `"23:59"`.
    pub fn short_24(&self) -> String {
        format!("{:>2}:{:02}", self.hour24, self.minute)
    }
}

/// Offset between a station's timezone and the agency's timezone.
///
/// Adding this to an agency-local GTFS time gives the station-local time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ZoneDiff(i32);

impl ZoneDiff {
    /// No shift.
    pub const ZERO: ZoneDiff = ZoneDiff(0);

    /// A shift of whole hours.
    pub const fn from_hours(hours: i32) -> Self {
        Self(hours * 3600)
    }

    /// A shift in seconds.
    pub const fn from_secs(secs: i32) -> Self {
        Self(secs)
    }

    /// Returns the shift in seconds.
    pub fn secs(&self) -> i32 {
        self.0
    }

    /// Compute the shift from the agency zone to the station zone.
    ///
    /// Offsets are evaluated at noon on the reference date, so a
    /// timetable for a date straddling a DST change reflects the
    /// rules in force that day.
    ///
    /// # Examples
    ///
    /// ```
    /// use timetable_fill::domain::ZoneDiff;
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
    /// let diff = ZoneDiff::between(
    ///     chrono_tz::America::Chicago,
    ///     chrono_tz::America::New_York,
    ///     date,
    /// );
    /// assert_eq!(diff, ZoneDiff::from_hours(-1));
    /// ```
    pub fn between(station_tz: Tz, agency_tz: Tz, reference_date: NaiveDate) -> Self {
        Self(utc_offset_secs(station_tz, reference_date) - utc_offset_secs(agency_tz, reference_date))
    }
}

fn utc_offset_secs(tz: Tz, date: NaiveDate) -> i32 {
    let noon = date.and_hms_opt(12, 0, 0).unwrap_or_default();
    tz.offset_from_utc_datetime(&noon).fix().local_minus_utc()
}

fn parse_digits(s: &str) -> Option<u32> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
