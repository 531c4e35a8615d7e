//! Days of operation.

use chrono::Weekday;
use std::fmt;

const ALL_DAYS: u8 = 0b0111_1111;

/// Two-letter abbreviations, Monday first.
const ABBREVIATIONS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// The set of weekdays on which a service runs.
///
/// Bit 0 is Monday and bit 6 is Sunday, matching GTFS `calendar.txt`
/// column order.
///
/// # Examples
///
/// ```
/// use timetable_fill::domain::ServiceDays;
/// use chrono::Weekday;
///
/// let days = ServiceDays::from_flags([true, true, true, true, true, false, false]);
/// assert!(days.contains(Weekday::Wed));
/// assert!(!days.contains(Weekday::Sat));
/// assert_eq!(days.day_string(), "Mo-Fr");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ServiceDays(u8);

impl ServiceDays {
    /// Runs every day.
    pub const DAILY: ServiceDays = ServiceDays(ALL_DAYS);

    /// Runs on no day.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Build from Monday-first flags.
    pub fn from_flags(flags: [bool; 7]) -> Self {
        let bits = flags
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .fold(0u8, |acc, (i, _)| acc | (1 << i));
        Self(bits)
    }

    /// Returns a copy with `day` added.
    pub fn with(self, day: Weekday) -> Self {
        Self(self.0 | bit(day))
    }

    /// Whether the service runs on `day`.
    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & bit(day) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterate the days in the set, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        WEEK.into_iter().filter(|d| self.contains(*d))
    }

    /// Shift every day by `offset` days.
    ///
    /// A positive offset moves days later (Monday becomes Tuesday),
    /// a negative one earlier. Used when a stop is reached after (or
    /// before, across a zone boundary) midnight of the service day.
    ///
    /// # Examples
    ///
    /// ```
    /// use timetable_fill::domain::ServiceDays;
    /// use chrono::Weekday;
    ///
    /// let sunday = ServiceDays::empty().with(Weekday::Sun);
    /// assert_eq!(sunday.rotate(1), ServiceDays::empty().with(Weekday::Mon));
    /// assert_eq!(sunday.rotate(-1), ServiceDays::empty().with(Weekday::Sat));
    /// ```
    pub fn rotate(self, offset: i32) -> Self {
        let k = offset.rem_euclid(7) as u32;
        if k == 0 {
            return self;
        }
        let bits = u32::from(self.0);
        let rotated = ((bits << k) | (bits >> (7 - k))) & u32::from(ALL_DAYS);
        Self(rotated as u8)
    }

    /// Compact text for the set: "Daily", "Mo-Fr", "Mo-Th", or the
    /// concatenated abbreviations such as "MoWeFr".
    pub fn day_string(&self) -> String {
        if self.0 == ALL_DAYS {
            return "Daily".to_string();
        }
        let joined: String = self
            .iter()
            .map(|d| ABBREVIATIONS[d.num_days_from_monday() as usize])
            .collect();
        match joined.as_str() {
            "MoTuWeThFr" => "Mo-Fr".to_string(),
            "MoTuWeTh" => "Mo-Th".to_string(),
            _ => joined,
        }
    }
}

impl fmt::Debug for ServiceDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceDays({})", self.day_string())
    }
}

impl fmt::Display for ServiceDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.day_string())
    }
}

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn bit(day: Weekday) -> u8 {
    1 << day.num_days_from_monday()
}

/// Parse a lowercase GTFS day name such as "monday".
pub fn parse_gtfs_day(s: &str) -> Option<Weekday> {
    match s {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// The lowercase GTFS name of a day.
pub fn gtfs_day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}
