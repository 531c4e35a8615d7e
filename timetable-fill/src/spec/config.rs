//! Rendering options read from a spec's JSON sidecar.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, de};

/// Default dwell, in seconds, at which a station gets separate
/// arrival and departure lines.
pub const DEFAULT_DWELL_SECS_CUTOFF: i64 = 300;

/// Options from the `.json` file stored next to a spec grid.
///
/// Keys the engine does not use are ignored, so sidecars written for the
/// PDF renderer load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuxConfig {
    /// The single date the timetable is built for.
    #[serde(deserialize_with = "deserialize_reference_date")]
    pub reference_date: Option<NaiveDate>,

    /// Dwell at or above which a station is laid out on two rows.
    pub dwell_secs_cutoff: i64,

    /// Put all train numbers of a shared column under one label.
    pub train_numbers_side_by_side: bool,

    /// Show a bus icon in time cells served by buses.
    pub use_bus_icon_in_cells: bool,

    /// Wrap each character of a time in its own box (HTML only).
    pub box_time_characters: bool,

    /// Print times on a 24-hour clock.
    pub times_24h: bool,

    /// Bold afternoon times (HTML only).
    pub bold_pm: bool,

    /// Output name without extension; defaults to the spec's stem.
    pub output_filename: Option<String>,

    /// A warning for whoever runs this spec next.
    pub programmers_warning: Option<String>,

    pub title: Option<String>,
    pub heading: Option<String>,
}

impl AuxConfig {
    /// Parse a sidecar from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl Default for AuxConfig {
    fn default() -> Self {
        Self {
            reference_date: None,
            dwell_secs_cutoff: DEFAULT_DWELL_SECS_CUTOFF,
            train_numbers_side_by_side: false,
            use_bus_icon_in_cells: false,
            box_time_characters: false,
            times_24h: false,
            bold_pm: true,
            output_filename: None,
            programmers_warning: None,
            title: None,
            heading: None,
        }
    }
}

/// Parse a reference date written as `YYYYMMDD` or `YYYY-MM-DD`.
///
/// # Examples
///
/// ```
/// use timetable_fill::spec::parse_reference_date;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2024, 7, 1);
/// assert_eq!(parse_reference_date("20240701"), expected);
/// assert_eq!(parse_reference_date("2024-07-01"), expected);
/// assert_eq!(parse_reference_date("July 1"), None);
/// ```
pub fn parse_reference_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y%m%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .ok()
}

/// Sidecars written by hand hold the date either as a number or a string.
fn deserialize_reference_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDate {
        Number(u64),
        Text(String),
    }

    let text = match Option::<RawDate>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(RawDate::Number(n)) => n.to_string(),
        Some(RawDate::Text(s)) if s.trim().is_empty() => return Ok(None),
        Some(RawDate::Text(s)) => s,
    };
    parse_reference_date(&text)
        .map(Some)
        .ok_or_else(|| de::Error::custom(format!("invalid reference_date: {text}")))
}
