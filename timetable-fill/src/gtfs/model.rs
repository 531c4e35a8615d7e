//! Validated GTFS records.

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::domain::{GtfsTime, ServiceDays};

/// GTFS route type for buses.
pub const ROUTE_TYPE_BUS: u16 = 3;

/// A route: a named line that trips belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub route_id: String,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub route_type: u16,
}

impl Route {
    pub fn is_bus(&self) -> bool {
        self.route_type == ROUTE_TYPE_BUS
    }

    /// The long name, falling back to the short name, then the id.
    pub fn display_name(&self) -> &str {
        self.long_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.short_name.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or(&self.route_id)
    }
}

/// A single run of a train on some set of days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    pub trip_id: String,
    pub route_id: String,
    pub service_id: String,
    /// Public train number; empty when the feed gives none.
    pub short_name: String,
}

/// A station or stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    pub stop_id: String,
    /// Public station code; defaults to the stop id.
    pub stop_code: String,
    pub name: String,
    /// Falls back to the agency timezone when `None`.
    pub timezone: Option<Tz>,
    pub parent_station: Option<String>,
    pub wheelchair_boarding: u8,
}

/// One call of one trip at one stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopTime {
    pub trip_id: String,
    pub stop_id: String,
    pub stop_sequence: u32,
    pub arrival: Option<GtfsTime>,
    pub departure: Option<GtfsTime>,
    pub pickup_type: u8,
    pub drop_off_type: u8,
    /// `Some(0)` marks an approximate time.
    pub timepoint: Option<u8>,
}

impl StopTime {
    /// Seconds between arrival and departure, or zero if either is missing.
    pub fn dwell_secs(&self) -> i64 {
        match (self.arrival, self.departure) {
            (Some(arr), Some(dep)) => i64::from(dep.secs()) - i64::from(arr.secs()),
            _ => 0,
        }
    }
}

/// Days and date range of a GTFS service id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    pub service_id: String,
    pub days: ServiceDays,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Calendar {
    /// Whether the service runs on `date`.
    pub fn runs_on(&self, date: NaiveDate) -> bool {
        use chrono::Datelike;
        self.start_date <= date && date <= self.end_date && self.days.contains(date.weekday())
    }
}
