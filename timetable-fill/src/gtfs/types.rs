//! GTFS table row DTOs.
//!
//! These types map directly to rows of the GTFS text files. They use
//! `Option` liberally because feeds omit optional columns entirely or
//! leave cells empty. Columns not listed here are ignored.

use serde::Deserialize;

/// A row of `agency.txt`.
#[derive(Debug, Clone, Deserialize)]
pub struct AgencyRow {
    pub agency_id: Option<String>,
    pub agency_name: String,
    /// IANA timezone name, e.g. "America/New_York".
    pub agency_timezone: String,
}

/// A row of `routes.txt`.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteRow {
    pub route_id: String,
    pub route_short_name: Option<String>,
    pub route_long_name: Option<String>,
    /// GTFS route type: 2 is rail, 3 is bus.
    pub route_type: u16,
}

/// A row of `trips.txt`.
#[derive(Debug, Clone, Deserialize)]
pub struct TripRow {
    pub route_id: String,
    pub service_id: String,
    pub trip_id: String,
    /// The public train number.
    pub trip_short_name: Option<String>,
}

/// A row of `stops.txt`.
#[derive(Debug, Clone, Deserialize)]
pub struct StopRow {
    pub stop_id: String,
    pub stop_code: Option<String>,
    pub stop_name: String,
    pub stop_timezone: Option<String>,
    pub parent_station: Option<String>,
    /// 0 or empty: unknown, 1: accessible, 2: not accessible.
    pub wheelchair_boarding: Option<u8>,
}

/// A row of `stop_times.txt`.
#[derive(Debug, Clone, Deserialize)]
pub struct StopTimeRow {
    pub trip_id: String,
    /// "HH:MM:SS", possibly past 24:00:00.
    pub arrival_time: Option<String>,
    pub departure_time: Option<String>,
    pub stop_id: String,
    pub stop_sequence: u32,
    /// 0 or empty: regular, 1: none, 2: phone agency, 3: ask driver.
    pub pickup_type: Option<u8>,
    pub drop_off_type: Option<u8>,
    /// 0: approximate, 1 or empty: exact.
    pub timepoint: Option<u8>,
}

/// A row of `calendar.txt`.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarRow {
    pub service_id: String,
    pub monday: u8,
    pub tuesday: u8,
    pub wednesday: u8,
    pub thursday: u8,
    pub friday: u8,
    pub saturday: u8,
    pub sunday: u8,
    /// "YYYYMMDD".
    pub start_date: String,
    pub end_date: String,
}
