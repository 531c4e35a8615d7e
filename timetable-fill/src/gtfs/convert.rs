//! Conversion from GTFS row DTOs to validated records.

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::domain::{GtfsTime, ServiceDays};

use super::error::FeedError;
use super::model::{Calendar, Route, Stop, StopTime, Trip};
use super::types::{CalendarRow, RouteRow, StopRow, StopTimeRow, TripRow};

/// Parse an IANA timezone name.
pub fn parse_timezone(name: &str) -> Result<Tz, FeedError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| FeedError::InvalidTimezone(name.to_string()))
}

/// Parse a GTFS "YYYYMMDD" date.
pub fn parse_gtfs_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y%m%d").ok()
}

pub fn convert_route(row: RouteRow) -> Route {
    Route {
        route_id: row.route_id,
        short_name: row.route_short_name,
        long_name: row.route_long_name,
        route_type: row.route_type,
    }
}

pub fn convert_trip(row: TripRow) -> Trip {
    Trip {
        trip_id: row.trip_id,
        route_id: row.route_id,
        service_id: row.service_id,
        short_name: row.trip_short_name.unwrap_or_default(),
    }
}

pub fn convert_stop(row: StopRow) -> Result<Stop, FeedError> {
    let timezone = match row.stop_timezone.as_deref().filter(|s| !s.is_empty()) {
        Some(name) => Some(parse_timezone(name)?),
        None => None,
    };
    let stop_code = row
        .stop_code
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| row.stop_id.clone());

    Ok(Stop {
        stop_id: row.stop_id,
        stop_code,
        name: row.stop_name,
        timezone,
        parent_station: row.parent_station.filter(|p| !p.is_empty()),
        wheelchair_boarding: row.wheelchair_boarding.unwrap_or(0),
    })
}

pub fn convert_stop_time(row: StopTimeRow) -> Result<StopTime, FeedError> {
    let arrival = parse_optional_time(row.arrival_time.as_deref(), "arrival_time")?;
    let departure = parse_optional_time(row.departure_time.as_deref(), "departure_time")?;

    Ok(StopTime {
        trip_id: row.trip_id,
        stop_id: row.stop_id,
        stop_sequence: row.stop_sequence,
        arrival,
        departure,
        pickup_type: row.pickup_type.unwrap_or(0),
        drop_off_type: row.drop_off_type.unwrap_or(0),
        timepoint: row.timepoint,
    })
}

pub fn convert_calendar(row: CalendarRow) -> Result<Calendar, FeedError> {
    let start_date = parse_gtfs_date(&row.start_date).ok_or_else(|| FeedError::InvalidField {
        table: "calendar.txt",
        field: "start_date",
        value: row.start_date.clone(),
    })?;
    let end_date = parse_gtfs_date(&row.end_date).ok_or_else(|| FeedError::InvalidField {
        table: "calendar.txt",
        field: "end_date",
        value: row.end_date.clone(),
    })?;

    let flags = [
        row.monday,
        row.tuesday,
        row.wednesday,
        row.thursday,
        row.friday,
        row.saturday,
        row.sunday,
    ]
    .map(|f| f == 1);

    Ok(Calendar {
        service_id: row.service_id,
        days: ServiceDays::from_flags(flags),
        start_date,
        end_date,
    })
}

fn parse_optional_time(
    value: Option<&str>,
    field: &'static str,
) -> Result<Option<GtfsTime>, FeedError> {
    match value.filter(|s| !s.trim().is_empty()) {
        None => Ok(None),
        Some(s) => GtfsTime::parse(s)
            .map(Some)
            .map_err(|_| FeedError::InvalidField {
                table: "stop_times.txt",
                field,
                value: s.to_string(),
            }),
    }
}
