//! Reading a GTFS feed from a directory of text files.

use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{info, warn};

use super::convert::{
    convert_calendar, convert_route, convert_stop, convert_stop_time, convert_trip,
    parse_timezone,
};
use super::error::FeedError;
use super::feed::Feed;
use super::types::{AgencyRow, CalendarRow, RouteRow, StopRow, StopTimeRow, TripRow};

impl Feed {
    /// Load a feed from an unzipped GTFS directory.
    ///
    /// Reads `agency.txt`, `routes.txt`, `trips.txt`, `stops.txt`,
    /// `stop_times.txt` and `calendar.txt`. All times are taken to be in
    /// the first agency's timezone.
    pub fn load(dir: &Path) -> Result<Feed, FeedError> {
        let agencies: Vec<AgencyRow> = read_table(dir, "agency.txt")?;
        let agency = agencies.first().ok_or(FeedError::NoAgency)?;
        if agencies.len() > 1 {
            warn!(
                count = agencies.len(),
                using = %agency.agency_name,
                "feed has several agencies; using the first agency's timezone"
            );
        }
        let agency_timezone = parse_timezone(&agency.agency_timezone)?;

        let routes = read_table::<RouteRow>(dir, "routes.txt")?
            .into_iter()
            .map(convert_route)
            .collect();
        let trips: Vec<_> = read_table::<TripRow>(dir, "trips.txt")?
            .into_iter()
            .map(convert_trip)
            .collect();
        let stops = read_table::<StopRow>(dir, "stops.txt")?
            .into_iter()
            .map(convert_stop)
            .collect::<Result<Vec<_>, _>>()?;
        let stop_times: Vec<_> = read_table::<StopTimeRow>(dir, "stop_times.txt")?
            .into_iter()
            .map(convert_stop_time)
            .collect::<Result<_, _>>()?;
        let calendars = read_table::<CalendarRow>(dir, "calendar.txt")?
            .into_iter()
            .map(convert_calendar)
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            trips = trips.len(),
            stop_times = stop_times.len(),
            timezone = %agency_timezone,
            "loaded GTFS feed"
        );

        Ok(Feed::new(
            agency_timezone,
            routes,
            trips,
            stops,
            stop_times,
            calendars,
        ))
    }
}

fn read_table<T: DeserializeOwned>(dir: &Path, table: &'static str) -> Result<Vec<T>, FeedError> {
    let to_err = |source| FeedError::Csv { table, source };
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(dir.join(table))
        .map_err(to_err)?
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(to_err)
}
