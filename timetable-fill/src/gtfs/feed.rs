//! In-memory GTFS feed with the lookups and filters the fill engine needs.

use chrono::{NaiveDate, Weekday};
use chrono_tz::Tz;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::error::FeedError;
use super::model::{Calendar, Route, Stop, StopTime, Trip};

/// A loaded GTFS feed.
///
/// Trips are kept sorted by `trip_id` and each trip's stop times by
/// `stop_sequence`, so every lookup is deterministic.
#[derive(Debug, Clone)]
pub struct Feed {
    agency_timezone: Tz,
    routes: HashMap<String, Route>,
    trips: Vec<Trip>,
    stops: HashMap<String, Stop>,
    stop_times: HashMap<String, Vec<StopTime>>,
    calendars: HashMap<String, Calendar>,
}

impl Feed {
    /// Build a feed from validated records.
    pub fn new(
        agency_timezone: Tz,
        routes: Vec<Route>,
        mut trips: Vec<Trip>,
        stops: Vec<Stop>,
        stop_times: Vec<StopTime>,
        calendars: Vec<Calendar>,
    ) -> Self {
        trips.sort_by(|a, b| a.trip_id.cmp(&b.trip_id));

        let mut by_trip: HashMap<String, Vec<StopTime>> = HashMap::new();
        for st in stop_times {
            by_trip.entry(st.trip_id.clone()).or_default().push(st);
        }
        for list in by_trip.values_mut() {
            list.sort_by_key(|st| st.stop_sequence);
        }

        Self {
            agency_timezone,
            routes: routes.into_iter().map(|r| (r.route_id.clone(), r)).collect(),
            trips,
            stops: stops.into_iter().map(|s| (s.stop_id.clone(), s)).collect(),
            stop_times: by_trip,
            calendars: calendars
                .into_iter()
                .map(|c| (c.service_id.clone(), c))
                .collect(),
        }
    }

    /// The timezone all GTFS times in the feed are expressed in.
    pub fn agency_timezone(&self) -> Tz {
        self.agency_timezone
    }

    pub fn route(&self, route_id: &str) -> Option<&Route> {
        self.routes.get(route_id)
    }

    /// All trips, ordered by `trip_id`.
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// Trip rows carrying `trip_id`. Well-formed feeds have exactly one.
    pub fn trips_with_id<'a>(&'a self, trip_id: &'a str) -> impl Iterator<Item = &'a Trip> {
        self.trips.iter().filter(move |t| t.trip_id == trip_id)
    }

    /// Trip rows whose public number is `short_name`.
    pub fn trips_with_short_name<'a>(
        &'a self,
        short_name: &'a str,
    ) -> impl Iterator<Item = &'a Trip> {
        self.trips.iter().filter(move |t| t.short_name == short_name)
    }

    pub fn stop(&self, stop_id: &str) -> Option<&Stop> {
        self.stops.get(stop_id)
    }

    pub fn stops(&self) -> impl Iterator<Item = &Stop> {
        self.stops.values()
    }

    /// The stop's own timezone, or the agency timezone if it has none.
    pub fn stop_timezone(&self, stop_id: &str) -> Tz {
        self.stops
            .get(stop_id)
            .and_then(|s| s.timezone)
            .unwrap_or(self.agency_timezone)
    }

    pub fn calendar(&self, service_id: &str) -> Option<&Calendar> {
        self.calendars.get(service_id)
    }

    /// Stop times of a trip, ordered by `stop_sequence`.
    pub fn stop_times(&self, trip_id: &str) -> &[StopTime] {
        self.stop_times.get(trip_id).map_or(&[], Vec::as_slice)
    }

    /// Every stop time of `trip_id` at `stop_id`.
    ///
    /// More than one entry means the trip visits the station twice.
    pub fn timepoints(&self, trip_id: &str, stop_id: &str) -> Vec<&StopTime> {
        self.stop_times(trip_id)
            .iter()
            .filter(|st| st.stop_id == stop_id)
            .collect()
    }

    /// The single stop time of `trip_id` at `stop_id`, if the trip calls there.
    pub fn timepoint(&self, trip_id: &str, stop_id: &str) -> Result<Option<&StopTime>, FeedError> {
        match self.timepoints(trip_id, stop_id).as_slice() {
            [] => Ok(None),
            [only] => Ok(Some(*only)),
            _ => Err(FeedError::TwoStops {
                trip_id: trip_id.to_string(),
                stop_id: stop_id.to_string(),
            }),
        }
    }

    /// Stop ids of a trip in calling order.
    pub fn trip_stop_ids(&self, trip_id: &str) -> Vec<&str> {
        self.stop_times(trip_id)
            .iter()
            .map(|st| st.stop_id.as_str())
            .collect()
    }

    /// Keep only trips that run on `date`.
    pub fn filter_by_date(&self, date: NaiveDate) -> Feed {
        self.retain_trips(|feed, trip| {
            feed.calendar(&trip.service_id)
                .is_some_and(|c| c.runs_on(date))
        })
    }

    /// Keep only trips whose calendar includes `day`.
    pub fn filter_by_weekday(&self, day: Weekday) -> Feed {
        self.retain_trips(|feed, trip| {
            feed.calendar(&trip.service_id)
                .is_some_and(|c| c.days.contains(day))
        })
    }

    /// Keep only trips with one of the given public numbers.
    pub fn filter_by_trip_short_names<S: AsRef<str>>(&self, names: &[S]) -> Feed {
        let wanted: HashSet<&str> = names.iter().map(|n| n.as_ref()).collect();
        self.retain_trips(|_, trip| wanted.contains(trip.short_name.as_str()))
    }

    /// Copy the feed, keeping trips matching `keep` together with their
    /// stop times and calendars. Stops and routes are kept whole.
    fn retain_trips(&self, keep: impl Fn(&Feed, &Trip) -> bool) -> Feed {
        let trips: Vec<Trip> = self
            .trips
            .iter()
            .filter(|t| keep(self, *t))
            .cloned()
            .collect();

        let trip_ids: HashSet<&str> = trips.iter().map(|t| t.trip_id.as_str()).collect();
        let service_ids: HashSet<&str> = trips.iter().map(|t| t.service_id.as_str()).collect();

        let stop_times = self
            .stop_times
            .iter()
            .filter(|(id, _)| trip_ids.contains(id.as_str()))
            .map(|(id, list)| (id.clone(), list.clone()))
            .collect();
        let calendars = self
            .calendars
            .iter()
            .filter(|(id, _)| service_ids.contains(id.as_str()))
            .map(|(id, c)| (id.clone(), c.clone()))
            .collect();

        debug!(before = self.trips.len(), after = trips.len(), "filtered trips");

        Feed {
            agency_timezone: self.agency_timezone,
            routes: self.routes.clone(),
            trips,
            stops: self.stops.clone(),
            stop_times,
            calendars,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GtfsTime, ServiceDays};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn trip(id: &str, number: &str, service: &str) -> Trip {
        Trip {
            trip_id: id.into(),
            route_id: "R".into(),
            service_id: service.into(),
            short_name: number.into(),
        }
    }

    fn stop_time(trip_id: &str, stop_id: &str, seq: u32, hour: u32) -> StopTime {
        StopTime {
            trip_id: trip_id.into(),
            stop_id: stop_id.into(),
            stop_sequence: seq,
            arrival: Some(GtfsTime::from_hms(hour, 0, 0)),
            departure: Some(GtfsTime::from_hms(hour, 0, 0)),
            pickup_type: 0,
            drop_off_type: 0,
            timepoint: None,
        }
    }

    fn calendar(id: &str, days: ServiceDays) -> Calendar {
        Calendar {
            service_id: id.into(),
            days,
            start_date: date(2024, 1, 1),
            end_date: date(2024, 12, 31),
        }
    }

    fn stop(id: &str, tz: Option<Tz>) -> Stop {
        Stop {
            stop_id: id.into(),
            stop_code: id.into(),
            name: id.into(),
            timezone: tz,
            parent_station: None,
            wheelchair_boarding: 0,
        }
    }

    fn feed() -> Feed {
        let weekdays = ServiceDays::from_flags([true, true, true, true, true, false, false]);
        let weekends = ServiceDays::from_flags([false, false, false, false, false, true, true]);
        Feed::new(
            chrono_tz::America::New_York,
            vec![Route {
                route_id: "R".into(),
                short_name: None,
                long_name: Some("Lake Shore Limited".into()),
                route_type: 2,
            }],
            vec![trip("T2", "49", "WE"), trip("T1", "49", "WK"), trip("T3", "448", "WK")],
            vec![stop("NYP", None), stop("CHI", Some(chrono_tz::America::Chicago))],
            vec![
                stop_time("T1", "CHI", 2, 20),
                stop_time("T1", "NYP", 1, 15),
                stop_time("T2", "NYP", 1, 15),
                stop_time("T3", "CHI", 1, 9),
            ],
            vec![calendar("WK", weekdays), calendar("WE", weekends)],
        )
    }

    #[test]
    fn trips_sorted_by_id() {
        let feed = feed();
        let ids: Vec<_> = feed.trips().iter().map(|t| t.trip_id.as_str()).collect();
        assert_eq!(ids, ["T1", "T2", "T3"]);
    }

    #[test]
    fn stop_times_sorted_by_sequence() {
        let feed = feed();
        assert_eq!(feed.trip_stop_ids("T1"), ["NYP", "CHI"]);
        assert!(feed.stop_times("missing").is_empty());
    }

    #[test]
    fn stop_timezone_falls_back_to_agency() {
        let feed = feed();
        assert_eq!(feed.stop_timezone("CHI"), chrono_tz::America::Chicago);
        assert_eq!(feed.stop_timezone("NYP"), chrono_tz::America::New_York);
        assert_eq!(feed.stop_timezone("unknown"), chrono_tz::America::New_York);
    }

    #[test]
    fn filter_by_date_keeps_running_trips() {
        // 2024-03-16 is a Saturday.
        let sat = feed().filter_by_date(date(2024, 3, 16));
        let ids: Vec<_> = sat.trips().iter().map(|t| t.trip_id.as_str()).collect();
        assert_eq!(ids, ["T2"]);
        assert!(sat.stop_times("T1").is_empty());
        assert!(sat.calendar("WK").is_none());
        assert!(sat.stop("CHI").is_some());
    }

    #[test]
    fn filter_by_date_outside_range_is_empty() {
        assert!(feed().filter_by_date(date(2025, 3, 17)).trips().is_empty());
    }

    #[test]
    fn filter_by_weekday() {
        let mon = feed().filter_by_weekday(Weekday::Mon);
        let ids: Vec<_> = mon.trips().iter().map(|t| t.trip_id.as_str()).collect();
        assert_eq!(ids, ["T1", "T3"]);
    }

    #[test]
    fn filter_by_trip_short_names() {
        let only = feed().filter_by_trip_short_names(&["448"]);
        assert_eq!(only.trips().len(), 1);
        assert_eq!(only.trips_with_short_name("448").count(), 1);
        assert_eq!(only.trips_with_short_name("49").count(), 0);
    }

    #[test]
    fn timepoints_lists_every_visit() {
        let feed = feed();
        assert_eq!(feed.timepoints("T1", "CHI").len(), 1);
        assert!(feed.timepoints("T3", "NYP").is_empty());
    }

    #[test]
    fn timepoint_rejects_repeated_stop() {
        let mut feed = feed();
        assert!(feed.timepoint("T1", "NYP").unwrap().is_some());
        assert!(feed.timepoint("T1", "WAS").unwrap().is_none());

        let looped = stop_time("T1", "NYP", 3, 22);
        feed.stop_times.get_mut("T1").unwrap().push(looped);
        assert!(matches!(
            feed.timepoint("T1", "NYP"),
            Err(FeedError::TwoStops { .. })
        ));
    }
}
