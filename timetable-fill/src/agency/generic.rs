//! Agency backed by nothing but the GTFS feed and optional station info.

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::gtfs::Feed;

use super::{Agency, StationInfo};

/// Wheelchair access as GTFS `wheelchair_boarding` reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boarding {
    Accessible,
    Inaccessible,
}

/// An [`Agency`] built from a feed's `stops.txt`.
///
/// Lookups are precomputed once. Facts GTFS lacks (baggage, sleepers,
/// major stations) come from an optional [`StationInfo`].
#[derive(Debug, Clone, Default)]
pub struct GenericAgency {
    code_to_id: HashMap<String, String>,
    id_to_code: HashMap<String, String>,
    names: HashMap<String, String>,
    boarding: HashMap<String, Boarding>,
    info: StationInfo,
}

impl GenericAgency {
    /// Build the station maps from a feed.
    ///
    /// If any stop has a parent station, wheelchair data is ignored:
    /// boarding flags on child platforms do not describe the station.
    pub fn from_feed(feed: &Feed) -> Self {
        let mut agency = Self::default();
        let mut has_parents = false;

        for stop in feed.stops() {
            agency
                .code_to_id
                .insert(stop.stop_code.clone(), stop.stop_id.clone());
            agency
                .id_to_code
                .insert(stop.stop_id.clone(), stop.stop_code.clone());
            agency
                .names
                .insert(stop.stop_code.clone(), stop.name.clone());

            has_parents |= stop.parent_station.is_some();
            let boarding = match stop.wheelchair_boarding {
                1 => Some(Boarding::Accessible),
                2 => Some(Boarding::Inaccessible),
                _ => None,
            };
            if let Some(boarding) = boarding {
                agency.boarding.insert(stop.stop_code.clone(), boarding);
            }
        }

        if has_parents {
            warn!("stops with parent stations found; wheelchair access data ignored");
            agency.boarding.clear();
        }

        debug!(stations = agency.names.len(), "prepared station maps");
        agency
    }

    /// Attach baggage, sleeper and major-station facts.
    pub fn with_station_info(mut self, info: StationInfo) -> Self {
        self.info = info;
        self
    }
}

impl Agency for GenericAgency {
    fn stop_code_to_stop_id<'a>(&'a self, stop_code: &'a str) -> &'a str {
        self.code_to_id
            .get(stop_code)
            .map_or(stop_code, String::as_str)
    }

    fn stop_id_to_stop_code<'a>(&'a self, stop_id: &'a str) -> &'a str {
        self.id_to_code.get(stop_id).map_or(stop_id, String::as_str)
    }

    fn station_name(&self, stop_code: &str) -> Option<&str> {
        self.names.get(stop_code).map(String::as_str)
    }

    fn is_major_station(&self, stop_code: &str) -> bool {
        self.info.major_stations.contains(stop_code)
    }

    fn station_has_checked_baggage(&self, stop_code: &str) -> bool {
        self.info.baggage_stations.contains(stop_code)
    }

    fn train_has_checked_baggage(&self, train_number: &str) -> bool {
        self.info.baggage_trains.contains(train_number)
    }

    fn station_has_accessible_platform(&self, stop_code: &str) -> bool {
        self.boarding.get(stop_code) == Some(&Boarding::Accessible)
    }

    fn station_has_inaccessible_platform(&self, stop_code: &str) -> bool {
        self.boarding.get(stop_code) == Some(&Boarding::Inaccessible)
    }

    fn is_sleeper_train(&self, train_number: &str) -> bool {
        self.info.sleeper_trains.contains(train_number)
    }

    fn is_connecting_service(&self, train_number: &str) -> bool {
        self.info.connecting_trains.contains(train_number)
    }
}
