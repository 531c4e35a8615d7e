//! Mapping train specs to the trips they name on the reference date.

use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::domain::{TrainSpec, gtfs_day_name};
use crate::gtfs::{Feed, FeedError, Route, StopTime, Trip};
use crate::spec::{TtSpec, parse_key_cell};

use super::FillError;

/// Resolves train specs against a feed filtered to one date.
///
/// Two kinds of key are indexed: the plain number (`"91"`) and the
/// number with each day its calendar runs (`"91 monday"`). When several
/// trips share a key the lowest `trip_id` wins and a warning is logged.
#[derive(Debug)]
pub struct TrainResolver<'f> {
    feed: &'f Feed,
    trip_ids: HashMap<String, &'f str>,
}

impl<'f> TrainResolver<'f> {
    pub fn new(feed: &'f Feed) -> Self {
        let mut trip_ids: HashMap<String, &'f str> = HashMap::new();

        // Trips are sorted by id, so the first insert is the lowest id.
        for trip in feed.trips() {
            let mut keys = vec![trip.short_name.clone()];
            if let Some(calendar) = feed.calendar(&trip.service_id) {
                keys.extend(
                    calendar
                        .days
                        .iter()
                        .map(|day| format!("{} {}", trip.short_name, gtfs_day_name(day))),
                );
            }
            for key in keys {
                if let Some(existing) = trip_ids.get(&key) {
                    if key == trip.short_name {
                        warn!(
                            train = %key,
                            kept = %existing,
                            ignored = %trip.trip_id,
                            "duplicate train number; keeping lowest trip id"
                        );
                    }
                    continue;
                }
                trip_ids.insert(key, trip.trip_id.as_str());
            }
        }

        debug!(keys = trip_ids.len(), "train spec index built");
        Self { feed, trip_ids }
    }

    pub fn feed(&self) -> &'f Feed {
        self.feed
    }

    /// The trip id a spec names.
    pub fn trip_id(&self, spec: &TrainSpec) -> Result<&'f str, FillError> {
        self.trip_ids
            .get(&spec.key())
            .copied()
            .ok_or_else(|| FillError::Input(format!("no trip_id for {}", spec.key())))
    }

    /// The single trip row a spec names.
    pub fn trip(&self, spec: &TrainSpec) -> Result<&'f Trip, FillError> {
        let trip_id = self.trip_id(spec)?;
        let trips: Vec<&Trip> = self.feed.trips_with_id(trip_id).collect();
        match trips.as_slice() {
            [] => Err(FillError::NoTrip(spec.key())),
            [only] => Ok(*only),
            _ => Err(FillError::TwoTrips {
                train: spec.key(),
                count: trips.len(),
            }),
        }
    }

    /// The route of the trip a spec names.
    pub fn route(&self, spec: &TrainSpec) -> Result<&'f Route, FillError> {
        let trip = self.trip(spec)?;
        self.feed.route(&trip.route_id).ok_or_else(|| {
            FillError::Gtfs(format!(
                "missing route {} for train {}",
                trip.route_id,
                spec.key()
            ))
        })
    }

    /// The stop time of the spec's trip at `stop_id`, if it calls there.
    pub fn timepoint(&self, spec: &TrainSpec, stop_id: &str) -> Result<Option<&'f StopTime>, FillError> {
        let trip = self.trip(spec)?;
        self.feed
            .timepoint(&trip.trip_id, stop_id)
            .map_err(|err| match err {
                FeedError::TwoStops { trip_id, stop_id } => FillError::TwoStops {
                    train: spec.key(),
                    trip_id,
                    station: stop_id,
                },
                other => FillError::Feed(other),
            })
    }
}

/// Cut a feed down to the trips a spec can reference.
///
/// Filters to the reference date, then to the train numbers in the
/// column keys and the key cell. Duplicate numbers that survive are
/// logged; they only matter if a spec uses one without a weekday.
pub fn reduce_feed_for_spec(
    feed: &Feed,
    spec: &TtSpec,
    reference_date: NaiveDate,
) -> Result<Feed, FillError> {
    let today = feed.filter_by_date(reference_date);

    let mut numbers: Vec<String> = spec
        .grid
        .train_specs()?
        .iter()
        .map(|s| s.number().to_string())
        .collect();
    if let Some(key_train) = parse_key_cell(spec.grid.cell(0, 0))? {
        numbers.push(key_train.number().to_string());
    }

    let reduced = today.filter_by_trip_short_names(&numbers);

    let mut seen: HashMap<&str, usize> = HashMap::new();
    for trip in reduced.trips() {
        *seen.entry(trip.short_name.as_str()).or_default() += 1;
    }
    let mut dupes: Vec<&str> = seen
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(number, _)| number)
        .collect();
    dupes.sort_unstable();
    if !dupes.is_empty() {
        warn!(
            ?dupes,
            "train numbers with several trips on the reference date; use a weekday to pick one"
        );
    }

    info!(
        %reference_date,
        trains = numbers.len(),
        trips = reduced.trips().len(),
        "feed reduced for spec"
    );
    Ok(reduced)
}
