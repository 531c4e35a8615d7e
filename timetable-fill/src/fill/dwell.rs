//! Deciding which stations get separate arrival and departure lines.

use std::collections::HashMap;
use tracing::debug;

use crate::agency::Agency;
use crate::domain::TrainSpec;
use crate::gtfs::StopTime;

use super::{FillError, TrainResolver};

/// Dwell that counts toward a two-row layout.
///
/// A pickup-only or drop-off-only stop has no dwell passengers would
/// care about, so it counts as zero.
pub fn effective_dwell_secs(stop_time: Option<&StopTime>) -> i64 {
    match stop_time {
        None => 0,
        Some(st) if st.drop_off_type == 1 || st.pickup_type == 1 => 0,
        Some(st) => st.dwell_secs(),
    }
}

/// Per-station maximum dwell over every train in a spec.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DwellMap {
    max_dwell: HashMap<String, i64>,
    cutoff_secs: i64,
}

impl DwellMap {
    /// Measure every station against every train.
    ///
    /// The maximum runs over all trains in the spec, not just those in
    /// one column, so a station's layout is the same in every column.
    pub fn build(
        station_codes: &[&str],
        trains: &[TrainSpec],
        resolver: &TrainResolver<'_>,
        agency: &dyn Agency,
        cutoff_secs: i64,
    ) -> Result<Self, FillError> {
        let mut max_dwell = HashMap::new();
        for &code in station_codes {
            let stop_id = agency.stop_code_to_stop_id(code);
            let mut max = 0;
            for train in trains {
                let dwell = effective_dwell_secs(resolver.timepoint(train, stop_id)?);
                max = max.max(dwell);
            }
            max_dwell.insert(code.to_string(), max);
        }
        debug!(stations = max_dwell.len(), cutoff_secs, "dwell map prepared");
        Ok(Self {
            max_dwell,
            cutoff_secs,
        })
    }

    /// The longest dwell at a station; unknown stations have none.
    pub fn max_dwell_secs(&self, station_code: &str) -> i64 {
        self.max_dwell.get(station_code).copied().unwrap_or(0)
    }

    pub fn is_two_row(&self, station_code: &str) -> bool {
        self.max_dwell_secs(station_code) >= self.cutoff_secs
    }
}
