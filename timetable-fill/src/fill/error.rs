//! Fill error types.

use crate::domain::TrainSpecError;
use crate::gtfs::FeedError;

/// Errors that abort filling a timetable.
///
/// All of these are deterministic: re-running with the same spec and
/// feed fails the same way.
#[derive(Debug, thiserror::Error)]
pub enum FillError {
    /// The feed contradicts itself (missing route, unknown stop, ...)
    #[error("GTFS data error: {0}")]
    Gtfs(String),

    /// A train calls at one station more than once on the reference date
    #[error("train {train} (trip {trip_id}) stops at {station} more than once")]
    TwoStops {
        train: String,
        trip_id: String,
        station: String,
    },

    /// A train spec matched no trip on the reference date
    #[error("no trip for train {0} on the reference date")]
    NoTrip(String),

    /// A train spec matched several trips on the reference date
    #[error("train {train} matches {count} trips on the reference date")]
    TwoTrips { train: String, count: usize },

    /// The spec is malformed
    #[error("input error: {0}")]
    Input(String),

    /// The feed could not be loaded
    #[error(transparent)]
    Feed(#[from] FeedError),
}

impl From<TrainSpecError> for FillError {
    fn from(err: TrainSpecError) -> Self {
        FillError::Input(err.to_string())
    }
}
