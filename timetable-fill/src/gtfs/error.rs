//! GTFS feed error types.

/// Errors that can occur while loading a GTFS feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// A table could not be read or deserialized
    #[error("failed to read {table}: {source}")]
    Csv {
        table: &'static str,
        #[source]
        source: csv::Error,
    },

    /// `agency.txt` has no rows
    #[error("feed has no agency")]
    NoAgency,

    /// A timezone name is not in the IANA database
    #[error("unknown timezone: {0}")]
    InvalidTimezone(String),

    /// A trip calls at the same stop more than once
    #[error("trip {trip_id} calls at stop {stop_id} more than once")]
    TwoStops { trip_id: String, stop_id: String },

    /// A cell could not be parsed
    #[error("invalid {field} in {table}: {value:?}")]
    InvalidField {
        table: &'static str,
        field: &'static str,
        value: String,
    },
}
