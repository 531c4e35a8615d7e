//! The fill engine: turn a normalized spec grid and a date-filtered feed
//! into a grid of cell text with styles and column headers.
//!
//! Typical use:
//!
//! 1. Load a [`Feed`](crate::gtfs::Feed) and a [`TtSpec`](crate::spec::TtSpec).
//! 2. Cut the feed down with [`reduce_feed_for_spec`].
//! 3. Call [`fill_timetable`] and write the result with
//!    [`FilledTimetable::write_csv`].

mod config;
mod dwell;
mod error;
mod filler;
mod format;
mod headers;
mod kind;
mod output;
mod resolver;

#[cfg(test)]
mod fill_tests;

pub use config::{ArdpMode, FillOptions};
pub use dwell::{DwellMap, effective_dwell_secs};
pub use error::FillError;
pub use filler::fill_timetable;
pub use format::{DaysBox, LinePosition, MISSING_TIME, TimepointFormat, rd_marker, rd_str};
pub use headers::{
    access_column_header, route_number_prefix, services_column_header, station_column_header,
    style_route_name_for_column, style_updown, time_column_header, timezone_column_header,
    zone_label,
};
pub use kind::{CELL_RULES, CellContext, CellKind, ColumnKind, RowKind, classify};
pub use output::{FilledTimetable, prefix_header, strip_header_prefix};
pub use resolver::{TrainResolver, reduce_feed_for_spec};
