//! GTFS static feed loading and filtering.
//!
//! Only the tables and columns the timetable fill engine reads are
//! modelled. Key characteristics of GTFS that matter here:
//! - Times are measured in the agency's timezone and may exceed 24:00:00
//! - A stop may carry its own timezone, which governs how its times are
//!   displayed
//! - `trip_short_name` is the public train number, and is not unique:
//!   the same number can run on different days under different trip ids

mod convert;
mod error;
mod feed;
mod load;
mod model;
mod types;

pub use convert::{parse_gtfs_date, parse_timezone};
pub use error::FeedError;
pub use feed::Feed;
pub use model::{Calendar, ROUTE_TYPE_BUS, Route, Stop, StopTime, Trip};
pub use types::{AgencyRow, CalendarRow, RouteRow, StopRow, StopTimeRow, TripRow};
