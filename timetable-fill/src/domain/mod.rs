//! Domain types for the timetable fill engine.
//!
//! This module contains the small value types shared by the feed,
//! spec and fill layers. All types enforce their invariants at
//! construction time, so code that receives them can trust their
//! validity.

mod calendar;
mod time;
mod train_spec;

pub use calendar::{ServiceDays, gtfs_day_name, parse_gtfs_day};
pub use time::{GtfsTime, TimeError, TimeParts, ZoneDiff};
pub use train_spec::{NOHEADER_SUFFIX, TrainSpec, TrainSpecError, split_column_key};
