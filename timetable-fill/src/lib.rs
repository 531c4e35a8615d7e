//! Timetable fill engine.
//!
//! Takes a hand-authored timetable spec (a CSV grid of station codes and
//! train numbers plus a JSON sidecar) and a static GTFS feed, and fills
//! every cell with the scheduled time, station name, route name or day
//! string it stands for, ready for a page renderer.

pub mod agency;
pub mod domain;
pub mod fill;
pub mod gtfs;
pub mod spec;
