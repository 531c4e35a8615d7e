//! Turning an authored spec grid into the grid the filler walks.
//!
//! Three passes, in order: drop `omit` comment rows, lift the optional
//! `column-options` row out of the grid, and expand a `stations of N`
//! key cell into station rows.

use tracing::debug;

use crate::agency::Agency;
use crate::domain::TrainSpec;
use crate::fill::FillError;
use crate::gtfs::Feed;

use super::{ColumnOptions, SpecGrid};

const OMIT_MARKER: &str = "omit";
const COLUMN_OPTIONS_MARKERS: &[&str] = &["column-options", "column_options"];
const KEY_CELL_PREFIX: &str = "stations of ";

/// A spec grid ready to fill, with its column options alongside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSpec {
    pub grid: SpecGrid,
    /// One entry per grid column, column 0 included.
    pub column_options: Vec<ColumnOptions>,
}

/// Remove rows whose key is `omit`.
pub fn strip_omits(grid: &mut SpecGrid) {
    let before = grid.row_count();
    grid.retain_rows(|row| row.first().map(String::as_str) != Some(OMIT_MARKER));
    debug!(removed = before - grid.row_count(), "stripped comment rows");
}

/// Take the column-options row out of the grid, if row 1 is one.
///
/// Without such a row every column gets empty options.
pub fn extract_column_options(grid: &mut SpecGrid) -> Vec<ColumnOptions> {
    let marker = grid.cell(1, 0).trim().to_lowercase();
    if grid.row_count() < 2 || !COLUMN_OPTIONS_MARKERS.contains(&marker.as_str()) {
        return vec![ColumnOptions::default(); grid.col_count()];
    }
    let options: Vec<ColumnOptions> = grid
        .remove_row(1)
        .unwrap_or_default()
        .iter()
        .map(|cell| ColumnOptions::parse(cell))
        .collect();
    debug!(?options, "column options");
    options
}

/// The train named by a `stations of N [weekday]` key cell.
///
/// A blank cell names no train. Anything else is an input error.
///
/// # Examples
///
/// ```
/// use timetable_fill::spec::parse_key_cell;
/// use chrono::Weekday;
///
/// let train = parse_key_cell("stations of 59 monday").unwrap().unwrap();
/// assert_eq!(train.number(), "59");
/// assert_eq!(train.day(), Some(Weekday::Mon));
///
/// assert!(parse_key_cell("").unwrap().is_none());
/// assert!(parse_key_cell("trains of 59").is_err());
/// ```
pub fn parse_key_cell(text: &str) -> Result<Option<TrainSpec>, FillError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    let Some(train) = text.strip_prefix(KEY_CELL_PREFIX) else {
        return Err(FillError::Input(format!(
            "key cell must be blank or 'stations of xxx', was {text:?}"
        )));
    };
    Ok(Some(TrainSpec::parse(train)?))
}

/// The station codes a train calls at, in calling order.
///
/// `feed` must already be filtered to the reference date.
pub fn stations_of_train(
    feed: &Feed,
    agency: &dyn Agency,
    train: &TrainSpec,
) -> Result<Vec<String>, FillError> {
    let day_feed;
    let feed = match train.day() {
        Some(day) => {
            day_feed = feed.filter_by_weekday(day);
            &day_feed
        }
        None => feed,
    };

    let trips: Vec<_> = feed.trips_with_short_name(train.number()).collect();
    let trip = match trips.as_slice() {
        [] => return Err(FillError::NoTrip(train.key())),
        [only] => *only,
        _ => {
            return Err(FillError::TwoTrips {
                train: train.key(),
                count: trips.len(),
            });
        }
    };

    Ok(feed
        .trip_stop_ids(&trip.trip_id)
        .into_iter()
        .map(|stop_id| agency.stop_id_to_stop_code(stop_id).to_string())
        .collect())
}

/// Replace a `stations of N` key cell with station rows.
///
/// The key cell is blanked and one row per station is appended after
/// the existing rows.
pub fn expand_key_cell(
    grid: &mut SpecGrid,
    feed: &Feed,
    agency: &dyn Agency,
) -> Result<(), FillError> {
    let Some(train) = parse_key_cell(grid.cell(0, 0))? else {
        return Ok(());
    };
    let stations = stations_of_train(feed, agency, &train)?;
    debug!(train = %train, ?stations, "expanding key cell");

    grid.set_cell(0, 0, "");
    for code in stations {
        grid.push_keyed_row(code);
    }
    Ok(())
}

/// Run all normalization passes on a copy of `grid`.
pub fn normalize(
    grid: &SpecGrid,
    feed: &Feed,
    agency: &dyn Agency,
) -> Result<NormalizedSpec, FillError> {
    let mut grid = grid.clone();
    strip_omits(&mut grid);
    let column_options = extract_column_options(&mut grid);
    expand_key_cell(&mut grid, feed, agency)?;
    Ok(NormalizedSpec {
        grid,
        column_options,
    })
}
