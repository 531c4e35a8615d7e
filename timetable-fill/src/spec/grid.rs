//! The rectangular grid of a timetable spec.

use std::io;
use std::path::Path;

use crate::domain::{TrainSpec, TrainSpecError, split_column_key};

use super::SpecError;

/// Column keys that name fixed columns rather than trains.
pub const SPECIAL_COLUMN_NAMES: &[&str] = &["", "station", "stations", "services", "access", "timezone"];

/// Row keys that name fixed rows rather than stations.
pub const SPECIAL_ROW_NAMES: &[&str] = &[
    "",
    "omit",
    "column-options",
    "column_options",
    "route-name",
    "updown",
    "days",
    "days-of-week",
    "origin",
    "destination",
];

/// Whether a column key is one of the fixed keyword columns.
pub fn is_special_column(key: &str) -> bool {
    SPECIAL_COLUMN_NAMES.contains(&key.trim().to_lowercase().as_str())
}

/// Whether a row key is one of the fixed keyword rows.
pub fn is_special_row(key: &str) -> bool {
    SPECIAL_ROW_NAMES.contains(&key.trim().to_lowercase().as_str())
}

/// A spec grid: row 0 holds column keys, column 0 holds row keys.
///
/// Rows are padded with empty cells on construction, so every row has
/// the same length.
///
/// # Examples
///
/// ```
/// use timetable_fill::spec::SpecGrid;
///
/// let grid = SpecGrid::from_rows(vec![
///     vec!["", "59"],
///     vec!["CHI"],
///     vec!["NOL", "59 last"],
/// ]);
/// assert_eq!(grid.row_count(), 3);
/// assert_eq!(grid.col_count(), 2);
/// assert_eq!(grid.cell(1, 1), "");
/// assert_eq!(grid.station_codes(), vec!["CHI", "NOL"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecGrid {
    rows: Vec<Vec<String>>,
    width: usize,
}

impl SpecGrid {
    /// Build a grid from rows of cells, padding short rows.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut grid = Self { rows, width };
        grid.pad();
        grid
    }

    /// Read a header-less CSV grid.
    pub fn read_csv<R: io::Read>(reader: R) -> Result<Self, SpecError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }
        Ok(Self::from_rows(rows))
    }

    /// Read a CSV grid from a file.
    pub fn load(path: &Path) -> Result<Self, SpecError> {
        let file = std::fs::File::open(path).map_err(|source| SpecError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::read_csv(io::BufReader::new(file))
    }

    fn pad(&mut self) {
        let width = self.width;
        for row in &mut self.rows {
            row.resize(width, String::new());
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.width
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// The raw text of a cell; out-of-range cells read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map_or("", String::as_str)
    }

    /// Overwrite a cell. Out-of-range writes are ignored.
    pub fn set_cell(&mut self, row: usize, col: usize, text: impl Into<String>) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = text.into();
        }
    }

    /// Remove and return a row.
    pub fn remove_row(&mut self, row: usize) -> Option<Vec<String>> {
        (row < self.rows.len()).then(|| self.rows.remove(row))
    }

    /// Keep only rows for which `keep` returns true.
    pub fn retain_rows(&mut self, keep: impl FnMut(&Vec<String>) -> bool) {
        self.rows.retain(keep);
    }

    /// Append a row holding `key` in column 0 and blanks elsewhere.
    pub fn push_keyed_row(&mut self, key: impl Into<String>) {
        let mut row = vec![String::new(); self.width.max(1)];
        row[0] = key.into();
        if self.width == 0 {
            self.width = 1;
            self.pad();
        }
        self.rows.push(row);
    }

    /// The trimmed key of a row.
    pub fn row_key(&self, row: usize) -> &str {
        self.cell(row, 0).trim()
    }

    /// The trimmed key of a column.
    pub fn column_key(&self, col: usize) -> &str {
        self.cell(0, col).trim()
    }

    /// Station codes named in column 0, in row order.
    pub fn station_codes(&self) -> Vec<&str> {
        (1..self.row_count())
            .map(|row| self.row_key(row))
            .filter(|key| !is_special_row(key))
            .collect()
    }

    /// Every train named in a column key, flattened, first occurrence
    /// of each lookup key kept.
    pub fn train_specs(&self) -> Result<Vec<TrainSpec>, TrainSpecError> {
        let mut specs: Vec<TrainSpec> = Vec::new();
        for col in 1..self.col_count() {
            let key = self.column_key(col);
            if is_special_column(key) {
                continue;
            }
            for spec in split_column_key(key)? {
                if !specs.iter().any(|s| s.key() == spec.key()) {
                    specs.push(spec);
                }
            }
        }
        Ok(specs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SpecGrid {
        SpecGrid::from_rows(vec![
            vec!["", "station", "59 / 3059 noheader", "58", "timezone"],
            vec!["route-name", "", "", ""],
            vec!["CHI", "", "", "", ""],
            vec!["omit", "a comment"],
            vec!["NOL", "", "59 last", "", ""],
        ])
    }

    #[test]
    fn rows_are_padded() {
        let grid = sample();
        assert_eq!(grid.col_count(), 5);
        assert!(grid.rows().iter().all(|r| r.len() == 5));
        assert_eq!(grid.cell(3, 4), "");
    }

    #[test]
    fn out_of_range_cells_are_empty() {
        let grid = sample();
        assert_eq!(grid.cell(99, 0), "");
        assert_eq!(grid.cell(0, 99), "");
    }

    #[test]
    fn station_codes_skip_keyword_rows() {
        assert_eq!(sample().station_codes(), vec!["CHI", "NOL"]);
    }

    #[test]
    fn keyword_rows_match_case_insensitively() {
        assert!(is_special_row("Route-Name"));
        assert!(is_special_row("  "));
        assert!(!is_special_row("CHI"));
        assert!(is_special_column("Stations"));
        assert!(!is_special_column("59"));
    }

    #[test]
    fn train_specs_are_flattened_and_deduplicated() {
        let grid = SpecGrid::from_rows(vec![
            vec!["", "59 / 3059 noheader", "station", "58", "59"],
        ]);
        let keys: Vec<String> = grid.train_specs().unwrap().iter().map(TrainSpec::key).collect();
        assert_eq!(keys, vec!["59", "3059", "58"]);
    }

    #[test]
    fn set_and_remove() {
        let mut grid = sample();
        grid.set_cell(2, 2, "59 blank");
        assert_eq!(grid.cell(2, 2), "59 blank");
        grid.set_cell(99, 99, "ignored");

        let removed = grid.remove_row(3).unwrap();
        assert_eq!(removed[0], "omit");
        assert_eq!(grid.row_count(), 4);
        assert!(grid.remove_row(99).is_none());
    }

    #[test]
    fn push_keyed_row_pads() {
        let mut grid = sample();
        grid.push_keyed_row("MEM");
        assert_eq!(grid.rows().last().unwrap().len(), 5);
        assert_eq!(grid.row_key(grid.row_count() - 1), "MEM");
    }

    #[test]
    fn read_csv_ragged() {
        let text = ",59,58\nCHI,\nNOL,,\"a, b\"\n";
        let grid = SpecGrid::read_csv(text.as_bytes()).unwrap();
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.col_count(), 3);
        assert_eq!(grid.cell(2, 2), "a, b");
        assert_eq!(grid.column_key(1), "59");
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SpecGrid::load(&dir.path().join("nope.csv"));
        assert!(matches!(result, Err(SpecError::Io { .. })));
    }
}
