//! Timetable specs: the authored grid plus its JSON sidecar.
//!
//! A spec lives in two files sharing a stem: `<name>.csv` holds the grid
//! (row 0 = column keys, column 0 = station codes or keyword rows) and
//! the optional `<name>.json` holds rendering options.

mod cell_codes;
mod config;
mod error;
mod grid;
mod normalize;
mod options;

pub use cell_codes::{CellCodes, cell_substitution, parse_cell_codes};
pub use config::{AuxConfig, DEFAULT_DWELL_SECS_CUTOFF, parse_reference_date};
pub use error::SpecError;
pub use grid::{
    SPECIAL_COLUMN_NAMES, SPECIAL_ROW_NAMES, SpecGrid, is_special_column, is_special_row,
};
pub use normalize::{
    NormalizedSpec, expand_key_cell, extract_column_options, normalize, parse_key_cell,
    stations_of_train, strip_omits,
};
pub use options::ColumnOptions;

use std::path::Path;
use tracing::debug;

/// A spec grid and its rendering options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtSpec {
    pub aux: AuxConfig,
    pub grid: SpecGrid,
}

impl TtSpec {
    pub fn new(aux: AuxConfig, grid: SpecGrid) -> Self {
        Self { aux, grid }
    }

    /// Load `<name>.csv` and, if present, `<name>.json` from `input_dir`.
    ///
    /// `name` may carry either extension. A missing sidecar gives the
    /// default options; `output_filename` defaults to the stem.
    pub fn from_files(name: &str, input_dir: &Path) -> Result<Self, SpecError> {
        let stem = name
            .strip_suffix(".csv")
            .or_else(|| name.strip_suffix(".json"))
            .unwrap_or(name);

        let json_path = input_dir.join(format!("{stem}.json"));
        let mut aux = if json_path.is_file() {
            let text = std::fs::read_to_string(&json_path).map_err(|source| SpecError::Io {
                path: json_path.clone(),
                source,
            })?;
            AuxConfig::from_json(&text).map_err(|e| SpecError::Json {
                message: e.to_string(),
            })?
        } else {
            debug!(path = %json_path.display(), "no aux file");
            AuxConfig::default()
        };

        if aux.output_filename.is_none() {
            let base = Path::new(stem)
                .file_name()
                .map_or_else(|| stem.to_string(), |n| n.to_string_lossy().into_owned());
            aux.output_filename = Some(base);
        }

        let grid = SpecGrid::load(&input_dir.join(format!("{stem}.csv")))?;
        debug!(
            rows = grid.row_count(),
            cols = grid.col_count(),
            "loaded spec grid"
        );
        Ok(Self { aux, grid })
    }
}
