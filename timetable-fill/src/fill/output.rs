//! The filled grid and its CSV form.

use std::fs::File;
use std::io;
use std::path::Path;
use tracing::info;

use crate::spec::SpecError;

/// Make a header unique by prefixing its column index as an HTML comment.
pub fn prefix_header(index: usize, header: &str) -> String {
    format!("<!-- {index} -->{header}")
}

/// Drop everything up to and including the first `-->`.
///
/// # Examples
///
/// ```
/// use timetable_fill::fill::strip_header_prefix;
///
/// assert_eq!(strip_header_prefix("<!-- 3 -->Train #59"), "Train #59");
/// assert_eq!(strip_header_prefix("Station"), "Station");
/// ```
pub fn strip_header_prefix(header: &str) -> &str {
    header
        .split_once("-->")
        .map_or(header, |(_, rest)| rest)
}

/// A filled timetable: one body row per spec row after the first, one
/// column per spec column after the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilledTimetable {
    /// Column headers, each prefixed with its index.
    pub headers: Vec<String>,
    /// Header style attributes (HTML only; empty in text).
    pub header_styles: Vec<String>,
    pub body: Vec<Vec<String>>,
    /// Space-separated CSS classes for each body cell.
    pub styles: Vec<Vec<String>>,
}

impl FilledTimetable {
    /// Headers with their index prefixes removed.
    pub fn display_headers(&self) -> Vec<&str> {
        self.headers.iter().map(|h| strip_header_prefix(h)).collect()
    }

    pub fn row_count(&self) -> usize {
        self.body.len()
    }

    pub fn col_count(&self) -> usize {
        self.headers.len()
    }

    /// A body cell; out-of-range cells read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.body
            .get(row)
            .and_then(|r| r.get(col))
            .map_or("", String::as_str)
    }

    /// The classes of a body cell; out-of-range cells have none.
    pub fn style(&self, row: usize, col: usize) -> &str {
        self.styles
            .get(row)
            .and_then(|r| r.get(col))
            .map_or("", String::as_str)
    }

    /// Write the header row (prefixes stripped) and body as CSV.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), SpecError> {
        let mut csv = csv::WriterBuilder::new().flexible(true).from_writer(writer);
        csv.write_record(self.display_headers())?;
        for row in &self.body {
            csv.write_record(row)?;
        }
        csv.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Write CSV to a file, replacing any existing one.
    pub fn write_csv_file(&self, path: &Path) -> Result<(), SpecError> {
        let file = File::create(path).map_err(|source| SpecError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.write_csv(file)?;
        info!(path = %path.display(), rows = self.row_count(), "wrote timetable");
        Ok(())
    }
}
