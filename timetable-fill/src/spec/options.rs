//! Per-column option flags.

/// Flags from a spec's `column-options` row.
///
/// Flags are free-form words; unknown ones are carried but ignored.
///
/// # Examples
///
/// ```
/// use timetable_fill::spec::ColumnOptions;
///
/// let options = ColumnOptions::parse(" reverse  days ");
/// assert!(options.reverse());
/// assert!(options.days());
/// assert!(!options.ardp());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnOptions {
    flags: Vec<String>,
}

impl ColumnOptions {
    /// Split a cell's text on whitespace.
    pub fn parse(text: &str) -> Self {
        Self {
            flags: text.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    pub fn has(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }

    /// The column reads bottom to top.
    pub fn reverse(&self) -> bool {
        self.has("reverse")
    }

    /// Print day-of-week strings in time cells.
    pub fn days(&self) -> bool {
        self.has("days")
    }

    pub fn long_days_box(&self) -> bool {
        self.has("long-days-box")
    }

    pub fn short_days_box(&self) -> bool {
        self.has("short-days-box")
    }

    /// Label one-row times with "Ar"/"Dp".
    pub fn ardp(&self) -> bool {
        self.has("ardp")
    }

    /// Suppress the R/D/F marker.
    pub fn no_rd(&self) -> bool {
        self.has("no-rd")
    }
}
