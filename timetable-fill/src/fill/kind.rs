//! Classifying a spec cell before it is filled.
//!
//! Each (row, column) pair is resolved to one [`CellKind`] by walking
//! [`CELL_RULES`] in order; the first matching predicate wins and
//! anything unmatched is an ordinary time cell.

use crate::spec::CellCodes;

/// What column 0 says about a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Blank,
    RouteName,
    UpDown,
    Days,
    Origin,
    Destination,
    /// A station code.
    Station,
}

impl RowKind {
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_lowercase().as_str() {
            "" => RowKind::Blank,
            "route-name" => RowKind::RouteName,
            "updown" => RowKind::UpDown,
            "days" | "days-of-week" => RowKind::Days,
            "origin" => RowKind::Origin,
            "destination" => RowKind::Destination,
            _ => RowKind::Station,
        }
    }
}

/// What row 0 says about a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Station,
    Services,
    Access,
    Timezone,
    /// One or more trains sharing the column.
    Trains,
}

impl ColumnKind {
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_lowercase().as_str() {
            "station" | "stations" => ColumnKind::Station,
            "services" => ColumnKind::Services,
            "access" => ColumnKind::Access,
            "timezone" => ColumnKind::Timezone,
            _ => ColumnKind::Trains,
        }
    }

    pub fn is_keyword(self) -> bool {
        self != ColumnKind::Trains
    }
}

/// How a cell will be filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Nothing at all.
    Empty,
    /// Empty, colored for the train a `blank` code names.
    BlankOverride,
    /// The author's text, unchanged.
    FreeText,
    /// Route-name row in a keyword column: the author's text, styled.
    KeywordRouteName,
    RouteName,
    KeywordUpDown,
    UpDown,
    KeywordDays,
    /// Days row with no reference station.
    DaysBlank,
    /// Days row naming a reference station.
    Days,
    /// Origin or destination row in a keyword column.
    KeywordEndpoint,
    Origin,
    Destination,
    StationName,
    Services,
    Access,
    Timezone,
    Timepoint,
}

/// Everything classification looks at.
#[derive(Debug, Clone, Copy)]
pub struct CellContext<'a> {
    pub row: RowKind,
    pub column: ColumnKind,
    /// Trimmed cell text after keyword substitution.
    pub text: &'a str,
    pub codes: Option<&'a CellCodes>,
}

type CellPredicate = fn(&CellContext<'_>) -> bool;

/// Ordered classification rules.
pub const CELL_RULES: &[(CellPredicate, CellKind)] = &[
    (|c| c.row == RowKind::Blank && c.text.is_empty(), CellKind::Empty),
    (
        |c| c.row == RowKind::Blank && c.codes.is_some_and(|codes| codes.blank),
        CellKind::BlankOverride,
    ),
    (|c| c.row == RowKind::Blank, CellKind::FreeText),
    (
        |c| c.row == RowKind::RouteName && c.column.is_keyword(),
        CellKind::KeywordRouteName,
    ),
    (|c| c.row == RowKind::RouteName, CellKind::RouteName),
    (
        |c| c.row == RowKind::UpDown && c.column.is_keyword(),
        CellKind::KeywordUpDown,
    ),
    (|c| c.row == RowKind::UpDown, CellKind::UpDown),
    (
        |c| c.row == RowKind::Days && c.column.is_keyword(),
        CellKind::KeywordDays,
    ),
    (
        |c| c.row == RowKind::Days && c.text.is_empty(),
        CellKind::DaysBlank,
    ),
    (|c| c.row == RowKind::Days, CellKind::Days),
    (
        |c| !c.text.is_empty() && c.codes.is_none(),
        CellKind::FreeText,
    ),
    (
        |c| matches!(c.row, RowKind::Origin | RowKind::Destination) && c.column.is_keyword(),
        CellKind::KeywordEndpoint,
    ),
    (|c| c.row == RowKind::Origin, CellKind::Origin),
    (|c| c.row == RowKind::Destination, CellKind::Destination),
    (|c| c.column == ColumnKind::Station, CellKind::StationName),
    (|c| c.column == ColumnKind::Services, CellKind::Services),
    (|c| c.column == ColumnKind::Access, CellKind::Access),
    (|c| c.column == ColumnKind::Timezone, CellKind::Timezone),
];

/// Resolve a cell's kind.
pub fn classify(cell: &CellContext<'_>) -> CellKind {
    CELL_RULES
        .iter()
        .find(|(matches, _)| matches(cell))
        .map_or(CellKind::Timepoint, |&(_, kind)| kind)
}
