//! Agency-specific knowledge used while filling a timetable.
//!
//! GTFS says when trains run. It does not say which stations handle
//! checked baggage, which trains are sleepers, or how an agency likes its
//! station names printed. The [`Agency`] trait collects those questions;
//! one implementation is built per run and passed into the fill.

mod error;
mod generic;
pub mod icons;
mod station_info;

pub use error::AgencyError;
pub use generic::GenericAgency;
pub use station_info::StationInfo;

use crate::gtfs::Route;

/// How a station name will be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameStyle {
    SingleLine,
    MultiLine,
    Html,
}

impl NameStyle {
    /// Pick the style for the output mode.
    pub fn for_output(doing_html: bool, doing_multiline_text: bool) -> Self {
        if doing_html {
            NameStyle::Html
        } else if doing_multiline_text {
            NameStyle::MultiLine
        } else {
            NameStyle::SingleLine
        }
    }
}

/// Color of a time column: a cell class and a header attribute string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnStyle {
    pub class: &'static str,
    pub attributes: &'static str,
}

impl ColumnStyle {
    pub const BUS: ColumnStyle = ColumnStyle {
        class: "color-bus",
        attributes: "background-color: honeydew;",
    };
    pub const CONNECTING_TRAIN: ColumnStyle = ColumnStyle {
        class: "color-connecting-train",
        attributes: "background-color: blanchedalmond;",
    };
    pub const SLEEPER: ColumnStyle = ColumnStyle {
        class: "color-sleeper",
        attributes: "background-color: lavender;",
    };
    pub const DAY_TRAIN: ColumnStyle = ColumnStyle {
        class: "color-day-train",
        attributes: "background-color: cornsilk;",
    };
}

/// Agency knowledge the fill engine depends on.
///
/// Station codes are the public codes written in spec files; stop ids are
/// GTFS keys. Most methods have conservative defaults.
pub trait Agency {
    /// Map a station code to its GTFS stop id.
    ///
    /// Unknown codes map to themselves.
    fn stop_code_to_stop_id<'a>(&'a self, stop_code: &'a str) -> &'a str;

    /// Map a GTFS stop id to its station code.
    ///
    /// Unknown ids map to themselves.
    fn stop_id_to_stop_code<'a>(&'a self, stop_id: &'a str) -> &'a str;

    /// The raw feed name of a station.
    fn station_name(&self, stop_code: &str) -> Option<&str>;

    fn is_major_station(&self, _stop_code: &str) -> bool {
        false
    }

    /// The station name formatted for a station column.
    ///
    /// Major stations are upper-cased in text and tagged `major-station`
    /// in HTML. Multi-line text breaks before a " - " facility suffix.
    fn station_name_pretty(&self, stop_code: &str, style: NameStyle) -> String {
        let raw = self.station_name(stop_code).unwrap_or(stop_code);
        let major = self.is_major_station(stop_code);
        match style {
            NameStyle::SingleLine if major => raw.to_uppercase(),
            NameStyle::SingleLine => raw.to_string(),
            NameStyle::MultiLine => {
                let (city, facility) = match raw.split_once(" - ") {
                    Some((city, facility)) => (city, Some(facility)),
                    None => (raw, None),
                };
                let city = if major {
                    city.to_uppercase()
                } else {
                    city.to_string()
                };
                match facility {
                    Some(facility) => format!("{city}\n - {facility}"),
                    None => city,
                }
            }
            NameStyle::Html => {
                let class = if major {
                    "major-station"
                } else {
                    "minor-station"
                };
                match raw.split_once(" - ") {
                    Some((city, facility)) => format!(
                        r#"<span class="{class}">{city}</span><br><span class="station-footnotes"> - {facility}</span>"#
                    ),
                    None => format!(r#"<span class="{class}">{raw}</span>"#),
                }
            }
        }
    }

    /// Name of a train's origin, for the "origin" row.
    fn station_name_from(&self, stop_code: &str, style: NameStyle) -> String {
        self.station_name_pretty(stop_code, style)
    }

    /// Name of a train's destination, for the "destination" row.
    fn station_name_to(&self, stop_code: &str, style: NameStyle) -> String {
        self.station_name_pretty(stop_code, style)
    }

    fn station_has_checked_baggage(&self, _stop_code: &str) -> bool {
        false
    }

    fn train_has_checked_baggage(&self, _train_number: &str) -> bool {
        false
    }

    fn station_has_accessible_platform(&self, _stop_code: &str) -> bool {
        false
    }

    fn station_has_inaccessible_platform(&self, _stop_code: &str) -> bool {
        false
    }

    fn is_sleeper_train(&self, _train_number: &str) -> bool {
        false
    }

    /// Whether a train is run by a partner and shown as a connection.
    fn is_connecting_service(&self, _train_number: &str) -> bool {
        false
    }

    /// Display name of a route.
    fn route_name(&self, route: &Route) -> String {
        route.display_name().to_string()
    }

    /// Color for a time column, from its first train.
    fn time_column_style(&self, train_number: &str, route: &Route) -> ColumnStyle {
        if route.is_bus() {
            ColumnStyle::BUS
        } else if self.is_connecting_service(train_number) {
            ColumnStyle::CONNECTING_TRAIN
        } else if self.is_sleeper_train(train_number) {
            ColumnStyle::SLEEPER
        } else {
            ColumnStyle::DAY_TRAIN
        }
    }
}
