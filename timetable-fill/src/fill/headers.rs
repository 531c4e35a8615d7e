//! Column headers and the fixed text of keyword rows.

use chrono::{NaiveDate, TimeZone};
use chrono_tz::Tz;

use crate::agency::icons;
use crate::domain::TrainSpec;

use super::{FillError, TrainResolver};

const HTML_LINEBREAK: &str = "<br>";

/// Label over a single train number, by GTFS route type.
pub fn route_number_prefix(route_type: u16) -> &'static str {
    match route_type {
        0 | 1 => "Tram #",
        2 => "Train #",
        3 => "Bus #",
        4 => "Ferry #",
        5 => "Cable Car #",
        6 => "Gondola #",
        7 => "Funicular #",
        11 => "Trolleybus #",
        12 => "Monorail Train #",
        _ => "Trip #",
    }
}

/// Label over several numbers printed side by side.
fn side_by_side_prefix(route_types: &[u16]) -> &'static str {
    match route_types {
        [2] => "Train #",
        [3] => "Bus #",
        [3, 2] => "Bus/Train #s",
        [2, 3] => "Train/Bus #s",
        _ if route_types.iter().all(|&t| t == 2) => "Train #s",
        _ if route_types.iter().all(|&t| t == 3) => "Bus #s",
        _ if route_types.iter().all(|&t| t == 2 || t == 3) => "Train/Bus #s",
        _ => "Trip #s",
    }
}

/// The header of a column of times.
///
/// `noheader` trains are left out; a column of only such trains gets an
/// empty header. Plaintext lists the specs. HTML either stacks one
/// labelled number per train or, side by side, puts all the numbers
/// under one label.
pub fn time_column_header(
    specs: &[TrainSpec],
    resolver: &TrainResolver<'_>,
    doing_html: bool,
    side_by_side: bool,
) -> Result<String, FillError> {
    if specs.is_empty() {
        return Err(FillError::Input("time column with no train specs".into()));
    }
    let shown: Vec<&TrainSpec> = specs.iter().filter(|s| !s.is_noheader()).collect();
    if shown.is_empty() {
        return Ok(String::new());
    }
    if !doing_html {
        let keys: Vec<String> = shown.iter().map(|s| s.key()).collect();
        return Ok(keys.join(" / "));
    }

    let route_types = shown
        .iter()
        .map(|s| resolver.route(s).map(|r| r.route_type))
        .collect::<Result<Vec<u16>, FillError>>()?;

    if side_by_side {
        let numbers: Vec<&str> = shown.iter().map(|s| s.number()).collect();
        return Ok(format!(
            "<small>{}</small>{HTML_LINEBREAK}<strong>{}</strong>",
            side_by_side_prefix(&route_types),
            numbers.join(" / ")
        ));
    }

    let stacked: Vec<String> = shown
        .iter()
        .zip(&route_types)
        .map(|(spec, &route_type)| {
            format!(
                "<small>{}</small>{HTML_LINEBREAK}<strong>{}</strong>",
                route_number_prefix(route_type),
                spec.number()
            )
        })
        .collect();
    Ok(stacked.join("<hr>"))
}

pub fn station_column_header(_doing_html: bool) -> String {
    "Station".to_string()
}

/// Narrow rotated header over the station-services column.
pub fn services_column_header(doing_html: bool) -> String {
    if doing_html {
        format!(r#"<div class="services-header-text">Station{HTML_LINEBREAK}Services</div>"#)
    } else {
        "Services".to_string()
    }
}

/// The wheelchair icon in HTML; spelled out in plaintext.
pub fn access_column_header(doing_html: bool) -> String {
    if doing_html {
        format!(
            r#"<div class="access-header-text"> {}</div>"#,
            icons::accessible_icon(true)
        )
    } else {
        "Access".to_string()
    }
}

pub fn timezone_column_header(doing_html: bool) -> String {
    if doing_html {
        r#"<div class="timezone-header-text">TZ</div>"#.to_string()
    } else {
        "Time Zone".to_string()
    }
}

/// Break a route name into lines for a narrow column header.
///
/// "City - City" names break at the dash; otherwise at spaces, keeping
/// very short words attached to a neighbour.
///
/// # Examples
///
/// ```
/// use timetable_fill::fill::style_route_name_for_column;
///
/// assert_eq!(
///     style_route_name_for_column("City of New Orleans", true),
///     r#"<div class="box-route-name">City of<br>New Orleans</div>"#
/// );
/// assert_eq!(style_route_name_for_column("City of New Orleans", false), "City of New Orleans");
/// ```
pub fn style_route_name_for_column(route_name: &str, doing_html: bool) -> String {
    if !doing_html {
        return route_name.to_string();
    }
    let mut words: Vec<String> = if route_name.split_whitespace().any(|w| w == "-") {
        route_name.split(" - ").map(str::to_string).collect()
    } else {
        route_name.split_whitespace().map(str::to_string).collect()
    };

    let short = |w: &str| w.chars().count() <= 3;
    if words.len() >= 4 && (short(&words[2]) || short(&words[3])) {
        let fourth = words.remove(3);
        words[2] = format!("{} {fourth}", words[2]);
    }
    if words.len() >= 2 && (short(&words[0]) || short(&words[1])) {
        let second = words.remove(1);
        words[0] = format!("{} {second}", words[0]);
    }
    format!(
        r#"<div class="box-route-name">{}</div>"#,
        words.join(HTML_LINEBREAK)
    )
}

/// "Read Up" or "Read Down".
pub fn style_updown(reverse: bool, doing_html: bool) -> String {
    let text = if reverse { "Read Up" } else { "Read Down" };
    if doing_html {
        format!("<b>{text}</b>")
    } else {
        text.to_string()
    }
}

/// Short label for a station's zone as travellers know it.
///
/// North American zones use the regional letters ("ET", "CT", ...);
/// elsewhere the zone's own abbreviation on the reference date.
pub fn zone_label(tz: Tz, reference_date: NaiveDate, doing_html: bool) -> String {
    let label = match tz.name() {
        "America/New_York" | "America/Toronto" | "America/Montreal" | "America/Detroit"
        | "America/Indiana/Indianapolis" | "America/Kentucky/Louisville" => "ET".to_string(),
        "America/Chicago" | "America/Winnipeg" | "America/Indiana/Knox" => "CT".to_string(),
        "America/Denver" | "America/Edmonton" | "America/Boise" => "MT".to_string(),
        "America/Phoenix" => "MST".to_string(),
        "America/Los_Angeles" | "America/Vancouver" => "PT".to_string(),
        "America/Halifax" | "America/Moncton" => "AT".to_string(),
        "America/Anchorage" => "AKT".to_string(),
        "Pacific/Honolulu" => "HT".to_string(),
        _ => {
            let noon = reference_date.and_hms_opt(12, 0, 0).unwrap_or_default();
            tz.from_utc_datetime(&noon).format("%Z").to_string()
        }
    };
    if doing_html {
        format!(r#"<span class="box-tz">{label}</span>"#)
    } else {
        label
    }
}
