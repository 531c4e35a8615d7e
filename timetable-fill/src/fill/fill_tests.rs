//! End-to-end tests for filling spec grids against a small feed.

use super::*;
use crate::agency::GenericAgency;
use crate::domain::{GtfsTime, ServiceDays};
use crate::gtfs::{Calendar, Feed, Route, Stop, StopTime, Trip};
use crate::spec::{AuxConfig, SpecGrid, TtSpec};
use chrono::{NaiveDate, Weekday};
use proptest::prelude::*;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
}

fn route(id: &str, name: &str, route_type: u16) -> Route {
    Route {
        route_id: id.into(),
        short_name: None,
        long_name: Some(name.into()),
        route_type,
    }
}

fn trip(number: &str, route: &str, service: &str) -> Trip {
    Trip {
        trip_id: format!("t{number}"),
        route_id: route.into(),
        service_id: service.into(),
        short_name: number.into(),
    }
}

fn stop(code: &str, name: &str, wheelchair: u8) -> Stop {
    Stop {
        stop_id: code.into(),
        stop_code: code.into(),
        name: name.into(),
        timezone: None,
        parent_station: None,
        wheelchair_boarding: wheelchair,
    }
}

fn call(number: &str, stop: &str, seq: u32, arr: &str, dep: &str) -> StopTime {
    StopTime {
        trip_id: format!("t{number}"),
        stop_id: stop.into(),
        stop_sequence: seq,
        arrival: Some(GtfsTime::parse(arr).unwrap()),
        departure: Some(GtfsTime::parse(dep).unwrap()),
        pickup_type: 0,
        drop_off_type: 0,
        timepoint: None,
    }
}

fn calendar(service: &str, days: ServiceDays) -> Calendar {
    Calendar {
        service_id: service.into(),
        days,
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
    }
}

/// Chicago - New Orleans with a few extra trains.
///
/// MEM is a long stop for 58 and 59; CDL is short for both.
fn feed() -> Feed {
    let weekdays = ServiceDays::empty()
        .with(Weekday::Mon)
        .with(Weekday::Tue)
        .with(Weekday::Wed)
        .with(Weekday::Thu)
        .with(Weekday::Fri);

    Feed::new(
        chrono_tz::America::Chicago,
        vec![
            route("CONO", "City of New Orleans", 2),
            route("ILLI", "Illini", 2),
            route("BUS", "Thruway", 3),
        ],
        vec![
            trip("58", "CONO", "daily"),
            trip("59", "CONO", "daily"),
            trip("61", "CONO", "daily"),
            trip("174", "ILLI", "weekday"),
            trip("21", "ILLI", "daily"),
            trip("3059", "BUS", "daily"),
        ],
        vec![
            stop("CHI", "Chicago, IL - Union Station", 1),
            stop("CDL", "Carbondale, IL", 2),
            stop("MEM", "Memphis, TN", 0),
            stop("NOL", "New Orleans, LA", 0),
        ],
        vec![
            call("58", "NOL", 1, "13:45:00", "13:45:00"),
            call("58", "MEM", 2, "22:05:00", "22:30:00"),
            call("58", "CDL", 3, "27:00:00", "27:02:00"),
            call("58", "CHI", 4, "33:00:00", "33:00:00"),
            call("59", "CHI", 1, "20:05:00", "20:05:00"),
            call("59", "CDL", 2, "25:26:00", "25:28:00"),
            call("59", "MEM", 3, "30:27:00", "30:47:00"),
            call("59", "NOL", 4, "39:32:00", "39:32:00"),
            call("61", "CDL", 1, "11:00:00", "11:06:00"),
            call("61", "MEM", 2, "15:00:00", "15:00:00"),
            call("174", "CHI", 1, "19:00:00", "19:00:00"),
            call("174", "CDL", 2, "24:30:00", "24:30:00"),
            call("21", "CHI", 1, "07:00:00", "07:00:00"),
            StopTime {
                drop_off_type: 1,
                ..call("21", "CDL", 2, "10:00:00", "10:10:00")
            },
            StopTime {
                pickup_type: 1,
                ..call("21", "MEM", 3, "13:00:00", "13:05:00")
            },
            call("3059", "CDL", 1, "10:00:00", "10:00:00"),
            call("3059", "MEM", 2, "14:00:00", "14:00:00"),
        ],
        vec![
            calendar("daily", ServiceDays::DAILY),
            calendar("weekday", weekdays),
        ],
    )
}

fn spec_with(aux: AuxConfig, rows: Vec<Vec<&str>>) -> TtSpec {
    TtSpec::new(
        AuxConfig {
            reference_date: Some(date()),
            ..aux
        },
        SpecGrid::from_rows(rows),
    )
}

fn fill_spec(spec: &TtSpec, options: &FillOptions) -> Result<FilledTimetable, FillError> {
    let feed = feed();
    let agency = GenericAgency::from_feed(&feed);
    fill_timetable(spec, &feed, &agency, options)
}

fn fill(rows: Vec<Vec<&str>>) -> FilledTimetable {
    fill_spec(&spec_with(AuxConfig::default(), rows), &FillOptions::default()).unwrap()
}

fn fill_with(options: FillOptions, rows: Vec<Vec<&str>>) -> FilledTimetable {
    fill_spec(&spec_with(AuxConfig::default(), rows), &options).unwrap()
}

fn main_line() -> Vec<Vec<&'static str>> {
    vec![
        vec!["", "59", "58", "station"],
        vec!["column-options", "", "reverse", ""],
        vec!["route-name", "", "", ""],
        vec!["CHI", "", "58 last", ""],
        vec!["CDL", "", "", ""],
        vec!["MEM", "", "", ""],
        vec!["NOL", "59 last", "", ""],
    ]
}

#[test]
fn fills_both_directions() {
    let tt = fill(main_line());

    assert_eq!(tt.display_headers(), vec!["59", "58", "Station"]);
    assert_eq!(tt.headers[0], "<!-- 0 -->59");
    assert_eq!(
        tt.body,
        vec![
            vec!["City of New Orleans", "City of New Orleans", ""],
            vec!["  8:05P", "  9:00A", "Chicago, IL\n - Union Station"],
            vec!["  1:28A", "  3:02A", "Carbondale, IL"],
            vec!["  6:27A\n  6:47A", " 10:30P\n 10:05P", "Memphis, TN"],
            vec!["  3:32P", "  1:45P", "New Orleans, LA"],
        ]
    );
    assert_eq!(tt.style(0, 0), "route-name-cell color-day-train");
    assert_eq!(tt.style(0, 2), "route-name-cell");
    assert_eq!(tt.style(1, 0), "time-cell color-day-train");
    assert_eq!(tt.style(1, 2), "station-cell");
    assert!(tt.header_styles.iter().all(String::is_empty));
}

#[test]
fn filling_is_idempotent() {
    assert_eq!(fill(main_line()), fill(main_line()));
}

#[test]
fn reduced_feed_gives_the_same_timetable() {
    let spec = spec_with(AuxConfig::default(), main_line());
    let full = feed();
    let reduced = reduce_feed_for_spec(&full, &spec, date()).unwrap();
    let agency = GenericAgency::from_feed(&full);

    let from_reduced = fill_timetable(&spec, &reduced, &agency, &FillOptions::default()).unwrap();
    assert_eq!(from_reduced, fill(main_line()));
}

#[test]
fn csv_round_trip() {
    let tt = fill(main_line());
    let mut out = Vec::new();
    tt.write_csv(&mut out).unwrap();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(out.as_slice());
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, tt.display_headers());
    let body: Vec<Vec<String>> = reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    assert_eq!(body, tt.body);
}

#[test]
fn last_code_picks_one_train_in_shared_column() {
    let tt = fill(vec![
        vec!["", "59/174"],
        vec!["CHI", ""],
        vec!["CDL", "174"],
        vec!["MEM", ""],
        vec!["NOL", "59 last"],
    ]);
    assert_eq!(tt.display_headers(), vec!["59 / 174"]);
    assert_eq!(tt.cell(0, 0), "  8:05P");
    assert_eq!(tt.cell(1, 0), " 12:30A");
    assert_eq!(tt.cell(2, 0), "  6:27A\n  6:47A");
    assert_eq!(tt.cell(3, 0), "  3:32P");
}

#[test]
fn longest_dwell_makes_every_column_two_row() {
    // 61 dwells six minutes at CDL, 59 only two.
    let tt = fill(vec![vec!["", "61", "59"], vec!["CDL", "", ""]]);
    assert_eq!(tt.cell(0, 0), " 11:00A\n 11:06A");
    assert_eq!(tt.cell(0, 1), "  1:26A\n  1:28A");
}

#[test]
fn zero_dwell_in_two_row_layout_shows_departure_only() {
    let always = FillOptions::new(false, true, ArdpMode::Always);
    let tt = fill_with(always, vec![vec!["", "59"], vec!["CHI", ""], vec!["MEM", ""]]);
    assert_eq!(tt.cell(0, 0), "\n  8:05P");
    assert_eq!(tt.cell(1, 0), "  6:27A\n  6:47A");

    let never = FillOptions::new(false, true, ArdpMode::Never);
    let tt = fill_with(never, vec![vec!["", "59"], vec!["MEM", ""]]);
    assert_eq!(tt.cell(0, 0), "  6:47A");
}

#[test]
fn pickup_and_drop_off_markers() {
    let rows = || vec![vec!["", "21"], vec!["CDL", ""], vec!["MEM", ""]];

    let tt = fill_with(FillOptions::new(false, true, ArdpMode::Always), rows());
    assert_eq!(tt.cell(0, 0), "\nR10:10A");
    assert_eq!(tt.cell(1, 0), "D 1:00P\n");

    let tt = fill_with(FillOptions::new(false, true, ArdpMode::Never), rows());
    assert_eq!(tt.cell(0, 0), "R10:10A");
    assert_eq!(tt.cell(1, 0), "D 1:00P");
}

#[test]
fn key_cell_lists_stations_of_a_train() {
    let tt = fill(vec![vec!["stations of 59", "59"]]);
    assert_eq!(
        tt.body,
        vec![
            vec!["  8:05P"],
            vec!["  1:28A"],
            vec!["  6:27A\n  6:47A"],
            vec!["  3:32P"],
        ]
    );
}

#[test]
fn missing_reference_date_is_input_error() {
    let spec = TtSpec::new(
        AuxConfig::default(),
        SpecGrid::from_rows(vec![vec!["", "59"], vec!["CHI", ""]]),
    );
    let err = fill_spec(&spec, &FillOptions::default()).unwrap_err();
    assert!(matches!(err, FillError::Input(_)));
}

#[test]
fn code_for_train_outside_column_is_input_error() {
    let spec = spec_with(
        AuxConfig::default(),
        vec![vec!["", "59"], vec!["CHI", "58 last"]],
    );
    let err = fill_spec(&spec, &FillOptions::default()).unwrap_err();
    assert!(matches!(err, FillError::Input(_)));
}

#[test]
fn unknown_station_is_gtfs_error() {
    let spec = spec_with(AuxConfig::default(), vec![vec!["", "59"], vec!["XYZ", ""]]);
    let err = fill_spec(&spec, &FillOptions::default()).unwrap_err();
    assert!(matches!(err, FillError::Gtfs(_)));
}

#[test]
fn unknown_train_is_input_error() {
    let spec = spec_with(AuxConfig::default(), vec![vec!["", "9999"], vec!["CHI", ""]]);
    let err = fill_spec(&spec, &FillOptions::default()).unwrap_err();
    assert!(matches!(err, FillError::Input(_)));
}

#[test]
fn keyword_columns() {
    let tt = fill(vec![
        vec!["", "59", "access", "timezone", "services"],
        vec!["CHI", "", "", "", ""],
        vec!["CDL", "", "", "", ""],
        vec!["MEM", "", "", "", ""],
    ]);
    assert_eq!(
        tt.display_headers(),
        vec!["59", "Access", "Time Zone", "Services"]
    );
    assert_eq!(tt.cell(0, 1), "♿");
    assert_eq!(tt.cell(1, 1), "✗");
    assert_eq!(tt.cell(2, 1), "");
    assert_eq!(tt.style(2, 1), "access-cell");
    assert_eq!(tt.cell(0, 2), "CT");
    assert_eq!(tt.style(0, 2), "timezone-cell");
    assert_eq!(tt.cell(0, 3), "");
    assert_eq!(tt.style(0, 3), "services-cell");
}

#[test]
fn origin_and_destination_rows() {
    let tt = fill(vec![
        vec!["", "59", "station"],
        vec!["origin", "", ""],
        vec!["CDL", "", ""],
        vec!["MEM", "", ""],
        vec!["destination", "", ""],
    ]);
    assert_eq!(tt.cell(0, 0), "Chicago, IL\n - Union Station");
    assert_eq!(tt.cell(3, 0), "New Orleans, LA");
    assert_eq!(tt.style(0, 0), "");
    assert_eq!(tt.cell(0, 1), "");
    assert_eq!(tt.cell(3, 1), "");

    // Endpoints already listed are not repeated.
    let tt = fill(vec![
        vec!["", "59"],
        vec!["origin", ""],
        vec!["CHI", ""],
        vec!["NOL", ""],
        vec!["destination", ""],
    ]);
    assert_eq!(tt.cell(0, 0), "");
    assert_eq!(tt.cell(3, 0), "");
}

#[test]
fn days_row_and_day_strings() {
    let tt = fill(vec![
        vec!["", "174", "station"],
        vec!["column-options", "days", ""],
        vec!["days", "CDL", ""],
        vec!["days-of-week", "", ""],
        vec!["CDL", "", ""],
    ]);
    // 174 runs weekdays and reaches CDL after midnight.
    assert_eq!(tt.cell(0, 0), "TuWeThFrSa");
    assert_eq!(tt.style(0, 0), "days-of-week-cell color-day-train");
    assert_eq!(tt.cell(1, 0), "");
    assert_eq!(tt.style(1, 0), "days-of-week-cell color-day-train");
    assert_eq!(tt.style(0, 1), "days-of-week-cell");
    assert_eq!(tt.cell(2, 0), " 12:30A TuWeThFrSa");
}

#[test]
fn updown_row_follows_reverse_option() {
    let tt = fill(vec![
        vec!["", "59", "58", "station"],
        vec!["column-options", "", "reverse", ""],
        vec!["updown", "", "", ""],
        vec!["MEM", "", "", ""],
    ]);
    assert_eq!(tt.body[0], vec!["Read Down", "Read Up", ""]);
    assert_eq!(tt.style(0, 2), "updown-cell");
}

#[test]
fn blank_and_free_text_cells() {
    let tt = fill(vec![
        vec!["", "59"],
        vec!["", "blank"],
        vec!["", "Daily"],
        vec!["", "59 blank"],
        vec!["", ""],
        vec!["CHI", "59 blank"],
        vec!["CDL", "blank"],
        vec!["MEM", "Bus at 6"],
        vec!["NOL", "downarrow"],
    ]);
    assert_eq!(tt.cell(0, 0), " ");
    assert_eq!(tt.style(0, 0), "special-cell");
    assert_eq!(tt.cell(1, 0), "Daily");
    assert_eq!(tt.cell(2, 0), "");
    assert_eq!(tt.style(2, 0), "blank-cell color-day-train");
    assert_eq!(tt.cell(3, 0), "");
    assert_eq!(tt.style(3, 0), "");
    assert_eq!(tt.cell(4, 0), "");
    assert_eq!(tt.style(4, 0), "blank-cell color-day-train");
    assert_eq!(tt.cell(5, 0), " ");
    assert_eq!(tt.style(5, 0), "special-cell");
    assert_eq!(tt.cell(6, 0), "Bus at 6");
    assert_eq!(tt.cell(7, 0), "↓");
}

#[test]
fn prose_ending_in_a_code_word_stays_free_text() {
    let tt = fill(vec![
        vec!["", "59"],
        vec!["", "Leave blank"],
        vec!["CHI", "Runs last"],
    ]);
    assert_eq!(tt.cell(0, 0), "Leave blank");
    assert_eq!(tt.style(0, 0), "special-cell");
    assert_eq!(tt.cell(1, 0), "Runs last");
    assert_eq!(tt.style(1, 0), "special-cell");
}

#[test]
fn bare_codes_in_station_column_keep_the_name() {
    let plain = fill(vec![vec!["", "station"], vec!["CHI", ""], vec!["MEM", ""]]);
    let coded = fill(vec![
        vec!["", "station"],
        vec!["CHI", "first"],
        vec!["MEM", "last"],
    ]);
    assert!(!plain.cell(0, 0).is_empty());
    assert_eq!(coded.body, plain.body);
    assert_eq!(coded.styles, plain.styles);
}

#[test]
fn train_not_calling_leaves_blank_cell() {
    let tt = fill(vec![vec!["", "61"], vec!["CHI", ""]]);
    assert_eq!(tt.cell(0, 0), "");
    assert_eq!(tt.style(0, 0), "blank-cell color-day-train");

    let tt = fill(vec![vec!["", "61/3059"], vec!["CHI", ""]]);
    assert_eq!(tt.style(0, 0), "blank-cell");
}

#[test]
fn route_names_drop_repeats() {
    let tt = fill(vec![
        vec!["", "59/58/3059", "58 noheader/3059"],
        vec!["route-name", "", ""],
        vec!["CDL", "", ""],
    ]);
    assert_eq!(tt.cell(0, 0), "City of New Orleans\nThruway");
    assert_eq!(tt.cell(0, 1), "Thruway");
    assert_eq!(tt.style(0, 1), "route-name-cell color-bus");
}

#[test]
fn bus_icon_column() {
    let aux = AuxConfig {
        use_bus_icon_in_cells: true,
        ..AuxConfig::default()
    };
    let spec = spec_with(
        aux,
        vec![vec!["", "3059/59"], vec!["CDL", ""], vec!["NOL", ""]],
    );
    let tt = fill_spec(&spec, &FillOptions::default()).unwrap();
    assert_eq!(tt.cell(0, 0), " 10:00A🚌");
    assert_eq!(tt.style(0, 0), "time-cell color-bus");
    assert_eq!(tt.cell(1, 0), "  3:32P ");
    assert_eq!(tt.style(1, 0), "time-cell color-day-train");
}

#[test]
fn html_output() {
    let tt = fill_with(
        FillOptions::html(),
        vec![vec!["", "59/3059", "station"], vec!["CHI", "", ""]],
    );
    assert_eq!(
        tt.display_headers()[0],
        "<small>Train #</small><br><strong>59</strong><hr><small>Bus #</small><br><strong>3059</strong>"
    );
    assert_eq!(tt.header_styles[0], "background-color: cornsilk;");
    assert_eq!(tt.header_styles[1], "");
    assert_eq!(
        tt.cell(0, 0),
        r#"<span class="box-rd"> </span><span class="box-time12"><b> 8:05P</b></span>"#
    );
    assert_eq!(
        tt.cell(0, 1),
        r#"<span class="minor-station">Chicago, IL</span><br><span class="station-footnotes"> - Union Station</span>"#
    );
}

proptest! {
    #[test]
    fn output_drops_key_row_and_column(
        stations in prop::collection::vec(
            prop::sample::select(vec!["CHI", "CDL", "MEM", "NOL", ""]),
            0..6,
        ),
        columns in prop::sample::subsequence(
            vec!["59", "58", "station", "access", "timezone", "services"],
            1..=6,
        ),
    ) {
        let mut rows: Vec<Vec<&str>> = vec![std::iter::once("").chain(columns.iter().copied()).collect()];
        for &code in &stations {
            let mut row = vec![code];
            row.resize(columns.len() + 1, "");
            rows.push(row);
        }

        let tt = fill(rows);
        prop_assert_eq!(tt.row_count(), stations.len());
        prop_assert_eq!(tt.col_count(), columns.len());
        prop_assert_eq!(tt.header_styles.len(), columns.len());
        for (body, styles) in tt.body.iter().zip(&tt.styles) {
            prop_assert_eq!(body.len(), columns.len());
            prop_assert_eq!(styles.len(), columns.len());
        }
    }
}
