//! Filling a spec grid from a GTFS feed.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::agency::{Agency, NameStyle, icons};
use crate::domain::{ServiceDays, TrainSpec, ZoneDiff, split_column_key};
use crate::gtfs::{Feed, StopTime};
use crate::spec::{
    CellCodes, ColumnOptions, SpecGrid, TtSpec, cell_substitution, normalize, parse_cell_codes,
};

use super::headers::{
    access_column_header, services_column_header, station_column_header,
    style_route_name_for_column, style_updown, time_column_header, timezone_column_header,
    zone_label,
};
use super::kind::{CellContext, CellKind, ColumnKind, RowKind, classify};
use super::output::{FilledTimetable, prefix_header};
use super::{ArdpMode, DaysBox, DwellMap, FillError, FillOptions, TimepointFormat, TrainResolver};

/// Cell text and its space-separated classes.
type FilledCell = (String, String);

/// Join non-empty style tags.
fn styled(tags: &[&str]) -> String {
    tags.iter()
        .filter(|tag| !tag.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

fn plain(text: impl Into<String>, style: &str) -> FilledCell {
    (text.into(), style.to_string())
}

/// A column's key resolved once, before its cells are filled.
#[derive(Debug)]
struct Column {
    kind: ColumnKind,
    /// Trains in the column; empty for keyword columns.
    specs: Vec<TrainSpec>,
    options: ColumnOptions,
    use_bus_icon: bool,
    use_baggage_icon: bool,
}

impl Column {
    fn days_box(&self) -> DaysBox {
        if self.options.long_days_box() {
            DaysBox::Long
        } else if self.options.short_days_box() {
            DaysBox::Short
        } else {
            DaysBox::Normal
        }
    }
}

struct Filler<'a> {
    spec: &'a TtSpec,
    agency: &'a dyn Agency,
    options: &'a FillOptions,
    resolver: TrainResolver<'a>,
    dwell: Option<DwellMap>,
    reference_date: NaiveDate,
    station_codes: Vec<String>,
}

/// Fill a timetable spec.
///
/// `feed` must already be cut down to the reference date (see
/// [`reduce_feed_for_spec`](super::reduce_feed_for_spec)). The result has
/// one row per spec row and one column per spec column, less the key row
/// and key column.
pub fn fill_timetable(
    spec: &TtSpec,
    feed: &Feed,
    agency: &dyn Agency,
    options: &FillOptions,
) -> Result<FilledTimetable, FillError> {
    let reference_date = spec
        .aux
        .reference_date
        .ok_or_else(|| FillError::Input("reference_date is required".into()))?;
    if let Some(warning) = &spec.aux.programmers_warning {
        warn!(%warning, "programmer's warning");
    }

    let normalized = normalize(&spec.grid, feed, agency)?;
    let grid = &normalized.grid;
    if grid.row_count() == 0 || grid.col_count() == 0 {
        return Err(FillError::Input("spec grid is empty".into()));
    }

    let resolver = TrainResolver::new(feed);
    let dwell = match options.ardp_mode {
        ArdpMode::Dwell => Some(DwellMap::build(
            &grid.station_codes(),
            &grid.train_specs()?,
            &resolver,
            agency,
            spec.aux.dwell_secs_cutoff,
        )?),
        ArdpMode::Always | ArdpMode::Never | ArdpMode::Major => None,
    };

    let filler = Filler {
        spec,
        agency,
        options,
        resolver,
        dwell,
        reference_date,
        station_codes: grid.station_codes().into_iter().map(String::from).collect(),
    };

    let rows = grid.row_count() - 1;
    let mut timetable = FilledTimetable {
        body: vec![Vec::new(); rows],
        styles: vec![Vec::new(); rows],
        ..FilledTimetable::default()
    };

    for col in 1..grid.col_count() {
        let options = normalized
            .column_options
            .get(col)
            .cloned()
            .unwrap_or_default();
        let column = filler.prepare_column(grid.column_key(col), options)?;
        debug!(col, key = grid.column_key(col), ?column, "filling column");

        let (header, header_style) = filler.column_header(&column)?;
        timetable.headers.push(prefix_header(col - 1, &header));
        timetable.header_styles.push(header_style);

        for row in 1..grid.row_count() {
            let (text, style) = filler.fill_cell(grid, row, col, &column)?;
            timetable.body[row - 1].push(text);
            timetable.styles[row - 1].push(style);
        }
    }

    info!(
        rows = timetable.row_count(),
        cols = timetable.col_count(),
        %reference_date,
        "timetable filled"
    );
    Ok(timetable)
}

impl Filler<'_> {
    fn feed(&self) -> &Feed {
        self.resolver.feed()
    }

    fn doing_html(&self) -> bool {
        self.options.doing_html
    }

    fn name_style(&self) -> NameStyle {
        NameStyle::for_output(self.options.doing_html, self.options.doing_multiline_text)
    }

    fn prepare_column(&self, key: &str, options: ColumnOptions) -> Result<Column, FillError> {
        let kind = ColumnKind::from_key(key);
        if kind.is_keyword() {
            return Ok(Column {
                kind,
                specs: Vec::new(),
                options,
                use_bus_icon: false,
                use_baggage_icon: false,
            });
        }

        let specs = split_column_key(key)?;
        let mut use_bus_icon = false;
        if self.spec.aux.use_bus_icon_in_cells {
            for spec in &specs {
                if self.resolver.route(spec)?.is_bus() {
                    use_bus_icon = true;
                    break;
                }
            }
        }
        let use_baggage_icon = specs
            .iter()
            .any(|spec| self.agency.train_has_checked_baggage(spec.number()));

        Ok(Column {
            kind,
            specs,
            options,
            use_bus_icon,
            use_baggage_icon,
        })
    }

    /// Header text and, in HTML, the header's style attribute.
    fn column_header(&self, column: &Column) -> Result<(String, String), FillError> {
        let html = self.doing_html();
        let header = match column.kind {
            ColumnKind::Station => station_column_header(html),
            ColumnKind::Services => services_column_header(html),
            ColumnKind::Access => access_column_header(html),
            ColumnKind::Timezone => timezone_column_header(html),
            ColumnKind::Trains => time_column_header(
                &column.specs,
                &self.resolver,
                html,
                self.spec.aux.train_numbers_side_by_side,
            )?,
        };

        let mut style = String::new();
        if html {
            if let Some(first) = column.specs.iter().find(|s| !s.is_noheader()) {
                let route = self.resolver.route(first)?;
                style = self
                    .agency
                    .time_column_style(first.number(), route)
                    .attributes
                    .to_string();
            }
        }
        Ok((header, style))
    }

    /// The color class of a train's column.
    fn color_class(&self, spec: &TrainSpec) -> Result<&'static str, FillError> {
        let route = self.resolver.route(spec)?;
        Ok(self.agency.time_column_style(spec.number(), route).class)
    }

    fn first_color_class(&self, column: &Column) -> Result<&'static str, FillError> {
        column
            .specs
            .first()
            .map_or(Ok(""), |spec| self.color_class(spec))
    }

    fn zone_diff(&self, stop_id: &str) -> ZoneDiff {
        ZoneDiff::between(
            self.feed().stop_timezone(stop_id),
            self.feed().agency_timezone(),
            self.reference_date,
        )
    }

    fn service_days(&self, spec: &TrainSpec) -> Result<ServiceDays, FillError> {
        let trip = self.resolver.trip(spec)?;
        self.feed()
            .calendar(&trip.service_id)
            .map(|calendar| calendar.days)
            .ok_or_else(|| {
                FillError::Gtfs(format!(
                    "no calendar {} for train {}",
                    trip.service_id,
                    spec.key()
                ))
            })
    }

    /// Whether a station gets "Ar"/"Dp" lines.
    fn is_two_row_station(&self, station_code: &str) -> bool {
        match self.options.ardp_mode {
            ArdpMode::Dwell => self
                .dwell
                .as_ref()
                .is_some_and(|dwell| dwell.is_two_row(station_code)),
            ArdpMode::Always => true,
            ArdpMode::Never => false,
            ArdpMode::Major => self.agency.is_major_station(station_code),
        }
    }

    fn fill_cell(
        &self,
        grid: &SpecGrid,
        row: usize,
        col: usize,
        column: &Column,
    ) -> Result<FilledCell, FillError> {
        let html = self.doing_html();
        let station_code = grid.row_key(row);
        let row_kind = RowKind::from_key(station_code);
        let raw = grid.cell(row, col).trim();

        let codes = match row_kind {
            RowKind::RouteName | RowKind::UpDown | RowKind::Days => None,
            _ => parse_cell_codes(raw, &column.specs)?,
        };
        let text = cell_substitution(raw, html).unwrap_or(raw);

        let kind = classify(&CellContext {
            row: row_kind,
            column: column.kind,
            text,
            codes: codes.as_ref(),
        });

        match kind {
            CellKind::Empty | CellKind::KeywordEndpoint => Ok(plain("", "")),
            CellKind::BlankOverride => {
                let color = match codes.as_ref().and_then(|c| c.train_spec.as_ref()) {
                    Some(spec) => self.color_class(spec)?,
                    None => "",
                };
                Ok(plain("", &styled(&["blank-cell", color])))
            }
            CellKind::FreeText => Ok(plain(text, "special-cell")),
            CellKind::KeywordRouteName => Ok(plain(text, "route-name-cell")),
            CellKind::RouteName => self.route_name_cell(column),
            CellKind::KeywordUpDown => Ok(plain("", "updown-cell")),
            CellKind::UpDown => Ok(plain(style_updown(column.options.reverse(), html), "")),
            CellKind::KeywordDays => Ok(plain("", "days-of-week-cell")),
            CellKind::DaysBlank => Ok(plain(
                "",
                &styled(&["days-of-week-cell", self.first_color_class(column)?]),
            )),
            CellKind::Days => self.days_cell(text, column),
            CellKind::Origin => self.endpoint_cell(column, true),
            CellKind::Destination => self.endpoint_cell(column, false),
            CellKind::StationName => Ok(plain(
                self.agency.station_name_pretty(station_code, self.name_style()),
                "station-cell",
            )),
            CellKind::Services => Ok(plain("", "services-cell")),
            CellKind::Access => {
                let icon = if self.agency.station_has_accessible_platform(station_code) {
                    icons::accessible_icon(html)
                } else if self.agency.station_has_inaccessible_platform(station_code) {
                    icons::inaccessible_icon(html)
                } else {
                    ""
                };
                Ok(plain(icon, "access-cell"))
            }
            CellKind::Timezone => {
                let stop_id = self.agency.stop_code_to_stop_id(station_code);
                let label = zone_label(self.feed().stop_timezone(stop_id), self.reference_date, html);
                Ok(plain(label, "timezone-cell"))
            }
            CellKind::Timepoint => self.timepoint_cell(station_code, column, codes.as_ref()),
        }
    }

    /// Route names of the column's headed trains, repeats dropped.
    fn route_name_cell(&self, column: &Column) -> Result<FilledCell, FillError> {
        let html = self.doing_html();
        let mut names: Vec<String> = Vec::new();
        let mut color = None;
        for spec in column.specs.iter().filter(|s| !s.is_noheader()) {
            let route = self.resolver.route(spec)?;
            color.get_or_insert(self.agency.time_column_style(spec.number(), route).class);
            let name = style_route_name_for_column(&self.agency.route_name(route), html);
            if names.last() != Some(&name) {
                names.push(name);
            }
        }
        let separator = if html { "<hr>" } else { "\n" };
        Ok(plain(
            names.join(separator),
            &styled(&["route-name-cell", color.unwrap_or("")]),
        ))
    }

    /// Service days of the column's first train, as seen at a reference
    /// station, so a train leaving after midnight shows the next day.
    fn days_cell(&self, reference_code: &str, column: &Column) -> Result<FilledCell, FillError> {
        let Some(first) = column.specs.first() else {
            return Ok(plain(reference_code, "days-of-week-cell"));
        };
        if column.specs.len() > 1 {
            warn!(
                train = %first,
                station = reference_code,
                "days row in a shared column shows the first train only"
            );
        }
        let style = styled(&["days-of-week-cell", self.color_class(first)?]);

        let stop_id = self.agency.stop_code_to_stop_id(reference_code);
        let Some(stop_time) = self.resolver.timepoint(first, stop_id)? else {
            return Ok(plain(reference_code, &style));
        };
        let Some(time) = stop_time.departure.or(stop_time.arrival) else {
            return Ok(plain("", &style));
        };
        let day = time.explode(self.zone_diff(stop_id)).day;
        let days = self.service_days(first)?.rotate(day).day_string();
        Ok(plain(days, &style))
    }

    /// The first train's origin or destination, if the timetable does
    /// not already list it.
    fn endpoint_cell(&self, column: &Column, origin: bool) -> Result<FilledCell, FillError> {
        let Some(first) = column.specs.first() else {
            return Ok(plain("", ""));
        };
        let trip = self.resolver.trip(first)?;
        let stop_ids = self.feed().trip_stop_ids(&trip.trip_id);
        let endpoint = if origin {
            stop_ids.first()
        } else {
            stop_ids.last()
        };
        let Some(&stop_id) = endpoint else {
            return Ok(plain("", ""));
        };

        let code = self.agency.stop_id_to_stop_code(stop_id);
        if self.station_codes.iter().any(|listed| listed == code) {
            return Ok(plain("", ""));
        }
        let name = if origin {
            self.agency.station_name_from(code, self.name_style())
        } else {
            self.agency.station_name_to(code, self.name_style())
        };
        Ok(plain(name, ""))
    }

    /// The time a column's train keeps at a station.
    ///
    /// With a train-specific code only that train is checked; otherwise
    /// the first train in the column that calls there wins.
    fn timepoint_cell(
        &self,
        station_code: &str,
        column: &Column,
        codes: Option<&CellCodes>,
    ) -> Result<FilledCell, FillError> {
        let stop_id = self.agency.stop_code_to_stop_id(station_code);
        if self.feed().stop(stop_id).is_none() {
            return Err(FillError::Gtfs(format!(
                "station {station_code} (stop {stop_id}) is not in the feed"
            )));
        }

        let to_check: Vec<&TrainSpec> = match codes.and_then(|c| c.train_spec.as_ref()) {
            Some(spec) => vec![spec],
            None => column.specs.iter().collect(),
        };
        let mut found: Option<(&TrainSpec, &StopTime)> = None;
        for &spec in &to_check {
            if let Some(stop_time) = self.resolver.timepoint(spec, stop_id)? {
                found = Some((spec, stop_time));
                break;
            }
        }

        let blank = codes.is_some_and(|c| c.blank);
        let (spec, stop_time) = match found {
            Some(hit) if !blank => hit,
            _ => {
                let color = match to_check.as_slice() {
                    [only] => self.color_class(only)?,
                    _ => "",
                };
                return Ok(plain("", &styled(&["blank-cell", color])));
            }
        };

        let route = self.resolver.route(spec)?;
        let calendar = if column.options.days() {
            Some(self.service_days(spec)?)
        } else {
            None
        };

        let mut two_row = self.is_two_row_station(station_code);
        let (mut is_first_stop, mut is_last_stop) = (false, false);
        if let Some(codes) = codes {
            if codes.first || codes.last {
                two_row = false;
            }
            if codes.two_row {
                two_row = true;
            }
            is_first_stop = codes.first;
            is_last_stop = codes.last;
        }

        let aux = &self.spec.aux;
        let format = TimepointFormat {
            doing_html: self.doing_html(),
            box_time_characters: aux.box_time_characters,
            reverse: column.options.reverse(),
            two_row,
            use_ar_dp_str: column.options.ardp(),
            bold_pm: aux.bold_pm,
            times_24h: aux.times_24h,
            calendar,
            days_box: column.days_box(),
            is_first_stop,
            is_last_stop,
            use_baggage_icon: column.use_baggage_icon,
            has_baggage: self.agency.train_has_checked_baggage(spec.number())
                && self.agency.station_has_checked_baggage(station_code),
            use_bus_icon: column.use_bus_icon,
            is_bus: column.use_bus_icon && route.is_bus(),
            no_rd: column.options.no_rd(),
        };

        let text = format.timepoint_str(stop_time, self.zone_diff(stop_id));
        let color = self.agency.time_column_style(spec.number(), route).class;
        Ok(plain(text, &styled(&["time-cell", color])))
    }
}
