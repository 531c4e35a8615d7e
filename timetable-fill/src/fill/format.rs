//! Rendering one stop time as the text of a time cell.
//!
//! The most involved variant looks like:
//!
//! ```text
//! Ar F 9:59P Daily
//! Dp F10:00P WeFrSu
//! ```
//!
//! HTML output lines things up with fixed-width spans, so every slot
//! (marker, time, days, icons) is emitted even when it is empty.

use tracing::warn;

use crate::agency::icons;
use crate::domain::{GtfsTime, ServiceDays, TimeParts, ZoneDiff};
use crate::gtfs::StopTime;

/// Text printed for a missing scheduled time.
pub const MISSING_TIME: &str = "---";

const HTML_LINEBREAK: &str = "<br>";
const TEXT_ARDP_SPACER: &str = "   ";

/// Width class of the day-string box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DaysBox {
    #[default]
    Normal,
    /// Room for five-day strings such as "SuMoTuWeTh".
    Long,
    /// Room for a single day.
    Short,
}

impl DaysBox {
    pub fn class(self) -> &'static str {
        match self {
            DaysBox::Normal => "box-days",
            DaysBox::Long => "box-days-long",
            DaysBox::Short => "box-days-short",
        }
    }
}

/// Which printed line a marker is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinePosition {
    OneRow,
    Arrival { second: bool },
    Departure { second: bool },
}

impl LinePosition {
    fn is_second(self) -> bool {
        matches!(
            self,
            LinePosition::Arrival { second: true } | LinePosition::Departure { second: true }
        )
    }

    fn is_arrival(self) -> bool {
        matches!(self, LinePosition::Arrival { .. })
    }

    fn is_departure(self) -> bool {
        matches!(self, LinePosition::Departure { .. })
    }
}

/// The single-character passenger-restriction marker for a stop.
///
/// `R` receive only, `D` discharge only, `*` no ordinary passengers,
/// `F` flag stop, otherwise a space. Two-row cells put `R` on the
/// departure line, `D` on the arrival line and the others on the
/// first printed line.
///
/// The codes are read as GTFS defines them: `drop_off_type = 1` (no
/// one may alight) makes a receive-only stop, `pickup_type = 1` (no one
/// may board) a discharge-only stop.
pub fn rd_marker(
    stop_time: &StopTime,
    is_first_stop: bool,
    is_last_stop: bool,
    line: LinePosition,
) -> char {
    match (stop_time.drop_off_type, stop_time.pickup_type) {
        (1, 0) if !is_first_stop && !line.is_arrival() => 'R',
        (0, 1) if !is_last_stop && !line.is_departure() => 'D',
        (1, 1) if !line.is_second() => '*',
        (2 | 3, _) | (_, 2 | 3) if !line.is_second() => 'F',
        (1, 0) | (0, 1) | (1, 1) | (2 | 3, _) | (_, 2 | 3) => ' ',
        _ => {
            if stop_time.timepoint == Some(0) && !line.is_arrival() {
                warn!(
                    trip_id = %stop_time.trip_id,
                    stop_id = %stop_time.stop_id,
                    "inexact timepoint; early-departure marker not supported"
                );
            }
            ' '
        }
    }
}

/// The marker rendered for output: bolded and boxed in HTML.
pub fn rd_str(
    stop_time: &StopTime,
    doing_html: bool,
    is_first_stop: bool,
    is_last_stop: bool,
    line: LinePosition,
) -> String {
    let marker = rd_marker(stop_time, is_first_stop, is_last_stop, line);
    if !doing_html {
        return marker.to_string();
    }
    if marker == ' ' {
        r#"<span class="box-rd"> </span>"#.to_string()
    } else {
        format!(r#"<span class="box-rd"><b>{marker}</b></span>"#)
    }
}

/// Wrap every character in its own box, for fonts without tabular digits.
fn box_characters(text: &str) -> String {
    text.chars()
        .map(|c| format!(r#"<span class="box-char">{c}</span>"#))
        .collect()
}

/// Layout flags for one time cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimepointFormat {
    pub doing_html: bool,
    /// Ignored in plaintext.
    pub box_time_characters: bool,
    /// The column reads upward: departure line above arrival line.
    pub reverse: bool,
    /// Separate arrival and departure lines.
    pub two_row: bool,
    /// Print "Ar"/"Dp", or leave room for them.
    pub use_ar_dp_str: bool,
    /// Bold afternoon times (HTML only).
    pub bold_pm: bool,
    pub times_24h: bool,
    /// Calendar for a day string; `None` prints no day string.
    pub calendar: Option<ServiceDays>,
    pub days_box: DaysBox,
    pub is_first_stop: bool,
    pub is_last_stop: bool,
    /// Leave a slot for the baggage icon.
    pub use_baggage_icon: bool,
    pub has_baggage: bool,
    /// Leave a slot for the bus icon.
    pub use_bus_icon: bool,
    pub is_bus: bool,
    /// Drop the marker slot entirely.
    pub no_rd: bool,
}

impl Default for TimepointFormat {
    fn default() -> Self {
        Self {
            doing_html: false,
            box_time_characters: false,
            reverse: false,
            two_row: false,
            use_ar_dp_str: false,
            bold_pm: true,
            times_24h: false,
            calendar: None,
            days_box: DaysBox::Normal,
            is_first_stop: false,
            is_last_stop: false,
            use_baggage_icon: false,
            has_baggage: false,
            use_bus_icon: false,
            is_bus: false,
            no_rd: false,
        }
    }
}

/// One rendered time with its day offset, if the time exists.
struct RenderedTime {
    text: String,
    parts: Option<TimeParts>,
}

impl TimepointFormat {
    fn time_class(&self) -> &'static str {
        if self.times_24h { "box-time24" } else { "box-time12" }
    }

    fn render_time(&self, time: Option<GtfsTime>, zone_diff: ZoneDiff) -> RenderedTime {
        let parts = time.map(|t| t.explode(zone_diff));
        let mut text = match parts {
            None => MISSING_TIME.to_string(),
            Some(p) if self.times_24h => p.short_24(),
            Some(p) => p.short_12(),
        };
        if self.doing_html {
            if self.box_time_characters && parts.is_some() {
                text = box_characters(&text);
            }
            if self.bold_pm && parts.is_some_and(|p| p.pm) {
                text = format!("<b>{text}</b>");
            }
            text = format!(r#"<span class="{}">{text}</span>"#, self.time_class());
        }
        RenderedTime { text, parts }
    }

    fn day_string(&self, parts: Option<TimeParts>) -> String {
        let Some(calendar) = self.calendar else {
            return String::new();
        };
        let days = parts.map_or_else(String::new, |p| calendar.rotate(p.day).day_string());
        if self.doing_html {
            format!(r#"<span class="{}">{days}</span>"#, self.days_box.class())
        } else {
            format!(" {days}")
        }
    }

    fn blank_rd(&self) -> &'static str {
        if self.doing_html { r#"<span class="box-rd"></span>"# } else { "" }
    }

    fn blank_time(&self) -> String {
        if self.doing_html {
            format!(r#"<span class="{}"></span>"#, self.time_class())
        } else {
            String::new()
        }
    }

    fn blank_day_string(&self) -> String {
        match self.calendar {
            Some(_) if self.doing_html => {
                format!(r#"<span class="{}"></span>"#, self.days_box.class())
            }
            _ => String::new(),
        }
    }

    /// An icon slot: the icon, a blank of the same width, or nothing.
    fn icon_slot(&self, enabled: bool, present: bool, icon: &str, class: &str) -> String {
        match (enabled, present, self.doing_html) {
            (false, _, _) => String::new(),
            (true, true, true) => format!(r#"<span class="{class}">{icon}</span>"#),
            (true, false, true) => format!(r#"<span class="{class}"></span>"#),
            (true, true, false) => icon.to_string(),
            (true, false, false) => " ".to_string(),
        }
    }

    fn baggage_slot(&self, present: bool) -> String {
        self.icon_slot(
            self.use_baggage_icon,
            present,
            icons::baggage_icon(self.doing_html),
            "box-baggage",
        )
    }

    fn bus_slot(&self, present: bool) -> String {
        self.icon_slot(
            self.use_bus_icon,
            present,
            icons::bus_icon(self.doing_html),
            "box-bus",
        )
    }

    fn ar_dp_labels(&self) -> (&'static str, &'static str) {
        match (self.use_ar_dp_str, self.doing_html) {
            (false, _) => ("", ""),
            (true, true) => (
                r#"<span class="box-ardp">Ar</span>"#,
                r#"<span class="box-ardp">Dp</span>"#,
            ),
            (true, false) => ("Ar ", "Dp "),
        }
    }

    fn marker(&self, stop_time: &StopTime, line: LinePosition) -> String {
        if self.no_rd {
            return String::new();
        }
        rd_str(
            stop_time,
            self.doing_html,
            self.is_first_stop,
            self.is_last_stop,
            line,
        )
    }

    /// Render a stop time as cell text.
    ///
    /// `zone_diff` shifts the agency-zone GTFS times to the station's zone.
    pub fn timepoint_str(&self, stop_time: &StopTime, zone_diff: ZoneDiff) -> String {
        let departure = self.render_time(stop_time.departure, zone_diff);
        let arrival = self.render_time(stop_time.arrival, zone_diff);
        let departure_days = self.day_string(departure.parts);
        let arrival_days = self.day_string(arrival.parts);
        let (ar_str, dp_str) = self.ar_dp_labels();

        let pickup_only = stop_time.drop_off_type == 1 && stop_time.pickup_type == 0;
        let drop_off_only = stop_time.pickup_type == 1 && stop_time.drop_off_type == 0;
        let receive_only = self.is_first_stop || pickup_only;
        let discharge_only = self.is_last_stop || (!pickup_only && drop_off_only);

        if !self.two_row {
            let ar_dp_str = if self.is_first_stop {
                dp_str
            } else if self.is_last_stop {
                ar_str
            } else if self.use_ar_dp_str && !self.doing_html {
                TEXT_ARDP_SPACER
            } else {
                ""
            };
            let (time, days) = if discharge_only {
                (arrival.text, arrival_days)
            } else {
                (departure.text, departure_days)
            };
            return [
                ar_dp_str.to_string(),
                self.marker(stop_time, LinePosition::OneRow),
                time,
                days,
                self.baggage_slot(self.has_baggage),
                self.bus_slot(self.is_bus),
            ]
            .concat();
        }

        let no_dwell = stop_time.arrival == stop_time.departure;
        let arrival_absent = receive_only || (no_dwell && !discharge_only);

        // Icons go on the line that survives, or the one read first.
        let icons_on_departure = arrival_absent || (!discharge_only && self.reverse);
        let (arrival_baggage, departure_baggage) = if icons_on_departure {
            (self.baggage_slot(false), self.baggage_slot(self.has_baggage))
        } else {
            (self.baggage_slot(self.has_baggage), self.baggage_slot(false))
        };
        let (arrival_bus, departure_bus) = if icons_on_departure {
            (self.bus_slot(false), self.bus_slot(self.is_bus))
        } else {
            (self.bus_slot(self.is_bus), self.bus_slot(false))
        };

        let blank_line = |label: &str| -> String {
            [
                label.to_string(),
                if self.no_rd { String::new() } else { self.blank_rd().to_string() },
                self.blank_time(),
                self.blank_day_string(),
                self.baggage_slot(false),
                self.bus_slot(false),
            ]
            .concat()
        };

        let arrival_line = if self.is_first_stop {
            String::new()
        } else if arrival_absent {
            blank_line(ar_str)
        } else {
            [
                ar_str.to_string(),
                self.marker(stop_time, LinePosition::Arrival { second: self.reverse }),
                arrival.text,
                arrival_days,
                arrival_baggage,
                arrival_bus,
            ]
            .concat()
        };

        let departure_line = if self.is_last_stop {
            String::new()
        } else if discharge_only {
            blank_line(dp_str)
        } else {
            [
                dp_str.to_string(),
                self.marker(stop_time, LinePosition::Departure { second: !self.reverse }),
                departure.text,
                departure_days,
                departure_baggage,
                departure_bus,
            ]
            .concat()
        };

        let linebreak = if self.doing_html { HTML_LINEBREAK } else { "\n" };
        if self.reverse {
            format!("{departure_line}{linebreak}{arrival_line}")
        } else {
            format!("{arrival_line}{linebreak}{departure_line}")
        }
    }
}
