//! Icons for baggage, bus and accessibility.
//!
//! HTML output references SVG files under `icons/`; plaintext output
//! uses single glyphs.

const BAGGAGE_IMG: &str = r#"<img class="icon-img" src="icons/baggage-ncn.svg" alt="Baggage" title="Checked Baggage">"#;
const BUS_IMG: &str = r#"<img class="icon-img" src="icons/bus-motorcoach.svg" alt="Bus" title="Bus">"#;
const ACCESSIBLE_IMG: &str = r#"<img class="icon-img" src="icons/accessible.svg" alt="Accessible for wheelchairs" title="Wheelchair accessible">"#;
const INACCESSIBLE_IMG: &str = r#"<img class="icon-img" src="icons/inaccessible.svg" alt="Inaccessible for wheelchairs" title="Not wheelchair accessible">"#;

pub fn baggage_icon(doing_html: bool) -> &'static str {
    if doing_html { BAGGAGE_IMG } else { "🛄" }
}

pub fn bus_icon(doing_html: bool) -> &'static str {
    if doing_html { BUS_IMG } else { "🚌" }
}

pub fn accessible_icon(doing_html: bool) -> &'static str {
    if doing_html { ACCESSIBLE_IMG } else { "♿" }
}

/// Plaintext has no standard "not accessible" glyph, so a cross is used.
pub fn inaccessible_icon(doing_html: bool) -> &'static str {
    if doing_html { INACCESSIBLE_IMG } else { "✗" }
}
