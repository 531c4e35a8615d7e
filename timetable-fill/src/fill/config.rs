//! Per-call fill options.

/// Which stations get "Ar"/"Dp" labels and two-row layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArdpMode {
    /// Stations where some train dwells at least the cutoff.
    #[default]
    Dwell,
    /// Every station.
    Always,
    /// No station.
    Never,
    /// The agency's major stations.
    Major,
}

/// Output options for one fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillOptions {
    /// Produce HTML fragments rather than plaintext.
    pub doing_html: bool,

    /// Allow line breaks inside plaintext station names.
    pub doing_multiline_text: bool,

    pub ardp_mode: ArdpMode,
}

impl FillOptions {
    /// Create options with the given parameters.
    pub fn new(doing_html: bool, doing_multiline_text: bool, ardp_mode: ArdpMode) -> Self {
        Self {
            doing_html,
            doing_multiline_text,
            ardp_mode,
        }
    }

    /// Default options with HTML output.
    pub fn html() -> Self {
        Self {
            doing_html: true,
            ..Self::default()
        }
    }
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            doing_html: false,
            doing_multiline_text: true,
            ardp_mode: ArdpMode::Dwell,
        }
    }
}
