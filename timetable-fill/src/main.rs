use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use timetable_fill::agency::{AgencyError, GenericAgency, StationInfo};
use timetable_fill::fill::{FillError, FillOptions, fill_timetable, reduce_feed_for_spec};
use timetable_fill::gtfs::{Feed, FeedError};
use timetable_fill::spec::{SpecError, TtSpec, parse_reference_date};

/// Anything that stops a run.
#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error("{0} must be set")]
    MissingVar(&'static str),

    #[error("TT_REFERENCE_DATE {0:?} is not YYYYMMDD or YYYY-MM-DD")]
    BadReferenceDate(String),

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Agency(#[from] AgencyError),

    #[error(transparent)]
    Spec(#[from] SpecError),

    #[error(transparent)]
    Fill(#[from] FillError),
}

fn required_var(name: &'static str) -> Result<String, RunError> {
    std::env::var(name).map_err(|_| RunError::MissingVar(name))
}

/// Split `TT_SPEC` into a directory and a stem; a bare name is looked up
/// in `TT_INPUT_DIR`.
fn spec_location(spec: &str) -> (PathBuf, String) {
    let path = Path::new(spec);
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => {
            (parent.to_path_buf(), name.to_string_lossy().into_owned())
        }
        _ => {
            let input_dir = std::env::var("TT_INPUT_DIR").unwrap_or_else(|_| ".".to_string());
            (PathBuf::from(input_dir), spec.to_string())
        }
    }
}

fn run() -> Result<(), RunError> {
    let feed_dir = PathBuf::from(required_var("TT_FEED_DIR")?);
    let spec_arg = required_var("TT_SPEC")?;
    let output_dir = PathBuf::from(std::env::var("TT_OUTPUT_DIR").unwrap_or_else(|_| ".".to_string()));
    let doing_html = std::env::var("TT_HTML").is_ok_and(|v| v == "1");

    info!(feed = %feed_dir.display(), "loading GTFS feed");
    let feed = Feed::load(&feed_dir)?;

    let station_info = match std::env::var("TT_STATION_INFO") {
        Ok(path) => StationInfo::load(Path::new(&path))?,
        Err(_) => StationInfo::default(),
    };
    let agency = GenericAgency::from_feed(&feed).with_station_info(station_info);

    let (input_dir, spec_name) = spec_location(&spec_arg);
    let mut spec = TtSpec::from_files(&spec_name, &input_dir)?;
    if let Ok(text) = std::env::var("TT_REFERENCE_DATE") {
        let date = parse_reference_date(&text).ok_or(RunError::BadReferenceDate(text))?;
        spec.aux.reference_date = Some(date);
    }
    let reference_date = spec
        .aux
        .reference_date
        .ok_or_else(|| FillError::Input("reference_date is required".into()))?;

    let reduced = reduce_feed_for_spec(&feed, &spec, reference_date)?;
    let options = FillOptions {
        doing_html,
        ..FillOptions::default()
    };
    let timetable = fill_timetable(&spec, &reduced, &agency, &options)?;

    let stem = spec.aux.output_filename.as_deref().unwrap_or(&spec_name);
    timetable.write_csv_file(&output_dir.join(format!("{stem}.csv")))?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
