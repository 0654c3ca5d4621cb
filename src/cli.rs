use std::path::PathBuf;

use clap::Parser;

use crate::merge::DEFAULT_DAYS;
use crate::schema::{DEFAULT_STATIONS_SELECTOR, DEFAULT_TIMETABLE_SELECTOR};

/// A CLI tool for turning a timetable page into a per-train JSON schedule.
/// The page needs a station table and a time grid with one row per station.
/// With --merge, the schedules already written for one day set are combined instead.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Timetable page: a saved HTML file or an http(s) URL
    #[arg(value_name = "SOURCE", required_unless_present = "merge")]
    pub source: Option<String>,

    /// Merge the *_schedule.json files of one day set in DIR into DIR/raw_<DAYS>.json
    #[arg(
        long,
        value_name = "DIR",
        conflicts_with_all = ["source", "output_dir", "list_stations"]
    )]
    pub merge: Option<PathBuf>,

    /// Day set to merge, as weekday digits (12345: weekdays, 67: weekend)
    #[arg(long, value_name = "DAYS", default_value = DEFAULT_DAYS, value_parser = parse_days, requires = "merge")]
    pub days: String,

    /// Directory to write <page>_schedule.json into
    #[arg(long, short = 'o', value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Print the JSON to stdout instead of writing a file
    #[arg(long, conflicts_with = "output_dir")]
    pub stdout: bool,

    /// CSS selector of the station table
    #[arg(long, value_name = "SELECTOR", default_value = DEFAULT_STATIONS_SELECTOR)]
    pub stations_selector: String,

    /// CSS selector of the time grid table
    #[arg(long, value_name = "SELECTOR", default_value = DEFAULT_TIMETABLE_SELECTOR)]
    pub timetable_selector: String,

    /// List the stations found in the page and exit
    #[arg(long)]
    pub list_stations: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

fn parse_days(s: &str) -> Result<String, String> {
    if !s.is_empty() && s.bytes().all(|b| (b'1'..=b'7').contains(&b)) {
        Ok(s.to_string())
    } else {
        Err(format!("{s:?} is not a day set such as 12345 or 67"))
    }
}

impl Args {
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
