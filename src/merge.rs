//! Combine the schedule files of one day set into a single `raw_<days>.json`.
//!
//! Day sets are written as the digits of the weekdays they run on, `12345`
//! for Monday to Friday and `67` for the weekend, and appear in the page
//! names the schedule files were derived from.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::{debug, info, warn};

use crate::error::ScrapeError;
use crate::schema::ScheduleDocument;
use crate::sink::Sink;

pub const DEFAULT_DAYS: &str = "12345";

/// Schedules keyed by line name.
pub type MergedSchedules = BTreeMap<String, ScheduleDocument>;

/// Line name for a schedule file of the given day set, or `None` when the file is not one.
///
/// ```
/// use timetable_scraper::merge::line_key;
///
/// assert_eq!(line_key("red_line_12345_schedule.json", "12345"), Some("red_line".to_string()));
/// assert_eq!(line_key("red_line_67_schedule.json", "12345"), None);
/// assert_eq!(line_key("raw_12345.json", "12345"), None);
/// ```
pub fn line_key(file_name: &str, days: &str) -> Option<String> {
    if !file_name.contains(days) || file_name.contains("raw") || !file_name.ends_with(".json") {
        return None;
    }
    Some(
        file_name
            .replace(".json", "")
            .replace(days, "")
            .replace("__", "_")
            .replace("_schedule", ""),
    )
}

pub fn merged_file_name(days: &str) -> String {
    format!("raw_{days}.json")
}

/// Read every schedule file of the day set in `dir` (not recursive).
pub fn collect_schedules(dir: &Path, days: &str) -> Result<MergedSchedules, ScrapeError> {
    let read_err = |source: std::io::Error| ScrapeError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        if !entry.file_type().map_err(read_err)?.is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => warn!("Skipping non UTF-8 file name {:?}", name),
        }
    }
    // Later names win when two files reduce to the same line.
    names.sort();

    let mut merged = MergedSchedules::new();
    for name in names {
        let Some(key) = line_key(&name, days) else {
            continue;
        };
        let path = dir.join(&name);
        let content = fs::read_to_string(&path).map_err(|source| ScrapeError::Read {
            path: path.clone(),
            source,
        })?;
        let document: ScheduleDocument = serde_json::from_str(&content)
            .map_err(|source| ScrapeError::InvalidSchedule {
                path: path.clone(),
                source,
            })?;
        debug!(file = %name, line = %key, "loaded schedule");
        if merged.insert(key.clone(), document).is_some() {
            warn!("{name} replaces an earlier schedule for line {key}");
        }
    }
    Ok(merged)
}

/// JSON object keyed by line, indented by four spaces.
pub fn render_merged(merged: &MergedSchedules) -> Result<String, ScrapeError> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    merged.serialize(&mut serializer)?;
    // serde_json only ever emits UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Merge the day set found in `dir` and hand `raw_<days>.json` to the sink.
pub fn merge<S>(dir: &Path, days: &str, sink: &mut S) -> Result<usize, ScrapeError>
where
    S: Sink + ?Sized,
{
    let merged = collect_schedules(dir, days)?;
    if merged.is_empty() {
        warn!("No schedule files for days {days} in {}", dir.display());
    }
    let content = render_merged(&merged)?;
    let file_name = merged_file_name(days);

    sink.deliver(&file_name, &content)?;
    info!(lines = merged.len(), "Delivered {file_name}");
    Ok(merged.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{FileSink, MemorySink};
    use tempfile::tempdir;

    fn doc(station: &str, time: Option<u32>) -> ScheduleDocument {
        ScheduleDocument {
            stations: vec![station.to_string()],
            train_schedules: vec![vec![time]],
        }
    }

    fn write_doc(dir: &Path, name: &str, document: &ScheduleDocument) {
        fs::write(dir.join(name), serde_json::to_string_pretty(document).unwrap()).unwrap();
    }

    #[test]
    fn line_key_cleans_day_tag_and_suffix() {
        assert_eq!(
            line_key("blue_line_12345_schedule.json", "12345"),
            Some("blue_line".to_string())
        );
        assert_eq!(
            line_key("12345_ginza_schedule.json", "12345"),
            Some("_ginza".to_string())
        );
        assert_eq!(
            line_key("loop_67_schedule.json", "67"),
            Some("loop".to_string())
        );
    }

    #[test]
    fn line_key_skips_other_files() {
        assert_eq!(line_key("blue_line_12345_schedule.html", "12345"), None);
        assert_eq!(line_key("blue_line_schedule.json", "12345"), None);
        assert_eq!(line_key("raw_12345.json", "12345"), None);
        assert_eq!(line_key("drawbridge_12345_schedule.json", "12345"), None);
    }

    #[test]
    fn merged_file_name_carries_days() {
        assert_eq!(merged_file_name("67"), "raw_67.json");
    }

    #[test]
    fn collects_only_the_requested_day_set() {
        let dir = tempdir().unwrap();
        write_doc(dir.path(), "red_12345_schedule.json", &doc("A", Some(480)));
        write_doc(dir.path(), "blue_12345_schedule.json", &doc("B", None));
        write_doc(dir.path(), "red_67_schedule.json", &doc("C", Some(600)));
        write_doc(dir.path(), "raw_12345.json", &doc("D", Some(1)));
        fs::create_dir(dir.path().join("old_12345_schedule.json")).unwrap();

        let merged = collect_schedules(dir.path(), "12345").unwrap();

        assert_eq!(merged.keys().map(String::as_str).collect::<Vec<_>>(), vec!["blue", "red"]);
        assert_eq!(merged["red"], doc("A", Some(480)));
        assert_eq!(merged["blue"], doc("B", None));
    }

    #[test]
    fn invalid_schedule_file_is_reported() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bad_12345_schedule.json"), "[1, 2]").unwrap();

        let err = collect_schedules(dir.path(), "12345").unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidSchedule { .. }));
    }

    #[test]
    fn missing_directory_is_a_read_error() {
        let dir = tempdir().unwrap();
        let err = collect_schedules(&dir.path().join("nope"), "12345").unwrap_err();
        assert!(matches!(err, ScrapeError::Read { .. }));
    }

    #[test]
    fn render_uses_four_space_indent() {
        let mut merged = MergedSchedules::new();
        merged.insert("x".to_string(), doc("A", None));
        let expected = "{\n    \"x\": {\n        \"stations\": [\n            \"A\"\n        ],\n        \"trainSchedules\": [\n            [\n                null\n            ]\n        ]\n    }\n}";
        assert_eq!(render_merged(&merged).unwrap(), expected);
    }

    #[test]
    fn merge_writes_raw_file_next_to_inputs() {
        let dir = tempdir().unwrap();
        write_doc(dir.path(), "red_67_schedule.json", &doc("A", Some(1445)));
        let mut sink = FileSink::new(dir.path());

        let count = merge(dir.path(), "67", &mut sink).unwrap();

        assert_eq!(count, 1);
        let written = fs::read_to_string(dir.path().join("raw_67.json")).unwrap();
        let parsed: MergedSchedules = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed["red"], doc("A", Some(1445)));
    }

    #[test]
    fn merge_delivers_nothing_on_bad_input() {
        let dir = tempdir().unwrap();
        write_doc(dir.path(), "red_12345_schedule.json", &doc("A", Some(480)));
        fs::write(dir.path().join("blue_12345_schedule.json"), "not json").unwrap();
        let mut sink = MemorySink::default();

        assert!(merge(dir.path(), "12345", &mut sink).is_err());
        assert!(sink.deliveries.is_empty());
    }
}
