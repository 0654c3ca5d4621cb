//! Extract, normalize, transpose, deliver.

use tracing::{debug, info};

use crate::error::ScrapeError;
use crate::extract::{Extractor, RawTimetable};
use crate::grid::{column_count, transpose};
use crate::schema::{NormalizedTime, ScheduleDocument};
use crate::sink::{Sink, schedule_file_name};
use crate::time::normalize;

/// Turn a station-major table of raw cells into the train-major document.
pub fn transform(raw: RawTimetable) -> Result<ScheduleDocument, ScrapeError> {
    let RawTimetable {
        stations,
        time_grid,
    } = raw;

    let trains = column_count(&time_grid)?;
    if time_grid.len() != stations.len() {
        return Err(ScrapeError::StationCountMismatch {
            stations: stations.len(),
            rows: time_grid.len(),
        });
    }
    debug!(stations = stations.len(), trains, "normalizing time grid");

    let normalized = time_grid
        .iter()
        .enumerate()
        .map(|(station, row)| {
            row.iter()
                .enumerate()
                .map(|(train, cell)| {
                    normalize(cell).map_err(|source| ScrapeError::MalformedCell {
                        station,
                        train,
                        value: cell.clone(),
                        source,
                    })
                })
                .collect::<Result<Vec<NormalizedTime>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let train_schedules = transpose(&normalized)?;
    Ok(ScheduleDocument {
        stations,
        train_schedules,
    })
}

/// Pretty JSON with two-space indentation.
pub fn render(document: &ScheduleDocument) -> Result<String, ScrapeError> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Run one scrape end to end. Nothing reaches the sink unless every step succeeds.
pub fn run<E, S>(
    extractor: &E,
    sink: &mut S,
    location: &str,
) -> Result<ScheduleDocument, ScrapeError>
where
    E: Extractor + ?Sized,
    S: Sink + ?Sized,
{
    let raw = extractor.extract()?;
    let document = transform(raw)?;
    let content = render(&document)?;
    let file_name = schedule_file_name(location);

    sink.deliver(&file_name, &content)?;
    info!(
        stations = document.stations.len(),
        trains = document.train_count(),
        "Delivered {file_name}"
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::InMemoryExtractor;
    use crate::grid::GridError;
    use crate::sink::MemorySink;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> RawTimetable {
        RawTimetable {
            stations: strings(&["A", "B", "C"]),
            time_grid: vec![
                strings(&["8:00", "8:10", ""]),
                strings(&["0:05", "", "9:20"]),
                strings(&["9:30", "9:40", "9:50"]),
            ],
        }
    }

    #[test]
    fn transform_normalizes_and_transposes() {
        let doc = transform(sample()).unwrap();
        assert_eq!(doc.stations, vec!["A", "B", "C"]);
        assert_eq!(
            doc.train_schedules,
            vec![
                vec![Some(480), Some(1445), Some(570)],
                vec![Some(490), None, Some(580)],
                vec![None, Some(560), Some(590)],
            ]
        );
    }

    #[test]
    fn malformed_cell_reports_its_position() {
        let mut raw = sample();
        raw.time_grid[2][1] = "foo".to_string();

        let err = transform(raw).unwrap_err();
        match err {
            ScrapeError::MalformedCell {
                station,
                train,
                value,
                ..
            } => {
                assert_eq!((station, train), (2, 1));
                assert_eq!(value, "foo");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_grid_is_a_shape_fault() {
        let raw = RawTimetable::default();
        let err = transform(raw).unwrap_err();
        assert!(matches!(err, ScrapeError::Shape(GridError::Empty)));
    }

    #[test]
    fn ragged_grid_is_a_shape_fault() {
        let mut raw = sample();
        raw.time_grid[1].pop();
        let err = transform(raw).unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::Shape(GridError::Ragged { row: 1, .. })
        ));
    }

    #[test]
    fn station_count_must_match_rows() {
        let mut raw = sample();
        raw.stations.pop();
        let err = transform(raw).unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::StationCountMismatch {
                stations: 2,
                rows: 3
            }
        ));
    }

    #[test]
    fn render_is_two_space_pretty_json_with_nulls() {
        let doc = ScheduleDocument {
            stations: strings(&["A"]),
            train_schedules: vec![vec![None]],
        };
        let expected = "{\n  \"stations\": [\n    \"A\"\n  ],\n  \"trainSchedules\": [\n    [\n      null\n    ]\n  ]\n}";
        assert_eq!(render(&doc).unwrap(), expected);
    }

    #[test]
    fn run_delivers_named_document() {
        let raw = sample();
        let extractor = InMemoryExtractor::new(raw.stations, raw.time_grid);
        let mut sink = MemorySink::default();

        let doc = run(&extractor, &mut sink, "/routes/blue-line.html").unwrap();

        assert_eq!(sink.deliveries.len(), 1);
        let (name, content) = &sink.deliveries[0];
        assert_eq!(name, "blue_line_schedule.json");
        let parsed: ScheduleDocument = serde_json::from_str(content).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn run_delivers_nothing_on_failure() {
        let extractor = InMemoryExtractor::new(strings(&["A"]), vec![strings(&["foo"])]);
        let mut sink = MemorySink::default();

        assert!(run(&extractor, &mut sink, "/x.html").is_err());
        assert!(sink.deliveries.is_empty());
    }
}
