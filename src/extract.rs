//! Pull the station list and the raw time grid out of a timetable page.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::error::ScrapeError;
use crate::schema::{DEFAULT_STATIONS_SELECTOR, DEFAULT_TIMETABLE_SELECTOR};

/// Station names plus the station-major grid of unparsed cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTimetable {
    pub stations: Vec<String>,
    pub time_grid: Vec<Vec<String>>,
}

/// Anything that can produce a [`RawTimetable`] for one run.
pub trait Extractor {
    fn extract(&self) -> Result<RawTimetable, ScrapeError>;
}

/// Fixed tables, already in memory.
#[derive(Debug, Clone)]
pub struct InMemoryExtractor {
    table: RawTimetable,
}

impl InMemoryExtractor {
    pub fn new(stations: Vec<String>, time_grid: Vec<Vec<String>>) -> Self {
        Self {
            table: RawTimetable {
                stations,
                time_grid,
            },
        }
    }
}

impl Extractor for InMemoryExtractor {
    fn extract(&self) -> Result<RawTimetable, ScrapeError> {
        Ok(self.table.clone())
    }
}

/// Reads the two tables out of an HTML page.
#[derive(Debug, Clone)]
pub struct HtmlExtractor {
    html: String,
    stations_selector: String,
    timetable_selector: String,
}

impl HtmlExtractor {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            stations_selector: DEFAULT_STATIONS_SELECTOR.to_string(),
            timetable_selector: DEFAULT_TIMETABLE_SELECTOR.to_string(),
        }
    }

    pub fn with_stations_selector(mut self, selector: impl Into<String>) -> Self {
        self.stations_selector = selector.into();
        self
    }

    pub fn with_timetable_selector(mut self, selector: impl Into<String>) -> Self {
        self.timetable_selector = selector.into();
        self
    }
}

impl Extractor for HtmlExtractor {
    fn extract(&self) -> Result<RawTimetable, ScrapeError> {
        let document = Html::parse_document(&self.html);
        let stations_table = find_table(&document, &self.stations_selector)?;
        let time_table = find_table(&document, &self.timetable_selector)?;

        let stations: Vec<String> = table_rows(stations_table)
            .map(|tr| station_name(&tr))
            .collect();
        let time_grid: Vec<Vec<String>> = table_rows(time_table)
            .map(|tr| child_elements(tr).map(|td| cell_text(&td)).collect())
            .collect();

        if stations.iter().any(String::is_empty) {
            warn!("station table contains rows without a name");
        }
        debug!(
            stations = stations.len(),
            rows = time_grid.len(),
            "extracted timetable tables"
        );

        Ok(RawTimetable {
            stations,
            time_grid,
        })
    }
}

fn find_table<'a>(document: &'a Html, selector: &str) -> Result<ElementRef<'a>, ScrapeError> {
    let parsed = Selector::parse(selector).map_err(|e| ScrapeError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })?;
    document
        .select(&parsed)
        .next()
        .ok_or_else(|| ScrapeError::MissingTable {
            selector: selector.to_string(),
        })
}

fn child_elements(element: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    element.children().filter_map(ElementRef::wrap)
}

// Rows live in the table's first section; the parser inserts <tbody> when the markup omits it.
fn table_rows(table: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    child_elements(table).next().into_iter().flat_map(child_elements)
}

// Rows read like "Tokyo 東京 0.0km"; only the first word is the name.
fn station_name(row: &ElementRef<'_>) -> String {
    let text: String = row.text().collect();
    text.split_whitespace().next().unwrap_or_default().to_string()
}

fn cell_text(cell: &ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}
