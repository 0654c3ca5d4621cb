//! Delivery of the finished schedule document.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use tracing::info;

use crate::error::ScrapeError;
use crate::schema::SCHEDULE_FILE_SUFFIX;

pub trait Sink {
    fn deliver(&mut self, file_name: &str, content: &str) -> Result<(), ScrapeError>;
}

/// Writes each delivery as a file inside `dir`.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Sink for FileSink {
    fn deliver(&mut self, file_name: &str, content: &str) -> Result<(), ScrapeError> {
        fs::create_dir_all(&self.dir).map_err(|source| ScrapeError::Write {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.dir.join(file_name);
        fs::write(&path, content).map_err(|source| ScrapeError::Write {
            path: path.clone(),
            source,
        })?;
        info!("Wrote {}", path.display());
        Ok(())
    }
}

/// Writes the content of each delivery to a writer, ignoring the file name.
#[derive(Debug)]
pub struct WriterSink<W> {
    out: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl WriterSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Sink for WriterSink<W> {
    fn deliver(&mut self, _file_name: &str, content: &str) -> Result<(), ScrapeError> {
        writeln!(self.out, "{content}")
            .and_then(|()| self.out.flush())
            .map_err(ScrapeError::Stdout)
    }
}

/// Keeps every delivery in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub deliveries: Vec<(String, String)>,
}

impl Sink for MemorySink {
    fn deliver(&mut self, file_name: &str, content: &str) -> Result<(), ScrapeError> {
        self.deliveries
            .push((file_name.to_string(), content.to_string()));
        Ok(())
    }
}

/// Name the output after the last path segment of the page location.
///
/// ```
/// use timetable_scraper::sink::schedule_file_name;
///
/// assert_eq!(
///     schedule_file_name("/lines/tokaido-main,line.html"),
///     "tokaido_mainline_schedule.json"
/// );
/// ```
pub fn schedule_file_name(location: &str) -> String {
    let last = location.rsplit('/').next().unwrap_or_default();
    let stem = last.split(".html").next().unwrap_or_default();
    let stem = stem.replace(',', "").replace('-', "_");
    format!("{stem}{SCHEDULE_FILE_SUFFIX}")
}
