pub mod cli;
pub mod error;
pub mod extract;
pub mod grid;
pub mod merge;
pub mod pipeline;
pub mod schema;
pub mod sink;
pub mod source;
pub mod time;

use std::path::Path;

use tracing::info;

use crate::cli::Args;
use crate::error::ScrapeError;
use crate::extract::{Extractor, HtmlExtractor};
use crate::sink::{FileSink, Sink, WriterSink};
use crate::source::{Page, PageSource};

fn load_page(args: &Args) -> Result<Page, ScrapeError> {
    // clap only lets the source be absent together with --merge
    let source = args.source.as_deref().unwrap_or_default();
    PageSource::parse(source).load()
}

fn extractor_for(args: &Args, html: String) -> HtmlExtractor {
    HtmlExtractor::new(html)
        .with_stations_selector(&args.stations_selector)
        .with_timetable_selector(&args.timetable_selector)
}

fn sink_for(args: &Args, dir: &Path) -> Box<dyn Sink> {
    if args.stdout {
        Box::new(WriterSink::stdout())
    } else {
        Box::new(FileSink::new(dir))
    }
}

/// Numbered station lines, one per station, starting at 1.
pub fn station_lines(extractor: &impl Extractor) -> Result<Vec<String>, ScrapeError> {
    let table = extractor.extract()?;
    Ok(table
        .stations
        .iter()
        .enumerate()
        .map(|(i, station)| format!("{}: {}", i + 1, station))
        .collect())
}

/// Print the numbered station list of the page.
pub fn list_stations(args: &Args) -> Result<(), ScrapeError> {
    let page = load_page(args)?;
    for line in station_lines(&extractor_for(args, page.html))? {
        println!("{line}");
    }
    Ok(())
}

pub fn run(args: &Args) -> Result<(), ScrapeError> {
    if let Some(dir) = &args.merge {
        let mut sink = sink_for(args, dir);
        let lines = merge::merge(dir, &args.days, sink.as_mut())?;
        info!("Merged {} lines for days {}", lines, args.days);
        return Ok(());
    }

    let page = load_page(args)?;
    let extractor = extractor_for(args, page.html);
    let mut sink = sink_for(args, &args.output_dir);

    let document = pipeline::run(&extractor, sink.as_mut(), &page.location)?;
    info!(
        "Scraped {} trains across {} stations",
        document.train_count(),
        document.stations.len()
    );
    Ok(())
}
