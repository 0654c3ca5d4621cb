//! Where the timetable page comes from: a saved file or a live URL.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::info;

use crate::error::ScrapeError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

fn get_header() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "User-Agent",
        HeaderValue::from_static(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:137.0) Gecko/20100101 Firefox/137.0",
        ),
    );
    headers.insert(
        "Accept",
        HeaderValue::from_static("text/html,application/xhtml+xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(
        "Accept-Language",
        HeaderValue::from_static("ja,en-US;q=0.7,en;q=0.3"),
    );
    headers
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    File(PathBuf),
    Url(String),
}

/// A loaded page and the location it was loaded from.
#[derive(Debug, Clone)]
pub struct Page {
    pub html: String,
    /// Path component used to name the output file.
    pub location: String,
}

impl PageSource {
    pub fn parse(arg: &str) -> Self {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            PageSource::Url(arg.to_string())
        } else {
            PageSource::File(PathBuf::from(arg))
        }
    }

    pub fn load(&self) -> Result<Page, ScrapeError> {
        match self {
            PageSource::File(path) => {
                info!("Reading {}", path.display());
                let html = fs::read_to_string(path).map_err(|source| ScrapeError::Read {
                    path: path.clone(),
                    source,
                })?;
                Ok(Page {
                    html,
                    location: path.to_string_lossy().into_owned(),
                })
            }
            PageSource::Url(url) => {
                info!("Requesting {url}");
                let client = Client::builder()
                    .default_headers(get_header())
                    .timeout(REQUEST_TIMEOUT)
                    .build()?;
                let response = client.get(url).send()?.error_for_status()?;
                let location = response.url().path().to_string();
                let html = response.text()?;
                Ok(Page { html, location })
            }
        }
    }
}
