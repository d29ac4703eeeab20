//! Page fetcher implementations.
//!
//! These are the only parts of the crate that perform I/O. Both return the
//! markup unchanged; parsing happens in [`crate::extract`].

use buzz_common::{create_client, get_text, internal_error, BoxFuture, BuzzError, PageFetcher};
use buzz_config::{FetchConfig, VenueConfig};
use chrono::NaiveDate;
use reqwest::Client;
use std::path::PathBuf;
use tracing::info;

/// Fetches the live calendar page over HTTP.
pub struct HttpPageFetcher {
    client: Client,
    base_url: String,
    date_query_param: Option<String>,
}

impl HttpPageFetcher {
    pub fn new(venue: &VenueConfig, fetch: &FetchConfig) -> Result<Self, BuzzError> {
        Ok(Self {
            client: create_client(fetch)?,
            base_url: venue.base_url.clone(),
            date_query_param: venue.date_query_param.clone(),
        })
    }

    /// The URL requested for `date`.
    ///
    /// Without a configured date parameter this is the base URL, i.e. the
    /// page's default (current) day.
    pub fn url_for(&self, date: NaiveDate) -> String {
        match &self.date_query_param {
            Some(param) => {
                let separator = if self.base_url.contains('?') { '&' } else { '?' };
                format!(
                    "{}{}{}={}",
                    self.base_url,
                    separator,
                    param,
                    date.format("%Y-%m-%d")
                )
            }
            None => self.base_url.clone(),
        }
    }
}

impl PageFetcher for HttpPageFetcher {
    fn fetch_calendar(&self, date: NaiveDate) -> BoxFuture<'_, String, BuzzError> {
        Box::pin(async move {
            let url = self.url_for(date);
            info!("Fetching calendar page: {}", url);
            let markup = get_text(&self.client, &url).await?;
            info!("Fetched calendar page ({} characters)", markup.chars().count());
            Ok(markup)
        })
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

/// Reads markup saved from a browser.
///
/// The saved page shows whatever day was on screen when it was saved, so the
/// requested date is ignored.
pub struct FilePageFetcher {
    path: PathBuf,
}

impl FilePageFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PageFetcher for FilePageFetcher {
    fn fetch_calendar(&self, _date: NaiveDate) -> BoxFuture<'_, String, BuzzError> {
        Box::pin(async move {
            info!("Reading calendar page from {}", self.path.display());
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|err| internal_error(format!("{}: {}", self.path.display(), err)))
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
