//! Service abstractions for external collaborators.
//!
//! The checker core never performs I/O itself; the page it parses comes from
//! a [`PageFetcher`]. Keeping the fetcher behind a trait lets the binary
//! switch between the live site and a saved page, and lets tests inject
//! markup directly.

use chrono::NaiveDate;
use std::future::Future;
use std::pin::Pin;

use crate::error::BuzzError;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Source of calendar markup.
pub trait PageFetcher: Send + Sync {
    /// Returns the markup of the calendar as displayed for `date`.
    ///
    /// Navigating the remote calendar to `date` is the implementation's job.
    /// Implementations that cannot navigate return whatever the page
    /// currently shows.
    fn fetch_calendar(&self, date: NaiveDate) -> BoxFuture<'_, String, BuzzError>;

    /// Human-readable description of where the markup comes from, for logs.
    fn describe(&self) -> String;
}
