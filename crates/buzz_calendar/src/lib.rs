// Declare modules within this crate
pub mod dom;
pub mod error;
pub mod extract;
#[cfg(test)]
mod extract_test;
pub mod models;
pub mod query;
pub mod resolve;
#[cfg(test)]
mod resolve_proptest;
pub mod service;

pub use error::CalendarError;
pub use extract::{Diagnostic, Extraction, TableExtractor};
pub use models::{
    AvailabilityGrid, CalendarDate, Query, QueryResult, ResultStatus, SlotStatus, StudioId,
    StudioResult, TimeSlot,
};
pub use query::query_availability;
pub use resolve::QueryResolver;
pub use service::{FilePageFetcher, HttpPageFetcher};
