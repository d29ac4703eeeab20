use buzz_common::{config_error, validation_error, BuzzError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// The date text matches none of the accepted forms.
    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),
    #[error("Invalid {name} selector {selector:?}: {reason}")]
    InvalidSelector {
        name: &'static str,
        selector: String,
        reason: String,
    },
}

impl From<CalendarError> for BuzzError {
    fn from(err: CalendarError) -> Self {
        match err {
            CalendarError::InvalidDateFormat(_) => validation_error(err),
            CalendarError::InvalidSelector { .. } => config_error(err),
        }
    }
}
