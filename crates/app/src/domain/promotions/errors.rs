//! Promotions service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use carte::{pricing::PricingError, promotions::TimeWindowError};

#[derive(Debug, Error)]
pub enum PromotionsServiceError {
    #[error("promotion not found")]
    NotFound,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for PromotionsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

/// A stored promotion that cannot be evaluated.
#[derive(Debug, Error)]
pub enum PromotionRecordError {
    #[error("weekday {0} is outside 0..=6")]
    InvalidWeekday(i32),

    #[error("invalid time window")]
    InvalidWindow(#[from] TimeWindowError),

    #[error("invalid fixed discount")]
    InvalidAmount(#[from] PricingError),
}
