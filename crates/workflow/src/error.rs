//! Booking workflow error types.

use domain::{EditError, FieldError, QuoteError};
use services::ServiceError;
use thiserror::Error;

/// Errors that can stop a booking before or during submission.
#[derive(Debug, Error)]
pub enum BookingError {
    /// Submission requires a current quote for the exact form state.
    #[error("Please calculate the price before booking")]
    QuoteRequired,

    /// Submission requires a signed-in user.
    #[error("You must be logged in to create a booking")]
    NotAuthenticated,

    /// A submission for this session is already in flight.
    #[error("A booking is already being submitted")]
    SubmissionInFlight,

    /// The price response arrived after the form had moved on, so it was
    /// discarded instead of held.
    #[error("The price is no longer current, please recalculate")]
    QuoteSuperseded,

    /// The form failed the full-schema check.
    #[error("Shipment details are invalid ({} field(s))", .0.len())]
    Validation(Vec<FieldError>),

    /// A pricing precondition failed before any call was made.
    #[error(transparent)]
    Quote(#[from] QuoteError),

    /// An external service call failed or was rejected.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl BookingError {
    /// Returns the per-field errors when this is a validation failure.
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        match self {
            BookingError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<EditError> for BookingError {
    fn from(err: EditError) -> Self {
        BookingError::Validation(vec![FieldError {
            field: "form".to_string(),
            message: err.to_string(),
        }])
    }
}
