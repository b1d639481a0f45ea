//! Booking workflow.
//!
//! A [`BookingSession`] walks one user through a shipment: edit the form,
//! fetch an authoritative price, submit, and get back a tracking id. The
//! session orchestrates the domain form and the external service clients;
//! it holds no networking or validation logic of its own.

mod address_book;
mod error;
mod payload;
mod session;

pub use address_book::AddressBookManager;
pub use error::BookingError;
pub use payload::build_payload;
pub use session::{BookingOutcome, BookingSession};
