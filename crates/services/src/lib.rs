//! External service contracts for the booking workflow.
//!
//! The pricing, booking, and address-book backends are collaborators
//! reached over JSON/HTTPS. Each gets a trait, an HTTP implementation,
//! and an in-memory double for tests.

pub mod address_book;
pub mod booking;
pub mod config;
pub mod error;
pub mod http;
pub mod pricing;

pub use address_book::{
    AddressBookService, InMemoryAddressBookService, NewAddress, SavedAddress,
};
pub use booking::{
    BookingConfirmation, BookingService, GoodsLine, InMemoryBookingService, ShipmentPayload,
};
pub use config::ApiConfig;
pub use error::ServiceError;
pub use http::HttpApi;
pub use pricing::{InMemoryPricingService, PricingService};
