//! Booking domain for the courier system.
//!
//! This crate provides the core of the booking workflow:
//! - ShipmentForm, the single-session form state manager
//! - Declarative validation producing field-scoped errors
//! - Quote lifecycle with clear-on-change invalidation

pub mod config;
pub mod shipment;

pub use config::BookingConfig;
pub use shipment::{
    Address, AddressEdit, AddressRole, DomesticService, EditError, FieldError, FormEdit,
    GoodsEdit, GoodsItem, PackageDetails, PriceQuote, QuoteError, QuoteRequest, QuoteTicket,
    ShipmentForm, ShipmentKind, ShipmentType, ValidShipment, INTERNATIONAL_MAX_WEIGHT_KG,
    INTERNATIONAL_SERVICE,
};
