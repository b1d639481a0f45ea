//! Shipment form state, validation, and quote lifecycle.

mod form;
mod quote;
mod validate;
mod value_objects;

pub use form::{AddressEdit, EditError, FormEdit, GoodsEdit, ShipmentForm};
pub use quote::{PriceQuote, QuoteError, QuoteRequest, QuoteTicket};
pub use validate::{FieldError, ValidShipment};
pub use value_objects::{
    Address, AddressRole, DomesticService, GoodsItem, PackageDetails, ShipmentKind, ShipmentType,
    INTERNATIONAL_MAX_WEIGHT_KG, INTERNATIONAL_SERVICE,
};
