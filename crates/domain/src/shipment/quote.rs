//! Price quotes and the requests that produce them.

use serde::{Deserialize, Serialize};

use super::DomesticService;

/// A backend-computed price for one exact shipment configuration.
///
/// The total is authoritative and already includes tax; the remaining
/// fields are the breakdown the pricing endpoints return alongside it.
/// A quote is only meaningful for the form snapshot that requested it and
/// is dropped the moment any price-relevant field changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub total_price: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rounded_weight: Option<f64>,

    /// Destination state (domestic) or country (international).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

impl PriceQuote {
    /// Creates a quote carrying only a total, as tests and doubles do.
    pub fn from_total(total_price: f64) -> Self {
        Self {
            total_price,
            zone: None,
            mode: None,
            rounded_weight: None,
            destination: None,
        }
    }
}

/// Ticket identifying one issued quote request.
///
/// Tickets are drawn from a per-form monotonic counter that advances on
/// every new request and on every form change. A response is only accepted
/// while its ticket is still current, so neither an overlapping request nor
/// an edit made mid-flight can let a stale price land in the quote slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuoteTicket(pub(crate) u64);

impl QuoteTicket {
    /// Returns the raw sequence number, for logging.
    pub fn seq(&self) -> u64 {
        self.0
    }
}

/// Normalized subset of the form sent to the pricing endpoints.
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteRequest {
    /// Sent to `POST /api/domestic/price`.
    Domestic {
        city: String,
        state: String,
        weight: f64,
        mode: DomesticService,
    },

    /// Sent to `POST /api/international/price`.
    International { country: String, weight: f64 },
}

impl QuoteRequest {
    /// Returns the package weight the request quotes for.
    pub fn weight(&self) -> f64 {
        match self {
            QuoteRequest::Domestic { weight, .. } => *weight,
            QuoteRequest::International { weight, .. } => *weight,
        }
    }
}

/// Local precondition failures raised before any pricing call is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuoteError {
    /// The form is missing a field the pricing endpoint needs.
    #[error("Missing details: {0}")]
    MissingDetails(&'static str),
}
