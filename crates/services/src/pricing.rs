//! Pricing service trait and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use domain::{PriceQuote, QuoteRequest};

use crate::error::ServiceError;

/// Trait for obtaining authoritative prices from the pricing backend.
#[async_trait]
pub trait PricingService: Send + Sync {
    /// Prices the given normalized request.
    async fn price(&self, request: &QuoteRequest) -> Result<PriceQuote, ServiceError>;
}

#[derive(Debug)]
struct InMemoryPricingState {
    total_price: f64,
    fail_with: Option<String>,
    requests: Vec<QuoteRequest>,
}

impl Default for InMemoryPricingState {
    fn default() -> Self {
        Self {
            total_price: 100.0,
            fail_with: None,
            requests: Vec::new(),
        }
    }
}

/// In-memory pricing service for testing.
///
/// Answers every request with a configurable total and records the
/// requests it saw, so tests can assert which calls reached the network
/// boundary.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPricingService {
    state: Arc<RwLock<InMemoryPricingState>>,
}

impl InMemoryPricingService {
    /// Creates a new in-memory pricing service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service that always quotes the given total.
    pub fn with_total(total_price: f64) -> Self {
        let service = Self::default();
        service.set_total_price(total_price);
        service
    }

    /// Sets the total every subsequent quote will carry.
    pub fn set_total_price(&self, total_price: f64) {
        self.state.write().unwrap().total_price = total_price;
    }

    /// Makes subsequent calls fail with the given server message.
    pub fn set_fail_with(&self, message: impl Into<String>) {
        self.state.write().unwrap().fail_with = Some(message.into());
    }

    /// Clears a previously configured failure.
    pub fn clear_failure(&self) {
        self.state.write().unwrap().fail_with = None;
    }

    /// Returns how many pricing calls were made.
    pub fn call_count(&self) -> usize {
        self.state.read().unwrap().requests.len()
    }

    /// Returns the most recent request, if any.
    pub fn last_request(&self) -> Option<QuoteRequest> {
        self.state.read().unwrap().requests.last().cloned()
    }
}

#[async_trait]
impl PricingService for InMemoryPricingService {
    async fn price(&self, request: &QuoteRequest) -> Result<PriceQuote, ServiceError> {
        let mut state = self.state.write().unwrap();
        state.requests.push(request.clone());

        if let Some(message) = &state.fail_with {
            return Err(ServiceError::Rejected {
                message: message.clone(),
            });
        }

        let mode = match request {
            QuoteRequest::Domestic { mode, .. } => mode.as_str().to_string(),
            QuoteRequest::International { .. } => "Express".to_string(),
        };

        Ok(PriceQuote {
            total_price: state.total_price,
            zone: None,
            mode: Some(mode),
            rounded_weight: Some(request.weight().ceil()),
            destination: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::DomesticService;

    fn domestic_request() -> QuoteRequest {
        QuoteRequest::Domestic {
            city: "Pune".to_string(),
            state: "Maharashtra".to_string(),
            weight: 2.0,
            mode: DomesticService::AirCargo,
        }
    }

    #[tokio::test]
    async fn quotes_configured_total_and_records_request() {
        let service = InMemoryPricingService::with_total(350.0);
        let quote = service.price(&domestic_request()).await.unwrap();
        assert_eq!(quote.total_price, 350.0);
        assert_eq!(service.call_count(), 1);
        assert_eq!(service.last_request(), Some(domestic_request()));
    }

    #[tokio::test]
    async fn configured_failure_is_surfaced_verbatim() {
        let service = InMemoryPricingService::new();
        service.set_fail_with("Pricing not available for 99kg to Atlantis.");

        let err = service.price(&domestic_request()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Pricing not available for 99kg to Atlantis."
        );
        // The call still counts; it reached the service.
        assert_eq!(service.call_count(), 1);

        service.clear_failure();
        assert!(service.price(&domestic_request()).await.is_ok());
    }
}
