//! Booking service trait and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::TrackingId;
use domain::ShipmentType;
use serde::Serialize;

use crate::error::ServiceError;

/// One goods line as the booking endpoint expects it.
///
/// The wire carries an empty string, not null, for a missing HSN code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoodsLine {
    pub description: String,
    pub quantity: u32,
    pub hsn_code: String,
    pub value: f64,
}

/// Full shipment payload for `POST /api/shipments/{domestic|international}`.
///
/// Field names match the backend schema exactly. Dimensions default to 0
/// when the form left them blank, and the pickup date is an ISO calendar
/// date (`yyyy-MM-dd`). The shipment type picks the endpoint and is not
/// itself serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipmentPayload {
    #[serde(skip)]
    pub shipment_type: ShipmentType,

    pub user_email: String,

    pub sender_name: String,
    pub sender_address_street: String,
    pub sender_address_city: String,
    pub sender_address_state: String,
    pub sender_address_pincode: String,
    pub sender_address_country: String,
    pub sender_phone: String,

    pub receiver_name: String,
    pub receiver_address_street: String,
    pub receiver_address_city: String,
    pub receiver_address_state: String,
    pub receiver_address_pincode: String,
    pub receiver_address_country: String,
    pub receiver_phone: String,

    pub package_weight_kg: f64,
    pub package_length_cm: f64,
    pub package_width_cm: f64,
    pub package_height_cm: f64,

    pub pickup_date: String,
    pub service_type: String,
    pub goods: Vec<GoodsLine>,

    pub final_total_price_with_tax: f64,
}

impl ShipmentPayload {
    /// Returns the endpoint path this payload must be posted to.
    pub fn endpoint_path(&self) -> &'static str {
        match self.shipment_type {
            ShipmentType::Domestic => "/api/shipments/domestic",
            ShipmentType::International => "/api/shipments/international",
        }
    }
}

/// Result of a successful booking.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingConfirmation {
    /// The tracking identifier generated by the backend.
    pub tracking_id: TrackingId,
}

/// Trait for submitting shipments to the booking backend.
#[async_trait]
pub trait BookingService: Send + Sync {
    /// Creates a shipment and returns its generated tracking identifier.
    async fn create_shipment(
        &self,
        payload: &ShipmentPayload,
    ) -> Result<BookingConfirmation, ServiceError>;
}

#[derive(Debug, Default)]
struct InMemoryBookingState {
    shipments: Vec<ShipmentPayload>,
    next_id: u32,
    fail_with: Option<String>,
}

/// In-memory booking service for testing.
///
/// Generates tracking ids in the backend's shape (`SBC` followed by
/// twelve uppercase alphanumerics) and keeps every accepted payload for
/// inspection.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookingService {
    state: Arc<RwLock<InMemoryBookingState>>,
}

impl InMemoryBookingService {
    /// Creates a new in-memory booking service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent bookings fail with the given server message.
    pub fn set_fail_with(&self, message: impl Into<String>) {
        self.state.write().unwrap().fail_with = Some(message.into());
    }

    /// Returns the number of shipments created.
    pub fn shipment_count(&self) -> usize {
        self.state.read().unwrap().shipments.len()
    }

    /// Returns the most recently accepted payload, if any.
    pub fn last_payload(&self) -> Option<ShipmentPayload> {
        self.state.read().unwrap().shipments.last().cloned()
    }
}

#[async_trait]
impl BookingService for InMemoryBookingService {
    async fn create_shipment(
        &self,
        payload: &ShipmentPayload,
    ) -> Result<BookingConfirmation, ServiceError> {
        let mut state = self.state.write().unwrap();

        if let Some(message) = &state.fail_with {
            return Err(ServiceError::Rejected {
                message: message.clone(),
            });
        }

        state.next_id += 1;
        let tracking_id = TrackingId::new(format!("SBC{:012X}", state.next_id));
        state.shipments.push(payload.clone());

        Ok(BookingConfirmation { tracking_id })
    }
}
