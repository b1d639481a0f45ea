//! HTTP implementations of the service traits.
//!
//! One shared client speaks to every backend endpoint. Authenticated
//! calls pass the user as an `X-User-Email` header; that header is the
//! entire authentication model of the API.

use async_trait::async_trait;
use common::{TrackingId, UserEmail};
use domain::{AddressRole, PriceQuote, QuoteRequest};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::address_book::{AddressBookService, NewAddress, SavedAddress};
use crate::booking::{BookingConfirmation, BookingService, ShipmentPayload};
use crate::config::ApiConfig;
use crate::error::ServiceError;
use crate::pricing::PricingService;

const USER_EMAIL_HEADER: &str = "X-User-Email";

/// HTTP client for the courier backend API.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Creates a client from configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ServiceError> {
        if response.status().is_success() {
            Ok(response.json::<T>().await?)
        } else {
            let body: ErrorBody = response.json().await.unwrap_or_default();
            Err(ServiceError::rejected(body.error))
        }
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        user: Option<&UserEmail>,
    ) -> Result<T, ServiceError> {
        let mut request = self.client.post(self.url(path)).json(body);
        if let Some(user) = user {
            request = request.header(USER_EMAIL_HEADER, user.as_str());
        }
        let response = request.send().await?;
        Self::read_response(response).await
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PriceResponse {
    total_price: f64,
    #[serde(default)]
    zone: Option<String>,
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    rounded_weight: Option<f64>,
    #[serde(default)]
    destination_state: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

impl From<PriceResponse> for PriceQuote {
    fn from(response: PriceResponse) -> Self {
        PriceQuote {
            total_price: response.total_price,
            zone: response.zone,
            mode: response.mode,
            rounded_weight: response.rounded_weight,
            destination: response.destination_state.or(response.country),
        }
    }
}

#[async_trait]
impl PricingService for HttpApi {
    #[tracing::instrument(skip(self))]
    async fn price(&self, request: &QuoteRequest) -> Result<PriceQuote, ServiceError> {
        let (path, body) = match request {
            QuoteRequest::Domestic {
                city,
                state,
                weight,
                mode,
            } => (
                "/api/domestic/price",
                serde_json::json!({
                    "city": city,
                    "state": state,
                    "weight": weight,
                    "mode": mode.as_str(),
                }),
            ),
            QuoteRequest::International { country, weight } => (
                "/api/international/price",
                serde_json::json!({
                    "country": country,
                    "weight": weight,
                }),
            ),
        };

        let response: PriceResponse = self.post_json(path, &body, None).await?;
        Ok(response.into())
    }
}

#[derive(Debug, Deserialize)]
struct BookingResponse {
    data: BookingData,
}

#[derive(Debug, Deserialize)]
struct BookingData {
    shipment_id_str: String,
}

#[async_trait]
impl BookingService for HttpApi {
    #[tracing::instrument(skip(self, payload), fields(endpoint = payload.endpoint_path()))]
    async fn create_shipment(
        &self,
        payload: &ShipmentPayload,
    ) -> Result<BookingConfirmation, ServiceError> {
        let response: BookingResponse = self
            .post_json(payload.endpoint_path(), payload, None)
            .await?;
        Ok(BookingConfirmation {
            tracking_id: TrackingId::new(response.data.shipment_id_str),
        })
    }
}

#[async_trait]
impl AddressBookService for HttpApi {
    #[tracing::instrument(skip(self, user))]
    async fn list(
        &self,
        user: &UserEmail,
        role: AddressRole,
    ) -> Result<Vec<SavedAddress>, ServiceError> {
        let response = self
            .client
            .get(self.url("/api/customer/addresses"))
            .query(&[("type", role.as_str())])
            .header(USER_EMAIL_HEADER, user.as_str())
            .send()
            .await?;
        Self::read_response(response).await
    }

    #[tracing::instrument(skip(self, user, address))]
    async fn create(
        &self,
        user: &UserEmail,
        address: NewAddress,
    ) -> Result<SavedAddress, ServiceError> {
        self.post_json("/api/customer/addresses", &address, Some(user))
            .await
    }

    #[tracing::instrument(skip(self, user, address))]
    async fn update(
        &self,
        user: &UserEmail,
        id: u64,
        address: NewAddress,
    ) -> Result<SavedAddress, ServiceError> {
        let response = self
            .client
            .put(self.url(&format!("/api/customer/addresses/{id}")))
            .header(USER_EMAIL_HEADER, user.as_str())
            .json(&address)
            .send()
            .await?;
        Self::read_response(response).await
    }

    #[tracing::instrument(skip(self, user))]
    async fn delete(&self, user: &UserEmail, id: u64) -> Result<(), ServiceError> {
        let response = self
            .client
            .delete(self.url(&format!("/api/customer/addresses/{id}")))
            .header(USER_EMAIL_HEADER, user.as_str())
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            let body: ErrorBody = response.json().await.unwrap_or_default();
            Err(ServiceError::rejected(body.error))
        }
    }
}
