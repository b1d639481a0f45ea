//! Integration tests for the HTTP service clients against a fake backend.

use std::net::SocketAddr;

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use common::UserEmail;
use domain::{AddressRole, DomesticService, QuoteRequest};
use services::{
    AddressBookService, ApiConfig, BookingService, HttpApi, NewAddress, PricingService,
    ServiceError, ShipmentPayload,
};

async fn spawn_backend() -> SocketAddr {
    let app = Router::new()
        .route("/api/domestic/price", post(domestic_price))
        .route("/api/international/price", post(international_price))
        .route("/api/shipments/domestic", post(create_domestic_shipment))
        .route(
            "/api/customer/addresses",
            get(list_addresses).post(create_address),
        )
        .route("/api/customer/addresses/{id}", delete(delete_address));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn domestic_price(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["city"] == "Atlantis" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Pricing not available for Atlantis."})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "destination_state": body["state"],
            "mode": body["mode"],
            "weight_kg": body["weight"],
            "rounded_weight": 2.0,
            "total_price": 350.0,
            "zone": "West"
        })),
    )
}

async fn international_price(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "country": body["country"],
        "zone": "Zone A",
        "mode": "Express",
        "weight_kg": body["weight"],
        "rounded_weight": 5.0,
        "price_per_kg": "₹440",
        "total_price": 2200.0
    }))
}

async fn create_domestic_shipment(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["final_total_price_with_tax"].as_f64().unwrap_or(0.0) <= 0.0 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Valid final_total_price_with_tax is required"})),
        );
    }
    (
        StatusCode::CREATED,
        Json(json!({
            "message": "Shipment initiated successfully.",
            "data": {
                "shipment_id_str": "SBC1A2B3C4D5E6F7",
                "user_email": body["user_email"]
            }
        })),
    )
}

async fn list_addresses(
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    if !headers.contains_key("X-User-Email") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Authentication required"})),
        );
    }
    let address_type = params
        .iter()
        .find(|(k, _)| k == "type")
        .map(|(_, v)| v.clone())
        .unwrap_or_default();
    (
        StatusCode::OK,
        Json(json!([{
            "id": 1,
            "address_type": address_type,
            "nickname": "Home",
            "name": "Asha Patil",
            "address_street": "14 Shivaji Nagar",
            "address_city": "Pune",
            "address_state": "Maharashtra",
            "address_pincode": "411005",
            "address_country": "India",
            "phone": "9876543210"
        }])),
    )
}

async fn create_address(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if !headers.contains_key("X-User-Email") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Authentication required"})),
        );
    }
    let mut saved = body;
    saved["id"] = json!(7);
    (StatusCode::CREATED, Json(saved))
}

async fn delete_address(Path(id): Path<u64>) -> (StatusCode, Json<Value>) {
    if id == 404 {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Address not found"})),
        );
    }
    (StatusCode::OK, Json(json!({"message": "Address deleted"})))
}

async fn api() -> HttpApi {
    let addr = spawn_backend().await;
    HttpApi::new(&ApiConfig::with_base_url(format!("http://{addr}"))).unwrap()
}

fn user() -> UserEmail {
    UserEmail::new("customer@example.com")
}

#[tokio::test]
async fn domestic_price_round_trip() {
    let api = api().await;
    let quote = api
        .price(&QuoteRequest::Domestic {
            city: "Pune".to_string(),
            state: "Maharashtra".to_string(),
            weight: 2.0,
            mode: DomesticService::AirCargo,
        })
        .await
        .unwrap();

    assert_eq!(quote.total_price, 350.0);
    assert_eq!(quote.zone.as_deref(), Some("West"));
    assert_eq!(quote.destination.as_deref(), Some("Maharashtra"));
}

#[tokio::test]
async fn international_price_round_trip() {
    let api = api().await;
    let quote = api
        .price(&QuoteRequest::International {
            country: "Singapore".to_string(),
            weight: 4.5,
        })
        .await
        .unwrap();

    assert_eq!(quote.total_price, 2200.0);
    assert_eq!(quote.destination.as_deref(), Some("Singapore"));
}

#[tokio::test]
async fn pricing_rejection_surfaces_server_message() {
    let api = api().await;
    let err = api
        .price(&QuoteRequest::Domestic {
            city: "Atlantis".to_string(),
            state: String::new(),
            weight: 2.0,
            mode: DomesticService::Express,
        })
        .await
        .unwrap_err();

    match err {
        ServiceError::Rejected { message } => {
            assert_eq!(message, "Pricing not available for Atlantis.");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn booking_returns_generated_tracking_id() {
    let api = api().await;
    let payload = sample_payload(350.0);

    let confirmation = api.create_shipment(&payload).await.unwrap();
    assert_eq!(confirmation.tracking_id.as_str(), "SBC1A2B3C4D5E6F7");
}

#[tokio::test]
async fn booking_rejection_surfaces_server_message() {
    let api = api().await;
    let payload = sample_payload(0.0);

    let err = api.create_shipment(&payload).await.unwrap_err();
    match err {
        ServiceError::Rejected { message } => {
            assert_eq!(message, "Valid final_total_price_with_tax is required");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn address_list_passes_type_and_identity() {
    let api = api().await;
    let addresses = api.list(&user(), AddressRole::Sender).await.unwrap();
    assert_eq!(addresses.len(), 1);
    assert_eq!(addresses[0].address_type, AddressRole::Sender);
    assert_eq!(addresses[0].nickname, "Home");
}

#[tokio::test]
async fn address_create_round_trip() {
    let api = api().await;
    let address = NewAddress {
        address_type: AddressRole::Receiver,
        nickname: "Office".to_string(),
        name: "Ravi Kumar".to_string(),
        address_street: "12 MG Road".to_string(),
        address_city: "Bengaluru".to_string(),
        address_state: "Karnataka".to_string(),
        address_pincode: "560001".to_string(),
        address_country: "India".to_string(),
        phone: "9123456780".to_string(),
    };

    let saved = api.create(&user(), address).await.unwrap();
    assert_eq!(saved.id, 7);
    assert_eq!(saved.nickname, "Office");
}

#[tokio::test]
async fn address_delete_handles_missing_id() {
    let api = api().await;
    api.delete(&user(), 1).await.unwrap();

    let err = api.delete(&user(), 404).await.unwrap_err();
    match err {
        ServiceError::Rejected { message } => assert_eq!(message, "Address not found"),
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    // Nothing listens on this port.
    let api = HttpApi::new(&ApiConfig::with_base_url("http://127.0.0.1:1")).unwrap();
    let err = api
        .price(&QuoteRequest::International {
            country: "Singapore".to_string(),
            weight: 1.0,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Network(_)));
}

fn sample_payload(total: f64) -> ShipmentPayload {
    use services::GoodsLine;

    ShipmentPayload {
        shipment_type: domain::ShipmentType::Domestic,
        user_email: "customer@example.com".to_string(),
        sender_name: "Asha Patil".to_string(),
        sender_address_street: "14 Shivaji Nagar".to_string(),
        sender_address_city: "Pune".to_string(),
        sender_address_state: "Maharashtra".to_string(),
        sender_address_pincode: "411005".to_string(),
        sender_address_country: "India".to_string(),
        sender_phone: "9876543210".to_string(),
        receiver_name: "Ravi Kumar".to_string(),
        receiver_address_street: "12 MG Road".to_string(),
        receiver_address_city: "Bengaluru".to_string(),
        receiver_address_state: "Karnataka".to_string(),
        receiver_address_pincode: "560001".to_string(),
        receiver_address_country: "India".to_string(),
        receiver_phone: "9123456780".to_string(),
        package_weight_kg: 2.0,
        package_length_cm: 0.0,
        package_width_cm: 0.0,
        package_height_cm: 0.0,
        pickup_date: "2025-06-02".to_string(),
        service_type: "Air Cargo".to_string(),
        goods: vec![GoodsLine {
            description: "Books".to_string(),
            quantity: 1,
            hsn_code: String::new(),
            value: 500.0,
        }],
        final_total_price_with_tax: total,
    }
}
