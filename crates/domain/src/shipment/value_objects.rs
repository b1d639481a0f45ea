//! Value objects for the shipment domain.

use serde::{Deserialize, Serialize};

/// The sole service offered for international shipments.
pub const INTERNATIONAL_SERVICE: &str = "International Express";

/// Maximum weight accepted for international shipments, in kilograms.
pub const INTERNATIONAL_MAX_WEIGHT_KG: f64 = 30.0;

/// Maximum weight the Express domestic service accepts, in kilograms.
pub const EXPRESS_MAX_WEIGHT_KG: f64 = 5.0;

/// Domestic service modes, named exactly as the pricing API expects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DomesticService {
    Express,
    AirCargo,
    SurfaceCargo,
}

impl DomesticService {
    /// Returns the wire name of the service mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            DomesticService::Express => "Express",
            DomesticService::AirCargo => "Air Cargo",
            DomesticService::SurfaceCargo => "Surface Cargo",
        }
    }

    /// Parses a wire name back into a service mode.
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "Express" => Some(DomesticService::Express),
            "Air Cargo" => Some(DomesticService::AirCargo),
            "Surface Cargo" => Some(DomesticService::SurfaceCargo),
            _ => None,
        }
    }

    /// Returns true if this service accepts the given package weight.
    pub fn accepts_weight(&self, weight_kg: f64) -> bool {
        match self {
            DomesticService::Express => weight_kg <= EXPRESS_MAX_WEIGHT_KG,
            DomesticService::AirCargo | DomesticService::SurfaceCargo => true,
        }
    }
}

impl std::fmt::Display for DomesticService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Selector for the two shipment categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipmentType {
    Domestic,
    International,
}

impl ShipmentType {
    /// Returns the wire name of the shipment type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentType::Domestic => "domestic",
            ShipmentType::International => "international",
        }
    }
}

impl std::fmt::Display for ShipmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shipment category together with the fields that only exist for it.
///
/// Domestic shipments carry a user-selected service mode; international
/// shipments have exactly one service, so the variant carries nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipmentKind {
    Domestic { service: Option<DomesticService> },
    International,
}

impl ShipmentKind {
    /// Returns the category selector for this kind.
    pub fn shipment_type(&self) -> ShipmentType {
        match self {
            ShipmentKind::Domestic { .. } => ShipmentType::Domestic,
            ShipmentKind::International => ShipmentType::International,
        }
    }

    /// Returns true for domestic shipments.
    pub fn is_domestic(&self) -> bool {
        matches!(self, ShipmentKind::Domestic { .. })
    }

    /// Returns the wire name of the selected service, if any.
    ///
    /// International shipments always report the sole international service.
    pub fn service_label(&self) -> Option<&'static str> {
        match self {
            ShipmentKind::Domestic { service } => service.map(|s| s.as_str()),
            ShipmentKind::International => Some(INTERNATIONAL_SERVICE),
        }
    }
}

impl Default for ShipmentKind {
    fn default() -> Self {
        ShipmentKind::Domestic { service: None }
    }
}

/// Which side of the shipment an address belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressRole {
    Sender,
    Receiver,
}

impl AddressRole {
    /// Returns the wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressRole::Sender => "sender",
            AddressRole::Receiver => "receiver",
        }
    }
}

impl std::fmt::Display for AddressRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Postal address of a sender or receiver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub country: String,
    pub phone: String,
}

impl Address {
    /// Creates an empty address with the given country pre-filled.
    pub fn with_country(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            ..Self::default()
        }
    }
}

/// One line item in the shipment's goods declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoodsItem {
    pub description: String,
    pub quantity: u32,
    pub hsn_code: Option<String>,
    pub value: f64,
}

impl GoodsItem {
    /// Creates a goods item.
    pub fn new(
        description: impl Into<String>,
        quantity: u32,
        hsn_code: Option<String>,
        value: f64,
    ) -> Self {
        Self {
            description: description.into(),
            quantity,
            hsn_code,
            value,
        }
    }

    /// Returns the empty line the form starts with.
    pub fn blank() -> Self {
        Self {
            description: String::new(),
            quantity: 1,
            hsn_code: None,
            value: 0.0,
        }
    }
}

/// Physical package details. Dimensions are optional on the form and
/// default to zero on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageDetails {
    pub weight_kg: f64,
    pub length_cm: Option<f64>,
    pub width_cm: Option<f64>,
    pub height_cm: Option<f64>,
}

impl Default for PackageDetails {
    fn default() -> Self {
        Self {
            weight_kg: 0.5,
            length_cm: None,
            width_cm: None,
            height_cm: None,
        }
    }
}
