//! Full-form validation schema.
//!
//! Validation never panics and never short-circuits: the whole form is
//! checked and every failing field gets its own message, mirroring how the
//! booking page binds errors to inputs.

use chrono::{Days, NaiveDate};

use super::{
    Address, DomesticService, GoodsItem, PackageDetails, ShipmentForm, ShipmentKind, ShipmentType,
    INTERNATIONAL_MAX_WEIGHT_KG, INTERNATIONAL_SERVICE,
};

/// A validation failure scoped to a single form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Wire-style field path, e.g. `sender_name` or `goods.0.quantity`.
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Normalized, fully validated shipment request ready for submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidShipment {
    pub shipment_type: ShipmentType,
    /// Wire label of the selected service.
    pub service_type: String,
    pub sender: Address,
    pub receiver: Address,
    pub package: PackageDetails,
    pub pickup_date: NaiveDate,
    pub goods: Vec<GoodsItem>,
    /// Nickname to save the sender address under, when requested.
    pub save_sender_as: Option<String>,
    /// Nickname to save the receiver address under, when requested.
    pub save_receiver_as: Option<String>,
}

impl ShipmentForm {
    /// Runs the full schema against the current form state.
    ///
    /// `today` anchors the pickup-date check; same-day pickup is allowed
    /// with a one-day grace window behind it.
    pub fn validate(&self, today: NaiveDate) -> Result<ValidShipment, Vec<FieldError>> {
        let mut errors = Vec::new();

        validate_address(&mut errors, "sender", self.sender());
        validate_address(&mut errors, "receiver", self.receiver());
        validate_package(&mut errors, self.package(), self.kind());
        validate_pickup_date(&mut errors, self.pickup_date(), today);
        validate_goods(&mut errors, self.goods());

        let service_type = validate_service(&mut errors, self.kind(), self.package());

        let save_sender_as = validate_nickname(
            &mut errors,
            self.save_sender_address(),
            self.sender_nickname(),
            "sender_address_nickname",
            "Nickname is required to save sender address",
        );
        let save_receiver_as = validate_nickname(
            &mut errors,
            self.save_receiver_address(),
            self.receiver_nickname(),
            "receiver_address_nickname",
            "Nickname is required to save receiver address",
        );

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidShipment {
            shipment_type: self.shipment_type(),
            service_type,
            sender: self.sender().clone(),
            receiver: self.receiver().clone(),
            package: self.package().clone(),
            pickup_date: self.pickup_date(),
            goods: self.goods().to_vec(),
            save_sender_as,
            save_receiver_as,
        })
    }
}

fn min_chars(errors: &mut Vec<FieldError>, field: String, value: &str, min: usize, message: &str) {
    if value.chars().count() < min {
        errors.push(FieldError::new(field, message));
    }
}

fn validate_address(errors: &mut Vec<FieldError>, role: &str, address: &Address) {
    min_chars(
        errors,
        format!("{role}_name"),
        &address.name,
        3,
        &format!("{} name is required", capitalize(role)),
    );
    min_chars(
        errors,
        format!("{role}_address_street"),
        &address.street,
        5,
        &format!("{} address is required", capitalize(role)),
    );
    min_chars(
        errors,
        format!("{role}_address_city"),
        &address.city,
        2,
        &format!("{} city is required", capitalize(role)),
    );
    min_chars(
        errors,
        format!("{role}_address_state"),
        &address.state,
        2,
        &format!("{} state is required", capitalize(role)),
    );
    min_chars(
        errors,
        format!("{role}_address_pincode"),
        &address.pincode,
        5,
        &format!("{} pincode is required", capitalize(role)),
    );
    min_chars(
        errors,
        format!("{role}_address_country"),
        &address.country,
        2,
        &format!("{} country is required", capitalize(role)),
    );
    min_chars(
        errors,
        format!("{role}_phone"),
        &address.phone,
        10,
        "A valid phone number is required",
    );
}

fn validate_package(errors: &mut Vec<FieldError>, package: &PackageDetails, kind: &ShipmentKind) {
    if package.weight_kg < 0.1 {
        errors.push(FieldError::new(
            "package_weight_kg",
            "Weight must be at least 0.1 kg",
        ));
    }
    if !kind.is_domestic() && package.weight_kg > INTERNATIONAL_MAX_WEIGHT_KG {
        errors.push(FieldError::new(
            "package_weight_kg",
            "Maximum allowed weight is 30 kg",
        ));
    }

    for (field, dimension) in [
        ("package_length_cm", package.length_cm),
        ("package_width_cm", package.width_cm),
        ("package_height_cm", package.height_cm),
    ] {
        if let Some(value) = dimension {
            if value < 0.0 {
                errors.push(FieldError::new(field, "Must be zero or greater"));
            }
        }
    }
}

fn validate_pickup_date(errors: &mut Vec<FieldError>, pickup_date: NaiveDate, today: NaiveDate) {
    let yesterday = today
        .checked_sub_days(Days::new(1))
        .unwrap_or(today);
    if pickup_date < yesterday {
        errors.push(FieldError::new(
            "pickup_date",
            "Pickup date cannot be in the past",
        ));
    }
}

fn validate_goods(errors: &mut Vec<FieldError>, goods: &[GoodsItem]) {
    if goods.is_empty() {
        errors.push(FieldError::new("goods", "At least one item is required."));
        return;
    }

    for (index, item) in goods.iter().enumerate() {
        if item.description.is_empty() {
            errors.push(FieldError::new(
                format!("goods.{index}.description"),
                "Description is required",
            ));
        }
        if item.quantity < 1 {
            errors.push(FieldError::new(
                format!("goods.{index}.quantity"),
                "Quantity must be at least 1",
            ));
        }
        if item.value < 0.0 {
            errors.push(FieldError::new(
                format!("goods.{index}.value"),
                "Value cannot be negative",
            ));
        }
    }
}

fn validate_service(
    errors: &mut Vec<FieldError>,
    kind: &ShipmentKind,
    package: &PackageDetails,
) -> String {
    match kind {
        ShipmentKind::Domestic { service: None } => {
            errors.push(FieldError::new("service_type", "Service type is required"));
            String::new()
        }
        ShipmentKind::Domestic {
            service: Some(service),
        } => {
            if *service == DomesticService::Express && !service.accepts_weight(package.weight_kg) {
                errors.push(FieldError::new(
                    "service_type",
                    "Express service supports up to 5 kg",
                ));
            }
            service.as_str().to_string()
        }
        ShipmentKind::International => INTERNATIONAL_SERVICE.to_string(),
    }
}

fn validate_nickname(
    errors: &mut Vec<FieldError>,
    save_requested: bool,
    nickname: &str,
    field: &str,
    message: &str,
) -> Option<String> {
    if !save_requested {
        return None;
    }
    if nickname.chars().count() < 2 {
        errors.push(FieldError::new(field, message));
        return None;
    }
    Some(nickname.to_string())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
