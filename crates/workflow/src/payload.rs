//! Assembly of the wire payload from a validated shipment.

use common::UserEmail;
use domain::{PriceQuote, ShipmentType, ValidShipment};
use services::{GoodsLine, ShipmentPayload};

/// Flattens a validated shipment into the backend's submission payload.
///
/// Dimensions the form left blank go on the wire as 0, the pickup date is
/// rendered as an ISO calendar date, and a domestic receiver always carries
/// the home country no matter what the form held. The quoted total becomes
/// `final_total_price_with_tax` unchanged.
pub fn build_payload(
    shipment: &ValidShipment,
    quote: &PriceQuote,
    user: &UserEmail,
    home_country: &str,
) -> ShipmentPayload {
    let receiver_country = match shipment.shipment_type {
        ShipmentType::Domestic => home_country.to_string(),
        ShipmentType::International => shipment.receiver.country.clone(),
    };

    ShipmentPayload {
        shipment_type: shipment.shipment_type,
        user_email: user.as_str().to_string(),

        sender_name: shipment.sender.name.clone(),
        sender_address_street: shipment.sender.street.clone(),
        sender_address_city: shipment.sender.city.clone(),
        sender_address_state: shipment.sender.state.clone(),
        sender_address_pincode: shipment.sender.pincode.clone(),
        sender_address_country: shipment.sender.country.clone(),
        sender_phone: shipment.sender.phone.clone(),

        receiver_name: shipment.receiver.name.clone(),
        receiver_address_street: shipment.receiver.street.clone(),
        receiver_address_city: shipment.receiver.city.clone(),
        receiver_address_state: shipment.receiver.state.clone(),
        receiver_address_pincode: shipment.receiver.pincode.clone(),
        receiver_address_country: receiver_country,
        receiver_phone: shipment.receiver.phone.clone(),

        package_weight_kg: shipment.package.weight_kg,
        package_length_cm: shipment.package.length_cm.unwrap_or(0.0),
        package_width_cm: shipment.package.width_cm.unwrap_or(0.0),
        package_height_cm: shipment.package.height_cm.unwrap_or(0.0),

        pickup_date: shipment.pickup_date.format("%Y-%m-%d").to_string(),
        service_type: shipment.service_type.clone(),
        goods: shipment
            .goods
            .iter()
            .map(|item| GoodsLine {
                description: item.description.clone(),
                quantity: item.quantity,
                hsn_code: item.hsn_code.clone().unwrap_or_default(),
                value: item.value,
            })
            .collect(),

        final_total_price_with_tax: quote.total_price,
    }
}
