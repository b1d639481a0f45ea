//! Booking configuration.

/// Static configuration for a booking session.
///
/// The home country is the default sender country and the forced receiver
/// country for domestic shipments.
#[derive(Debug, Clone)]
pub struct BookingConfig {
    pub home_country: String,
}

impl BookingConfig {
    /// Creates a configuration with the given home country.
    pub fn new(home_country: impl Into<String>) -> Self {
        Self {
            home_country: home_country.into(),
        }
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            home_country: "India".to_string(),
        }
    }
}
