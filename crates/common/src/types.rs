use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Email address identifying an authenticated customer.
///
/// The booking API authenticates requests with an `X-User-Email` header;
/// this newtype keeps user identity from being confused with other strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserEmail(String);

impl UserEmail {
    /// Creates a user email from a string.
    pub fn new(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Returns the email as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserEmail {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UserEmail {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for UserEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Tracking identifier assigned by the booking backend.
///
/// The backend generates these (`SBC` followed by twelve alphanumerics);
/// the client only ever reads one back and uses it for the tracking view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackingId(String);

impl TrackingId {
    /// Creates a tracking ID from a backend-provided string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the tracking ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the tracking-page path for this shipment.
    pub fn tracking_path(&self) -> String {
        format!("/track/{}", self.0)
    }
}

impl std::fmt::Display for TrackingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TrackingId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TrackingId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for TrackingId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Unique identifier for one booking session.
///
/// A session owns exactly one in-progress shipment request; the ID exists
/// for log correlation, not for persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a session ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for SessionId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<SessionId> for Uuid {
    fn from(id: SessionId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_new_creates_unique_ids() {
        let id1 = SessionId::new();
        let id2 = SessionId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn user_email_string_conversion() {
        let email = UserEmail::new("customer@example.com");
        assert_eq!(email.as_str(), "customer@example.com");

        let email2: UserEmail = "other@example.com".into();
        assert_eq!(email2.as_str(), "other@example.com");
    }

    #[test]
    fn tracking_id_tracking_path() {
        let id = TrackingId::new("SBC1A2B3C4D5E6F7");
        assert_eq!(id.tracking_path(), "/track/SBC1A2B3C4D5E6F7");
    }

    #[test]
    fn tracking_id_serialization_is_transparent() {
        let id = TrackingId::new("SBCABCDEF123456");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"SBCABCDEF123456\"");
        let back: TrackingId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
