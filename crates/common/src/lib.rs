//! Shared types for the courier booking system.

mod types;

pub use types::{SessionId, TrackingId, UserEmail};
