//! Error types for HERALD.
//!
//! Every mutating registry call reports precondition violations through
//! [`HeraldError`]; nothing is logged-and-swallowed.

use thiserror::Error;

use crate::types::SubscriberId;

/// Result type alias using `HeraldError`.
pub type Result<T> = std::result::Result<T, HeraldError>;

/// Main error type for all HERALD operations.
#[derive(Debug, Error)]
pub enum HeraldError {
    // ═══════════════════════════════════════════════════════════════════════════
    // PRECONDITION VIOLATIONS
    // ═══════════════════════════════════════════════════════════════════════════

    /// A register or unregister call received an absent handle.
    #[error("Subscriber handle is null")]
    NullSubscriber,

    /// Register called with a handle that is already present.
    #[error("Subscriber already registered: {0}")]
    AlreadyRegistered(SubscriberId),

    /// Unregister called with a handle that is not present.
    #[error("Subscriber not registered: {0}")]
    NotRegistered(SubscriberId),

    /// Register would grow the registry past its configured limit.
    #[error("Registry is full: limit of {limit} subscribers reached")]
    CapacityExceeded {
        /// The configured subscriber limit.
        limit: usize,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // DELIVERY ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// A subscriber failed to accept a message.
    #[error("Delivery to '{subscriber}' failed: {reason}")]
    DeliveryFailed {
        /// Name of the subscriber that failed.
        subscriber: String,
        /// Why delivery failed.
        reason: String,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION & SERIALIZATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl HeraldError {
    /// Builds a [`HeraldError::DeliveryFailed`] for the named subscriber.
    pub fn delivery_failed(subscriber: impl Into<String>, reason: impl Into<String>) -> Self {
        HeraldError::DeliveryFailed {
            subscriber: subscriber.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if this error rejected a mutating registry call.
    ///
    /// Registry state is unchanged whenever such an error is returned.
    pub fn is_precondition_violation(&self) -> bool {
        matches!(
            self,
            HeraldError::NullSubscriber
                | HeraldError::AlreadyRegistered(_)
                | HeraldError::NotRegistered(_)
                | HeraldError::CapacityExceeded { .. }
        )
    }

    /// Returns true if this error came from a subscriber's `receive`.
    pub fn is_delivery_error(&self) -> bool {
        matches!(self, HeraldError::DeliveryFailed { .. })
    }

    /// Returns a short stable label (snake_case) for log fields.
    pub fn as_label(&self) -> &'static str {
        match self {
            HeraldError::NullSubscriber => "null_subscriber",
            HeraldError::AlreadyRegistered(_) => "already_registered",
            HeraldError::NotRegistered(_) => "not_registered",
            HeraldError::CapacityExceeded { .. } => "capacity_exceeded",
            HeraldError::DeliveryFailed { .. } => "delivery_failed",
            HeraldError::ConfigError(_) => "config_error",
            HeraldError::JsonError(_) => "json_error",
        }
    }
}
