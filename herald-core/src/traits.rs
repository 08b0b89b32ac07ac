//! Common traits for HERALD.
//!
//! Registries implement [`SubscriptionService`]; those that also answer
//! membership queries implement [`SubscriptionExtension`].

use crate::error::Result;
use crate::types::{BroadcastReport, Message, SubscriberRef};

// ═══════════════════════════════════════════════════════════════════════════════
// SUBSCRIPTION SERVICE
// ═══════════════════════════════════════════════════════════════════════════════

/// Guarded subscriber set with gated broadcast.
///
/// Membership is by reference identity. Mutating calls take `Option`
/// handles and reject `None` with
/// [`NullSubscriber`](crate::HeraldError::NullSubscriber).
pub trait SubscriptionService: Send + Sync {
    /// Adds a subscriber.
    ///
    /// # Errors
    /// - [`NullSubscriber`](crate::HeraldError::NullSubscriber) for `None`
    /// - [`AlreadyRegistered`](crate::HeraldError::AlreadyRegistered) if the handle is present
    fn register(&self, subscriber: Option<SubscriberRef>) -> Result<()>;

    /// Removes a subscriber and returns the registry's handle to it.
    ///
    /// Not idempotent: removing twice fails the second time.
    ///
    /// # Errors
    /// - [`NullSubscriber`](crate::HeraldError::NullSubscriber) for `None`
    /// - [`NotRegistered`](crate::HeraldError::NotRegistered) if the handle is absent
    fn unregister(&self, subscriber: Option<&SubscriberRef>) -> Result<SubscriberRef>;

    /// Delivers `message` to every registered subscriber with a delivery channel.
    fn broadcast(&self, message: &Message) -> BroadcastReport;
}

// ═══════════════════════════════════════════════════════════════════════════════
// MEMBERSHIP QUERY
// ═══════════════════════════════════════════════════════════════════════════════

/// Membership query layered on a [`SubscriptionService`].
pub trait SubscriptionExtension: SubscriptionService {
    /// True iff the handle is currently registered. `None` yields `false`.
    fn contains(&self, subscriber: Option<&SubscriberRef>) -> bool;
}
