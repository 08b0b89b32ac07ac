//! In-memory subscription registry.
//!
//! Thread-safe guarded set suitable for single-process fan-out.
//! Nothing is persisted; membership lives as long as the registry does.

use std::fmt;

use parking_lot::Mutex;
use tracing::{debug, instrument, warn};

use herald_core::error::{HeraldError, Result};
use herald_core::traits::{SubscriptionExtension, SubscriptionService};
use herald_core::types::{BroadcastReport, DeliveryFailure, Message, SubscriberId, SubscriberRef};
use herald_core::{FailurePolicy, RegistryConfig};

use crate::stats::RegistryStats;

/// A registered handle and its identity key.
#[derive(Clone)]
struct Entry {
    id: SubscriberId,
    handle: SubscriberRef,
}

/// State guarded by the registry lock.
struct Inner {
    /// Members in registration order
    subscribers: Vec<Entry>,
    stats: RegistryStats,
}

impl Inner {
    fn position(&self, id: SubscriberId) -> Option<usize> {
        self.subscribers.iter().position(|entry| entry.id == id)
    }
}

/// In-memory subscription registry.
///
/// # Identity
///
/// Subscribers are keyed by [`SubscriberId`], the address of the shared
/// allocation behind a [`SubscriberRef`]. Two distinct handles are distinct
/// members even if the subscribers they point at compare equal.
///
/// # Ordering
///
/// Members are kept in registration order and broadcast visits them in
/// that order, so delivery is reproducible for a given call sequence.
///
/// # Thread Safety
///
/// A single mutex guards membership and statistics. Broadcast copies the
/// member list under the lock and invokes subscribers after releasing it,
/// so subscribers may call back into the registry; members added or
/// removed during a broadcast take effect from the next one.
pub struct SubscriptionRegistry {
    inner: Mutex<Inner>,
    config: RegistryConfig,
}

impl SubscriptionRegistry {
    /// Creates a new empty registry with default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates a registry with custom configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            inner: Mutex::new(Inner {
                subscribers: Vec::with_capacity(config.initial_capacity),
                stats: RegistryStats::new(),
            }),
            config,
        }
    }

    /// Creates a registry with preallocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(RegistryConfig {
            initial_capacity: capacity,
            ..RegistryConfig::default()
        })
    }

    /// Returns the registry configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Returns the number of registered subscribers.
    pub fn len(&self) -> usize {
        self.inner.lock().subscribers.len()
    }

    /// Returns true if no subscribers are registered.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().subscribers.is_empty()
    }

    /// Returns the registered handles in registration order.
    pub fn subscribers(&self) -> Vec<SubscriberRef> {
        self.inner
            .lock()
            .subscribers
            .iter()
            .map(|entry| entry.handle.clone())
            .collect()
    }

    /// Removes every subscriber and returns how many were removed.
    pub fn clear(&self) -> usize {
        let mut inner = self.inner.lock();
        let removed = inner.subscribers.len();
        inner.subscribers.clear();
        inner.stats.unregistered += removed as u64;

        debug!(removed, "Cleared registry");
        removed
    }

    /// Returns the current statistics.
    pub fn stats(&self) -> RegistryStats {
        self.inner.lock().stats.clone()
    }

    fn reject<T>(inner: &mut Inner, err: HeraldError) -> Result<T> {
        inner.stats.rejected += 1;
        debug!(error = err.as_label(), "Rejected: {err}");
        Err(err)
    }
}

impl Default for SubscriptionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SubscriptionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionRegistry")
            .field("len", &self.len())
            .field("config", &self.config)
            .finish()
    }
}

impl SubscriptionService for SubscriptionRegistry {
    /// Registers a subscriber.
    ///
    /// Fails without touching membership if the handle is `None`, already
    /// present, or the configured limit is reached.
    #[instrument(skip(self, subscriber))]
    fn register(&self, subscriber: Option<SubscriberRef>) -> Result<()> {
        let mut inner = self.inner.lock();

        let Some(handle) = subscriber else {
            return Self::reject(&mut inner, HeraldError::NullSubscriber);
        };
        let id = SubscriberId::of(&handle);

        if inner.position(id).is_some() {
            return Self::reject(&mut inner, HeraldError::AlreadyRegistered(id));
        }
        if let Some(limit) = self.config.subscriber_limit() {
            if inner.subscribers.len() >= limit {
                return Self::reject(&mut inner, HeraldError::CapacityExceeded { limit });
            }
        }

        debug!(subscriber = %id, name = handle.name(), "Registering subscriber");

        inner.subscribers.push(Entry { id, handle });
        inner.stats.registered += 1;

        Ok(())
    }

    /// Unregisters a subscriber, returning the registry's handle to it.
    #[instrument(skip(self, subscriber))]
    fn unregister(&self, subscriber: Option<&SubscriberRef>) -> Result<SubscriberRef> {
        let mut inner = self.inner.lock();

        let Some(handle) = subscriber else {
            return Self::reject(&mut inner, HeraldError::NullSubscriber);
        };
        let id = SubscriberId::of(handle);

        let Some(index) = inner.position(id) else {
            return Self::reject(&mut inner, HeraldError::NotRegistered(id));
        };

        debug!(subscriber = %id, name = handle.name(), "Unregistering subscriber");

        let entry = inner.subscribers.remove(index);
        inner.stats.unregistered += 1;

        Ok(entry.handle)
    }

    /// Delivers a message to every member with a delivery channel.
    ///
    /// Members without a channel are skipped without being invoked.
    /// A failing `receive` is logged and recorded in the report; under
    /// [`FailurePolicy::Abort`] the remaining members are not invoked.
    #[instrument(skip(self, message), fields(message_id = %message.id))]
    fn broadcast(&self, message: &Message) -> BroadcastReport {
        let snapshot = self.inner.lock().subscribers.clone();
        let mut report = BroadcastReport::new(message.id);

        for entry in &snapshot {
            if !entry.handle.has_delivery_channel() {
                report.skipped += 1;
                continue;
            }

            match entry.handle.receive(message) {
                Ok(()) => report.delivered += 1,
                Err(err) => {
                    warn!(
                        subscriber = %entry.id,
                        name = entry.handle.name(),
                        error = %err,
                        "Delivery failed"
                    );
                    report.failures.push(DeliveryFailure {
                        subscriber: entry.id,
                        name: entry.handle.name().to_string(),
                        reason: err.to_string(),
                    });

                    if self.config.failure_policy == FailurePolicy::Abort {
                        report.aborted = true;
                        break;
                    }
                }
            }
        }

        if report.aborted {
            warn!(
                remaining = snapshot.len() - report.attempted() - report.skipped,
                "Broadcast aborted after delivery failure"
            );
        }

        self.inner.lock().stats.record_broadcast(&report);

        debug!(
            delivered = report.delivered,
            skipped = report.skipped,
            failed = report.failed(),
            "Broadcast complete"
        );
        report
    }
}

impl SubscriptionExtension for SubscriptionRegistry {
    /// Returns whether the handle is registered. Never fails.
    fn contains(&self, subscriber: Option<&SubscriberRef>) -> bool {
        subscriber.is_some_and(|handle| {
            self.inner
                .lock()
                .position(SubscriberId::of(handle))
                .is_some()
        })
    }
}
