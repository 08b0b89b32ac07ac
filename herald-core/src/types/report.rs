//! Broadcast outcome.

use uuid::Uuid;

use crate::types::SubscriberId;

/// A subscriber whose `receive` returned an error during a broadcast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeliveryFailure {
    /// Identity of the failing subscriber
    pub subscriber: SubscriberId,
    /// The subscriber's self-reported name
    pub name: String,
    /// Rendered error
    pub reason: String,
}

/// Summary of a single broadcast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Id of the broadcast message
    pub message_id: Uuid,
    /// Subscribers whose `receive` succeeded
    pub delivered: usize,
    /// Subscribers without a delivery channel
    pub skipped: usize,
    /// Subscribers whose `receive` failed
    pub failures: Vec<DeliveryFailure>,
    /// Whether delivery stopped early under [`FailurePolicy::Abort`](crate::FailurePolicy::Abort)
    pub aborted: bool,
}

impl BroadcastReport {
    /// Creates an empty report for `message_id`.
    pub fn new(message_id: Uuid) -> Self {
        Self {
            message_id,
            delivered: 0,
            skipped: 0,
            failures: Vec::new(),
            aborted: false,
        }
    }

    /// Number of failed deliveries.
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Number of subscribers that were invoked (successfully or not).
    pub fn attempted(&self) -> usize {
        self.delivered + self.failures.len()
    }

    /// True when every eligible subscriber received the message.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && !self.aborted
    }
}
