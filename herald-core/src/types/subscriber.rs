//! Subscriber contract and reference identity.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::types::Message;

/// A recipient that can be registered with a subscription registry.
///
/// The registry consults [`has_delivery_channel`](Subscriber::has_delivery_channel)
/// at broadcast time and calls [`receive`](Subscriber::receive) only when it
/// returns `true`.
pub trait Subscriber: Send + Sync {
    /// Whether this subscriber can currently receive messages.
    ///
    /// Must be side-effect free; it may be called any number of times,
    /// including after the subscriber has been unregistered.
    fn has_delivery_channel(&self) -> bool;

    /// Accepts a message.
    ///
    /// Errors are handled according to the registry's
    /// [`FailurePolicy`](crate::FailurePolicy).
    fn receive(&self, message: &Message) -> Result<()>;

    /// Human-readable name (for logs and errors).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Shared subscriber handle stored by registries.
pub type SubscriberRef = Arc<dyn Subscriber>;

/// Reference identity of a [`SubscriberRef`].
///
/// Two handles have the same id iff they point at the same allocation;
/// the subscriber's own fields are never compared. An id stays unique
/// only while some handle to the allocation is alive, which registries
/// guarantee for every member by holding a clone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(usize);

impl SubscriberId {
    /// Returns the identity of `handle`.
    pub fn of(handle: &SubscriberRef) -> Self {
        Self(Arc::as_ptr(handle) as *const () as usize)
    }

    /// Returns the raw address backing this id.
    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<&SubscriberRef> for SubscriberId {
    fn from(handle: &SubscriberRef) -> Self {
        Self::of(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(PartialEq)]
    struct Mailbox {
        address: &'static str,
    }

    impl Subscriber for Mailbox {
        fn has_delivery_channel(&self) -> bool {
            !self.address.is_empty()
        }

        fn receive(&self, _message: &Message) -> Result<()> {
            Ok(())
        }
    }

    fn handle(address: &'static str) -> SubscriberRef {
        Arc::new(Mailbox { address })
    }

    #[test]
    fn test_clones_share_identity() {
        let a = handle("a@example.org");
        let b = Arc::clone(&a);
        assert_eq!(SubscriberId::of(&a), SubscriberId::of(&b));
    }

    #[test]
    fn test_equal_values_have_distinct_identity() {
        let a = handle("same@example.org");
        let b = handle("same@example.org");
        assert_ne!(SubscriberId::of(&a), SubscriberId::of(&b));
    }

    #[test]
    fn test_display_is_hex() {
        let a = handle("a@example.org");
        let id = SubscriberId::from(&a);
        assert!(id.to_string().starts_with("0x"));
        assert_eq!(id.to_string(), format!("{:#x}", id.as_usize()));
    }

    #[test]
    fn test_default_name_is_type_name() {
        let a = handle("a@example.org");
        assert!(a.name().ends_with("Mailbox"));
    }

    #[test]
    fn test_capability_query() {
        assert!(handle("a@example.org").has_delivery_channel());
        assert!(!handle("").has_delivery_channel());
    }
}
