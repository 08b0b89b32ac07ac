//! # HERALD Registry
//!
//! In-memory subscription registry for HERALD.
//!
//! [`SubscriptionRegistry`] keeps a set of subscriber handles keyed by
//! reference identity and fans a broadcast out to every member that
//! reports a delivery channel.
//!
//! ## Example
//!
//! ```rust,ignore
//! use herald_registry::{SubscriptionRegistry, SubscriptionService, SubscriptionExtension};
//!
//! let registry = SubscriptionRegistry::new();
//!
//! // Register a subscriber handle
//! registry.register(Some(alice.clone()))?;
//! assert!(registry.contains(Some(&alice)));
//!
//! // Deliver to everyone with a delivery channel
//! let report = registry.broadcast(&Message::new("release", "v2 is out"));
//! assert_eq!(report.delivered, 1);
//!
//! registry.unregister(Some(&alice))?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod memory;
mod stats;

pub use memory::SubscriptionRegistry;
pub use stats::RegistryStats;

// Re-export the traits from core
pub use herald_core::traits::{SubscriptionExtension, SubscriptionService};
