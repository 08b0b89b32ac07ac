//! # HERALD Core
//!
//! Core types, errors, and traits for HERALD subscription registries.
//!
//! This crate provides the building blocks shared by every registry implementation:
//!
//! - **Types**: [`Message`] payloads, the [`Subscriber`] contract, and [`SubscriberId`] identity
//! - **Errors**: A single [`HeraldError`] enum covering precondition violations and delivery
//! - **Config**: [`RegistryConfig`] with environment overrides
//! - **Traits**: [`SubscriptionService`] and its [`SubscriptionExtension`] query capability
//!
//! ## Example
//!
//! ```rust
//! use herald_core::{Message, Result, Subscriber};
//!
//! struct Inbox;
//!
//! impl Subscriber for Inbox {
//!     fn has_delivery_channel(&self) -> bool {
//!         true
//!     }
//!
//!     fn receive(&self, message: &Message) -> Result<()> {
//!         println!("got {}", message.subject);
//!         Ok(())
//!     }
//! }
//!
//! let msg = Message::new("welcome", "hello there");
//! assert!(Inbox.receive(&msg).is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod config;
pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{FailurePolicy, RegistryConfig};
pub use constants::*;
pub use error::{HeraldError, Result};
pub use traits::*;
pub use types::*;
