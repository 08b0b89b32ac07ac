//! Domain types for HERALD.
//!
//! - [`Message`]: Opaque payload handed to subscribers verbatim
//! - [`Subscriber`]: Capability contract a recipient implements
//! - [`SubscriberRef`]: Shared handle the registry stores
//! - [`SubscriberId`]: Reference-identity key for a handle
//! - [`BroadcastReport`]: What happened during one broadcast

mod message;
mod report;
mod subscriber;

pub use message::*;
pub use report::*;
pub use subscriber::*;
