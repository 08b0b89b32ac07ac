//! Broadcast payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

/// A message delivered to subscribers.
///
/// Registries never inspect a message; they pass the caller's instance to
/// every eligible subscriber untouched. The `id` distinguishes instances,
/// so two messages with identical text are still different messages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier
    pub id: Uuid,
    /// Short subject line
    pub subject: String,
    /// Message body
    pub body: String,
    /// When the message was created
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Creates a message with a fresh random id.
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), subject, body)
    }

    /// Creates a message with a caller-chosen id.
    pub fn with_id(id: Uuid, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            subject: subject.into(),
            body: body.into(),
            created_at: Utc::now(),
        }
    }

    /// Serializes to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserializes from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
