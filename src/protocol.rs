//! Message protocol between the token pipeline and its host.
//!
//! One request type triggers a full pass; the pass answers with exactly one
//! event, either the token data or an error.
//!
//! ```json
//! {"type": "get-variables"}
//! {"type": "variables-data", "collections": [...]}
//! {"type": "error", "message": "..."}
//! ```

use serde::{Deserialize, Serialize};

use crate::models::NestedObject;

/// Message used when a failure carries no message of its own
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Inbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Request {
    /// Run one full orchestration pass
    GetVariables,
    /// Any message type this tool does not handle
    #[serde(other)]
    Unsupported,
}

/// Outbound message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Event {
    VariablesData { collections: Vec<CollectionTokens> },
    Error { message: String },
}

impl Event {
    /// Build an error event, falling back to a generic message when `message` is blank.
    ///
    /// ```
    /// use tokensrc::protocol::{Event, UNKNOWN_ERROR_MESSAGE};
    ///
    /// assert_eq!(Event::error("boom"), Event::Error { message: "boom".into() });
    /// assert_eq!(Event::error("  "), Event::Error { message: UNKNOWN_ERROR_MESSAGE.into() });
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Event::Error { message: UNKNOWN_ERROR_MESSAGE.to_string() }
        } else {
            Event::Error { message }
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Event::Error { .. })
    }

    /// Token collections if this is a data event
    pub fn collections(&self) -> Option<&[CollectionTokens]> {
        match self {
            Event::VariablesData { collections } => Some(collections),
            Event::Error { .. } => None,
        }
    }
}

/// Mode descriptor as reported to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeDescriptor {
    pub id: String,
    pub name: String,
    pub is_default: bool,
}

/// The token tree for one mode of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeTokens {
    pub mode_id: String,
    pub mode_name: String,
    pub data: NestedObject,
}

/// All per-mode token trees of one collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionTokens {
    pub collection_id: String,
    pub collection_name: String,
    pub modes: Vec<ModeDescriptor>,
    pub variables_by_mode: Vec<ModeTokens>,
}

impl CollectionTokens {
    /// The default mode's tokens, if the collection declares one that exists
    pub fn default_mode(&self) -> Option<&ModeTokens> {
        let default = self.modes.iter().find(|m| m.is_default)?;
        self.variables_by_mode.iter().find(|m| m.mode_id == default.id)
    }
}
