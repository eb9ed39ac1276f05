//! Wire types served by the OpenCode server.
//!
//! Only the fields the idle hook reads are modelled; everything else in the
//! server's payloads is ignored during deserialization.

use serde::{Deserialize, Deserializer};

/// An event published on the server's event bus.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A session finished working and is waiting for input.
    #[serde(rename = "session.idle")]
    SessionIdle { properties: IdleProperties },
    /// Any event kind the hook does not act on.
    #[serde(other)]
    Unrecognized,
}

/// Payload of a `session.idle` event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IdleProperties {
    #[serde(rename = "sessionID")]
    pub session_id: String,
}

impl Event {
    /// Create a `session.idle` event for the given session.
    pub fn session_idle(session_id: impl Into<String>) -> Self {
        Self::SessionIdle {
            properties: IdleProperties {
                session_id: session_id.into(),
            },
        }
    }

    /// Parse an event from its JSON representation.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(|e| crate::Error::Decode(e.to_string()))
    }
}

/// A session record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Session {
    pub id: String,
    /// Set when the session was spawned by another session (a subagent).
    #[serde(rename = "parentID", default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl Session {
    pub fn is_subagent(&self) -> bool {
        self.parent_id.as_deref().is_some_and(|parent| !parent.is_empty())
    }
}

/// The author of a message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Role {
    User,
    Assistant,
    Other(String),
}

impl From<String> for Role {
    fn from(role: String) -> Self {
        match role.as_str() {
            "user" => Self::User,
            "assistant" => Self::Assistant,
            _ => Self::Other(role),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
            Self::Other(role) => write!(f, "{role}"),
        }
    }
}

/// Message metadata.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageInfo {
    pub role: Role,
}

/// A part of a message's content.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum Part {
    /// Plain text content.
    #[serde(rename = "text")]
    Text {
        #[serde(default, deserialize_with = "null_as_empty")]
        text: String,
    },
    /// Tool calls, reasoning, step markers, files and so on.
    #[serde(other)]
    Other,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Part {
    /// Create a text part.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text { text: s.into() }
    }
}

/// A message together with its parts, as listed by `/session/{id}/message`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Message {
    pub info: MessageInfo,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Message {
    pub fn new(role: Role, parts: Vec<Part>) -> Self {
        Self {
            info: MessageInfo { role },
            parts,
        }
    }

    pub fn is_assistant(&self) -> bool {
        self.info.role == Role::Assistant
    }

    /// The last text part with non-empty text, if any.
    pub fn last_text(&self) -> Option<&str> {
        self.parts.iter().rev().find_map(|part| match part {
            Part::Text { text } if !text.is_empty() => Some(text.as_str()),
            _ => None,
        })
    }
}
