// src/message.rs
use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_history: Option<Vec<HistoryEntry>>,
}

impl ChatRequest {
    /// Client supplied history; `null` and a missing field both mean empty.
    pub fn history(&self) -> &[HistoryEntry] {
        self.conversation_history.as_deref().unwrap_or_default()
    }
}

/// One element of `conversation_history`. Anything that is not a JSON object
/// lands in `Other` and is skipped when the prompt is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HistoryEntry {
    Turn(TurnRecord),
    Other(Value),
}

impl HistoryEntry {
    pub fn as_turn(&self) -> Option<&TurnRecord> {
        match self {
            HistoryEntry::Turn(turn) => Some(turn),
            HistoryEntry::Other(_) => None,
        }
    }
}

impl From<TurnRecord> for HistoryEntry {
    fn from(turn: TurnRecord) -> Self {
        HistoryEntry::Turn(turn)
    }
}

/// A past exchange. Kept as the raw JSON object so unknown keys and
/// non-string values survive deserialization instead of failing it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnRecord(Map<String, Value>);

impl TurnRecord {
    pub fn new(user: Option<&str>, assistant: Option<&str>) -> Self {
        let mut fields = Map::new();
        if let Some(user) = user {
            fields.insert("user".into(), Value::String(user.to_string()));
        }
        if let Some(assistant) = assistant {
            fields.insert("assistant".into(), Value::String(assistant.to_string()));
        }
        Self(fields)
    }

    pub fn user(&self) -> Cow<'_, str> {
        self.field("user")
    }

    pub fn assistant(&self) -> Cow<'_, str> {
        self.field("assistant")
    }

    // Strings verbatim, null/missing as "", anything else as compact JSON
    // (`true`, `[1,2]`).
    fn field(&self, key: &str) -> Cow<'_, str> {
        match self.0.get(key) {
            None | Some(Value::Null) => Cow::Borrowed(""),
            Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
            Some(other) => Cow::Owned(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatStatus {
    Success,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub status: ChatStatus,
}

impl ChatResponse {
    pub fn success(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            status: ChatStatus::Success,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub gemini_configured: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
