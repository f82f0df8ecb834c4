use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A crisis hotline entry shown alongside the safety message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Hotline {
    pub label: String,
    pub number: String,
}

/// A completed exchange on the normal (non-crisis) chat path.
///
/// Crisis exchanges are never recorded as turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatTurn {
    pub id: Uuid,
    pub message: String,
    pub reply: String,
    pub at: jiff::Timestamp,
}

impl ChatTurn {
    pub fn new(message: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            reply: reply.into(),
            at: jiff::Timestamp::now(),
        }
    }
}

/// Where a supportive reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ReplySource {
    Generated,
    Fallback,
}

/// The reply to one chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum ChatReply {
    /// The message tripped the sensitive content gate.
    Crisis {
        message: String,
        hotlines: Vec<Hotline>,
    },
    Support {
        message: String,
        source: ReplySource,
    },
}

impl ChatReply {
    pub fn is_crisis(&self) -> bool {
        matches!(self, ChatReply::Crisis { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            ChatReply::Crisis { message, .. } | ChatReply::Support { message, .. } => message,
        }
    }
}
