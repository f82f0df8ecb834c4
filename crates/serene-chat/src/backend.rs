use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use serene_core::models::chat::ChatTurn;

use crate::error::ChatError;

/// A single role-tagged message in an assembled conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// Everything a backend gets for one normal-path message.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system_prompt: String,
    pub message: String,
    /// Earlier turns for this client, oldest first.
    pub prior: Vec<ChatTurn>,
}

impl GenerationRequest {
    /// System prompt, then the last `max_turns` prior turns as user/assistant
    /// pairs, then the new user message.
    pub fn messages(&self, max_turns: usize) -> Vec<ChatMessage> {
        let skip = self.prior.len().saturating_sub(max_turns);
        let mut messages = Vec::with_capacity(2 + 2 * (self.prior.len() - skip));

        if !self.system_prompt.is_empty() {
            messages.push(ChatMessage {
                role: ChatRole::System,
                content: self.system_prompt.clone(),
            });
        }

        for turn in self.prior.iter().skip(skip) {
            messages.push(ChatMessage {
                role: ChatRole::User,
                content: turn.message.clone(),
            });
            messages.push(ChatMessage {
                role: ChatRole::Assistant,
                content: turn.reply.clone(),
            });
        }

        messages.push(ChatMessage {
            role: ChatRole::User,
            content: self.message.clone(),
        });
        messages
    }
}

/// A model that writes supportive replies. Never invoked for sensitive
/// messages.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ChatError>;

    /// Cheap readiness probe. Backends without one report ready.
    async fn is_available(&self) -> bool {
        true
    }
}
