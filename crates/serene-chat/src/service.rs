use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use serene_core::client::ClientId;
use serene_core::keys;
use serene_core::models::chat::{ChatReply, ChatTurn, ReplySource};
use serene_safety::{CrisisResources, SensitiveContentGate};
use serene_storage::HistoryStore;
use serene_storage::records::{append_record_capped, read_recent_records};

use crate::backend::{GenerationBackend, GenerationRequest};
use crate::error::ChatError;

const DEFAULT_SYSTEM_PROMPT: &str = "You are a supportive mental health companion. \
Respond with warmth and without judgement, encourage healthy coping strategies, \
suggest professional help when it seems appropriate, keep replies short, \
and never give medical advice or diagnoses.";

const DEFAULT_FALLBACK: &str = "抱抱你。我能理解这段时间对你并不容易。先做三次深呼吸，给自己一点空间。\
如果你愿意，可以试试“自助工具”里的呼吸计时或认知重构，我们也可以继续聊聊让你困扰的事情。";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    /// Prior turns handed to the backend as context.
    pub context_turns: usize,
    /// Turns kept per client; older ones are trimmed on append.
    pub history_cap: usize,
    pub backend_timeout_secs: u64,
    pub system_prompt: String,
    /// Supportive reply used whenever generation is skipped or fails.
    pub fallback_message: String,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            context_turns: 5,
            history_cap: 100,
            backend_timeout_secs: 30,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            fallback_message: DEFAULT_FALLBACK.to_string(),
        }
    }
}

impl ChatSettings {
    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_secs)
    }
}

/// Per-request chat flow.
///
/// `Received` → gate → `CrisisResponse` (sensitive) or `NormalResponse`.
/// Both end states are terminal; the crisis path touches neither the backend
/// nor the chat history.
pub struct ChatService {
    gate: Arc<SensitiveContentGate>,
    crisis: CrisisResources,
    store: Arc<dyn HistoryStore>,
    backend: Option<Arc<dyn GenerationBackend>>,
    settings: ChatSettings,
}

impl ChatService {
    pub fn new(
        gate: Arc<SensitiveContentGate>,
        crisis: CrisisResources,
        store: Arc<dyn HistoryStore>,
        settings: ChatSettings,
    ) -> Self {
        Self {
            gate,
            crisis,
            store,
            backend: None,
            settings,
        }
    }

    pub fn with_backend(mut self, backend: Arc<dyn GenerationBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    /// Answer one message. Never fails: every failure downstream of the gate
    /// degrades to the fallback reply.
    pub async fn respond(&self, client: Option<&ClientId>, message: &str) -> ChatReply {
        let client_id = client.map_or("-", ClientId::as_str);
        let message = message.trim();
        info!(client_id, len = message.chars().count(), "chat message received");

        if let Some(keyword) = self.gate.matched_keyword(message) {
            warn!(client_id, keyword, "sensitive content detected, returning crisis resources");
            return self.crisis.reply();
        }

        if message.is_empty() {
            return self.fallback();
        }

        let prior = match client {
            Some(c) => self.recent_turns(c).await,
            None => Vec::new(),
        };

        let (reply, source) = match self.generate(message, prior).await {
            Ok(reply) => (reply, ReplySource::Generated),
            Err(e) => {
                match &e {
                    ChatError::Unavailable(_) => {
                        debug!(client_id, error = %e, "generation skipped, using fallback")
                    }
                    _ => warn!(client_id, error = %e, "generation failed, using fallback"),
                }
                (self.settings.fallback_message.clone(), ReplySource::Fallback)
            }
        };

        if let Some(c) = client {
            let turn = ChatTurn::new(message, reply.clone());
            let key = keys::chat_turns(c);
            if let Err(e) =
                append_record_capped(self.store.as_ref(), &key, &turn, self.settings.history_cap).await
            {
                warn!(client_id, error = %e, "failed to persist chat turn");
            }
        }

        ChatReply::Support {
            message: reply,
            source,
        }
    }

    /// Most recent turns for a client, oldest first, capped at `limit`.
    pub async fn history(
        &self,
        client: &ClientId,
        limit: usize,
    ) -> Result<Vec<ChatTurn>, serene_storage::error::StorageError> {
        read_recent_records(self.store.as_ref(), &keys::chat_turns(client), limit).await
    }

    async fn recent_turns(&self, client: &ClientId) -> Vec<ChatTurn> {
        let key = keys::chat_turns(client);
        match read_recent_records(self.store.as_ref(), &key, self.settings.context_turns).await {
            Ok(turns) => turns,
            Err(e) => {
                warn!(client_id = %client, error = %e, "failed to read chat context");
                Vec::new()
            }
        }
    }

    async fn generate(&self, message: &str, prior: Vec<ChatTurn>) -> Result<String, ChatError> {
        let backend = self
            .backend
            .as_ref()
            .ok_or_else(|| ChatError::Unavailable("no backend configured".to_string()))?;

        let request = GenerationRequest {
            system_prompt: self.settings.system_prompt.clone(),
            message: message.to_string(),
            prior,
        };

        // Probe and generation share one deadline.
        let timeout = self.settings.backend_timeout();
        let reply = tokio::time::timeout(timeout, async {
            if !backend.is_available().await {
                return Err(ChatError::Unavailable("readiness probe failed".to_string()));
            }
            backend.generate(&request).await
        })
        .await
        .map_err(|_| ChatError::Timeout(timeout))??;

        if reply.trim().is_empty() {
            return Err(ChatError::EmptyReply);
        }
        Ok(reply)
    }

    fn fallback(&self) -> ChatReply {
        ChatReply::Support {
            message: self.settings.fallback_message.clone(),
            source: ReplySource::Fallback,
        }
    }
}
