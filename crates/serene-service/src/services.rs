use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use serene_chat::{ChatService, GenerationBackend};
use serene_core::client::ClientId;
use serene_core::keys;
use serene_core::models::assessment::{Advisory, AssessmentRecord, AssessmentResult};
use serene_core::models::chat::{ChatReply, ChatTurn};
use serene_instruments::scoring::{self, Phq9Answers};
use serene_storage::HistoryStore;
use serene_storage::records::{append_record, last_record, read_recent_records};

use crate::audit::{self, AuditEvent};
use crate::config::ServiceConfig;
use crate::error::ServiceError;

/// Body of an assessment submission. Answers arrive loosely typed and are
/// coerced and validated before scoring.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAssessmentRequest {
    pub answers: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// Application services, built once at startup and shared by the host.
pub struct Services {
    store: Arc<dyn HistoryStore>,
    advisory: Advisory,
    chat: ChatService,
}

impl Services {
    pub fn new(config: &ServiceConfig, store: Arc<dyn HistoryStore>) -> Self {
        let gate = Arc::new(config.safety.gate());
        info!(keywords = gate.keywords().len(), "sensitive content gate ready");
        let chat = ChatService::new(
            gate,
            config.safety.crisis.clone(),
            store.clone(),
            config.chat.clone(),
        );
        Self {
            store,
            advisory: config.advisory.clone(),
            chat,
        }
    }

    pub fn with_backend(self, backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            chat: self.chat.with_backend(backend),
            ..self
        }
    }

    /// Validate, score, and record one PHQ-9 submission.
    pub async fn submit_assessment(
        &self,
        client: Option<&ClientId>,
        request: SubmitAssessmentRequest,
    ) -> Result<AssessmentResult, ServiceError> {
        let client = client.ok_or(ServiceError::MissingClientId)?;

        let answers = Phq9Answers::from_json(&request.answers).inspect_err(|e| {
            info!(client_id = %client, error = %e, "assessment rejected");
        })?;
        let result = scoring::score_at(&answers, &self.advisory, jiff::Timestamp::now());

        let record = AssessmentRecord {
            id: Uuid::new_v4(),
            answers: answers.as_array(),
            result: result.clone(),
        };
        append_record(self.store.as_ref(), &keys::assessments(client), &record).await?;

        info!(
            client_id = %client,
            total = result.total,
            level = %result.level,
            crisis = result.crisis,
            risk_level = %result.risk_level,
            "assessment scored"
        );

        let details = json!({
            "total": result.total,
            "level": result.level,
            "crisis": result.crisis,
        });
        AuditEvent::new(
            audit::ASSESSMENT_SUBMITTED,
            "assessment",
            record.id.to_string(),
            client.as_str(),
        )
        .with_details(details.clone())
        .emit();

        if result.crisis {
            warn!(client_id = %client, "assessment flagged self-harm ideation");
            AuditEvent::new(
                audit::ASSESSMENT_CRISIS,
                "assessment",
                record.id.to_string(),
                client.as_str(),
            )
            .with_details(details)
            .emit();
        }

        Ok(result)
    }

    pub async fn last_assessment(
        &self,
        client: Option<&ClientId>,
    ) -> Result<Option<AssessmentResult>, ServiceError> {
        let client = client.ok_or(ServiceError::MissingClientId)?;
        let record: Option<AssessmentRecord> =
            last_record(self.store.as_ref(), &keys::assessments(client)).await?;
        Ok(record.map(|r| r.result))
    }

    /// Most recent results, oldest first. Assessment history is never trimmed.
    pub async fn assessment_history(
        &self,
        client: Option<&ClientId>,
        limit: usize,
    ) -> Result<Vec<AssessmentResult>, ServiceError> {
        let client = client.ok_or(ServiceError::MissingClientId)?;
        let records: Vec<AssessmentRecord> =
            read_recent_records(self.store.as_ref(), &keys::assessments(client), limit.max(1))
                .await?;
        Ok(records.into_iter().map(|r| r.result).collect())
    }

    /// Answer a chat message. Anonymous chat is allowed; it just has no history.
    pub async fn chat(&self, client: Option<&ClientId>, request: ChatRequest) -> ChatReply {
        let reply = self.chat.respond(client, &request.message).await;
        if reply.is_crisis() {
            AuditEvent::chat_crisis(client.map_or("-", ClientId::as_str)).emit();
        }
        reply
    }

    /// Stored turns, oldest first. `limit` is clamped to `1..=history_cap`.
    pub async fn chat_history(
        &self,
        client: Option<&ClientId>,
        limit: usize,
    ) -> Result<Vec<ChatTurn>, ServiceError> {
        let client = client.ok_or(ServiceError::MissingClientId)?;
        let cap = self.chat.settings().history_cap.max(1);
        Ok(self.chat.history(client, limit.clamp(1, cap)).await?)
    }
}
