use serde::Serialize;
use tracing::info;
use uuid::Uuid;

pub const ASSESSMENT_SUBMITTED: &str = "assessment.submitted";
pub const ASSESSMENT_CRISIS: &str = "assessment.crisis_flagged";
pub const CHAT_CRISIS: &str = "chat.crisis_detected";

/// A structured audit event for safety-relevant actions.
///
/// Emitted through `tracing` with `audit.*` fields so hosts can filter these
/// lines out of ordinary logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEvent {
    pub action: String,
    pub resource_type: String,
    pub resource_id: String,
    /// `"-"` for anonymous requests.
    pub client_id: String,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        action: impl Into<String>,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            client_id: client_id.into(),
            details: None,
        }
    }

    /// A crisis intercepted on the chat path. Crisis exchanges are never
    /// stored, so each event gets its own id.
    pub fn chat_crisis(client_id: impl Into<String>) -> Self {
        Self::new(CHAT_CRISIS, "chat", Uuid::new_v4().to_string(), client_id)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn emit(&self) {
        let details = self
            .details
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        info!(
            audit.action = %self.action,
            audit.resource_type = %self.resource_type,
            audit.resource_id = %self.resource_id,
            audit.client_id = %self.client_id,
            audit.details = %details,
            "audit event"
        );
    }
}
