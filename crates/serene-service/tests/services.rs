use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::json;

use serene_chat::error::ChatError;
use serene_chat::{ChatSettings, GenerationBackend, GenerationRequest};
use serene_core::client::ClientId;
use serene_core::models::assessment::{RiskLevel, SeverityLevel};
use serene_core::models::chat::{ChatReply, ReplySource};
use serene_instruments::scoring::ValidationError;
use serene_service::{ChatRequest, ServiceConfig, ServiceError, Services, SubmitAssessmentRequest};
use serene_storage::MemoryStore;

#[derive(Default)]
struct CountingBackend {
    calls: AtomicUsize,
}

#[async_trait]
impl GenerationBackend for CountingBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ChatError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("I hear you: {}", request.message))
    }
}

fn services() -> (Services, Arc<CountingBackend>) {
    let backend = Arc::new(CountingBackend::default());
    let services = Services::new(&ServiceConfig::default(), Arc::new(MemoryStore::new()))
        .with_backend(backend.clone());
    (services, backend)
}

fn client(id: &str) -> ClientId {
    ClientId::new(id).unwrap()
}

fn submission(answers: serde_json::Value) -> SubmitAssessmentRequest {
    serde_json::from_value(json!({ "answers": answers })).unwrap()
}

fn chat(message: &str) -> ChatRequest {
    ChatRequest {
        message: message.to_string(),
    }
}

#[tokio::test]
async fn chinese_crisis_message_gets_hotlines_without_generation() {
    let (services, backend) = services();
    let id = client("u-1");

    let reply = services.chat(Some(&id), chat("我不想活了")).await;

    match reply {
        ChatReply::Crisis { hotlines, .. } => {
            assert!(!hotlines.is_empty());
            assert!(hotlines.iter().any(|h| h.number == "12320"));
        }
        other => panic!("expected crisis reply, got {other:?}"),
    }
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    assert!(services.chat_history(Some(&id), 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn anonymous_chat_is_answered_but_not_recorded() {
    let (services, backend) = services();

    let reply = services.chat(None, chat("rough week")).await;
    assert_eq!(reply.message(), "I hear you: rough week");
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn chat_without_backend_uses_configured_fallback() {
    let mut config = ServiceConfig::default();
    config.chat.fallback_message = "take a breath".to_string();
    let services = Services::new(&config, Arc::new(MemoryStore::new()));

    let reply = services.chat(Some(&client("u-2")), chat("hello")).await;
    assert_eq!(
        reply,
        ChatReply::Support {
            message: "take a breath".to_string(),
            source: ReplySource::Fallback,
        }
    );
}

#[tokio::test]
async fn configured_keyword_widens_the_gate() {
    let config: ServiceConfig = ServiceConfig::from_value(json!({
        "config_version": 1,
        "safety": { "config_version": 1, "extra_keywords": ["no way out"] }
    }))
    .unwrap();
    let backend = Arc::new(CountingBackend::default());
    let services =
        Services::new(&config, Arc::new(MemoryStore::new())).with_backend(backend.clone());

    let reply = services.chat(None, chat("there is No Way Out")).await;
    assert!(reply.is_crisis());
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn submit_scores_and_records() {
    let (services, _) = services();
    let id = client("u-3");

    let result = services
        .submit_assessment(Some(&id), submission(json!([1, 1, 2, 2, 1, 1, 1, 1, 0])))
        .await
        .unwrap();

    assert_eq!(result.total, 10);
    assert_eq!(result.level, SeverityLevel::Moderate);
    assert!(!result.crisis);
    assert_eq!(result.risk_level, RiskLevel::Low);

    let last = services.last_assessment(Some(&id)).await.unwrap();
    assert_eq!(last, Some(result));
}

#[tokio::test]
async fn crisis_item_flags_result() {
    let (services, _) = services();

    let result = services
        .submit_assessment(
            Some(&client("u-4")),
            submission(json!(["0", 0, 0, 0, 0, 0, 0, 0, 1.0])),
        )
        .await
        .unwrap();

    assert_eq!(result.total, 1);
    assert_eq!(result.level, SeverityLevel::NoneMinimal);
    assert!(result.crisis);
    assert_eq!(result.risk_level, RiskLevel::High);
}

#[tokio::test]
async fn invalid_answers_are_rejected_and_not_recorded() {
    let (services, _) = services();
    let id = client("u-5");

    let err = services
        .submit_assessment(Some(&id), submission(json!([0, 0, 0, 0, 0, 0, 0, 0, 4])))
        .await
        .unwrap_err();

    match &err {
        ServiceError::Validation(ValidationError::OutOfRange { index, value, .. }) => {
            assert_eq!(*index, 8);
            assert_eq!(*value, 4);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(err.is_client_error());
    assert!(err.to_body().validation.is_some());
    assert_eq!(services.last_assessment(Some(&id)).await.unwrap(), None);
}

#[tokio::test]
async fn per_client_operations_require_a_client_id() {
    let (services, _) = services();

    let submit = services
        .submit_assessment(None, submission(json!([0, 0, 0, 0, 0, 0, 0, 0, 0])))
        .await;
    assert!(matches!(submit, Err(ServiceError::MissingClientId)));
    assert!(matches!(
        services.last_assessment(None).await,
        Err(ServiceError::MissingClientId)
    ));
    assert!(matches!(
        services.assessment_history(None, 5).await,
        Err(ServiceError::MissingClientId)
    ));
    assert!(matches!(
        services.chat_history(None, 5).await,
        Err(ServiceError::MissingClientId)
    ));
}

#[tokio::test]
async fn assessment_history_is_not_capped_by_chat_settings() {
    let mut config = ServiceConfig::default();
    config.chat = ChatSettings {
        history_cap: 2,
        ..ChatSettings::default()
    };
    let services = Services::new(&config, Arc::new(MemoryStore::new()));
    let id = client("u-6");

    for total in 0..4i64 {
        let mut answers = vec![json!(0); 9];
        answers[0] = json!(total.min(3));
        services
            .submit_assessment(Some(&id), SubmitAssessmentRequest { answers })
            .await
            .unwrap();
    }

    let history = services.assessment_history(Some(&id), 10).await.unwrap();
    let totals: Vec<u8> = history.iter().map(|r| r.total).collect();
    assert_eq!(totals, vec![0, 1, 2, 3]);

    let recent = services.assessment_history(Some(&id), 2).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[1].total, 3);
}

#[tokio::test]
async fn chat_history_limit_is_clamped() {
    let mut config = ServiceConfig::default();
    config.chat.history_cap = 3;
    let services = Services::new(&config, Arc::new(MemoryStore::new()))
        .with_backend(Arc::new(CountingBackend::default()));
    let id = client("u-7");

    for n in 0..5 {
        services.chat(Some(&id), chat(&format!("note {n}"))).await;
    }

    assert_eq!(services.chat_history(Some(&id), 50).await.unwrap().len(), 3);
    let one = services.chat_history(Some(&id), 0).await.unwrap();
    assert_eq!(one.len(), 1);
    assert_eq!(one[0].message, "note 4");
}

#[test]
fn missing_client_error_body() {
    let body = ServiceError::MissingClientId.to_body();
    assert!(body.validation.is_none());
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json, json!({ "error": "a client id is required for this operation" }));
}
