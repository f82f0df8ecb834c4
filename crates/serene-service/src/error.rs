use serde::Serialize;
use thiserror::Error;

use serene_instruments::scoring::ValidationError;
use serene_safety::error::ConfigError;
use serene_storage::error::StorageError;

/// Unified error type for every service operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("a client id is required for this operation")]
    MissingClientId,

    #[error("invalid answers: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to install tracing subscriber: {0}")]
    Telemetry(String),
}

/// What a host hands back to its caller when an operation fails.
///
/// Internal failures are logged and reduced to a generic message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationError>,
}

impl ServiceError {
    /// True when the caller sent something wrong, as opposed to a failure on our side.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ServiceError::MissingClientId | ServiceError::Validation(_))
    }

    pub fn to_body(&self) -> ErrorBody {
        match self {
            ServiceError::MissingClientId => ErrorBody {
                error: self.to_string(),
                validation: None,
            },
            ServiceError::Validation(v) => ErrorBody {
                error: self.to_string(),
                validation: Some(v.clone()),
            },
            other => {
                tracing::error!("internal error: {other}");
                ErrorBody {
                    error: "internal error".to_string(),
                    validation: None,
                }
            }
        }
    }
}
