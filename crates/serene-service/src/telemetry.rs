use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::ServiceError;

/// Log line format for the process-wide subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Structured JSON, one object per line.
    #[default]
    Json,
    Compact,
}

/// Install the global tracing subscriber. Filtering comes from `RUST_LOG`.
///
/// Fails if a subscriber is already installed.
pub fn init(format: LogFormat) -> Result<(), ServiceError> {
    let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());
    let result = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
    result.map_err(|e| ServiceError::Telemetry(e.to_string()))
}
