use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config at {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config is not a JSON object")]
    NotAnObject,

    #[error("config_version {found} is newer than this build supports ({supported})")]
    UnsupportedVersion { found: u64, supported: u32 },

    #[error("invalid config: {0}")]
    Invalid(String),
}
