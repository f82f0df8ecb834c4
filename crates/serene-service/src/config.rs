use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use serene_chat::ChatSettings;
use serene_core::models::assessment::Advisory;
use serene_safety::SafetyConfig;
use serene_safety::config::read_version;
use serene_safety::error::ConfigError;

use crate::telemetry::LogFormat;

/// Current service config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "SERENE_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default)]
    pub chat: ChatSettings,
    #[serde(default)]
    pub advisory: Advisory,
    /// Carries its own `config_version` and migrations.
    #[serde(default)]
    pub safety: SafetyConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            log_format: LogFormat::default(),
            chat: ChatSettings::default(),
            advisory: Advisory::default(),
            safety: SafetyConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Load from the file named by `SERENE_CONFIG`, or defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::load_optional(path.as_deref())
    }

    pub fn load_optional(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                tracing::info!("no service config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let json: serde_json::Value = serde_json::from_str(&contents)?;
        let config = Self::from_value(json)?;
        tracing::info!(path = %path.display(), "service config loaded");
        Ok(config)
    }

    pub fn from_value(json: serde_json::Value) -> Result<Self, ConfigError> {
        let on_disk_version = read_version(&json, CURRENT_VERSION)?;

        let mut migrated = migrate(json, on_disk_version)?;

        // The nested safety section runs through its own migrations.
        let safety = match migrated
            .as_object_mut()
            .and_then(|obj| obj.remove("safety"))
        {
            Some(raw) => SafetyConfig::from_value(raw)?,
            None => SafetyConfig::default(),
        };

        let mut config: ServiceConfig = serde_json::from_value(migrated)?;
        config.safety = safety;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chat.history_cap == 0 {
            return Err(ConfigError::Invalid("chat.history_cap must be at least 1".to_string()));
        }
        if self.chat.backend_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "chat.backend_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.chat.fallback_message.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "chat.fallback_message must not be empty".to_string(),
            ));
        }
        if self.advisory.summary.trim().is_empty() {
            return Err(ConfigError::Invalid("advisory.summary must not be empty".to_string()));
        }
        self.safety.validate()
    }

    /// Write the config as pretty JSON, stamped with the current versions.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let mut stamped = self.clone();
        stamped.config_version = CURRENT_VERSION;
        stamped.safety.config_version = serene_safety::config::CURRENT_VERSION;

        let json = serde_json::to_string_pretty(&stamped)?;
        let write_err = |source: std::io::Error| ConfigError::Write {
            path: path.display().to_string(),
            source,
        };

        // Write to a temp file then rename so readers never see a partial file
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json.as_bytes()).map_err(write_err)?;
        std::fs::rename(&tmp_path, path).map_err(write_err)?;

        tracing::info!(path = %path.display(), "service config saved");
        Ok(())
    }
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> Result<serde_json::Value, ConfigError> {
    if from_version > CURRENT_VERSION {
        return Err(ConfigError::UnsupportedVersion {
            found: from_version.into(),
            supported: CURRENT_VERSION,
        });
    }

    // v0 → v1: top-level `keywords` and `crisis` moved under `safety`
    if from_version < 1 {
        let obj = json.as_object_mut().ok_or(ConfigError::NotAnObject)?;
        let mut moved = serde_json::Map::new();
        for field in ["keywords", "crisis"] {
            if let Some(value) = obj.remove(field) {
                moved.insert(field.to_string(), value);
            }
        }
        if !moved.is_empty() {
            let safety = obj
                .entry("safety")
                .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));
            let safety = safety.as_object_mut().ok_or(ConfigError::NotAnObject)?;
            for (field, value) in moved {
                safety.entry(field).or_insert(value);
            }
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated service config v0 → v1 (nested safety settings)");
    }

    Ok(json)
}
