use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::crisis::CrisisResources;
use crate::error::ConfigError;
use crate::gate::SensitiveContentGate;
use crate::keywords::KeywordSet;

/// Current safety config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

/// Safety settings, built once at startup and never mutated afterwards.
///
/// `extra_keywords` are appended after the built-in list; configuration can
/// widen the gate but never remove a built-in keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default)]
    pub extra_keywords: Vec<String>,
    #[serde(default)]
    pub crisis: CrisisResources,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            extra_keywords: Vec::new(),
            crisis: CrisisResources::default(),
        }
    }
}

impl SafetyConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let json: serde_json::Value = serde_json::from_str(&contents)?;
        Self::from_value(json)
    }

    /// Migrate and validate a raw JSON value.
    pub fn from_value(json: serde_json::Value) -> Result<Self, ConfigError> {
        let on_disk_version = read_version(&json, CURRENT_VERSION)?;

        let migrated = migrate(json, on_disk_version)?;
        let config: SafetyConfig = serde_json::from_value(migrated)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.crisis.message.trim().is_empty() {
            return Err(ConfigError::Invalid("crisis message must not be empty".to_string()));
        }
        if self.crisis.hotlines.is_empty() {
            return Err(ConfigError::Invalid("at least one hotline is required".to_string()));
        }
        if let Some(h) = self
            .crisis
            .hotlines
            .iter()
            .find(|h| h.label.trim().is_empty() || h.number.trim().is_empty())
        {
            return Err(ConfigError::Invalid(format!(
                "hotline entries need a label and a number (got label {:?}, number {:?})",
                h.label, h.number
            )));
        }
        Ok(())
    }

    pub fn keyword_set(&self) -> KeywordSet {
        KeywordSet::builder()
            .extend(self.extra_keywords.iter().map(String::as_str))
            .build()
    }

    pub fn gate(&self) -> SensitiveContentGate {
        SensitiveContentGate::new(self.keyword_set())
    }
}

/// Read `config_version` from a raw config. Missing means pre-versioned (0);
/// values that do not fit a `u32` are reported as unsupported.
pub fn read_version(json: &serde_json::Value, supported: u32) -> Result<u32, ConfigError> {
    let Some(raw) = json.get("config_version").and_then(|v| v.as_u64()) else {
        return Ok(0);
    };
    u32::try_from(raw).map_err(|_| ConfigError::UnsupportedVersion {
        found: raw,
        supported,
    })
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> Result<serde_json::Value, ConfigError> {
    if from_version > CURRENT_VERSION {
        return Err(ConfigError::UnsupportedVersion {
            found: from_version.into(),
            supported: CURRENT_VERSION,
        });
    }

    // v0 → v1: `keywords` renamed to `extra_keywords`
    if from_version < 1 {
        let obj = json.as_object_mut().ok_or(ConfigError::NotAnObject)?;
        if let Some(keywords) = obj.remove("keywords") {
            obj.entry("extra_keywords").or_insert(keywords);
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated safety config v0 → v1 (renamed keywords)");
    }

    Ok(json)
}
