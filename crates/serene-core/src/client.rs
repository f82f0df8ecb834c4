use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Opaque identifier that keys every piece of per-client state.
///
/// The core never interprets the contents. Values like `anon:3f2a9c01b7de` or
/// `email:someone@example.com` come from the host's identity resolver and
/// are only checked for being non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClientId(String);

impl ClientId {
    pub fn new(raw: impl Into<String>) -> Result<Self, CoreError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::BlankClientId);
        }
        if trimmed.len() == raw.len() {
            Ok(Self(raw))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    /// Resolve an optional raw header or query value. Blank values count as absent.
    pub fn resolve(raw: Option<&str>) -> Option<Self> {
        raw.and_then(|r| Self::new(r).ok())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ClientId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClientId> for String {
    fn from(id: ClientId) -> Self {
        id.0
    }
}
