use tracing::debug;

use crate::keywords::{KeywordSet, normalize};

/// Decides whether a chat message must be short-circuited to the crisis
/// response before any reply is generated.
///
/// Pure and lock-free; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct SensitiveContentGate {
    keywords: KeywordSet,
}

impl SensitiveContentGate {
    pub fn new(keywords: KeywordSet) -> Self {
        Self { keywords }
    }

    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    /// True if any keyword occurs anywhere in the text, ignoring case.
    /// Empty or missing text is never sensitive.
    pub fn is_sensitive<'a>(&self, text: impl Into<Option<&'a str>>) -> bool {
        self.matched_keyword(text).is_some()
    }

    /// The first keyword found in the text, if any.
    pub fn matched_keyword<'a>(&self, text: impl Into<Option<&'a str>>) -> Option<&str> {
        let text = text.into().filter(|t| !t.is_empty())?;
        let normalized = normalize(text);
        let hit = self.keywords.first_match(&normalized);
        if let Some(keyword) = hit {
            debug!(keyword, text_len = text.chars().count(), "sensitive keyword matched");
        }
        hit
    }
}

impl Default for SensitiveContentGate {
    fn default() -> Self {
        Self::new(KeywordSet::defaults())
    }
}
