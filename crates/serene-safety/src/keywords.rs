//! Sensitive keyword set.
//!
//! Keywords are stored lower-cased and normalised the same way incoming text
//! is, so a plain substring test is the whole matching rule.

/// Self-harm and suicide phrases matched by default, English then Chinese.
pub static DEFAULT_KEYWORDS: &[&str] = &[
    "suicide",
    "don't want to live",
    "kill myself",
    "end my life",
    "不想活",
    "想自杀",
    "自杀",
    "轻生",
    "寻短见",
    "活不下去",
];

/// Ordered, deduplicated keyword list. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    /// The built-in keywords only.
    pub fn defaults() -> Self {
        Self::builder().build()
    }

    /// A builder seeded with the built-in keywords. Builders can only append.
    pub fn builder() -> KeywordSetBuilder {
        let mut builder = KeywordSetBuilder {
            keywords: Vec::with_capacity(DEFAULT_KEYWORDS.len()),
        };
        builder.extend(DEFAULT_KEYWORDS.iter().copied());
        builder
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    /// First keyword contained in already-normalised text.
    pub(crate) fn first_match(&self, normalized: &str) -> Option<&str> {
        self.iter().find(|k| normalized.contains(*k))
    }
}

pub struct KeywordSetBuilder {
    keywords: Vec<String>,
}

impl KeywordSetBuilder {
    /// Append a keyword. Blank entries and duplicates are skipped.
    pub fn push(&mut self, keyword: &str) -> &mut Self {
        let normalized = normalize(keyword.trim());
        if !normalized.is_empty() && !self.keywords.contains(&normalized) {
            self.keywords.push(normalized);
        }
        self
    }

    pub fn extend<'a>(&mut self, keywords: impl IntoIterator<Item = &'a str>) -> &mut Self {
        for keyword in keywords {
            self.push(keyword);
        }
        self
    }

    pub fn build(&self) -> KeywordSet {
        KeywordSet {
            keywords: self.keywords.clone(),
        }
    }
}

/// Lower-case and fold typographic apostrophes to `'`.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{02BC}' => '\'',
            other => other,
        })
        .collect()
}
