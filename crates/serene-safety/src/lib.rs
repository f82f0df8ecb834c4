//! serene-safety
//!
//! The sensitive content gate that every chat message passes through before
//! any supportive reply is produced, plus the crisis resources it hands back.
//!
//! Matching is high-recall: a message that merely contains a
//! keyword is treated as sensitive, even in a benign context.

pub mod config;
pub mod crisis;
pub mod error;
pub mod gate;
pub mod keywords;

pub use config::SafetyConfig;
pub use crisis::CrisisResources;
pub use gate::SensitiveContentGate;
pub use keywords::KeywordSet;
