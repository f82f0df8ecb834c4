//! serene-chat
//!
//! The chat request flow: safety gate first, then (only for non-sensitive
//! messages) the generation backend, with a supportive fallback whenever the
//! backend is missing, slow, or failing.

pub mod backend;
pub mod error;
pub mod service;

pub use backend::{GenerationBackend, GenerationRequest};
pub use service::{ChatService, ChatSettings};
