//! History key conventions.
//!
//! Pure string functions. These define the canonical layout of per-client
//! record streams in whatever store backs the history.

use crate::client::ClientId;

pub const CLIENTS_PREFIX: &str = "clients/";

pub fn assessments(client: &ClientId) -> String {
    format!("{CLIENTS_PREFIX}{client}/assessments")
}

pub fn chat_turns(client: &ClientId) -> String {
    format!("{CLIENTS_PREFIX}{client}/chat")
}
