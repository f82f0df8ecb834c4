//! serene-core
//!
//! Pure domain types and storage key conventions.
//! No I/O: this is the shared vocabulary of the Serene system.

pub mod client;
pub mod error;
pub mod keys;
pub mod models;
