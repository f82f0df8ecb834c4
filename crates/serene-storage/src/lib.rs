//! serene-storage
//!
//! Per-client, append-only history streams behind a small capability trait.
//! Records are JSON bytes; the typed helpers in [`records`] do the encoding.

pub mod error;
pub mod memory;
pub mod records;
pub mod store;

pub use memory::MemoryStore;
pub use store::HistoryStore;
