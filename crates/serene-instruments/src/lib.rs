//! serene-instruments
//!
//! Screening instrument definitions and scoring. Pure data and pure
//! functions; no storage, no clock except where a timestamp is requested.

pub mod instruments;
pub mod scoring;

use scoring::{Item, ItemRange, ValidationError};

/// Trait implemented by each screening instrument.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "phq9").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "PHQ-9").
    fn name(&self) -> &str;

    /// The items in administration order.
    fn items(&self) -> &[Item];

    /// Inclusive range every item answer must fall in.
    fn item_range(&self) -> ItemRange;

    /// Check answer count and per-item bounds. Never clamps.
    fn validate(&self, answers: &[i64]) -> Result<(), ValidationError> {
        let expected = self.items().len();
        if answers.len() != expected {
            return Err(ValidationError::WrongLength {
                expected,
                actual: answers.len(),
            });
        }

        let range = self.item_range();
        if let Some((index, &value)) = answers
            .iter()
            .enumerate()
            .find(|(_, v)| !range.contains(**v))
        {
            return Err(ValidationError::OutOfRange {
                index,
                value,
                min: range.min,
                max: range.max,
            });
        }
        Ok(())
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![Box::new(instruments::phq9::Phq9)]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}
