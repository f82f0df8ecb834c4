use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use ts_rs::TS;

use serene_core::models::assessment::{Advisory, AssessmentResult, RiskLevel, SeverityLevel};

use crate::Instrument;
use crate::instruments::phq9::Phq9;

/// Inclusive range for a single item answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemRange {
    pub min: i64,
    pub max: i64,
}

impl ItemRange {
    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// One question of an instrument.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    pub id: String,
    pub prompt: String,
}

/// Rejected assessment input. Nothing is ever clamped or defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("expected {expected} answers, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("answer {index} is not an integer: {value}")]
    NotAnInteger { index: usize, value: String },

    #[error("answer {index} is {value}, outside [{min}, {max}]")]
    OutOfRange {
        index: usize,
        value: i64,
        min: i64,
        max: i64,
    },
}

/// Total score at or above which a non-crisis result is `RiskLevel::Moderate`.
pub const MODERATE_RISK_TOTAL: u8 = 15;

/// Index of item 9, the self-harm ideation item.
pub const CRISIS_ITEM_INDEX: usize = 8;

/// A validated PHQ-9 answer vector: exactly nine values in [0, 3].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phq9Answers([u8; 9]);

impl Phq9Answers {
    /// Coerce loosely typed request values, then validate.
    ///
    /// Integer-coercible: JSON integers, floats without a fractional part,
    /// and strings holding a base-10 integer. Every element is coerced
    /// before any bound is checked, so a non-integer anywhere wins over an
    /// out-of-range value elsewhere.
    pub fn from_json(values: &[Value]) -> Result<Self, ValidationError> {
        let expected = Phq9.items().len();
        if values.len() != expected {
            return Err(ValidationError::WrongLength {
                expected,
                actual: values.len(),
            });
        }

        let ints = values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                coerce_integer(value).ok_or_else(|| ValidationError::NotAnInteger {
                    index,
                    value: value.to_string(),
                })
            })
            .collect::<Result<Vec<i64>, _>>()?;

        Self::try_from(ints.as_slice())
    }

    pub fn as_array(&self) -> [u8; 9] {
        self.0
    }

    pub fn total(&self) -> u8 {
        self.0.iter().sum()
    }

    /// True iff item 9 is above zero, whatever the other answers are.
    pub fn crisis(&self) -> bool {
        self.0[CRISIS_ITEM_INDEX] > 0
    }
}

impl TryFrom<&[i64]> for Phq9Answers {
    type Error = ValidationError;

    fn try_from(answers: &[i64]) -> Result<Self, Self::Error> {
        Phq9.validate(answers)?;
        let mut out = [0u8; 9];
        for (slot, &value) in out.iter_mut().zip(answers) {
            // validate() has bounded every value to [0, 3]
            *slot = value as u8;
        }
        Ok(Self(out))
    }
}

fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i);
            }
            // Unsigned integers past i64::MAX are not representable.
            if n.is_u64() {
                return None;
            }
            let f = n.as_f64()?;
            // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound.
            let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
            (f.fract() == 0.0 && in_range).then_some(f as i64)
        }
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Map a total to its severity band. Ordered `<=` checks, first match wins.
pub fn grade(total: u8) -> SeverityLevel {
    if total <= 4 {
        SeverityLevel::NoneMinimal
    } else if total <= 9 {
        SeverityLevel::Mild
    } else if total <= 14 {
        SeverityLevel::Moderate
    } else if total <= 19 {
        SeverityLevel::ModeratelySevere
    } else {
        SeverityLevel::Severe
    }
}

/// Crisis dominates; otherwise the total decides.
pub fn risk_level(crisis: bool, total: u8) -> RiskLevel {
    if crisis {
        RiskLevel::High
    } else if total >= MODERATE_RISK_TOTAL {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

/// Score validated answers, stamping the result with `at`.
pub fn score_at(answers: &Phq9Answers, advisory: &Advisory, at: jiff::Timestamp) -> AssessmentResult {
    let total = answers.total();
    let crisis = answers.crisis();
    AssessmentResult {
        total,
        level: grade(total),
        crisis,
        risk_level: risk_level(crisis, total),
        advisory: advisory.clone(),
        at,
    }
}

/// Validate raw answers and score them against the current instant.
pub fn score(answers: &[i64], advisory: &Advisory) -> Result<AssessmentResult, ValidationError> {
    let answers = Phq9Answers::try_from(answers)?;
    Ok(score_at(&answers, advisory, jiff::Timestamp::now()))
}
