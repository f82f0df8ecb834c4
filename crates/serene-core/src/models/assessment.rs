use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// PHQ-9 severity band, derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum SeverityLevel {
    NoneMinimal,
    Mild,
    Moderate,
    ModeratelySevere,
    Severe,
}

impl SeverityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLevel::NoneMinimal => "none-minimal",
            SeverityLevel::Mild => "mild",
            SeverityLevel::Moderate => "moderate",
            SeverityLevel::ModeratelySevere => "moderately-severe",
            SeverityLevel::Severe => "severe",
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advisory risk annotation. Crisis always maps to `High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static advisory content attached to every result.
///
/// Placeholder text until personalised summaries exist; hosts can replace it
/// through configuration but it is never computed from the answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Advisory {
    pub summary: String,
    pub recommendations: Vec<String>,
}

impl Default for Advisory {
    fn default() -> Self {
        Self {
            summary: "占位：后续由 AI 生成个性化总结。".to_string(),
            recommendations: vec![
                "示例：每天一次情绪打卡".to_string(),
                "示例：3 分钟呼吸练习".to_string(),
                "示例：每周两次认知重构".to_string(),
            ],
        }
    }
}

/// Outcome of scoring one PHQ-9 submission. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentResult {
    pub total: u8,
    pub level: SeverityLevel,
    pub crisis: bool,
    pub risk_level: RiskLevel,
    pub advisory: Advisory,
    pub at: jiff::Timestamp,
}

/// What gets appended to a client's assessment history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentRecord {
    pub id: Uuid,
    pub answers: [u8; 9],
    pub result: AssessmentResult,
}
