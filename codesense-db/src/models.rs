//! Data models for persisted reviews

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A completed review persisted with its original submission
///
/// Records are immutable: written once after a successful analysis, never
/// updated, never deleted. The wire form uses camelCase field names
/// (`qualityScore`, `createdAt`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    /// Identifier assigned by the API layer (UUID), the sole external key
    pub id: String,

    /// The submitted source code
    pub code: String,

    /// Declared programming language of the submission
    pub language: String,

    /// Short overview of what the code does
    pub summary: String,

    /// Bugs or potential issues found
    pub bugs: Vec<String>,

    /// Performance and optimization suggestions
    pub optimizations: Vec<String>,

    /// Readability improvements
    pub readability: Vec<String>,

    /// Refactored version of the code
    pub refactored: String,

    /// Mentor-style explanation of the suggested changes
    pub explanation: String,

    /// Overall quality score in [0, 10]
    pub quality_score: f64,

    /// When the review completed
    pub created_at: DateTime<Utc>,
}
