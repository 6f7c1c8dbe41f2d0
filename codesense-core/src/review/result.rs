//! Structured review result and analysis-output parsing
//!
//! The analysis process prints one JSON object on stdout. A well-formed
//! object carries the review fields below; an object with a non-null `error`
//! field reports a failure that is authoritative even when the process
//! exited cleanly.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The structured outcome of analyzing one code submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewResult {
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
}

impl ReviewResult {
    /// Parse the JSON an analysis process printed on stdout
    ///
    /// Missing fields default (the output contract only guarantees JSON
    /// shape, not completeness); wrong field types fail the parse.
    pub fn from_output(raw: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)
            .map_err(|_| Error::MalformedOutput("Failed to parse review response".to_string()))?;

        if let Some(reported) = value.get("error").filter(|v| !v.is_null()) {
            let message = reported
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| reported.to_string());
            return Err(Error::MalformedOutput(message));
        }

        serde_json::from_value(value)
            .map_err(|_| Error::MalformedOutput("Failed to parse review response".to_string()))
    }
}
