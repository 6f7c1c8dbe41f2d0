//! Review request type and submission validation
//!
//! A request is the pair of a code snippet and its declared language. The
//! serialized form is exactly the payload handed to the analysis process.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Maximum accepted code length, in characters
pub const MAX_CODE_LENGTH: usize = 10_000;

/// A code snippet submitted for review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequest {
    /// The source code to review
    pub code: String,

    /// Declared programming language of the code
    pub language: String,
}

impl ReviewRequest {
    /// Create a new review request
    pub fn new(code: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: language.into(),
        }
    }

    /// Validate the request before any analysis work is done
    ///
    /// Both fields must be non-empty and the code must not exceed
    /// [`MAX_CODE_LENGTH`] characters.
    pub fn validate(&self) -> Result<()> {
        if self.code.is_empty() || self.language.is_empty() {
            return Err(Error::Validation(
                "Code and language are required".to_string(),
            ));
        }

        if self.code.chars().count() > MAX_CODE_LENGTH {
            return Err(Error::Validation(
                "Code too long (max 10,000 characters)".to_string(),
            ));
        }

        Ok(())
    }
}
