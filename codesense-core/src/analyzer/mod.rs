//! Analysis engine abstraction
//!
//! The service treats code analysis as a capability: anything that can turn
//! a [`ReviewRequest`] into a [`ReviewResult`]. The one shipped
//! implementation delegates to an external process; the trait seam lets the
//! HTTP layer and its tests substitute an in-process engine.

mod subprocess;

use std::sync::Arc;

use async_trait::async_trait;

use crate::review::{ReviewRequest, ReviewResult};
use crate::Result;

pub use subprocess::SubprocessAnalyzer;

/// Capability interface for review analysis engines
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Run one review to completion
    ///
    /// Every call is independent; nothing is shared or reused between calls.
    async fn review(&self, request: &ReviewRequest) -> Result<ReviewResult>;
}

/// Shared handle to an analyzer implementation
pub type DynAnalyzer = Arc<dyn Analyzer>;
