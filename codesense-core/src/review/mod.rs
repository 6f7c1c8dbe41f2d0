//! Review request and result types
//!
//! This module provides the data exchanged with the external analysis
//! process: the submitted request (code plus declared language) and the
//! structured result the process prints on success.

pub mod request;
pub mod result;

pub use request::{MAX_CODE_LENGTH, ReviewRequest};
pub use result::ReviewResult;
