//! CodeSense Core - Core library for the CodeSense code review service
//!
//! This crate provides the review request/result types, the analyzer
//! abstraction that delegates analysis to an external process, and the
//! configuration and secrets handling shared by the service.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod review;
pub mod secrets;

pub use analyzer::{Analyzer, DynAnalyzer, SubprocessAnalyzer};
pub use config::Config;
pub use error::{Error, Result};
pub use review::{ReviewRequest, ReviewResult};
pub use secrets::Secrets;
