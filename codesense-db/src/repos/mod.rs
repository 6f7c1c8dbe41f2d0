//! Repository modules for database operations

pub mod reviews;

pub use reviews::{DEFAULT_RECENT_LIMIT, ReviewsRepo};
