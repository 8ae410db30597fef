//! Movie Finder Library
//!
//! A Rust library for searching the OMDb movie database. Provides a
//! resilient HTTP client with retry and host fallback, a deduplicating detail
//! cache, batched smart filtering and connection monitoring.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
