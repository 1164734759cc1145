//! Shared utilities for classtime
//!
//! This crate provides:
//! - ID types (SessionId)
//! - Clock readings (with mock time for development)
//! - Error types
//! - Default config paths

mod error;
mod ids;
mod paths;
mod time;

pub use error::*;
pub use ids::*;
pub use paths::*;
pub use time::*;
