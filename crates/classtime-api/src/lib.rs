//! Shared types for classtime
//!
//! This crate defines the value types passed between the engine and its
//! collaborators:
//! - Lifecycle status, countdown breakdown, time deltas
//! - Reminder offsets and crossings
//! - Hub events

mod events;
mod types;

pub use events::*;
pub use types::*;
