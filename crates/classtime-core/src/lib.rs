//! Countdown and status engine for classtime
//!
//! This crate contains:
//! - Session schedules and time arithmetic against a clock reading
//! - Status classification (Upcoming -> Active -> Completed)
//! - Countdown decomposition, reminder triggers and localized display text
//! - The countdown hub that drives all subscriptions from one timer

mod bus;
mod countdown;
mod delta;
mod engine;
mod format;
mod hub;
mod ledger;
mod schedule;
mod status;
mod triggers;

pub use bus::*;
pub use countdown::*;
pub use delta::*;
pub use engine::*;
pub use format::*;
pub use hub::*;
pub use ledger::*;
pub use schedule::*;
pub use status::*;
pub use triggers::*;
