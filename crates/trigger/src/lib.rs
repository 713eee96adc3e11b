//! Declarative time-trigger engine for desky.
//!
//! This crate provides:
//! - Duration and time-of-day parsing ("5 minutes 3 seconds", "7:30 pm")
//! - Pending/active trigger model with interval catch-up and earliest-wins composites
//! - A priority-ordered denormalization registry for untyped YAML config
//! - A loader that turns a list of trigger fragments into one composite trigger

pub mod denormalize;
pub mod error;
pub mod loader;
pub mod time;
pub mod trigger;

pub use error::{Result, TriggerError};
pub use loader::{load_triggers, LoadError, TriggerLoader};
pub use time::{parse_duration, parse_time_of_day, roll_forward, Instant, TimeOfDay, Zone};
pub use trigger::{compare, ActiveTrigger, PendingTrigger};
