//! Trigger loader: configuration fragments → one composite [`PendingTrigger`].
//!
//! Fragments are dispatched through the trigger registry one by one; the
//! resulting triggers become the children of a top-level composite. Loading is
//! all-or-nothing: any unsupported or unparsable fragment fails the whole load.
//!
//! [`PendingTrigger`]: crate::trigger::PendingTrigger

mod core;
mod error;


pub use self::core::{load_triggers, TriggerLoader};
pub use self::error::{LoadError, Result};
