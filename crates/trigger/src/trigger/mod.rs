//! Pending and active trigger model.
//!
//! A [`PendingTrigger`] is built once from configuration and is never bound to
//! a particular time. Calling [`PendingTrigger::activate`] with "now" yields an
//! [`ActiveTrigger`] carrying a concrete next-fire instant. The host asks it
//! for [`ActiveTrigger::millis_until_activation`], sleeps, and on wake calls
//! [`ActiveTrigger::activate`] to obtain the following occurrence. Every call
//! returns a fresh value; nothing is mutated in place.

mod active;
mod denormalizers;
mod pending;


pub use self::active::{compare, ActiveTrigger, IntervalWindow, ScheduledTime};
pub use self::denormalizers::{
    InstantTriggerDenormalizer, IntervalTriggerDenormalizer, TriggerDenormalizer, ANY_KEY, EVERY_KEY,
    ON_KEY,
};
pub use self::pending::PendingTrigger;
