//! [`PendingTrigger`]: trigger definitions not yet bound to a "now".

use std::time::Duration;

use crate::error::{Result, TriggerError};
use crate::time::{Instant, TimeOfDay};

use super::active::{ActiveTrigger, IntervalWindow, ScheduledTime};

/// A trigger definition as loaded from configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingTrigger {
    /// Fires every `period`, forever.
    Interval(Duration),
    /// Fires once a day at the given time.
    Instant(TimeOfDay),
    /// Fires at whichever of several daily times comes first. Holds at least
    /// two times, ordered by time of day.
    InstantSet(Vec<TimeOfDay>),
    /// Fires whenever its earliest child fires.
    Composite(Vec<PendingTrigger>),
}

impl PendingTrigger {
    /// Build a trigger for a list of times of day.
    ///
    /// Returns `None` for an empty list and a plain [`PendingTrigger::Instant`]
    /// for a single element.
    pub fn instant_set(mut times: Vec<TimeOfDay>) -> Option<Self> {
        match times.len() {
            0 => None,
            1 => times.pop().map(PendingTrigger::Instant),
            _ => {
                times.sort_by_key(|t| t.time);
                Some(PendingTrigger::InstantSet(times))
            }
        }
    }

    /// Short name of the trigger kind, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PendingTrigger::Interval(_) => "interval",
            PendingTrigger::Instant(_) => "instant",
            PendingTrigger::InstantSet(_) => "instant_set",
            PendingTrigger::Composite(_) => "composite",
        }
    }

    /// Bind the trigger to `now`.
    ///
    /// Fails with [`TriggerError::EmptyComposite`] if this trigger, or any
    /// nested composite, has no children.
    pub fn activate(&self, now: Instant) -> Result<ActiveTrigger> {
        match self {
            PendingTrigger::Interval(period) => Ok(ActiveTrigger::Interval(IntervalWindow::starting_at(now, *period))),
            PendingTrigger::Instant(time_of_day) => Ok(ActiveTrigger::Instant(ScheduledTime::next(*time_of_day, now))),
            PendingTrigger::InstantSet(times) => {
                if times.is_empty() {
                    return Err(TriggerError::EmptyComposite);
                }
                Ok(ActiveTrigger::instant_set(
                    times.iter().map(|t| ScheduledTime::next(*t, now)).collect(),
                ))
            }
            PendingTrigger::Composite(children) => {
                if children.is_empty() {
                    return Err(TriggerError::EmptyComposite);
                }
                let active = children
                    .iter()
                    .map(|child| child.activate(now))
                    .collect::<Result<Vec<_>>>()?;
                Ok(ActiveTrigger::Composite(active))
            }
        }
    }
}
