//! [`ActiveTrigger`]: triggers bound to a "now" with a concrete next-fire instant.

use std::cmp::Ordering;
use std::time::Duration;

use tracing::debug;

use crate::time::{roll_forward, Instant, TimeOfDay};

/// One window of an interval trigger.
///
/// A window normally spans one period (`started + period == complete`). After
/// missed periods the trigger catches up to the most recent tick at or before
/// "now" and reports a zero-length window (`started == complete`), which is
/// due immediately. Activating a caught-up window opens the next full period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalWindow {
    period: Duration,
    started: Instant,
    complete: Instant,
}

impl IntervalWindow {
    pub(crate) fn starting_at(now: Instant, period: Duration) -> Self {
        Self {
            period,
            started: now,
            complete: now.add_millis(period_millis(period)),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn started(&self) -> Instant {
        self.started
    }

    pub fn complete(&self) -> Instant {
        self.complete
    }

    /// Whether this window is a catch-up tick reported after missed periods.
    pub fn is_caught_up(&self) -> bool {
        self.started == self.complete
    }

    fn advance(&self, now: Instant) -> Self {
        let period = period_millis(self.period);
        let overdue = self.complete.millis_until(now);
        if overdue < 0 {
            return self.clone();
        }

        let missed = overdue / period;
        let last_tick = self.complete.add_millis(missed.saturating_mul(period));

        if missed == 0 || self.is_caught_up() {
            Self {
                period: self.period,
                started: last_tick,
                complete: last_tick.add_millis(period),
            }
        } else {
            debug!(missed, period_ms = period, tick = %last_tick, "interval missed periods, catching up");
            Self {
                period: self.period,
                started: last_tick,
                complete: last_tick,
            }
        }
    }
}

/// A time of day resolved to its next occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTime {
    pub time_of_day: TimeOfDay,
    pub at: Instant,
}

impl ScheduledTime {
    pub(crate) fn next(time_of_day: TimeOfDay, now: Instant) -> Self {
        Self {
            time_of_day,
            at: roll_forward(&time_of_day, now),
        }
    }

    fn advance(&self, now: Instant) -> Self {
        if self.at > now {
            *self
        } else {
            Self::next(self.time_of_day, now)
        }
    }
}

/// A trigger bound to a specific "now".
///
/// Values are produced by [`PendingTrigger::activate`], which rejects empty
/// composites and empty instant sets with [`TriggerError::EmptyComposite`].
/// The variants are public for matching, not for construction: a hand-built
/// empty `Composite` or `InstantSet` has no next activation, is never due and
/// stays empty through [`ActiveTrigger::activate`].
///
/// [`PendingTrigger::activate`]: super::PendingTrigger::activate
/// [`TriggerError::EmptyComposite`]: crate::TriggerError::EmptyComposite
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveTrigger {
    Interval(IntervalWindow),
    Instant(ScheduledTime),
    /// Ordered by next occurrence, soonest first.
    InstantSet(Vec<ScheduledTime>),
    /// Children in declaration order.
    Composite(Vec<ActiveTrigger>),
}

impl ActiveTrigger {
    pub(crate) fn instant_set(mut times: Vec<ScheduledTime>) -> Self {
        times.sort_by_key(|t| t.at);
        ActiveTrigger::InstantSet(times)
    }

    /// Short name of the trigger kind, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ActiveTrigger::Interval(_) => "interval",
            ActiveTrigger::Instant(_) => "instant",
            ActiveTrigger::InstantSet(_) => "instant_set",
            ActiveTrigger::Composite(_) => "composite",
        }
    }

    /// Signed milliseconds from `relative_to` until the next activation.
    /// Zero or negative means the trigger is due.
    pub fn millis_until_activation(&self, relative_to: Instant) -> i64 {
        match self.next_activation() {
            Some(at) => relative_to.millis_until(at),
            // Only reachable for hand-built empty sets; such a trigger never fires.
            None => i64::MAX,
        }
    }

    /// Instant of the next activation, `None` only for an empty composite or set.
    pub fn next_activation(&self) -> Option<Instant> {
        match self {
            ActiveTrigger::Interval(window) => Some(window.complete),
            ActiveTrigger::Instant(scheduled) => Some(scheduled.at),
            ActiveTrigger::InstantSet(times) => times.iter().map(|t| t.at).min(),
            ActiveTrigger::Composite(children) => children.iter().filter_map(ActiveTrigger::next_activation).min(),
        }
    }

    /// Whether the trigger is due at `now`.
    pub fn is_due(&self, now: Instant) -> bool {
        self.millis_until_activation(now) <= 0
    }

    /// The trigger that governs the next wake-up.
    ///
    /// For a composite this is its earliest direct child; ties go to the child
    /// declared first. Other kinds return themselves.
    pub fn earliest(&self, now: Instant) -> &ActiveTrigger {
        match self {
            ActiveTrigger::Composite(children) => children
                .iter()
                .min_by(|a, b| compare(a, b, now))
                .unwrap_or(self),
            _ => self,
        }
    }

    /// Re-resolve against `now`, producing the following occurrence.
    ///
    /// Triggers that are not yet due are returned unchanged.
    pub fn activate(&self, now: Instant) -> ActiveTrigger {
        match self {
            ActiveTrigger::Interval(window) => ActiveTrigger::Interval(window.advance(now)),
            ActiveTrigger::Instant(scheduled) => ActiveTrigger::Instant(scheduled.advance(now)),
            ActiveTrigger::InstantSet(times) => {
                ActiveTrigger::instant_set(times.iter().map(|t| t.advance(now)).collect())
            }
            ActiveTrigger::Composite(children) => {
                ActiveTrigger::Composite(children.iter().map(|child| child.activate(now)).collect())
            }
        }
    }
}

/// Order two active triggers by their time until activation at `now`.
///
/// This is a total order across all trigger kinds.
pub fn compare(a: &ActiveTrigger, b: &ActiveTrigger, now: Instant) -> Ordering {
    a.millis_until_activation(now)
        .cmp(&b.millis_until_activation(now))
}

/// Interval length in whole milliseconds, at least one.
fn period_millis(period: Duration) -> i64 {
    i64::try_from(period.as_millis()).unwrap_or(i64::MAX).max(1)
}
