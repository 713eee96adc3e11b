//! Config converters for the trigger fragment shapes.
//!
//! - `{ every: "5 minutes" }` → [`PendingTrigger::Interval`]
//! - `{ on: "07:30" }` or `{ on: ["07:30", "19:00"] }` → instant triggers
//! - `{ any: [<fragment>, ...] }` → a nested [`PendingTrigger::Composite`]

use serde_yaml::Value;
use tracing::debug;

use crate::denormalize::{Denormalizer, ListDenormalizer, PriorityDenormalizer};
use crate::error::{Result, TriggerError};
use crate::time::{parse_duration, parse_time_of_day, Zone};

use super::pending::PendingTrigger;

/// Key of the interval fragment.
pub const EVERY_KEY: &str = "every";
/// Key of the time-of-day fragment.
pub const ON_KEY: &str = "on";
/// Key of the nested composite fragment.
pub const ANY_KEY: &str = "any";

/// Converts `{ every: <duration> }` into an interval trigger.
///
/// The duration may be a string or a non-negative integer (read as seconds,
/// like a unit-less string). Zero-length intervals are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntervalTriggerDenormalizer;

impl Denormalizer for IntervalTriggerDenormalizer {
    type Output = PendingTrigger;

    fn supports(&self, config: &Value) -> bool {
        config.get(EVERY_KEY).is_some()
    }

    fn denormalize(&self, config: &Value) -> Result<PendingTrigger> {
        let every = config
            .get(EVERY_KEY)
            .ok_or_else(|| TriggerError::unsupported(config, "missing 'every'"))?;

        let text = match every {
            Value::String(text) => text.clone(),
            Value::Number(n) if n.is_u64() => n.to_string(),
            _ => return Err(TriggerError::unsupported(config, "'every' must be a duration string")),
        };

        let period = parse_duration(&text)?;
        if period.is_zero() {
            return Err(TriggerError::unsupported(config, "interval must be longer than zero"));
        }

        debug!(every = %text, period_ms = period.as_millis() as u64, "parsed interval trigger");
        Ok(PendingTrigger::Interval(period))
    }
}

/// Converts `{ on: <time> | [<time>, ...] }` into instant triggers.
///
/// Times of day are interpreted in the converter's zone.
#[derive(Debug, Clone, Copy)]
pub struct InstantTriggerDenormalizer {
    zone: Zone,
}

impl InstantTriggerDenormalizer {
    pub fn new(zone: impl Into<Zone>) -> Self {
        Self { zone: zone.into() }
    }
}

impl Denormalizer for InstantTriggerDenormalizer {
    type Output = PendingTrigger;

    fn supports(&self, config: &Value) -> bool {
        config.get(ON_KEY).is_some()
    }

    fn denormalize(&self, config: &Value) -> Result<PendingTrigger> {
        match config.get(ON_KEY) {
            Some(Value::String(text)) => Ok(PendingTrigger::Instant(parse_time_of_day(text, self.zone)?)),
            Some(Value::Sequence(items)) => {
                let times = items
                    .iter()
                    .map(|item| match item {
                        Value::String(text) => parse_time_of_day(text, self.zone),
                        other => Err(TriggerError::unsupported(other, "instant list items must be strings")),
                    })
                    .collect::<Result<Vec<_>>>()?;
                PendingTrigger::instant_set(times)
                    .ok_or_else(|| TriggerError::unsupported(config, "instant list must not be empty"))
            }
            Some(_) => Err(TriggerError::unsupported(
                config,
                "'on' must be a time string or a list of time strings",
            )),
            None => Err(TriggerError::unsupported(config, "missing 'on'")),
        }
    }
}

/// Top-level trigger converter.
///
/// `{ any: [...] }` fragments are converted recursively through this
/// converter into a nested composite; every other fragment is dispatched to
/// the wrapped registry.
pub struct TriggerDenormalizer {
    registry: PriorityDenormalizer<PendingTrigger>,
}

impl TriggerDenormalizer {
    /// Default registry: interval then instant converter, both at priority 0.
    pub fn new(zone: impl Into<Zone>) -> Self {
        Self::with_registry(
            PriorityDenormalizer::builder()
                .register(IntervalTriggerDenormalizer, 0)
                .register(InstantTriggerDenormalizer::new(zone), 0)
                .build(),
        )
    }

    /// Use a custom registry, e.g. one with additional trigger kinds.
    pub fn with_registry(registry: PriorityDenormalizer<PendingTrigger>) -> Self {
        Self { registry }
    }
}

impl Denormalizer for TriggerDenormalizer {
    type Output = PendingTrigger;

    fn supports(&self, config: &Value) -> bool {
        match config.get(ANY_KEY) {
            Some(children) => ListDenormalizer::new(self).supports(children),
            None => self.registry.supports(config),
        }
    }

    fn denormalize(&self, config: &Value) -> Result<PendingTrigger> {
        match config.get(ANY_KEY) {
            Some(children) => {
                let children = ListDenormalizer::new(self).denormalize(children)?;
                Ok(PendingTrigger::Composite(children))
            }
            None => self.registry.denormalize(config),
        }
    }
}
