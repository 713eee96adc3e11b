//! [`PriorityDenormalizer`]: first-match dispatch over prioritized converters.

use std::cmp::Reverse;
use std::fmt;

use serde_yaml::Value;
use tracing::{debug, trace};

use crate::error::{Result, TriggerError};

use super::Denormalizer;

struct Entry<T> {
    priority: i32,
    denormalizer: Box<dyn Denormalizer<Output = T>>,
}

/// Collects converters before freezing them into a [`PriorityDenormalizer`].
pub struct PriorityDenormalizerBuilder<T> {
    entries: Vec<Entry<T>>,
}

impl<T> PriorityDenormalizerBuilder<T> {
    /// Add a converter. Higher priorities are consulted first.
    pub fn register(mut self, denormalizer: impl Denormalizer<Output = T> + 'static, priority: i32) -> Self {
        self.entries.push(Entry {
            priority,
            denormalizer: Box::new(denormalizer),
        });
        self
    }

    /// Sort by descending priority and freeze. Equal priorities keep their
    /// registration order.
    pub fn build(mut self) -> PriorityDenormalizer<T> {
        self.entries.sort_by_key(|entry| Reverse(entry.priority));
        PriorityDenormalizer { entries: self.entries }
    }
}

/// Immutable, priority-sorted set of converters producing `T`.
///
/// `denormalize` uses the first converter that supports the fragment; the
/// registry itself supports a fragment iff any of its converters does, so
/// registries can be nested inside other converters.
pub struct PriorityDenormalizer<T> {
    entries: Vec<Entry<T>>,
}

impl<T> PriorityDenormalizer<T> {
    pub fn builder() -> PriorityDenormalizerBuilder<T> {
        PriorityDenormalizerBuilder { entries: Vec::new() }
    }

    /// Registered priorities in dispatch order.
    pub fn priorities(&self) -> Vec<i32> {
        self.entries.iter().map(|entry| entry.priority).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Denormalizer for PriorityDenormalizer<T> {
    type Output = T;

    fn supports(&self, config: &Value) -> bool {
        self.entries.iter().any(|entry| entry.denormalizer.supports(config))
    }

    fn denormalize(&self, config: &Value) -> Result<T> {
        for (position, entry) in self.entries.iter().enumerate() {
            if entry.denormalizer.supports(config) {
                debug!(position, priority = entry.priority, "denormalizer selected");
                return entry.denormalizer.denormalize(config);
            }
            trace!(position, priority = entry.priority, "denormalizer declined");
        }
        Err(TriggerError::unsupported(config, "no denormalizer available"))
    }
}

impl<T> fmt::Debug for PriorityDenormalizer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityDenormalizer")
            .field("priorities", &self.priorities())
            .finish()
    }
}
