//! Sequence and mapping converters built on an inner [`Denormalizer`].

use indexmap::IndexMap;
use serde_yaml::Value;

use crate::error::{Result, TriggerError};

use super::Denormalizer;

/// Converts a YAML sequence element by element.
///
/// Every element is checked with `supports` before any is converted; the first
/// unsupported element fails the whole call.
pub struct ListDenormalizer<D> {
    inner: D,
}

impl<D: Denormalizer> ListDenormalizer<D> {
    pub fn new(inner: D) -> Self {
        Self { inner }
    }

    /// Convert a slice of fragments with the same all-or-nothing contract.
    pub fn denormalize_items(&self, items: &[Value]) -> Result<Vec<D::Output>> {
        if let Some(item) = items.iter().find(|item| !self.inner.supports(item)) {
            return Err(TriggerError::unsupported(item, "list item cannot be denormalized"));
        }
        items.iter().map(|item| self.inner.denormalize(item)).collect()
    }
}

impl<D: Denormalizer> Denormalizer for ListDenormalizer<D> {
    type Output = Vec<D::Output>;

    fn supports(&self, config: &Value) -> bool {
        config
            .as_sequence()
            .is_some_and(|items| items.iter().all(|item| self.inner.supports(item)))
    }

    fn denormalize(&self, config: &Value) -> Result<Self::Output> {
        let items = config
            .as_sequence()
            .ok_or_else(|| TriggerError::unsupported(config, "expected a list"))?;
        self.denormalize_items(items)
    }
}

/// Converts the values of a YAML mapping with string keys, keeping document order.
pub struct MapDenormalizer<D> {
    inner: D,
}

impl<D: Denormalizer> MapDenormalizer<D> {
    pub fn new(inner: D) -> Self {
        Self { inner }
    }
}

impl<D: Denormalizer> Denormalizer for MapDenormalizer<D> {
    type Output = IndexMap<String, D::Output>;

    fn supports(&self, config: &Value) -> bool {
        config.as_mapping().is_some_and(|mapping| {
            mapping
                .iter()
                .all(|(key, value)| key.is_string() && self.inner.supports(value))
        })
    }

    fn denormalize(&self, config: &Value) -> Result<Self::Output> {
        let mapping = config
            .as_mapping()
            .ok_or_else(|| TriggerError::unsupported(config, "expected a mapping"))?;

        for (key, value) in mapping {
            if !key.is_string() {
                return Err(TriggerError::unsupported(key, "mapping key must be a string"));
            }
            if !self.inner.supports(value) {
                return Err(TriggerError::unsupported(value, "mapping entry cannot be denormalized"));
            }
        }

        mapping
            .iter()
            .filter_map(|(key, value)| key.as_str().map(|name| (name, value)))
            .map(|(name, value)| Ok((name.to_string(), self.inner.denormalize(value)?)))
            .collect()
    }
}
