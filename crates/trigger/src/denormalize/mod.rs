//! Priority-ordered denormalization of untyped YAML config into typed objects.
//!
//! A [`Denormalizer`] claims support for a config fragment and converts it.
//! [`PriorityDenormalizer`] dispatches to the highest-priority registered
//! converter that supports a fragment. [`ListDenormalizer`] and
//! [`MapDenormalizer`] lift any converter over sequences and mappings, checking
//! every element before converting any of them.

mod collection;
mod registry;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use serde_yaml::Value;

use crate::error::Result;

pub use self::collection::{ListDenormalizer, MapDenormalizer};
pub use self::registry::{PriorityDenormalizer, PriorityDenormalizerBuilder};

/// Converts a config fragment into an object.
pub trait Denormalizer: Send + Sync {
    type Output;

    /// Whether this converter can handle `config`.
    fn supports(&self, config: &Value) -> bool;

    /// Convert `config`.
    ///
    /// Callers are expected to check [`supports`](Denormalizer::supports)
    /// first; implementations fail with
    /// [`TriggerError::Unsupported`](crate::TriggerError::Unsupported) when
    /// handed a fragment they do not support.
    fn denormalize(&self, config: &Value) -> Result<Self::Output>;
}

impl<D: Denormalizer + ?Sized> Denormalizer for &D {
    type Output = D::Output;

    fn supports(&self, config: &Value) -> bool {
        (**self).supports(config)
    }

    fn denormalize(&self, config: &Value) -> Result<Self::Output> {
        (**self).denormalize(config)
    }
}

impl<D: Denormalizer + ?Sized> Denormalizer for Arc<D> {
    type Output = D::Output;

    fn supports(&self, config: &Value) -> bool {
        (**self).supports(config)
    }

    fn denormalize(&self, config: &Value) -> Result<Self::Output> {
        (**self).denormalize(config)
    }
}
