//! [`TriggerLoader`]: builds composite pending triggers from YAML config.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use chrono::FixedOffset;
use serde_yaml::Value;
use tracing::{debug, info};

use crate::denormalize::ListDenormalizer;
use crate::time::Zone;
use crate::trigger::{PendingTrigger, TriggerDenormalizer};

use super::error::{LoadError, Result};

/// Key holding the fragment list when the document is a mapping.
const TRIGGERS_KEY: &str = "triggers";

/// Process-wide loader, built on first use and shared afterwards.
static DEFAULT_LOADER: LazyLock<TriggerLoader> = LazyLock::new(TriggerLoader::new);

/// Load a list of trigger fragments with the default loader.
///
/// An empty list loads as a composite without children; activating that
/// composite fails.
pub fn load_triggers(fragments: &[Value]) -> Result<PendingTrigger> {
    DEFAULT_LOADER.load(fragments)
}

/// Turns trigger configuration into a composite [`PendingTrigger`].
///
/// The loader owns a frozen trigger registry. Times of day are interpreted in
/// the loader's [`Zone`], which defaults to the host's local time zone.
pub struct TriggerLoader {
    denormalizer: TriggerDenormalizer,
    zone: Zone,
}

impl TriggerLoader {
    /// Loader using the host's local time zone.
    pub fn new() -> Self {
        Self::with_zone(Zone::Local)
    }

    /// Loader interpreting times of day in `zone`.
    pub fn with_zone(zone: impl Into<Zone>) -> Self {
        let zone = zone.into();
        Self {
            denormalizer: TriggerDenormalizer::new(zone),
            zone,
        }
    }

    /// Loader interpreting times of day in a fixed UTC offset.
    pub fn with_offset(offset: FixedOffset) -> Self {
        Self::with_zone(offset)
    }

    /// Loader using a custom trigger converter.
    pub fn with_denormalizer(denormalizer: TriggerDenormalizer, zone: impl Into<Zone>) -> Self {
        Self {
            denormalizer,
            zone: zone.into(),
        }
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Denormalize every fragment and wrap the results in a composite.
    pub fn load(&self, fragments: &[Value]) -> Result<PendingTrigger> {
        let children = ListDenormalizer::new(&self.denormalizer).denormalize_items(fragments)?;
        info!(
            triggers = children.len(),
            kinds = ?children.iter().map(PendingTrigger::kind).collect::<Vec<_>>(),
            "loaded trigger configuration"
        );
        Ok(PendingTrigger::Composite(children))
    }

    /// Load from a YAML document.
    ///
    /// The document is either a list of fragments or a mapping with a
    /// `triggers` list. An empty document loads as an empty composite.
    pub fn load_str(&self, yaml: &str) -> Result<PendingTrigger> {
        let document: Value = serde_yaml::from_str(yaml)?;
        match &document {
            Value::Null => self.load(&[]),
            Value::Sequence(fragments) => self.load(fragments),
            Value::Mapping(_) => match document.get(TRIGGERS_KEY) {
                Some(Value::Sequence(fragments)) => self.load(fragments),
                Some(Value::Null) => self.load(&[]),
                Some(_) => Err(LoadError::Validation(format!("'{}' must be a list", TRIGGERS_KEY))),
                None => Err(LoadError::Validation(format!(
                    "expected a list of triggers or a '{}' key",
                    TRIGGERS_KEY
                ))),
            },
            _ => Err(LoadError::Validation(
                "trigger configuration must be a list or a mapping".to_string(),
            )),
        }
    }

    /// Read and load a YAML file.
    pub fn load_file(&self, path: &Path) -> Result<PendingTrigger> {
        debug!(path = %path.display(), "reading trigger configuration");
        let contents = fs::read_to_string(path)?;
        self.load_str(&contents)
    }
}

impl Default for TriggerLoader {
    fn default() -> Self {
        Self::new()
    }
}
