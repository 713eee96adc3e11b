//! Tests for the denormalization registry and collection converters.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_yaml::Value;

use super::*;
use crate::error::{Result, TriggerError};

/// Converter that answers `supports` with a fixed value and counts how often it was asked.
struct Stub {
    name: &'static str,
    accepts: bool,
    asked: Arc<AtomicUsize>,
}

impl Stub {
    fn new(name: &'static str, accepts: bool) -> (Self, Arc<AtomicUsize>) {
        let asked = Arc::new(AtomicUsize::new(0));
        (
            Self {
                name,
                accepts,
                asked: Arc::clone(&asked),
            },
            asked,
        )
    }
}

impl Denormalizer for Stub {
    type Output = &'static str;

    fn supports(&self, _config: &Value) -> bool {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.accepts
    }

    fn denormalize(&self, _config: &Value) -> Result<&'static str> {
        Ok(self.name)
    }
}

/// Accepts integers and doubles them.
struct Doubler;

impl Denormalizer for Doubler {
    type Output = i64;

    fn supports(&self, config: &Value) -> bool {
        config.is_i64()
    }

    fn denormalize(&self, config: &Value) -> Result<i64> {
        config
            .as_i64()
            .map(|n| n * 2)
            .ok_or_else(|| TriggerError::unsupported(config, "not an integer"))
    }
}

fn yaml(text: &str) -> Value {
    serde_yaml::from_str(text).unwrap()
}

// -- PriorityDenormalizer ----------------------------------------------

#[test]
fn higher_priority_is_tried_first() {
    let (a, a_asked) = Stub::new("a", false);
    let (b, b_asked) = Stub::new("b", true);
    let registry = PriorityDenormalizer::builder().register(b, 0).register(a, 1).build();

    assert_eq!(registry.denormalize(&yaml("{}")).unwrap(), "b");
    assert_eq!(a_asked.load(Ordering::SeqCst), 1);
    assert_eq!(b_asked.load(Ordering::SeqCst), 1);
}

#[test]
fn first_supporting_converter_wins() {
    let (high, _) = Stub::new("high", true);
    let (low, low_asked) = Stub::new("low", true);
    let registry = PriorityDenormalizer::builder().register(low, -5).register(high, 5).build();

    assert_eq!(registry.denormalize(&yaml("x: 1")).unwrap(), "high");
    assert_eq!(low_asked.load(Ordering::SeqCst), 0);
}

#[test]
fn equal_priorities_keep_registration_order() {
    let (first, _) = Stub::new("first", true);
    let (second, _) = Stub::new("second", true);
    let (top, _) = Stub::new("top", false);
    let registry = PriorityDenormalizer::builder()
        .register(first, 0)
        .register(top, 3)
        .register(second, 0)
        .build();

    assert_eq!(registry.priorities(), vec![3, 0, 0]);
    assert_eq!(registry.denormalize(&Value::Null).unwrap(), "first");
}

#[test]
fn unsupported_when_nothing_supports() {
    let (a, _) = Stub::new("a", false);
    let (b, _) = Stub::new("b", false);
    let registry = PriorityDenormalizer::builder().register(a, 1).register(b, 0).build();
    let config = yaml("every: soon");

    assert!(!registry.supports(&config));
    match registry.denormalize(&config) {
        Err(TriggerError::Unsupported { config: reported, reason }) => {
            assert_eq!(reported, config);
            assert_eq!(reason, "no denormalizer available");
        }
        other => panic!("expected Unsupported, got {:?}", other),
    }
}

#[test]
fn empty_registry_supports_nothing() {
    let registry: PriorityDenormalizer<i64> = PriorityDenormalizer::builder().build();
    assert!(registry.is_empty());
    assert!(!registry.supports(&Value::Null));
    assert!(registry.denormalize(&Value::Null).is_err());
}

#[test]
fn registry_supports_if_any_entry_does() {
    let (a, _) = Stub::new("a", false);
    let (b, _) = Stub::new("b", true);
    let registry = PriorityDenormalizer::builder().register(a, 1).register(b, 0).build();
    assert_eq!(registry.len(), 2);
    assert!(registry.supports(&Value::Null));
}

#[test]
fn registries_nest() {
    let inner = PriorityDenormalizer::builder().register(Doubler, 0).build();
    let outer = PriorityDenormalizer::builder().register(Arc::new(inner), 0).build();
    assert_eq!(outer.denormalize(&yaml("21")).unwrap(), 42);
}

// -- ListDenormalizer --------------------------------------------------

#[test]
fn list_converts_every_item() {
    let list = ListDenormalizer::new(Doubler);
    let config = yaml("[1, 2, 3]");
    assert!(list.supports(&config));
    assert_eq!(list.denormalize(&config).unwrap(), vec![2, 4, 6]);
}

#[test]
fn list_names_first_unconvertible_item() {
    let list = ListDenormalizer::new(Doubler);
    let config = yaml("[1, two, three]");
    assert!(!list.supports(&config));
    match list.denormalize(&config) {
        Err(TriggerError::Unsupported { config, reason }) => {
            assert_eq!(config, Value::String("two".into()));
            assert_eq!(reason, "list item cannot be denormalized");
        }
        other => panic!("expected Unsupported, got {:?}", other),
    }
}

#[test]
fn list_checks_everything_before_converting() {
    let (stub, asked) = Stub::new("x", true);
    let list = ListDenormalizer::new(&stub);
    assert_eq!(list.denormalize(&yaml("[a, b]")).unwrap(), vec!["x", "x"]);
    assert_eq!(asked.load(Ordering::SeqCst), 2);
}

#[test]
fn list_rejects_non_sequences() {
    let list = ListDenormalizer::new(Doubler);
    assert!(!list.supports(&yaml("5")));
    assert!(matches!(
        list.denormalize(&yaml("5")),
        Err(TriggerError::Unsupported { .. })
    ));
}

#[test]
fn empty_list_is_supported() {
    let list = ListDenormalizer::new(Doubler);
    assert!(list.supports(&yaml("[]")));
    assert!(list.denormalize(&yaml("[]")).unwrap().is_empty());
}

// -- MapDenormalizer ---------------------------------------------------

#[test]
fn map_keeps_document_order() {
    let map = MapDenormalizer::new(Doubler);
    let config = yaml("zeta: 1\nalpha: 2\nmid: 3");
    assert!(map.supports(&config));

    let converted = map.denormalize(&config).unwrap();
    let keys: Vec<&str> = converted.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    assert_eq!(converted["alpha"], 4);
}

#[test]
fn map_rejects_unconvertible_values() {
    let map = MapDenormalizer::new(Doubler);
    let config = yaml("a: 1\nb: nope");
    assert!(!map.supports(&config));
    match map.denormalize(&config) {
        Err(TriggerError::Unsupported { config, .. }) => assert_eq!(config, Value::String("nope".into())),
        other => panic!("expected Unsupported, got {:?}", other),
    }
}

#[test]
fn map_rejects_non_string_keys() {
    let map = MapDenormalizer::new(Doubler);
    let config = yaml("1: 1");
    assert!(!map.supports(&config));
    assert!(map.denormalize(&config).is_err());
}
