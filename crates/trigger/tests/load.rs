//! Integration tests that drive the public API end to end, including the
//! sample configuration in `data/triggers/`.

use chrono::{FixedOffset, TimeZone, Utc};
use desky_trigger::{compare, ActiveTrigger, Instant, PendingTrigger, TriggerLoader};

/// Resolve the sample directory relative to the workspace root.
fn sample_path(filename: &str) -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest.join("../../data/triggers").join(filename)
}

fn loader() -> TriggerLoader {
    TriggerLoader::with_offset(FixedOffset::east_opt(0).unwrap())
}

fn at(h: u32, m: u32) -> Instant {
    Instant::from(Utc.with_ymd_and_hms(2024, 3, 10, h, m, 0).unwrap())
}

#[test]
fn sample_configuration_loads() {
    let trigger = loader()
        .load_file(&sample_path("desk-buddy.yml"))
        .unwrap_or_else(|e| panic!("failed to load sample: {}", e));

    match &trigger {
        PendingTrigger::Composite(children) => {
            let kinds: Vec<&str> = children.iter().map(PendingTrigger::kind).collect();
            assert_eq!(kinds, vec!["interval", "instant", "instant_set", "composite"]);
        }
        other => panic!("expected composite, got {:?}", other),
    }
}

#[test]
fn sample_configuration_schedule() {
    let trigger = loader().load_file(&sample_path("desk-buddy.yml")).unwrap();

    // At 12:10 the 30 minute blink (12:40) loses to lunch at 12:30.
    let now = at(12, 10);
    let active = trigger.activate(now).unwrap();
    assert_eq!(active.next_activation(), Some(at(12, 30)));
    assert!(matches!(active.earliest(now), ActiveTrigger::Instant(_)));
}

#[test]
fn host_loop_fires_in_order() {
    let trigger = loader()
        .load_str("- every: 20 minutes\n- on: '09:30'\n")
        .unwrap();

    let mut now = at(9, 0);
    let mut active = trigger.activate(now).unwrap();
    let mut fired = Vec::new();

    for _ in 0..4 {
        let delay = active.millis_until_activation(now).max(0);
        now = now.add_millis(delay);
        assert!(active.is_due(now));
        fired.push(now);
        active = active.activate(now);
        assert!(active.millis_until_activation(now) > 0);
    }

    assert_eq!(fired, vec![at(9, 20), at(9, 30), at(9, 40), at(10, 0)]);
}

#[test]
fn host_loop_recovers_from_a_long_sleep() {
    let trigger = loader().load_str("- every: 1s\n").unwrap();
    let start = Instant::from_millis(0);
    let active = trigger.activate(start).unwrap();

    // The host oversleeps by several periods.
    let woke = Instant::from_millis(3_500);
    assert!(active.is_due(woke));
    let caught_up = active.activate(woke);
    assert_eq!(caught_up.millis_until_activation(woke), -500);

    let next = caught_up.activate(woke);
    assert_eq!(next.next_activation(), Some(Instant::from_millis(4_000)));
    assert_eq!(
        compare(&next, &caught_up, woke),
        std::cmp::Ordering::Greater
    );
}
