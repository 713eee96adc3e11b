//! Timer host: plays the role of the GUI event loop around the trigger engine.

use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use tracing::{debug, info};

use desky_trigger::{Instant, PendingTrigger, TriggerError};

/// Wall-clock "now". The trigger engine itself never reads the clock.
pub fn now() -> Instant {
    Instant::from(Utc::now())
}

/// The next `count` activation instants after `now`, simulated without sleeping.
pub fn upcoming(trigger: &PendingTrigger, now: Instant, count: usize) -> Result<Vec<Instant>, TriggerError> {
    let mut active = trigger.activate(now)?;
    let mut clock = now;
    let mut found = Vec::with_capacity(count);

    while found.len() < count {
        let Some(at) = active.next_activation() else {
            break;
        };
        clock = clock.max(at);
        found.push(clock);
        active = active.activate(clock);
    }

    Ok(found)
}

/// Arm a timer for the next activation, log each firing, repeat.
///
/// Stops after `limit` firings or on Ctrl-C and returns the number of firings.
pub async fn run(trigger: &PendingTrigger, limit: Option<usize>) -> Result<usize> {
    let mut active = trigger.activate(now())?;
    let mut fired = 0usize;

    while limit.is_none_or(|limit| fired < limit) {
        let delay = active.millis_until_activation(now()).max(0);
        debug!(delay_ms = delay, next = ?active.next_activation().map(|at| at.to_string()), "arming timer");

        tokio::select! {
            _ = tokio::time::sleep(Duration::from_millis(delay as u64)) => {}
            _ = tokio::signal::ctrl_c() => {
                info!(fired, "interrupted, shutting down");
                return Ok(fired);
            }
        }

        let woke = now();
        if active.is_due(woke) {
            fired += 1;
            let governing = active.earliest(woke);
            info!(firing = fired, at = %woke, kind = governing.kind(), "trigger fired");
        }
        active = active.activate(woke);
    }

    Ok(fired)
}
