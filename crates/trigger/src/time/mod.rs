//! Duration and time-of-day parsing plus millisecond instant arithmetic.
//!
//! Durations are free-form strings such as `"5 minutes 3 seconds"` or `"23ms"`.
//! Times of day are wall-clock strings such as `"07:30"` or `"7:30 pm"`,
//! interpreted in a [`Zone`] and rolled forward to their next
//! occurrence relative to an injected "now".

mod duration;
mod instant;


pub use self::duration::{parse_duration, unit_to_millis};
pub use self::instant::{parse_time_of_day, roll_forward, Instant, TimeOfDay, Zone, MS_PER_DAY};
