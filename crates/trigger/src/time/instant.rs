//! Millisecond instants, times of day and roll-forward arithmetic.

use std::fmt;

use chrono::{
    DateTime, FixedOffset, Local, LocalResult, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone,
    Timelike, Utc,
};
use chrono_tz::Tz;

use crate::error::{Result, TriggerError};

/// Milliseconds in one calendar day.
pub const MS_PER_DAY: i64 = 86_400_000;

/// Accepted clock layouts after any `am`/`pm` suffix is stripped.
const CLOCK_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

/// A point in time as milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(i64);

impl Instant {
    /// The Unix epoch.
    pub const EPOCH: Instant = Instant(0);

    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Signed milliseconds from `self` until `later` (negative if `later` is earlier).
    pub fn millis_until(self, later: Instant) -> i64 {
        later.0.saturating_sub(self.0)
    }

    /// Shift by a signed number of milliseconds, saturating at the bounds.
    pub fn add_millis(self, millis: i64) -> Instant {
        Instant(self.0.saturating_add(millis))
    }

    /// Calendar decomposition in UTC.
    ///
    /// Returns `None` only for instants outside chrono's representable range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }

    /// Calendar decomposition in the given time zone.
    pub fn to_datetime_in<Z: TimeZone>(self, tz: &Z) -> Option<DateTime<Z>> {
        self.to_datetime().map(|utc| utc.with_timezone(tz))
    }
}

impl<Z: TimeZone> From<DateTime<Z>> for Instant {
    fn from(value: DateTime<Z>) -> Self {
        Instant(value.timestamp_millis())
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
            None => write!(f, "{}ms", self.0),
        }
    }
}

/// Time zone that times of day are interpreted in.
///
/// `Local` and `Named` are resolved per calendar date, so a daily trigger keeps
/// its wall-clock time across daylight-saving changes. `Fixed` never shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// The host's local time zone.
    Local,
    Fixed(FixedOffset),
    /// An IANA zone such as `Europe/Berlin`.
    Named(Tz),
}

impl From<FixedOffset> for Zone {
    fn from(offset: FixedOffset) -> Self {
        Zone::Fixed(offset)
    }
}

impl From<Tz> for Zone {
    fn from(tz: Tz) -> Self {
        Zone::Named(tz)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Local => f.write_str("local"),
            Zone::Fixed(offset) => write!(f, "{}", offset),
            Zone::Named(tz) => f.write_str(tz.name()),
        }
    }
}

/// A wall-clock time of day in a [`Zone`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    pub time: NaiveTime,
    pub zone: Zone,
}

impl TimeOfDay {
    pub fn new(time: NaiveTime, zone: impl Into<Zone>) -> Self {
        Self {
            time,
            zone: zone.into(),
        }
    }

    /// Milliseconds after local midnight. Leap seconds clamp to the last millisecond.
    fn millis_from_midnight(&self) -> i64 {
        let millis = (self.time.nanosecond() / 1_000_000).min(999);
        i64::from(self.time.num_seconds_from_midnight()) * 1_000 + i64::from(millis)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.zone {
            Zone::Fixed(offset) => write!(f, "{}{}", self.time.format("%H:%M:%S%.3f"), offset),
            zone => write!(f, "{} {}", self.time.format("%H:%M:%S%.3f"), zone),
        }
    }
}

/// Parse a time-of-day string in the given zone.
///
/// Accepts `HH:MM`, `HH:MM:SS`, `HH:MM:SS.fff`, 12-hour forms with an
/// `am`/`pm` suffix (`7pm`, `7:30 pm`, `7:30:15am`) and the words `noon` and
/// `midnight`. Matching is case-insensitive and ignores surrounding whitespace.
pub fn parse_time_of_day(input: &str, zone: impl Into<Zone>) -> Result<TimeOfDay> {
    let zone = zone.into();
    parse_naive_time(input)
        .map(|time| TimeOfDay::new(time, zone))
        .ok_or_else(|| TriggerError::InvalidInstant(input.to_string()))
}

fn parse_naive_time(input: &str) -> Option<NaiveTime> {
    let text = input.trim().to_ascii_lowercase();
    match text.as_str() {
        "noon" => return NaiveTime::from_hms_opt(12, 0, 0),
        "midnight" => return NaiveTime::from_hms_opt(0, 0, 0),
        _ => {}
    }

    let (clock, meridiem) = split_meridiem(&text);
    match meridiem {
        None => parse_clock(clock),
        Some(pm) => {
            let time = if is_bare_hour(clock) {
                NaiveTime::from_hms_opt(clock.parse().ok()?, 0, 0)?
            } else {
                parse_clock(clock)?
            };
            let hour = time.hour();
            if hour == 0 || hour > 12 {
                return None;
            }
            time.with_hour(hour % 12 + if pm { 12 } else { 0 })
        }
    }
}

/// Split a trailing `am`/`pm`; `Some(true)` means pm.
fn split_meridiem(text: &str) -> (&str, Option<bool>) {
    if let Some(rest) = text.strip_suffix("am") {
        (rest.trim_end(), Some(false))
    } else if let Some(rest) = text.strip_suffix("pm") {
        (rest.trim_end(), Some(true))
    } else {
        (text, None)
    }
}

fn is_bare_hour(clock: &str) -> bool {
    !clock.is_empty() && clock.len() <= 2 && clock.bytes().all(|b| b.is_ascii_digit())
}

fn parse_clock(clock: &str) -> Option<NaiveTime> {
    CLOCK_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(clock, format).ok())
}

/// Next occurrence of `time_of_day` strictly after `now`.
///
/// The time of day is placed on `now`'s calendar date in the time of day's
/// zone; if that is not after `now`, it moves to the following day. Rolling an
/// already rolled value against the same `now` yields the same instant.
///
/// Around daylight-saving changes a repeated wall-clock time resolves to its
/// first occurrence, and a skipped one is shifted forward by the length of
/// the gap.
pub fn roll_forward(time_of_day: &TimeOfDay, now: Instant) -> Instant {
    match time_of_day.zone {
        Zone::Fixed(offset) => roll_forward_fixed(time_of_day, offset, now),
        Zone::Local => roll_forward_in(&Local, time_of_day, now),
        Zone::Named(tz) => roll_forward_in(&tz, time_of_day, now),
    }
}

fn roll_forward_fixed(time_of_day: &TimeOfDay, offset: FixedOffset, now: Instant) -> Instant {
    let offset_ms = i64::from(offset.local_minus_utc()) * 1_000;
    let local_now = now.as_millis().saturating_add(offset_ms);
    let local_midnight = local_now.div_euclid(MS_PER_DAY) * MS_PER_DAY;

    let candidate = Instant::from_millis(local_midnight + time_of_day.millis_from_midnight() - offset_ms);
    if candidate <= now {
        candidate.add_millis(MS_PER_DAY)
    } else {
        candidate
    }
}

fn roll_forward_in<Z: TimeZone>(tz: &Z, time_of_day: &TimeOfDay, now: Instant) -> Instant {
    let fallback = || roll_forward_fixed(time_of_day, current_offset(tz, now), now);
    let Some(local_now) = now.to_datetime_in(tz) else {
        return fallback();
    };

    // A DST shift moves a wall-clock time by hours, never by a day, so one of
    // the next three dates is always strictly after `now`.
    local_now
        .date_naive()
        .iter_days()
        .take(3)
        .filter_map(|date| resolve_local(tz, date.and_time(time_of_day.time)))
        .find(|candidate| *candidate > now)
        .unwrap_or_else(fallback)
}

/// Map a wall-clock reading in `tz` to an instant.
fn resolve_local<Z: TimeZone>(tz: &Z, local: NaiveDateTime) -> Option<Instant> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(at) => Some(Instant::from(at)),
        LocalResult::Ambiguous(first, _) => Some(Instant::from(first)),
        LocalResult::None => {
            // Skipped by a forward shift: read it with the offset in force before the gap.
            let before = tz
                .offset_from_utc_datetime(&(local - TimeDelta::days(1)))
                .fix()
                .local_minus_utc();
            Some(Instant::from(local.and_utc()).add_millis(-i64::from(before) * 1_000))
        }
    }
}

fn current_offset<Z: TimeZone>(tz: &Z, now: Instant) -> FixedOffset {
    now.to_datetime_in(tz)
        .map(|at| at.offset().fix())
        .unwrap_or_else(|| Utc.fix())
}
