// Copyright 2025 the TickPlan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time zones, calendar-aligned time ticks and time tick formatters.
//!
//! Time values are epoch **milliseconds**. Ticks snap to UTC calendar intervals
//! (seconds through years). When a time zone is configured, ticks are computed
//! on a domain shifted into that zone and shifted back, so they land on local
//! wall-clock boundaries.

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt::{self, Write as _};
use core::str::FromStr;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, Utc};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::axis::TickValue;
use crate::error::LayoutError;
use crate::scale::tick_step;
use crate::ticks::{TickFormatOptions, TickFormatter};

const SECOND: f64 = 1_000.0;
const MINUTE: f64 = 60.0 * SECOND;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const WEEK: f64 = 7.0 * DAY;
const MONTH: f64 = 30.0 * DAY;
const YEAR: f64 = 365.0 * DAY;

/// 1970-01-04, the first Sunday after the epoch.
const SUNDAY_PHASE: f64 = 3.0 * DAY;

const MAX_TICKS: usize = 10_000;

/// A fixed UTC offset used to compute and label time ticks.
///
/// Parsed from `utc`, `UTC`, `utc+3`, `utc-03:30`, `+02:00` and friends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct TimeZone {
    offset_seconds: i32,
}

impl TimeZone {
    /// Coordinated Universal Time.
    pub const UTC: Self = Self { offset_seconds: 0 };

    /// Creates a zone east of UTC by `offset_seconds`.
    ///
    /// Returns `None` when the offset is a day or more.
    #[must_use]
    pub fn from_offset_seconds(offset_seconds: i32) -> Option<Self> {
        FixedOffset::east_opt(offset_seconds).map(|_| Self { offset_seconds })
    }

    /// Returns the offset east of UTC in seconds.
    #[must_use]
    pub fn offset_seconds(&self) -> i32 {
        self.offset_seconds
    }

    /// Parses a zone description.
    pub fn parse(input: &str) -> Result<Self, LayoutError> {
        let invalid = || LayoutError::InvalidTimeZone {
            time_zone: input.into(),
        };
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid());
        }
        let rest = match trimmed.get(..3) {
            Some(prefix) if prefix.eq_ignore_ascii_case("utc") => &trimmed[3..],
            _ if trimmed.eq_ignore_ascii_case("z") => "",
            _ => trimmed,
        };
        if rest.is_empty() {
            return Ok(Self::UTC);
        }

        let (sign, digits) = if let Some(digits) = rest.strip_prefix('+') {
            (1, digits)
        } else if let Some(digits) = rest.strip_prefix('-') {
            (-1, digits)
        } else {
            return Err(invalid());
        };
        let (hours, minutes) = match digits.split_once(':') {
            Some((h, m)) if m.len() == 2 => (h, m),
            Some(_) => return Err(invalid()),
            None if digits.len() == 4 => digits.split_at(2),
            None => (digits, "0"),
        };
        let (Some(hours), Some(minutes)) = (offset_field(hours), offset_field(minutes)) else {
            return Err(invalid());
        };
        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }
        Self::from_offset_seconds(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
    }

    fn fixed_offset(self) -> FixedOffset {
        match FixedOffset::east_opt(self.offset_seconds) {
            Some(offset) => offset,
            None => Utc.fix(),
        }
    }

    fn offset_millis(self) -> f64 {
        f64::from(self.offset_seconds) * SECOND
    }
}

impl Default for TimeZone {
    fn default() -> Self {
        Self::UTC
    }
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.offset_seconds == 0 {
            return f.write_str("utc");
        }
        let sign = if self.offset_seconds < 0 { '-' } else { '+' };
        let total = self.offset_seconds.unsigned_abs();
        write!(f, "utc{sign}{:02}:{:02}", total / 3600, (total / 60) % 60)
    }
}

impl FromStr for TimeZone {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TimeZone {
    type Error = LayoutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TimeZone> for String {
    fn from(value: TimeZone) -> Self {
        value.to_string()
    }
}

fn offset_field(digits: &str) -> Option<i32> {
    if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[derive(Clone, Copy, Debug)]
enum Unit {
    Fixed,
    Week,
    Month,
    Year,
}

/// `(unit, every, approximate duration)`, ordered by duration.
const TICK_INTERVALS: [(Unit, u32, f64); 18] = [
    (Unit::Fixed, 1, SECOND),
    (Unit::Fixed, 5, 5.0 * SECOND),
    (Unit::Fixed, 15, 15.0 * SECOND),
    (Unit::Fixed, 30, 30.0 * SECOND),
    (Unit::Fixed, 1, MINUTE),
    (Unit::Fixed, 5, 5.0 * MINUTE),
    (Unit::Fixed, 15, 15.0 * MINUTE),
    (Unit::Fixed, 30, 30.0 * MINUTE),
    (Unit::Fixed, 1, HOUR),
    (Unit::Fixed, 3, 3.0 * HOUR),
    (Unit::Fixed, 6, 6.0 * HOUR),
    (Unit::Fixed, 12, 12.0 * HOUR),
    (Unit::Fixed, 1, DAY),
    (Unit::Fixed, 2, 2.0 * DAY),
    (Unit::Week, 1, WEEK),
    (Unit::Month, 1, MONTH),
    (Unit::Month, 3, 3.0 * MONTH),
    (Unit::Year, 1, YEAR),
];

/// Returns calendar-aligned tick values (epoch milliseconds) within `[start, stop]`.
///
/// The interval is the one whose duration is closest (by ratio) to
/// `span / count`. Ticks are aligned to wall-clock boundaries in `time_zone`
/// (UTC when `None`). A reversed domain yields reversed ticks.
pub fn time_ticks(start: f64, stop: f64, count: usize, time_zone: Option<TimeZone>) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    let shift = time_zone.map_or(0.0, TimeZone::offset_millis);
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };

    let mut ticks = utc_ticks(lo + shift, hi + shift, count);
    for tick in &mut ticks {
        *tick -= shift;
    }
    if reverse {
        ticks.reverse();
    }
    ticks
}

fn utc_ticks(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    let target = (hi - lo) / count as f64;
    let i = TICK_INTERVALS.partition_point(|&(_, _, duration)| duration <= target);

    if i == TICK_INTERVALS.len() {
        let every = tick_step(lo / YEAR, hi / YEAR, count).floor();
        return year_ticks(lo, hi, every);
    }
    if i == 0 {
        let step = tick_step(lo, hi, count).max(1.0);
        return fixed_ticks(lo, hi, step, 0.0);
    }

    let (prev, next) = (TICK_INTERVALS[i - 1], TICK_INTERVALS[i]);
    let (unit, every, duration) = if target / prev.2 < next.2 / target {
        prev
    } else {
        next
    };
    match unit {
        Unit::Fixed => fixed_ticks(lo, hi, duration, 0.0),
        Unit::Week => fixed_ticks(lo, hi, duration, SUNDAY_PHASE),
        Unit::Month => month_ticks(lo, hi, every),
        Unit::Year => year_ticks(lo, hi, f64::from(every)),
    }
}

fn fixed_ticks(lo: f64, hi: f64, step: f64, phase: f64) -> Vec<f64> {
    if !(step > 0.0) {
        return Vec::new();
    }
    let first = ((lo - phase) / step).ceil() * step + phase;
    let n_f = ((hi - first) / step).floor();
    if !(n_f >= 0.0) {
        return Vec::new();
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "non-negative and capped at MAX_TICKS"
    )]
    let n = n_f.min(MAX_TICKS as f64) as usize;
    (0..=n).map(|i| first + step * i as f64).collect()
}

fn month_ticks(lo: f64, hi: f64, every: u32) -> Vec<f64> {
    let Some(start) = datetime(lo) else {
        return Vec::new();
    };
    let (mut year, mut month0) = (start.year(), start.month0());
    let mut out = Vec::new();
    while out.len() < MAX_TICKS {
        let Some(t) = month_start(year, month0) else {
            break;
        };
        if t > hi {
            break;
        }
        if t >= lo && month0 % every == 0 {
            out.push(t);
        }
        month0 += 1;
        if month0 == 12 {
            month0 = 0;
            year += 1;
        }
    }
    out
}

fn year_ticks(lo: f64, hi: f64, every: f64) -> Vec<f64> {
    if !(every >= 1.0) || !every.is_finite() {
        return Vec::new();
    }
    let (Some(start), Some(stop)) = (datetime(lo), datetime(hi)) else {
        return Vec::new();
    };
    #[allow(
        clippy::cast_possible_truncation,
        reason = "floored, finite and at least 1; year steps fit in i32"
    )]
    let every = every.min(f64::from(i32::MAX)) as i32;
    (start.year()..=stop.year())
        .filter(|year| year.rem_euclid(every) == 0)
        .filter_map(|year| month_start(year, 0))
        .filter(|t| *t >= lo && *t <= hi)
        .take(MAX_TICKS)
        .collect()
}

fn month_start(year: i32, month0: u32) -> Option<f64> {
    let millis = NaiveDate::from_ymd_opt(year, month0 + 1, 1)?
        .and_hms_opt(0, 0, 0)?
        .and_utc()
        .timestamp_millis();
    Some(millis as f64)
}

fn datetime(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    let millis = millis.round();
    if millis < i64::MIN as f64 || millis > i64::MAX as f64 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, reason = "range checked above")]
    DateTime::from_timestamp_millis(millis as i64)
}

/// Formats `millis` with a `strftime`-style `pattern` in `time_zone` (UTC when `None`).
///
/// Returns `None` for out-of-range timestamps or invalid patterns.
pub fn format_time(millis: f64, pattern: &str, time_zone: Option<TimeZone>) -> Option<String> {
    let offset = time_zone.unwrap_or_default().fixed_offset();
    let local = datetime(millis)?.with_timezone(&offset);
    let mut out = String::new();
    write!(out, "{}", local.format(pattern)).ok()?;
    Some(out)
}

/// Returns a tick formatter rendering epoch milliseconds with `pattern`.
///
/// The zone comes from the [`TickFormatOptions`](crate::TickFormatOptions)
/// passed at format time. Categories are rendered as-is.
pub fn time_formatter(pattern: impl Into<String>) -> TickFormatter {
    let pattern: String = pattern.into();
    Arc::new(move |value: &TickValue, options: &TickFormatOptions| match value {
        TickValue::Number(millis) => format_time(*millis, &pattern, options.time_zone)
            .unwrap_or_else(|| value.to_string()),
        TickValue::Category(category) => category.to_string(),
    })
}

/// Picks a time label pattern from a span expressed in whole days.
#[must_use]
pub fn nice_time_format_by_day(days: f64) -> &'static str {
    if days > 30.0 {
        "%Y-%m-%d"
    } else if days > 7.0 {
        "%B %d"
    } else if days > 1.0 {
        "%m-%d %H:%M"
    } else {
        "%H:%M:%S"
    }
}

/// Returns a [`time_formatter`] whose pattern suits the span of `domain`.
pub fn nice_time_formatter(domain: (f64, f64)) -> TickFormatter {
    let days = ((domain.1 - domain.0) / DAY).trunc();
    time_formatter(nice_time_format_by_day(days))
}
