// Copyright 2025 the TickPlan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel scales for axes.
//!
//! A [`Scale`] maps domain values onto an axis' pixel range and enumerates its
//! native tick values. Continuous scales (linear, sqrt, log, time) follow the
//! usual "nice" tick conventions; band scales reserve one pixel interval per
//! category. Bar charts and histograms shrink the usable range by a bandwidth
//! so bars fit inside the axis.

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::axis::TickValue;
use crate::domain::{Domain, XDomain, YDomain};
use crate::time::{self, TimeZone};

/// Tick count used when an axis does not ask for one.
pub const DEFAULT_TICK_COUNT: usize = 10;

const MAX_TICKS: f64 = 10_000.0;

/// The kind of mapping a domain uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ScaleType {
    /// Continuous linear mapping.
    #[default]
    Linear,
    /// Continuous base-10 logarithmic mapping.
    Log,
    /// Continuous square-root mapping.
    Sqrt,
    /// Continuous mapping over epoch milliseconds with calendar ticks.
    Time,
    /// Discrete categories, one band each.
    Ordinal,
}

/// How bars are laid out on the X axis.
///
/// These inputs only matter for band domains (bar charts, histograms).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BarLayout {
    /// Number of bars drawn side by side within one band.
    pub total_bars_in_cluster: usize,
    /// Fraction of each band left empty between bars, in `[0, 1)`.
    pub bars_padding: f64,
    /// Whether bars should span whole intervals (histogram mode).
    pub histogram_mode: bool,
}

impl BarLayout {
    /// Creates a layout with `total_bars_in_cluster` bars per band and no padding.
    #[must_use]
    pub fn new(total_bars_in_cluster: usize) -> Self {
        Self {
            total_bars_in_cluster,
            ..Self::default()
        }
    }

    /// Sets the bar padding.
    #[must_use]
    pub fn with_bars_padding(mut self, bars_padding: f64) -> Self {
        self.bars_padding = bars_padding;
        self
    }

    /// Enables or disables histogram mode.
    #[must_use]
    pub fn with_histogram_mode(mut self, histogram_mode: bool) -> Self {
        self.histogram_mode = histogram_mode;
        self
    }
}

/// A resolved pixel scale.
#[derive(Clone, Debug, PartialEq)]
pub enum Scale {
    /// Continuous scale over numbers (or epoch milliseconds).
    Continuous(ScaleContinuous),
    /// Band scale over categories.
    Band(ScaleBand),
}

impl Scale {
    /// Returns the scale type.
    #[must_use]
    pub fn scale_type(&self) -> ScaleType {
        match self {
            Self::Continuous(s) => s.scale_type,
            Self::Band(_) => ScaleType::Ordinal,
        }
    }

    /// Returns the domain the scale maps from.
    #[must_use]
    pub fn domain(&self) -> Domain {
        match self {
            Self::Continuous(s) => Domain::Continuous(s.domain.0, s.domain.1),
            Self::Band(s) => Domain::Ordinal(s.domain.clone()),
        }
    }

    /// Returns the `(start, end)` pixel range.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Continuous(s) => s.range,
            Self::Band(s) => s.range,
        }
    }

    /// Returns the width of one bar, or `0` for plain continuous scales.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        match self {
            Self::Continuous(s) => s.bandwidth,
            Self::Band(s) => s.bandwidth,
        }
    }

    /// Returns the bar padding fraction.
    #[must_use]
    pub fn bars_padding(&self) -> f64 {
        match self {
            Self::Continuous(s) => s.bars_padding,
            Self::Band(s) => s.bars_padding,
        }
    }

    /// Returns the smallest gap between data points, or `0` when unknown.
    #[must_use]
    pub fn min_interval(&self) -> f64 {
        match self {
            Self::Continuous(s) => s.min_interval,
            Self::Band(_) => 0.0,
        }
    }

    /// Returns `true` when the scale represents a single datum.
    #[must_use]
    pub fn is_single_value(&self) -> bool {
        match self {
            Self::Continuous(s) => s.is_single_value(),
            Self::Band(s) => s.domain.len() < 2,
        }
    }

    /// Returns the native tick values, in domain order.
    #[must_use]
    pub fn ticks(&self) -> Vec<TickValue> {
        match self {
            Self::Continuous(s) => s.ticks().into_iter().map(TickValue::Number).collect(),
            Self::Band(s) => s.domain.clone(),
        }
    }

    /// Maps a value to its pixel position.
    ///
    /// Returns `None` for values the scale cannot place (a category missing
    /// from a band scale, or a category on a continuous scale).
    #[must_use]
    pub fn scale(&self, value: &TickValue) -> Option<f64> {
        match self {
            Self::Continuous(s) => value.as_f64().map(|v| s.scale(v)),
            Self::Band(s) => s.scale(value),
        }
    }
}

/// A continuous scale.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleContinuous {
    scale_type: ScaleType,
    domain: (f64, f64),
    range: (f64, f64),
    bandwidth: f64,
    bandwidth_padding: f64,
    bars_padding: f64,
    min_interval: f64,
    total_bars_in_cluster: usize,
    tick_count: usize,
    integers_only: bool,
    time_zone: Option<TimeZone>,
    single_value_histogram: bool,
}

impl ScaleContinuous {
    /// Creates a scale mapping `domain` onto `range`.
    ///
    /// `ScaleType::Ordinal` is treated as linear.
    #[must_use]
    pub fn new(scale_type: ScaleType, domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            scale_type: match scale_type {
                ScaleType::Ordinal => ScaleType::Linear,
                other => other,
            },
            domain,
            range,
            bandwidth: 0.0,
            bandwidth_padding: 0.0,
            bars_padding: 0.0,
            min_interval: 0.0,
            total_bars_in_cluster: 1,
            tick_count: DEFAULT_TICK_COUNT,
            integers_only: false,
            time_zone: None,
            single_value_histogram: false,
        }
    }

    /// Sets the full band width and the fraction of it left as padding.
    ///
    /// The reported [`bandwidth`](Self::bandwidth) excludes the padding.
    #[must_use]
    pub fn with_bandwidth(mut self, bandwidth: f64, bars_padding: f64) -> Self {
        let bars_padding = clamp_padding(bars_padding);
        self.bandwidth = bandwidth * (1.0 - bars_padding);
        self.bandwidth_padding = bandwidth * bars_padding;
        self.bars_padding = bars_padding;
        self
    }

    /// Sets the smallest gap between data points.
    #[must_use]
    pub fn with_min_interval(mut self, min_interval: f64) -> Self {
        self.min_interval = min_interval;
        self
    }

    /// Sets the number of bars per band.
    #[must_use]
    pub fn with_total_bars_in_cluster(mut self, total_bars_in_cluster: usize) -> Self {
        self.total_bars_in_cluster = total_bars_in_cluster;
        self
    }

    /// Sets the requested tick count.
    #[must_use]
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Keeps only integral ticks when enabled.
    #[must_use]
    pub fn with_integers_only(mut self, integers_only: bool) -> Self {
        self.integers_only = integers_only;
        self
    }

    /// Aligns time ticks to wall-clock boundaries in `time_zone`.
    #[must_use]
    pub fn with_time_zone(mut self, time_zone: Option<TimeZone>) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Marks the scale as a histogram over a single datum.
    #[must_use]
    pub fn with_single_value_histogram(mut self, single_value_histogram: bool) -> Self {
        self.single_value_histogram = single_value_histogram;
        self
    }

    /// Returns the `(min, max)` domain.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the bar width (padding excluded).
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Returns `true` for a single-datum domain.
    #[must_use]
    pub fn is_single_value(&self) -> bool {
        self.single_value_histogram || self.domain.0 == self.domain.1
    }

    fn transform(&self, x: f64) -> f64 {
        match self.scale_type {
            ScaleType::Log => x.ln(),
            ScaleType::Sqrt => {
                if x < 0.0 {
                    -(-x).sqrt()
                } else {
                    x.sqrt()
                }
            }
            _ => x,
        }
    }

    fn map(&self, x: f64) -> f64 {
        let d0 = self.transform(self.domain.0);
        let d1 = self.transform(self.domain.1);
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span == 0.0 {
            0.5
        } else {
            (self.transform(x) - d0) / span
        };
        r0 * (1.0 - t) + r1 * t
    }

    /// Maps `value` into pixel space, shifted by half the bar padding of the cluster.
    #[must_use]
    pub fn scale(&self, value: f64) -> f64 {
        self.map(value) + (self.bandwidth_padding / 2.0) * self.total_bars_in_cluster as f64
    }

    /// Returns the native tick values.
    #[must_use]
    pub fn ticks(&self) -> Vec<f64> {
        let (d0, d1) = self.domain;
        let mut ticks = match self.scale_type {
            ScaleType::Time => time::time_ticks(d0, d1, self.tick_count, self.time_zone),
            ScaleType::Log => log_ticks(d0, d1, self.tick_count),
            _ => linear_ticks(d0, d1, self.tick_count),
        };
        if self.integers_only {
            ticks.retain(|t| t.floor() == *t);
        }
        ticks
    }
}

/// A band scale: one evenly spaced pixel interval per category.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleBand {
    domain: Vec<TickValue>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    bars_padding: f64,
    step: f64,
    start: f64,
    bandwidth: f64,
    bandwidth_padding: f64,
}

impl ScaleBand {
    /// Creates an unpadded band scale over `domain`.
    #[must_use]
    pub fn new(domain: Vec<TickValue>, range: (f64, f64)) -> Self {
        let mut scale = Self {
            domain,
            range,
            padding_inner: 0.0,
            padding_outer: 0.0,
            bars_padding: 0.0,
            step: 0.0,
            start: 0.0,
            bandwidth: 0.0,
            bandwidth_padding: 0.0,
        };
        scale.rescale();
        scale
    }

    /// Pads bands by `bars_padding` between them and half of it at both ends.
    #[must_use]
    pub fn with_bars_padding(mut self, bars_padding: f64) -> Self {
        let bars_padding = clamp_padding(bars_padding);
        self.bars_padding = bars_padding;
        self.padding_inner = bars_padding;
        self.padding_outer = bars_padding / 2.0;
        self.rescale();
        self
    }

    /// Overrides the bar width; the bar padding is carved out of it.
    #[must_use]
    pub fn with_bandwidth(mut self, bandwidth: f64) -> Self {
        self.bandwidth = bandwidth * (1.0 - self.bars_padding);
        self.bandwidth_padding = bandwidth * self.bars_padding;
        self
    }

    fn rescale(&mut self) {
        let n = self.domain.len() as f64;
        let (r0, r1) = self.range;
        let (lo, hi) = if r1 < r0 { (r1, r0) } else { (r0, r1) };
        let step = (hi - lo) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        self.start = lo + (hi - lo - step * (n - self.padding_inner)) * 0.5;
        self.step = step;
        self.bandwidth = step * (1.0 - self.padding_inner);
        self.bandwidth_padding = 0.0;
    }

    /// Returns the categories.
    #[must_use]
    pub fn domain(&self) -> &[TickValue] {
        &self.domain
    }

    /// Returns the bar width.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Returns the distance between the starts of adjacent bands.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Returns the start of the band for `value`.
    #[must_use]
    pub fn scale(&self, value: &TickValue) -> Option<f64> {
        let index = self.domain.iter().position(|d| d == value)?;
        let slot = if self.range.1 < self.range.0 {
            self.domain.len() - 1 - index
        } else {
            index
        };
        Some(self.start + self.step * slot as f64)
    }
}

fn clamp_padding(padding: f64) -> f64 {
    if padding.is_finite() {
        padding.clamp(0.0, 0.99)
    } else {
        0.0
    }
}

/// Builds the scale for an X axis over `range`.
///
/// - Ordinal domains get a band scale whose bandwidth is
///   `|range| / (categories × max(total_bars_in_cluster, 1))`.
/// - Band continuous domains (bars, histograms) pull the range end in by one
///   interval's width so the last bar fits; the reported bandwidth is split
///   between the bars of a cluster. In histogram mode a single-datum domain is
///   widened to one `min_interval`.
/// - Anything else is a plain continuous scale with zero bandwidth.
#[must_use]
pub fn compute_x_scale(
    x_domain: &XDomain,
    bars: BarLayout,
    range: (f64, f64),
    tick_count: usize,
    integers_only: bool,
) -> Scale {
    let (r0, r1) = range;
    let range_diff = (r1 - r0).abs();
    let total_bars = bars.total_bars_in_cluster;

    let (d0, d1) = match &x_domain.domain {
        Domain::Ordinal(categories) => {
            let bandwidth = range_diff / (categories.len() as f64 * total_bars.max(1) as f64);
            let scale = ScaleBand::new(categories.clone(), range)
                .with_bars_padding(bars.bars_padding)
                .with_bandwidth(bandwidth);
            return Scale::Band(scale);
        }
        Domain::Continuous(d0, d1) => (*d0, *d1),
    };

    let base = |domain: (f64, f64), range: (f64, f64)| {
        ScaleContinuous::new(x_domain.scale_type, domain, range)
            .with_min_interval(x_domain.min_interval)
            .with_time_zone(x_domain.time_zone)
            .with_tick_count(tick_count)
            .with_integers_only(integers_only)
    };

    if !x_domain.is_band_scale {
        return Scale::Continuous(base((d0, d1), range).with_total_bars_in_cluster(total_bars));
    }

    let min_interval = x_domain.min_interval;
    let single_value_histogram = bars.histogram_mode && d1 - d0 == 0.0;
    let adjusted_max = if single_value_histogram {
        d0 + min_interval
    } else {
        d1
    };
    let interval_count = if min_interval > 0.0 {
        (adjusted_max - d0) / min_interval
    } else {
        0.0
    };
    let interval_offset = if single_value_histogram { 0.0 } else { 1.0 };
    let slots = interval_count + interval_offset;
    let bandwidth = if slots > 0.0 {
        range_diff / slots
    } else {
        range_diff
    };

    let is_inverse = r1 < r0;
    let start = if is_inverse { r0 - bandwidth } else { r0 };
    let end = if is_inverse { r1 } else { r1 - bandwidth };
    let bar_width = if total_bars > 0 {
        bandwidth / total_bars as f64
    } else {
        bandwidth
    };

    Scale::Continuous(
        base((d0, adjusted_max), (start, end))
            .with_bandwidth(bar_width, bars.bars_padding)
            .with_total_bars_in_cluster(total_bars)
            .with_single_value_histogram(single_value_histogram),
    )
}

/// Builds the continuous scale for a Y axis over `range`.
#[must_use]
pub fn compute_y_scale(
    y_domain: &YDomain,
    range: (f64, f64),
    tick_count: usize,
    integers_only: bool,
) -> Scale {
    Scale::Continuous(
        ScaleContinuous::new(y_domain.scale_type, y_domain.domain, range)
            .with_tick_count(tick_count)
            .with_integers_only(integers_only),
    )
}

// Error thresholds for picking a 10/5/2/1 step multiplier: √50, √10, √2.
const E10: f64 = 7.0710678118654755;
const E5: f64 = 3.1622776601683795;
const E2: f64 = core::f64::consts::SQRT_2;

/// JavaScript-style rounding: halves round towards positive infinity.
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Returns `(i1, i2, inc)`: ticks are `i * inc` for `i` in `i1..=i2`, or
/// `i / -inc` when `inc` is negative (exact decimal steps below 1).
fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(f64, f64, f64)> {
    let step = (stop - start) / count.max(0.0);
    if !(step.is_finite() && step > 0.0) {
        return None;
    }
    let power = step.log10().floor().clamp(-300.0, 300.0);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "power is clamped to a small integral range"
    )]
    let power_i = power as i32;
    let error = step / 10_f64.powi(power_i);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power_i < 0 {
        let inv = 10_f64.powi(-power_i) / factor;
        i1 = round_half_up(start * inv);
        i2 = round_half_up(stop * inv);
        if i1 / inv < start {
            i1 += 1.0;
        }
        if i2 / inv > stop {
            i2 -= 1.0;
        }
        inc = -inv;
    } else {
        inc = 10_f64.powi(power_i) * factor;
        i1 = round_half_up(start / inc);
        i2 = round_half_up(stop / inc);
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    Some((i1, i2, inc))
}

/// Returns the signed tick step for `[start, stop]`, or `0` when undefined.
pub(crate) fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let Some((_, _, inc)) = tick_spec(lo, hi, count as f64) else {
        return 0.0;
    };
    let step = if inc < 0.0 { 1.0 / -inc } else { inc };
    if reverse { -step } else { step }
}

/// Returns "nice" linear tick values: multiples of 1, 2 or 5 times a power of ten.
///
/// Ticks stay inside `[start, stop]` and follow its direction. Decimal steps
/// are produced by division, so `[0, 1]` yields exactly `0.1, 0.2, 0.3, …`.
#[must_use]
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return alloc::vec![start];
    }
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let Some((i1, i2, inc)) = tick_spec(lo, hi, count as f64) else {
        return Vec::new();
    };
    if !(i2 >= i1) {
        return Vec::new();
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "non-negative and capped at MAX_TICKS"
    )]
    let n = (i2 - i1).min(MAX_TICKS) as usize + 1;
    let value = |i: f64| if inc < 0.0 { i / -inc } else { i * inc };
    if reverse {
        (0..n).map(|k| value(i2 - k as f64)).collect()
    } else {
        (0..n).map(|k| value(i1 + k as f64)).collect()
    }
}

/// Returns the powers of ten inside the domain, capped at `count` values.
fn log_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let (lo, hi) = if stop < start {
        (stop, start)
    } else {
        (start, stop)
    };
    if !(lo > 0.0) || !hi.is_finite() || count == 0 {
        return Vec::new();
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "exponents of finite positive f64 values fit in i32"
    )]
    let (min_e, max_e) = (lo.log10().floor() as i32, hi.log10().ceil() as i32);
    let mut out: Vec<f64> = (min_e..=max_e)
        .map(|e| 10_f64.powi(e))
        .filter(|v| *v >= lo && *v <= hi)
        .take(count)
        .collect();
    if stop < start {
        out.reverse();
    }
    out
}
