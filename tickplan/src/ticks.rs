// Copyright 2025 the TickPlan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Candidate ticks: values, labels and pixel positions.

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::axis::{AxisSpec, TickValue};
use crate::domain::Domain;
use crate::scale::Scale;
use crate::time::TimeZone;

const MAX_EXTRA_TICKS: f64 = 10_000.0;

/// Context passed to every tick format call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickFormatOptions {
    /// Zone time labels should be rendered in; UTC when `None`.
    pub time_zone: Option<TimeZone>,
}

/// Renders a tick value as a label.
pub type TickFormatter = Arc<dyn Fn(&TickValue, &TickFormatOptions) -> String + Send + Sync>;

/// Returns the formatter that renders values with their `Display` impl.
pub fn default_tick_formatter() -> TickFormatter {
    Arc::new(|value: &TickValue, _: &TickFormatOptions| value.to_string())
}

/// A tick with its label and pixel position along the axis.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisTick {
    /// Domain value.
    pub value: TickValue,
    /// Formatted label (empty when blanked by the overlap filter).
    pub label: String,
    /// Offset along the axis, in chart-local pixels.
    pub position: f64,
}

/// Returns every candidate tick of an axis.
///
/// Ticks are centred on bands, except in histogram mode where they sit on
/// interval edges. Histograms also get ticks past the last native tick so the
/// last interval is closed; a single-datum histogram gets exactly two ticks.
pub fn available_ticks(
    axis_spec: &AxisSpec,
    scale: &Scale,
    total_bars_in_cluster: usize,
    histogram_mode: bool,
    options: &TickFormatOptions,
) -> Vec<AxisTick> {
    let mut values = scale.ticks();
    let bandwidth = scale.bandwidth();
    let min_interval = scale.min_interval();
    let has_additional_ticks = histogram_mode && bandwidth > 0.0;
    let is_single_value = scale.is_single_value();

    let tail = match values.as_slice() {
        [.., penultimate, last] => penultimate.as_f64().zip(last.as_f64()),
        _ => None,
    };
    if let (true, Some((penultimate, last))) = (has_additional_ticks && !is_single_value, tail) {
        let distance = last - penultimate;
        if distance > 0.0 {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "floored, non-negative and capped"
            )]
            let count = (min_interval / distance).floor().clamp(0.0, MAX_EXTRA_TICKS) as usize;
            values.extend((1..=count).map(|i| TickValue::Number(last + i as f64 * distance)));
        }
    }

    let shift = total_bars_in_cluster.max(1) as f64;
    let band = bandwidth / (1.0 - scale.bars_padding());
    let half_padding = (band - bandwidth) / 2.0;
    let offset = if histogram_mode {
        -half_padding
    } else {
        bandwidth * shift / 2.0
    };

    if is_single_value && has_additional_ticks {
        let Domain::Continuous(start, _) = scale.domain() else {
            return Vec::new();
        };
        let first = TickValue::Number(start);
        let first_tick = scale.scale(&first).map(|position| AxisTick {
            label: (axis_spec.tick_format)(&first, options),
            value: first.clone(),
            position: position + offset,
        });
        let next = TickValue::Number(start + min_interval);
        let next_tick = AxisTick {
            label: (axis_spec.tick_format)(&next, options),
            value: next,
            position: bandwidth + half_padding * 2.0,
        };
        return first_tick.into_iter().chain([next_tick]).collect();
    }

    ticks_with_duplicates_policy(axis_spec, &values, scale, offset, options)
}

/// Formats and positions `tick_values`, then collapses runs of identical
/// labels unless the axis shows duplicated ticks.
///
/// Values the scale cannot place are dropped.
pub fn ticks_with_duplicates_policy(
    axis_spec: &AxisSpec,
    tick_values: &[TickValue],
    scale: &Scale,
    offset: f64,
    options: &TickFormatOptions,
) -> Vec<AxisTick> {
    let mut ticks: Vec<AxisTick> = tick_values
        .iter()
        .filter_map(|value| {
            let position = scale.scale(value)? + offset;
            Some(AxisTick {
                value: value.clone(),
                label: (axis_spec.tick_format)(value, options),
                position,
            })
        })
        .collect();
    if !axis_spec.show_duplicated_ticks {
        ticks.dedup_by(|next, prev| next.label == prev.label);
    }
    ticks
}
