// Copyright 2025 the TickPlan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropping ticks whose labels would collide.

use alloc::string::String;
use alloc::vec::Vec;

use crate::axis::AxisSpec;
use crate::measure::AxisTicksDimensions;
use crate::ticks::AxisTick;

/// Slack absorbing rounding noise in scaled tick positions.
const POSITION_EPSILON: f64 = 1e-9;

/// Returns the ticks whose labels fit without overlapping, by ascending position.
///
/// Each label reserves half its largest footprint (height on vertical axes,
/// width on horizontal ones) on both sides of its tick. Walking up the axis,
/// a tick is kept when its reserved space starts at or past the end of the
/// previously kept one. A colliding tick is dropped unless the axis shows
/// overlapping ticks or labels; it is then kept with its label blanked,
/// or intact when overlapping labels are shown.
#[must_use]
pub fn visible_ticks(
    all_ticks: &[AxisTick],
    axis_spec: &AxisSpec,
    dims: &AxisTicksDimensions,
) -> Vec<AxisTick> {
    let mut sorted: Vec<&AxisTick> = all_ticks.iter().collect();
    sorted.sort_by(|a, b| a.position.total_cmp(&b.position));

    let required_space = if axis_spec.position.is_vertical() {
        dims.max_label_bbox_height / 2.0
    } else {
        dims.max_label_bbox_width / 2.0
    };
    let keep_overlapping = axis_spec.show_overlapping_ticks || axis_spec.show_overlapping_labels;

    let mut visible = Vec::with_capacity(sorted.len());
    let mut previous_occupied: Option<f64> = None;
    for tick in sorted {
        let fits = previous_occupied
            .is_none_or(|occupied| tick.position - required_space + POSITION_EPSILON >= occupied);
        if fits {
            previous_occupied = Some(tick.position + required_space);
            visible.push(tick.clone());
        } else if keep_overlapping {
            visible.push(AxisTick {
                label: if axis_spec.show_overlapping_labels {
                    tick.label.clone()
                } else {
                    String::new()
                },
                ..tick.clone()
            });
        }
    }
    visible
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;
    use alloc::vec;

    use super::*;
    use crate::axis::{Position, TickValue};
    use crate::domain::YDomain;
    use crate::scale::compute_y_scale;
    use crate::ticks::{TickFormatOptions, available_ticks};

    fn ticks(positions: &[f64]) -> Vec<AxisTick> {
        positions
            .iter()
            .enumerate()
            .map(|(i, p)| AxisTick {
                value: TickValue::Number(i as f64),
                label: i.to_string(),
                position: *p,
            })
            .collect()
    }

    fn dims(width: f64, height: f64) -> AxisTicksDimensions {
        AxisTicksDimensions {
            tick_values: vec![],
            tick_labels: vec![],
            max_label_bbox_width: width,
            max_label_bbox_height: height,
            max_label_text_width: width,
            max_label_text_height: height,
        }
    }

    fn positions(ticks: &[AxisTick]) -> Vec<f64> {
        ticks.iter().map(|t| t.position).collect()
    }

    #[test]
    fn everything_fits_with_small_labels() {
        let all = ticks(&[100.0, 90.0, 80.0, 70.0, 60.0, 50.0, 40.0, 30.0, 20.0, 10.0, 0.0]);
        let spec = AxisSpec::new("axis_1", Position::Left);
        let visible = visible_ticks(&all, &spec, &dims(10.0, 10.0));
        assert_eq!(
            positions(&visible),
            vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0]
        );
    }

    #[test]
    fn tall_labels_keep_every_other_tick() {
        let all = ticks(&[100.0, 90.0, 80.0, 70.0, 60.0, 50.0, 40.0, 30.0, 20.0, 10.0, 0.0]);
        let spec = AxisSpec::new("axis_1", Position::Left);
        let visible = visible_ticks(&all, &spec, &dims(10.0, 20.0));
        assert_eq!(positions(&visible), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(visible[0].label, "10");
    }

    #[test]
    fn horizontal_axes_use_label_width() {
        let all = ticks(&[0.0, 10.0, 20.0, 30.0]);
        let spec = AxisSpec::new("x", Position::Bottom);
        let visible = visible_ticks(&all, &spec, &dims(30.0, 1.0));
        assert_eq!(positions(&visible), vec![0.0, 30.0]);
    }

    #[test]
    fn overlapping_ticks_keep_position_with_blank_label() {
        let all = ticks(&[0.0, 10.0, 20.0]);
        let spec = AxisSpec::new("axis_1", Position::Left).with_show_overlapping_ticks(true);
        let visible = visible_ticks(&all, &spec, &dims(10.0, 20.0));
        assert_eq!(positions(&visible), vec![0.0, 10.0, 20.0]);
        assert_eq!(visible[0].label, "0");
        assert_eq!(visible[1].label, "");
        assert_eq!(visible[2].label, "2");

        let spec = spec.with_show_overlapping_labels(true);
        let visible = visible_ticks(&all, &spec, &dims(10.0, 20.0));
        assert_eq!(visible[1].label, "1");
    }

    #[test]
    fn overlapping_labels_alone_keep_the_label() {
        let all = ticks(&[0.0, 5.0]);
        let spec = AxisSpec::new("axis_1", Position::Left).with_show_overlapping_labels(true);
        let visible = visible_ticks(&all, &spec, &dims(10.0, 20.0));
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[1].label, "1");
    }

    #[test]
    fn scaled_positions_with_rounding_noise_still_fit() {
        let scale = compute_y_scale(&YDomain::new("g", (0.0, 1.0)), (100.0, 0.0), 10, false);
        let spec = AxisSpec::new("axis_1", Position::Left);
        let all = available_ticks(&spec, &scale, 0, false, &TickFormatOptions::default());
        assert_eq!(all.len(), 11);

        let visible = visible_ticks(&all, &spec, &dims(10.0, 10.0));
        let labels: Vec<&str> = visible.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["1", "0.9", "0.8", "0.7", "0.6", "0.5", "0.4", "0.3", "0.2", "0.1", "0"]
        );

        let visible = visible_ticks(&all, &spec, &dims(10.0, 20.0));
        let labels: Vec<&str> = visible.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["1", "0.8", "0.6", "0.4", "0.2", "0"]);
    }
}
