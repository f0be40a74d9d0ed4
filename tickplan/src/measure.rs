// Copyright 2025 the TickPlan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick label measurement.
//!
//! Before axes can be placed, each axis needs the size of its largest tick
//! label, both as laid out (unrotated) and as drawn (rotated by the label
//! rotation). Labels are measured through a [`TextMeasurer`].

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Size;
use tickplan_text::TextMeasurer;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::axis::{AxisSpec, Rotation, TickValue, scale_for_axis_spec};
use crate::domain::{XDomain, YDomain};
use crate::scale::BarLayout;
use crate::theme::{AxisStyle, TickLabelStyle};
use crate::ticks::TickFormatOptions;

/// Returns the axis-aligned footprint of a `size` box rotated by `degrees`.
#[must_use]
pub fn rotated_label_dimensions(size: Size, degrees: f64) -> Size {
    let theta = degrees.to_radians();
    let (sin, cos) = (theta.sin(), theta.cos());
    Size::new(
        (size.width * cos).abs() + (size.height * sin).abs(),
        (size.width * sin).abs() + (size.height * cos).abs(),
    )
}

/// Running maxima of label boxes, rotated and unrotated.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MaxLabelDimensions {
    /// Widest rotated footprint.
    pub max_label_bbox_width: f64,
    /// Tallest rotated footprint.
    pub max_label_bbox_height: f64,
    /// Widest unrotated text box.
    pub max_label_text_width: f64,
    /// Tallest unrotated text box.
    pub max_label_text_height: f64,
}

impl MaxLabelDimensions {
    /// Folds one measured label box into the maxima. Sizes are ceiled first.
    pub fn add(&mut self, text: Size, rotation: f64) {
        let rotated = rotated_label_dimensions(text, rotation);
        self.max_label_bbox_width = self.max_label_bbox_width.max(rotated.width.ceil());
        self.max_label_bbox_height = self.max_label_bbox_height.max(rotated.height.ceil());
        self.max_label_text_width = self.max_label_text_width.max(text.width.ceil());
        self.max_label_text_height = self.max_label_text_height.max(text.height.ceil());
    }

    /// Measures every label with `measurer` and folds the results.
    pub fn measure<'a>(
        labels: impl IntoIterator<Item = &'a str>,
        measurer: &impl TextMeasurer,
        tick_label: &TickLabelStyle,
    ) -> Self {
        let style = tick_label.text_style();
        let mut max = Self::default();
        for label in labels {
            let (width, height) = measurer.measure(label, style.clone()).bbox();
            max.add(Size::new(width, height), tick_label.rotation);
        }
        max
    }
}

/// The measured ticks of an axis.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisTicksDimensions {
    /// Native tick values.
    pub tick_values: Vec<TickValue>,
    /// Labels of [`tick_values`](Self::tick_values).
    pub tick_labels: Vec<String>,
    /// Widest rotated label footprint.
    pub max_label_bbox_width: f64,
    /// Tallest rotated label footprint.
    pub max_label_bbox_height: f64,
    /// Widest unrotated label.
    pub max_label_text_width: f64,
    /// Tallest unrotated label.
    pub max_label_text_height: f64,
}

impl AxisTicksDimensions {
    /// Returns the largest rotated label footprint.
    #[must_use]
    pub fn max_label_bbox(&self) -> Size {
        Size::new(self.max_label_bbox_width, self.max_label_bbox_height)
    }

    /// Returns the largest unrotated label box.
    #[must_use]
    pub fn max_label_text(&self) -> Size {
        Size::new(self.max_label_text_width, self.max_label_text_height)
    }
}

/// What measuring an axis produced.
#[derive(Clone, Debug, PartialEq)]
pub enum AxisTicksOutcome {
    /// The axis was measured.
    Resolved(AxisTicksDimensions),
    /// The axis is hidden and takes no space.
    Hidden,
    /// No domain could be bound to the axis.
    Unresolved,
}

impl AxisTicksOutcome {
    /// Returns the dimensions of a resolved axis.
    #[must_use]
    pub fn dimensions(&self) -> Option<&AxisTicksDimensions> {
        match self {
            Self::Resolved(dims) => Some(dims),
            Self::Hidden | Self::Unresolved => None,
        }
    }

    /// Consumes the outcome, returning the dimensions of a resolved axis.
    #[must_use]
    pub fn into_dimensions(self) -> Option<AxisTicksDimensions> {
        match self {
            Self::Resolved(dims) => Some(dims),
            Self::Hidden | Self::Unresolved => None,
        }
    }
}

/// Measures the native tick labels of an axis.
///
/// `axis_style` applies unless the axis carries its own style. Labels are
/// formatted in the X domain's time zone.
pub fn compute_axis_ticks_dimensions(
    axis_spec: &AxisSpec,
    x_domain: &XDomain,
    y_domains: &[YDomain],
    bars: BarLayout,
    measurer: &impl TextMeasurer,
    rotation: Rotation,
    axis_style: &AxisStyle,
) -> AxisTicksOutcome {
    if axis_spec.hide {
        return AxisTicksOutcome::Hidden;
    }
    let Some(scale) = scale_for_axis_spec(axis_spec, x_domain, y_domains, bars, rotation, (0.0, 1.0))
    else {
        tracing::warn!(
            axis_id = %axis_spec.id,
            group_id = %axis_spec.group_id,
            "cannot compute scale for axis spec, axis will not be displayed"
        );
        return AxisTicksOutcome::Unresolved;
    };

    let options = TickFormatOptions {
        time_zone: x_domain.time_zone,
    };
    let tick_values = scale.ticks();
    let tick_labels: Vec<String> = tick_values
        .iter()
        .map(|value| (axis_spec.tick_format)(value, &options))
        .collect();

    let style = axis_spec.style.as_ref().unwrap_or(axis_style);
    let max = MaxLabelDimensions::measure(
        tick_labels.iter().map(String::as_str),
        measurer,
        &style.tick_label,
    );

    AxisTicksOutcome::Resolved(AxisTicksDimensions {
        tick_values,
        tick_labels,
        max_label_bbox_width: max.max_label_bbox_width,
        max_label_bbox_height: max.max_label_bbox_height,
        max_label_text_width: max.max_label_text_width,
        max_label_text_height: max.max_label_text_height,
    })
}

/// Measurer for tests: a label that parses as a number `n` is `10 n` wide
/// and one font size tall.
#[cfg(test)]
pub(crate) struct NumericMeasurer;

#[cfg(test)]
impl TextMeasurer for NumericMeasurer {
    fn measure(&self, text: &str, style: tickplan_text::TextStyle) -> tickplan_text::TextMetrics {
        tickplan_text::TextMetrics {
            advance_width: text.parse::<f64>().unwrap_or(0.0) * 10.0,
            ascent: style.font_size,
            descent: 0.0,
            leading: 0.0,
        }
    }
}
