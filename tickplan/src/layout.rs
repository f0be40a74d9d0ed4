// Copyright 2025 the TickPlan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Packing axes around the plot area.
//!
//! Axes are placed in declaration order. Each edge keeps a running sum of the
//! space consumed by the axes already placed there, so several axes on one
//! edge stack outward:
//!
//! ```text
//!        top axes (stack upward)
//!      +----------------------+
//! left |                      | right
//! axes |      plot area       | axes
//!      |                      |
//!      +----------------------+
//!       bottom axes (stack downward)
//! ```

use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Line, Rect};

use crate::axis::{AxisId, AxisSpec, Position, Rotation, scale_for_axis_spec};
use crate::domain::{XDomain, YDomain};
use crate::error::LayoutError;
use crate::measure::AxisTicksDimensions;
use crate::overlap::visible_ticks;
use crate::scale::BarLayout;
use crate::theme::{AxisStyle, Margins, Theme, TitlePadding};
use crate::tick_props::axis_grid_line_positions;
use crate::ticks::{AxisTick, TickFormatOptions, available_ticks};

/// An axis-aligned rectangle given by its top-left corner and size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    /// Top edge.
    pub top: f64,
    /// Left edge.
    pub left: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Dimensions {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Returns the rectangle as a [`Rect`].
    #[must_use]
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.left,
            self.top,
            self.left + self.width,
            self.top + self.height,
        )
    }
}

impl From<Rect> for Dimensions {
    fn from(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.y0, rect.x0, rect.width(), rect.height())
    }
}

impl From<Dimensions> for Rect {
    fn from(dims: Dimensions) -> Self {
        dims.to_rect()
    }
}

/// Where one axis goes and how much it grows its edge.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisPosition {
    /// The axis rectangle.
    pub dimensions: Dimensions,
    /// Growth of the top running sum.
    pub top_increment: f64,
    /// Growth of the bottom running sum.
    pub bottom_increment: f64,
    /// Growth of the left running sum.
    pub left_increment: f64,
    /// Growth of the right running sum.
    pub right_increment: f64,
}

/// Space already consumed on each chart edge.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutContext {
    /// Consumed above the plot.
    pub cum_top_sum: f64,
    /// Consumed below the plot.
    pub cum_bottom_sum: f64,
    /// Consumed left of the plot.
    pub cum_left_sum: f64,
    /// Consumed right of the plot.
    pub cum_right_sum: f64,
}

impl LayoutContext {
    /// Starts the running sums at the chart paddings.
    #[must_use]
    pub fn from_paddings(paddings: &Margins) -> Self {
        Self {
            cum_top_sum: paddings.top,
            cum_bottom_sum: paddings.bottom,
            cum_left_sum: paddings.left,
            cum_right_sum: paddings.right,
        }
    }

    /// Records a placed axis.
    pub fn advance(&mut self, position: &AxisPosition) {
        self.cum_top_sum += position.top_increment;
        self.cum_bottom_sum += position.bottom_increment;
        self.cum_left_sum += position.left_increment;
        self.cum_right_sum += position.right_increment;
    }
}

/// Returns the `(start, end)` pixel range for an axis.
///
/// Vertical pixel coordinates grow downward, so unrotated Y axes run from the
/// chart height to `0`.
#[must_use]
pub fn min_max_range(
    position: Position,
    rotation: Rotation,
    chart_dimensions: &Dimensions,
) -> (f64, f64) {
    let Dimensions { width, height, .. } = *chart_dimensions;
    match position {
        Position::Top | Position::Bottom => match rotation {
            Rotation::Deg0 | Rotation::Deg90 => (0.0, width),
            Rotation::Deg180 | Rotation::DegNeg90 => (width, 0.0),
        },
        Position::Left | Position::Right => match rotation {
            Rotation::Deg0 | Rotation::DegNeg90 => (height, 0.0),
            Rotation::Deg90 | Rotation::Deg180 => (0.0, height),
        },
    }
}

/// Places one axis next to the axes already on its edge.
///
/// The axis depth is the label padding, the widest (or tallest) rotated label
/// when labels are shown, the tick mark depth and the title block.
#[must_use]
pub fn axis_position(
    chart_dimensions: &Dimensions,
    chart_margins: &Margins,
    title_height: f64,
    title_padding: &TitlePadding,
    axis_spec: &AxisSpec,
    dims: &AxisTicksDimensions,
    ctx: &LayoutContext,
    label_padding_sum: f64,
    tick_dimension: f64,
    show_labels: bool,
) -> AxisPosition {
    let mut out = AxisPosition {
        dimensions: *chart_dimensions,
        ..AxisPosition::default()
    };
    let title_dimension = if title_height > 0.0 {
        title_padding.inner + title_height + title_padding.outer
    } else {
        0.0
    };

    if axis_spec.position.is_vertical() {
        let label_width = if show_labels {
            dims.max_label_bbox_width
        } else {
            0.0
        };
        let width = label_padding_sum + label_width + tick_dimension + title_dimension;
        out.dimensions.width = width;
        if axis_spec.position == Position::Left {
            out.dimensions.left = ctx.cum_left_sum + chart_margins.left;
            out.left_increment = chart_margins.left + width;
        } else {
            out.dimensions.left =
                chart_dimensions.left + chart_dimensions.width + ctx.cum_right_sum;
            out.right_increment = width + chart_margins.right;
        }
    } else {
        let label_height = if show_labels {
            dims.max_label_bbox_height
        } else {
            0.0
        };
        let height = label_padding_sum + label_height + tick_dimension + title_dimension;
        out.dimensions.height = height;
        if axis_spec.position == Position::Top {
            out.dimensions.top = ctx.cum_top_sum + chart_margins.top;
            out.top_increment = height + chart_margins.top;
        } else {
            out.dimensions.top =
                chart_dimensions.top + chart_dimensions.height + ctx.cum_bottom_sum;
            out.bottom_increment = height + chart_margins.bottom;
        }
    }
    out
}

/// Layout of every placed axis, keyed by axis id.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisTicksPositions {
    /// Axis rectangles.
    pub axis_positions: HashMap<AxisId, Dimensions>,
    /// All candidate ticks.
    pub axis_ticks: HashMap<AxisId, Vec<AxisTick>>,
    /// Ticks left after overlap filtering, by ascending position.
    pub axis_visible_ticks: HashMap<AxisId, Vec<AxisTick>>,
    /// Grid lines, for axes that show them.
    pub axis_grid_lines_positions: HashMap<AxisId, Vec<Line>>,
    /// Running sums after the last axis, paddings included.
    pub context: LayoutContext,
}

/// Lays out every axis that has measured dimensions.
///
/// Hidden axes and axes missing from `dims_by_id` are skipped. An axis with
/// dimensions whose scale cannot be built is a configuration error.
pub fn axis_ticks_positions(
    chart_dimensions: &Dimensions,
    theme: &Theme,
    rotation: Rotation,
    axis_specs: &[AxisSpec],
    dims_by_id: &HashMap<AxisId, AxisTicksDimensions>,
    styles_by_id: &HashMap<AxisId, AxisStyle>,
    x_domain: &XDomain,
    y_domains: &[YDomain],
    bars: BarLayout,
) -> Result<AxisTicksPositions, LayoutError> {
    let mut out = AxisTicksPositions::default();
    let mut ctx = LayoutContext::from_paddings(&theme.chart_paddings);
    let options = TickFormatOptions {
        time_zone: x_domain.time_zone,
    };

    for spec in axis_specs {
        let Some(dims) = dims_by_id.get(&spec.id) else {
            tracing::debug!(axis_id = %spec.id, "no dimensions for axis, skipping");
            continue;
        };
        if spec.hide {
            tracing::debug!(axis_id = %spec.id, "axis is hidden, skipping");
            continue;
        }

        let range = min_max_range(spec.position, rotation, chart_dimensions);
        let scale = scale_for_axis_spec(spec, x_domain, y_domains, bars, rotation, range).ok_or_else(
            || LayoutError::MissingScale {
                axis_id: spec.id.clone(),
            },
        )?;

        let all_ticks = available_ticks(
            spec,
            &scale,
            bars.total_bars_in_cluster,
            bars.histogram_mode,
            &options,
        );
        let visible = visible_ticks(&all_ticks, spec, dims);

        let style = styles_by_id
            .get(&spec.id)
            .or(spec.style.as_ref())
            .unwrap_or(&theme.axes);

        if spec.show_grid_lines {
            let is_vertical = spec.position.is_vertical();
            let lines = visible
                .iter()
                .map(|tick| axis_grid_line_positions(is_vertical, tick.position, chart_dimensions))
                .collect();
            out.axis_grid_lines_positions.insert(spec.id.clone(), lines);
        }

        let title_height = if spec.title.is_some() {
            style.axis_title.font_size
        } else {
            0.0
        };
        let placed = axis_position(
            chart_dimensions,
            &theme.chart_margins,
            title_height,
            &style.axis_title.padding,
            spec,
            dims,
            &ctx,
            style.tick_label.padding,
            style.tick_line.dimension(),
            style.tick_label.visible,
        );
        ctx.advance(&placed);
        tracing::trace!(
            axis_id = %spec.id,
            top = placed.top_increment,
            bottom = placed.bottom_increment,
            left = placed.left_increment,
            right = placed.right_increment,
            "placed axis"
        );

        out.axis_positions.insert(spec.id.clone(), placed.dimensions);
        out.axis_ticks.insert(spec.id.clone(), all_ticks);
        out.axis_visible_ticks.insert(spec.id.clone(), visible);
    }
    out.context = ctx;
    Ok(out)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;
    use alloc::vec;

    use super::*;
    use crate::axis::TickValue;
    use crate::measure::{AxisTicksOutcome, NumericMeasurer, compute_axis_ticks_dimensions};
    use crate::scale::ScaleType;
    use crate::theme::{AxisTitleStyle, TickLabelStyle, TickLineStyle};

    fn chart() -> Dimensions {
        Dimensions::new(0.0, 0.0, 100.0, 100.0)
    }

    fn axis1_dims() -> AxisTicksDimensions {
        AxisTicksDimensions {
            tick_values: (0..=10).map(|i| TickValue::Number(f64::from(i) / 10.0)).collect(),
            tick_labels: (0..=10)
                .map(|i| TickValue::Number(f64::from(i) / 10.0).to_string())
                .collect(),
            max_label_bbox_width: 10.0,
            max_label_bbox_height: 10.0,
            max_label_text_width: 10.0,
            max_label_text_height: 10.0,
        }
    }

    fn compact_theme() -> Theme {
        Theme::default().with_axes(
            AxisStyle::default()
                .with_tick_line(TickLineStyle {
                    visible: false,
                    ..TickLineStyle::default()
                })
                .with_tick_label(TickLabelStyle::default().with_padding(0.0))
                .with_axis_title(AxisTitleStyle {
                    font_size: 20.0,
                    padding: TitlePadding {
                        inner: 10.0,
                        outer: 10.0,
                    },
                    ..AxisTitleStyle::default()
                }),
        )
    }

    fn x_domain() -> XDomain {
        XDomain::continuous(ScaleType::Linear, (0.0, 1.0))
    }

    fn y_domains() -> Vec<YDomain> {
        vec![YDomain::new("group_1", (0.0, 1.0))]
    }

    fn vertical() -> AxisSpec {
        AxisSpec::new("axis_1", Position::Left).with_group_id("group_1")
    }

    fn place(position: Position) -> AxisPosition {
        let ctx = LayoutContext {
            cum_top_sum: 10.0,
            cum_bottom_sum: 10.0,
            cum_left_sum: 10.0,
            cum_right_sum: 10.0,
        };
        axis_position(
            &chart(),
            &Margins::uniform(10.0),
            10.0,
            &TitlePadding {
                inner: 0.0,
                outer: 10.0,
            },
            &AxisSpec::new("axis", position),
            &axis1_dims(),
            &ctx,
            10.0,
            0.0,
            true,
        )
    }

    fn layout(
        specs: &[AxisSpec],
        dims: &HashMap<AxisId, AxisTicksDimensions>,
    ) -> Result<AxisTicksPositions, LayoutError> {
        axis_ticks_positions(
            &chart(),
            &compact_theme(),
            Rotation::Deg0,
            specs,
            dims,
            &HashMap::new(),
            &x_domain(),
            &y_domains(),
            BarLayout::new(1),
        )
    }

    #[test]
    fn ranges_follow_rotation() {
        let c = Dimensions::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(min_max_range(Position::Bottom, Rotation::Deg0, &c), (0.0, 100.0));
        assert_eq!(min_max_range(Position::Top, Rotation::Deg180, &c), (100.0, 0.0));
        assert_eq!(min_max_range(Position::Left, Rotation::Deg0, &c), (50.0, 0.0));
        assert_eq!(min_max_range(Position::Right, Rotation::Deg90, &c), (0.0, 50.0));
        assert_eq!(min_max_range(Position::Left, Rotation::DegNeg90, &c), (50.0, 0.0));
    }

    #[test]
    fn side_axes_stack_outward() {
        let left = place(Position::Left);
        assert_eq!(left.dimensions, Dimensions::new(0.0, 20.0, 40.0, 100.0));
        assert_eq!(left.left_increment, 50.0);
        assert_eq!(
            (left.top_increment, left.bottom_increment, left.right_increment),
            (0.0, 0.0, 0.0)
        );

        let right = place(Position::Right);
        assert_eq!(right.dimensions, Dimensions::new(0.0, 110.0, 40.0, 100.0));
        assert_eq!(right.right_increment, 50.0);
        assert_eq!(right.left_increment, 0.0);
    }

    #[test]
    fn top_and_bottom_axes_stack_outward() {
        let top = place(Position::Top);
        assert_eq!(top.dimensions, Dimensions::new(20.0, 0.0, 100.0, 40.0));
        assert_eq!(top.top_increment, 50.0);

        let bottom = place(Position::Bottom);
        assert_eq!(bottom.dimensions, Dimensions::new(110.0, 0.0, 100.0, 40.0));
        assert_eq!(bottom.bottom_increment, 50.0);
    }

    #[test]
    fn hidden_labels_take_no_room() {
        let ctx = LayoutContext::default();
        let p = axis_position(
            &chart(),
            &Margins::default(),
            0.0,
            &TitlePadding::default(),
            &vertical(),
            &axis1_dims(),
            &ctx,
            4.0,
            20.0,
            false,
        );
        assert_eq!(p.dimensions.width, 24.0);
    }

    #[test]
    fn axes_are_positioned_with_visible_ticks() {
        let mut dims = HashMap::new();
        dims.insert(AxisId::new("axis_1"), axis1_dims());
        let out = layout(&[vertical()], &dims).unwrap();

        assert_eq!(
            out.axis_positions[&AxisId::new("axis_1")],
            Dimensions::new(0.0, 10.0, 10.0, 100.0)
        );
        let visible = &out.axis_visible_ticks["axis_1"];
        assert_eq!(visible.len(), 11);
        for (i, tick) in visible.iter().enumerate() {
            assert!((tick.position - 10.0 * i as f64).abs() < 1e-9, "{tick:?}");
        }
        assert_eq!(visible[0].label, "1");
        assert_eq!(out.axis_ticks["axis_1"].len(), 11);
        assert!(out.axis_grid_lines_positions.is_empty());
    }

    #[test]
    fn right_axis_sits_past_the_plot() {
        let mut dims = HashMap::new();
        dims.insert(AxisId::new("axis_1"), axis1_dims());
        let spec = vertical();
        let spec = AxisSpec {
            position: Position::Right,
            ..spec
        };
        let out = layout(&[spec], &dims).unwrap();
        assert_eq!(out.axis_positions["axis_1"].left, 100.0);
    }

    #[test]
    fn titles_add_their_block() {
        let mut dims = HashMap::new();
        dims.insert(AxisId::new("axis_1"), axis1_dims());
        let out = layout(&[vertical().with_title("Y")], &dims).unwrap();
        assert_eq!(
            out.axis_positions["axis_1"],
            Dimensions::new(0.0, 10.0, 50.0, 100.0)
        );
    }

    #[test]
    fn grid_lines_span_the_chart() {
        let mut dims = HashMap::new();
        dims.insert(AxisId::new("axis_1"), axis1_dims());
        let out = layout(&[vertical().with_grid_lines(true)], &dims).unwrap();
        let lines = &out.axis_grid_lines_positions["axis_1"];
        assert_eq!(lines.len(), 11);
        for (i, line) in lines.iter().enumerate() {
            let p = 10.0 * i as f64;
            assert!((line.p0.y - p).abs() < 1e-9 && (line.p1.y - p).abs() < 1e-9);
            assert_eq!((line.p0.x, line.p1.x), (0.0, 100.0));
        }
    }

    #[test]
    fn stacked_axes_accumulate() {
        let mut dims = HashMap::new();
        dims.insert(AxisId::new("a"), axis1_dims());
        dims.insert(AxisId::new("b"), axis1_dims());
        let specs = [
            AxisSpec::new("a", Position::Left).with_group_id("group_1"),
            AxisSpec::new("b", Position::Left).with_group_id("group_1"),
        ];
        let out = layout(&specs, &dims).unwrap();
        assert_eq!(out.axis_positions["a"].left, 10.0);
        assert_eq!(out.axis_positions["b"].left, 30.0);
        assert_eq!(
            out.context,
            LayoutContext {
                cum_left_sum: 40.0,
                ..LayoutContext::default()
            }
        );
    }

    #[test]
    fn returned_context_starts_from_the_paddings() {
        let mut dims = HashMap::new();
        dims.insert(AxisId::new("axis_1"), axis1_dims());
        let theme = compact_theme().with_chart_paddings(Margins::uniform(5.0));
        let out = axis_ticks_positions(
            &chart(),
            &theme,
            Rotation::Deg0,
            &[vertical()],
            &dims,
            &HashMap::new(),
            &x_domain(),
            &y_domains(),
            BarLayout::new(1),
        )
        .unwrap();
        assert_eq!(out.axis_positions["axis_1"].left, 15.0);
        assert_eq!(out.context.cum_left_sum, 25.0);
        assert_eq!(out.context.cum_right_sum, 5.0);
        assert_eq!(out.context.cum_top_sum, 5.0);
        assert_eq!(out.context.cum_bottom_sum, 5.0);
    }

    #[test]
    fn unresolvable_axis_with_dimensions_is_an_error() {
        let mut dims = HashMap::new();
        dims.insert(AxisId::new("axis_1"), axis1_dims());
        let orphan = vertical().with_group_id("foo");
        let err = layout(&[orphan], &dims).unwrap_err();
        assert_eq!(err.to_string(), "Cannot compute scale for axis spec axis_1");
    }

    #[test]
    fn misaligned_specs_are_skipped() {
        let mut dims = HashMap::new();
        dims.insert(AxisId::new("not_a_mapped_one"), axis1_dims());
        let out = layout(&[vertical()], &dims).unwrap();
        assert_eq!(out, AxisTicksPositions::default());
    }

    #[test]
    fn measured_then_positioned() {
        let spec = vertical();
        let theme = compact_theme();
        let mut dims = HashMap::new();
        let outcome = compute_axis_ticks_dimensions(
            &spec,
            &x_domain(),
            &y_domains(),
            BarLayout::new(1),
            &NumericMeasurer,
            Rotation::Deg0,
            &theme.axes,
        );
        if let AxisTicksOutcome::Resolved(d) = outcome {
            dims.insert(spec.id.clone(), d);
        }
        let hidden = AxisSpec::new("hidden", Position::Bottom).with_hide(true);
        let specs = [spec, hidden];
        let out = layout(&specs, &dims).unwrap();
        assert_eq!(out.axis_positions.len(), 1);
        assert_eq!(out.axis_positions["axis_1"].width, 10.0);
    }

    #[test]
    fn rect_conversion() {
        let d = Dimensions::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(d.to_rect(), Rect::new(2.0, 1.0, 5.0, 5.0));
        assert_eq!(Dimensions::from(d.to_rect()), d);
    }
}
