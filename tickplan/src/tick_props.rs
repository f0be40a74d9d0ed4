// Copyright 2025 the TickPlan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement props for tick labels, tick marks and grid lines.
//!
//! Coordinates are local to the axis rectangle (labels, tick marks) or to the
//! chart rectangle (grid lines).

use kurbo::Line;

use crate::axis::Position;
use crate::layout::Dimensions;
use crate::measure::AxisTicksDimensions;
use crate::theme::{
    AxisStyle, HorizontalAlignment, OffsetReference, TextOffset, TickLabelAlignment,
    VerticalAlignment,
};

/// Where and how to draw one tick label.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickLabelProps {
    /// Anchor x, in axis coordinates.
    pub x: f64,
    /// Anchor y, in axis coordinates.
    pub y: f64,
    /// Horizontal alignment of the text around the anchor.
    pub align: HorizontalAlignment,
    /// Vertical alignment of the text around the anchor.
    pub vertical_align: VerticalAlignment,
    /// Shift applied before rotating, moving the label box off the tick.
    pub offset_x: f64,
    /// Shift applied before rotating, moving the label box off the tick.
    pub offset_y: f64,
    /// Shift applied after rotating, aligning the text inside its box.
    pub text_offset_x: f64,
    /// Shift applied after rotating, aligning the text inside its box.
    pub text_offset_y: f64,
}

fn horizontal_align(
    position: Position,
    rotation: f64,
    fallback: Option<HorizontalAlignment>,
) -> HorizontalAlignment {
    if let Some(align) = fallback {
        return align;
    }
    if rotation.abs() == 90.0 {
        return HorizontalAlignment::Center;
    }
    match position {
        Position::Left => HorizontalAlignment::Right,
        Position::Right => HorizontalAlignment::Left,
        Position::Top | Position::Bottom => HorizontalAlignment::Center,
    }
}

fn vertical_align(
    position: Position,
    rotation: f64,
    fallback: Option<VerticalAlignment>,
) -> VerticalAlignment {
    if let Some(align) = fallback {
        return align;
    }
    if position.is_vertical() || rotation.abs() == 90.0 {
        return VerticalAlignment::Middle;
    }
    match position {
        Position::Top => VerticalAlignment::Bottom,
        _ => VerticalAlignment::Top,
    }
}

fn horizontal_text_offset(width: f64, align: HorizontalAlignment) -> f64 {
    match align {
        HorizontalAlignment::Left => -width / 2.0,
        HorizontalAlignment::Right => width / 2.0,
        HorizontalAlignment::Center => 0.0,
    }
}

fn vertical_text_offset(height: f64, align: VerticalAlignment) -> f64 {
    match align {
        VerticalAlignment::Top => -height / 2.0,
        VerticalAlignment::Bottom => height / 2.0,
        VerticalAlignment::Middle => 0.0,
    }
}

/// Computes the anchor, alignment and offsets of a tick label.
///
/// Labels sit past the tick mark (when shown) and the label padding, on the
/// side of the axis facing away from the plot. `alignment` overrides the
/// alignment picked from the axis position and label rotation.
#[must_use]
pub fn tick_label_props(
    style: &AxisStyle,
    tick_position: f64,
    position: Position,
    axis_position: &Dimensions,
    dims: &AxisTicksDimensions,
    show_ticks: bool,
    text_offset: &TextOffset,
    alignment: &TickLabelAlignment,
) -> TickLabelProps {
    let tick_dimension = if show_ticks {
        style.tick_line.size + style.tick_line.padding
    } else {
        0.0
    };
    let padding = style.tick_label.padding;
    let rotation = style.tick_label.rotation;
    let align = horizontal_align(position, rotation, alignment.horizontal);
    let vertical_align = vertical_align(position, rotation, alignment.vertical);

    let (global, local) = match text_offset.reference {
        OffsetReference::Global => ((text_offset.x, text_offset.y), (0.0, 0.0)),
        OffsetReference::Local => ((0.0, 0.0), (text_offset.x, text_offset.y)),
    };
    let text_offset_x = horizontal_text_offset(dims.max_label_text_width, align) + local.0;
    let text_offset_y = vertical_text_offset(dims.max_label_text_height, vertical_align) + local.1;

    if position.is_vertical() {
        let is_left = position == Position::Left;
        let x = if is_left {
            axis_position.width - tick_dimension - padding
        } else {
            tick_dimension + padding
        };
        let side = if is_left { -1.0 } else { 1.0 };
        TickLabelProps {
            x,
            y: tick_position,
            align,
            vertical_align,
            offset_x: side * dims.max_label_bbox_width / 2.0 + global.0,
            offset_y: global.1,
            text_offset_x,
            text_offset_y,
        }
    } else {
        let is_top = position == Position::Top;
        let y = if is_top {
            axis_position.height - tick_dimension - padding
        } else {
            tick_dimension + padding
        };
        let side = if is_top { -1.0 } else { 1.0 };
        TickLabelProps {
            x: tick_position,
            y,
            align,
            vertical_align,
            offset_x: global.0,
            offset_y: side * dims.max_label_bbox_height / 2.0 + global.1,
            text_offset_x,
            text_offset_y,
        }
    }
}

/// Tick mark endpoints for a vertical axis.
///
/// Left tick marks end at `tick_padding` and extend `tick_size` towards the
/// labels; right ones start at the axis line.
#[must_use]
pub fn vertical_axis_tick_line_props(
    position: Position,
    tick_padding: f64,
    tick_size: f64,
    tick_position: f64,
) -> Line {
    let x1 = if position == Position::Left {
        tick_padding
    } else {
        0.0
    };
    let x2 = if position == Position::Left {
        tick_padding - tick_size
    } else {
        tick_size
    };
    Line::new((x1, tick_position), (x2, tick_position))
}

/// Tick mark endpoints for a horizontal axis of height `axis_height`.
#[must_use]
pub fn horizontal_axis_tick_line_props(
    position: Position,
    axis_height: f64,
    tick_size: f64,
    tick_position: f64,
) -> Line {
    let (y1, y2) = if position == Position::Top {
        (axis_height - tick_size, axis_height)
    } else {
        (0.0, tick_size)
    };
    Line::new((tick_position, y1), (tick_position, y2))
}

/// Grid line across a chart of width `chart_width`, for a vertical axis tick.
#[must_use]
pub fn vertical_axis_grid_line_props(tick_position: f64, chart_width: f64) -> Line {
    Line::new((0.0, tick_position), (chart_width, tick_position))
}

/// Grid line across a chart of height `chart_height`, for a horizontal axis tick.
#[must_use]
pub fn horizontal_axis_grid_line_props(tick_position: f64, chart_height: f64) -> Line {
    Line::new((tick_position, 0.0), (tick_position, chart_height))
}

/// Grid line for a tick at `tick_position` on a vertical or horizontal axis.
#[must_use]
pub fn axis_grid_line_positions(
    is_vertical_axis: bool,
    tick_position: f64,
    chart_dimensions: &Dimensions,
) -> Line {
    if is_vertical_axis {
        vertical_axis_grid_line_props(tick_position, chart_dimensions.width)
    } else {
        horizontal_axis_grid_line_props(tick_position, chart_dimensions.height)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::theme::{TickLabelStyle, TickLineStyle};

    fn style(rotation: f64, tick_padding: f64) -> AxisStyle {
        AxisStyle::default()
            .with_tick_line(TickLineStyle {
                visible: true,
                size: 10.0,
                padding: tick_padding,
            })
            .with_tick_label(TickLabelStyle::default().with_rotation(rotation).with_padding(0.0))
    }

    fn axis() -> Dimensions {
        Dimensions::new(0.0, 0.0, 100.0, 10.0)
    }

    fn dims() -> AxisTicksDimensions {
        AxisTicksDimensions {
            tick_values: vec![],
            tick_labels: vec![],
            max_label_bbox_width: 100.0,
            max_label_bbox_height: 100.0,
            max_label_text_width: 100.0,
            max_label_text_height: 100.0,
        }
    }

    fn props(
        style: &AxisStyle,
        position: Position,
        horizontal: Option<HorizontalAlignment>,
        vertical: Option<VerticalAlignment>,
    ) -> TickLabelProps {
        tick_label_props(
            style,
            0.0,
            position,
            &axis(),
            &dims(),
            true,
            &TextOffset::default(),
            &TickLabelAlignment {
                horizontal,
                vertical,
            },
        )
    }

    #[test]
    fn labels_along_a_vertical_axis() {
        assert_eq!(
            props(&style(0.0, 5.0), Position::Left, None, None),
            TickLabelProps {
                x: 85.0,
                y: 0.0,
                align: HorizontalAlignment::Right,
                vertical_align: VerticalAlignment::Middle,
                offset_x: -50.0,
                offset_y: 0.0,
                text_offset_x: 50.0,
                text_offset_y: 0.0,
            }
        );

        let rotated = props(
            &style(90.0, 10.0),
            Position::Left,
            Some(HorizontalAlignment::Center),
            Some(VerticalAlignment::Middle),
        );
        assert_eq!((rotated.x, rotated.offset_x, rotated.text_offset_x), (80.0, -50.0, 0.0));

        let right_rotated = props(
            &style(90.0, 10.0),
            Position::Right,
            Some(HorizontalAlignment::Center),
            Some(VerticalAlignment::Middle),
        );
        assert_eq!((right_rotated.x, right_rotated.offset_x), (20.0, 50.0));
        assert_eq!(right_rotated.align, HorizontalAlignment::Center);

        let right = props(&style(0.0, 10.0), Position::Right, None, None);
        assert_eq!(right.align, HorizontalAlignment::Left);
        assert_eq!((right.x, right.offset_x, right.text_offset_x), (20.0, 50.0, -50.0));
    }

    #[test]
    fn labels_along_a_horizontal_axis() {
        let top = props(
            &style(0.0, 5.0),
            Position::Top,
            Some(HorizontalAlignment::Center),
            Some(VerticalAlignment::Bottom),
        );
        assert_eq!(
            top,
            TickLabelProps {
                x: 0.0,
                y: -5.0,
                align: HorizontalAlignment::Center,
                vertical_align: VerticalAlignment::Bottom,
                offset_x: 0.0,
                offset_y: -50.0,
                text_offset_x: 0.0,
                text_offset_y: 50.0,
            }
        );

        let top_rotated = props(&style(90.0, 10.0), Position::Top, None, None);
        assert_eq!(top_rotated.y, -10.0);
        assert_eq!(top_rotated.align, HorizontalAlignment::Center);
        assert_eq!(top_rotated.vertical_align, VerticalAlignment::Middle);
        assert_eq!(top_rotated.text_offset_y, 0.0);

        let bottom_rotated = props(&style(90.0, 10.0), Position::Bottom, None, None);
        assert_eq!((bottom_rotated.y, bottom_rotated.offset_y), (20.0, 50.0));

        let bottom = props(
            &style(90.0, 10.0),
            Position::Bottom,
            Some(HorizontalAlignment::Center),
            Some(VerticalAlignment::Top),
        );
        assert_eq!(bottom.text_offset_y, -50.0);
        assert_eq!(bottom.vertical_align, VerticalAlignment::Top);
    }

    #[test]
    fn unrotated_horizontal_labels_face_away_from_the_plot() {
        assert_eq!(
            props(&style(0.0, 10.0), Position::Top, None, None).vertical_align,
            VerticalAlignment::Bottom
        );
        assert_eq!(
            props(&style(0.0, 10.0), Position::Bottom, None, None).vertical_align,
            VerticalAlignment::Top
        );
    }

    #[test]
    fn user_offsets_follow_their_reference() {
        let global = TextOffset {
            x: 3.0,
            y: 4.0,
            reference: OffsetReference::Global,
        };
        let local = TextOffset {
            reference: OffsetReference::Local,
            ..global
        };
        let alignment = TickLabelAlignment::default();
        let s = style(0.0, 5.0);
        let g = tick_label_props(&s, 0.0, Position::Left, &axis(), &dims(), true, &global, &alignment);
        assert_eq!((g.offset_x, g.offset_y), (-47.0, 4.0));
        assert_eq!((g.text_offset_x, g.text_offset_y), (50.0, 0.0));
        let l = tick_label_props(&s, 0.0, Position::Left, &axis(), &dims(), true, &local, &alignment);
        assert_eq!((l.offset_x, l.offset_y), (-50.0, 0.0));
        assert_eq!((l.text_offset_x, l.text_offset_y), (53.0, 4.0));
    }

    #[test]
    fn hidden_ticks_take_no_room() {
        let s = style(0.0, 5.0);
        let p = tick_label_props(
            &s,
            0.0,
            Position::Left,
            &axis(),
            &dims(),
            false,
            &TextOffset::default(),
            &TickLabelAlignment::default(),
        );
        assert_eq!(p.x, 100.0);
    }

    #[test]
    fn tick_line_endpoints() {
        assert_eq!(
            vertical_axis_tick_line_props(Position::Left, 5.0, 10.0, 10.0),
            Line::new((5.0, 10.0), (-5.0, 10.0))
        );
        assert_eq!(
            vertical_axis_tick_line_props(Position::Right, 5.0, 10.0, 10.0),
            Line::new((0.0, 10.0), (10.0, 10.0))
        );
        assert_eq!(
            horizontal_axis_tick_line_props(Position::Top, 20.0, 10.0, 10.0),
            Line::new((10.0, 10.0), (10.0, 20.0))
        );
        assert_eq!(
            horizontal_axis_tick_line_props(Position::Bottom, 20.0, 10.0, 10.0),
            Line::new((10.0, 0.0), (10.0, 10.0))
        );
    }

    #[test]
    fn grid_line_endpoints() {
        assert_eq!(
            vertical_axis_grid_line_props(10.0, 100.0),
            Line::new((0.0, 10.0), (100.0, 10.0))
        );
        assert_eq!(
            horizontal_axis_grid_line_props(10.0, 200.0),
            Line::new((10.0, 0.0), (10.0, 200.0))
        );
        let chart = Dimensions::new(0.0, 0.0, 100.0, 200.0);
        assert_eq!(
            axis_grid_line_positions(false, 10.0, &chart),
            Line::new((10.0, 0.0), (10.0, 200.0))
        );
    }
}
