// Copyright 2025 the TickPlan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis layout for charts.
//!
//! Given declarative [`AxisSpec`]s and resolved X/Y domains, this crate works
//! out which ticks each axis shows, where they sit in pixel space, how much
//! room every axis needs, and how axes pack around the plot area.
//!
//! The pipeline runs in a fixed order:
//! - **Domains**: custom Y domains declared on axes are merged per group
//!   ([`merge_y_custom_domains_by_group_id`]) and applied onto the computed Y
//!   domains ([`apply_custom_y_domains`]).
//! - **Scales**: each axis binds to the X domain or its Y group
//!   ([`scale_for_axis_spec`]).
//! - **Measure**: tick labels are measured and rotated through a
//!   [`TextMeasurer`] ([`compute_axis_ticks_dimensions`]).
//! - **Ticks**: candidate ticks are generated ([`available_ticks`]) and
//!   thinned so labels do not collide ([`visible_ticks`]).
//! - **Layout**: axes are placed edge by edge ([`axis_ticks_positions`]).
//!
//! Rendering is out of scope: results are plain numbers, [`Dimensions`] and
//! [`kurbo::Line`]s.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod axis;
mod domain;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod layout;
mod measure;
mod overlap;
mod scale;
mod theme;
mod tick_props;
mod ticks;
mod time;

pub use axis::{
    AxisId, AxisSpec, DEFAULT_GLOBAL_ID, GroupId, Position, Rotation, TickValue, is_y_domain,
    scale_for_axis_spec,
};
pub use domain::{
    Domain, DomainRange, XDomain, YDomain, apply_custom_y_domains,
    merge_y_custom_domains_by_group_id,
};
pub use error::LayoutError;
pub use layout::{
    AxisPosition, AxisTicksPositions, Dimensions, LayoutContext, axis_position,
    axis_ticks_positions, min_max_range,
};
pub use measure::{
    AxisTicksDimensions, AxisTicksOutcome, MaxLabelDimensions, compute_axis_ticks_dimensions,
    rotated_label_dimensions,
};
pub use overlap::visible_ticks;
pub use scale::{
    BarLayout, DEFAULT_TICK_COUNT, Scale, ScaleBand, ScaleContinuous, ScaleType, compute_x_scale,
    compute_y_scale, linear_ticks,
};
pub use theme::{
    AxisStyle, AxisTitleStyle, HorizontalAlignment, Margins, OffsetReference, TextOffset, Theme,
    TickLabelAlignment, TickLabelStyle, TickLineStyle, TitlePadding, VerticalAlignment,
};
pub use tick_props::{
    TickLabelProps, axis_grid_line_positions, horizontal_axis_grid_line_props,
    horizontal_axis_tick_line_props, tick_label_props, vertical_axis_grid_line_props,
    vertical_axis_tick_line_props,
};
pub use ticks::{
    AxisTick, TickFormatOptions, TickFormatter, available_ticks, default_tick_formatter,
    ticks_with_duplicates_policy,
};
pub use time::{
    TimeZone, format_time, nice_time_format_by_day, nice_time_formatter, time_formatter,
    time_ticks,
};

pub use tickplan_text::{
    HeuristicTextMeasurer, ScopedMeasurer, TextMeasurer, TextMetrics, TextStyle,
    with_scoped_measurer,
};
