// Copyright 2025 the TickPlan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Theme values that affect axis geometry.
//!
//! Only sizes and paddings live here; colors and strokes belong to whatever
//! renders the layout.

use alloc::string::String;

use tickplan_text::{FontFamily, FontWeight, TextStyle};

/// Space around the four sides of a box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Margins {
    /// Top side.
    pub top: f64,
    /// Bottom side.
    pub bottom: f64,
    /// Left side.
    pub left: f64,
    /// Right side.
    pub right: f64,
}

impl Margins {
    /// The same amount on every side.
    #[must_use]
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            bottom: value,
            left: value,
            right: value,
        }
    }
}

/// Tick mark geometry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TickLineStyle {
    /// Whether tick marks are drawn (and take space).
    pub visible: bool,
    /// Tick mark length.
    pub size: f64,
    /// Gap between the tick mark and its label.
    pub padding: f64,
}

impl Default for TickLineStyle {
    fn default() -> Self {
        Self {
            visible: true,
            size: 10.0,
            padding: 10.0,
        }
    }
}

impl TickLineStyle {
    /// Space the tick marks take across the axis.
    #[must_use]
    pub fn dimension(&self) -> f64 {
        if self.visible {
            self.size + self.padding
        } else {
            0.0
        }
    }
}

/// Tick label typography and placement.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TickLabelStyle {
    /// Whether labels are drawn (and take space).
    pub visible: bool,
    /// Font size in pixels.
    pub font_size: f64,
    /// CSS font family.
    pub font_family: String,
    /// Font weight (100..=900).
    pub font_weight: u16,
    /// Padding between the label and the tick mark.
    pub padding: f64,
    /// Label rotation in degrees.
    pub rotation: f64,
    /// Extra label offset.
    pub offset: TextOffset,
    /// Alignment overrides.
    pub alignment: TickLabelAlignment,
}

impl Default for TickLabelStyle {
    fn default() -> Self {
        Self {
            visible: true,
            font_size: 10.0,
            font_family: "sans-serif".into(),
            font_weight: FontWeight::NORMAL.0,
            padding: 4.0,
            rotation: 0.0,
            offset: TextOffset::default(),
            alignment: TickLabelAlignment::default(),
        }
    }
}

impl TickLabelStyle {
    /// Returns the text style labels are measured with.
    #[must_use]
    pub fn text_style(&self) -> TextStyle {
        TextStyle::new(self.font_size)
            .with_font_family(FontFamily::from_css(&self.font_family))
            .with_font_weight(FontWeight(self.font_weight))
    }

    /// Sets the rotation in degrees.
    #[must_use]
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets the padding.
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }
}

/// Gap around the axis title.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TitlePadding {
    /// Between the title and the tick labels.
    pub inner: f64,
    /// Between the title and the outer edge.
    pub outer: f64,
}

/// Axis title typography.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct AxisTitleStyle {
    /// Font size in pixels, used as the title height.
    pub font_size: f64,
    /// CSS font family.
    pub font_family: String,
    /// Padding around the title.
    pub padding: TitlePadding,
}

impl Default for AxisTitleStyle {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            font_family: "sans-serif".into(),
            padding: TitlePadding {
                inner: 8.0,
                outer: 0.0,
            },
        }
    }
}

/// Geometry-relevant axis style.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct AxisStyle {
    /// Tick marks.
    pub tick_line: TickLineStyle,
    /// Tick labels.
    pub tick_label: TickLabelStyle,
    /// Title.
    pub axis_title: AxisTitleStyle,
}

impl AxisStyle {
    /// Replaces the tick line style.
    #[must_use]
    pub fn with_tick_line(mut self, tick_line: TickLineStyle) -> Self {
        self.tick_line = tick_line;
        self
    }

    /// Replaces the tick label style.
    #[must_use]
    pub fn with_tick_label(mut self, tick_label: TickLabelStyle) -> Self {
        self.tick_label = tick_label;
        self
    }

    /// Replaces the title style.
    #[must_use]
    pub fn with_axis_title(mut self, axis_title: AxisTitleStyle) -> Self {
        self.axis_title = axis_title;
        self
    }
}

/// Chart-wide theme.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Theme {
    /// Space between each axis and its neighbour.
    pub chart_margins: Margins,
    /// Space between the chart edges and the outermost axes.
    pub chart_paddings: Margins,
    /// Default axis style.
    pub axes: AxisStyle,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            chart_margins: Margins::uniform(10.0),
            chart_paddings: Margins::default(),
            axes: AxisStyle::default(),
        }
    }
}

impl Theme {
    /// Sets the chart margins.
    #[must_use]
    pub fn with_chart_margins(mut self, margins: Margins) -> Self {
        self.chart_margins = margins;
        self
    }

    /// Sets the chart paddings.
    #[must_use]
    pub fn with_chart_paddings(mut self, paddings: Margins) -> Self {
        self.chart_paddings = paddings;
        self
    }

    /// Sets the default axis style.
    #[must_use]
    pub fn with_axes(mut self, axes: AxisStyle) -> Self {
        self.axes = axes;
        self
    }
}

/// Where a text offset is expressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum OffsetReference {
    /// Chart coordinates, applied before rotation.
    #[default]
    Global,
    /// Label coordinates, applied after rotation.
    Local,
}

/// A user offset applied to tick labels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TextOffset {
    /// Horizontal offset.
    pub x: f64,
    /// Vertical offset.
    pub y: f64,
    /// Coordinate frame of the offset.
    pub reference: OffsetReference,
}

/// Horizontal text alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum HorizontalAlignment {
    /// Anchored at the left edge.
    Left,
    /// Centered.
    Center,
    /// Anchored at the right edge.
    Right,
}

/// Vertical text alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum VerticalAlignment {
    /// Anchored at the top edge.
    Top,
    /// Centered.
    Middle,
    /// Anchored at the bottom edge.
    Bottom,
}

/// Alignment overrides for tick labels; `None` picks from the axis position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TickLabelAlignment {
    /// Horizontal override.
    pub horizontal: Option<HorizontalAlignment>,
    /// Vertical override.
    pub vertical: Option<VerticalAlignment>,
}
