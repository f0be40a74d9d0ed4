// Copyright 2025 the TickPlan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis declarations and scale binding.
//!
//! An [`AxisSpec`] sits on one edge of the chart ([`Position`]). Depending on
//! the chart [`Rotation`] it renders either the shared X domain or the Y domain
//! of its group; [`scale_for_axis_spec`] resolves that choice into a pixel
//! [`Scale`].

use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use crate::domain::{DomainRange, XDomain, YDomain};
use crate::error::LayoutError;
use crate::scale::{BarLayout, DEFAULT_TICK_COUNT, Scale, compute_x_scale, compute_y_scale};
use crate::theme::AxisStyle;
use crate::ticks::{TickFormatOptions, TickFormatter, default_tick_formatter};

/// Group id carried by axes that do not name a Y group.
pub const DEFAULT_GLOBAL_ID: &str = "__global__";

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize),
            serde(transparent)
        )]
        pub struct $name(Arc<str>);

        impl $name {
            /// Creates an id from any string.
            #[must_use]
            pub fn new(id: impl AsRef<str>) -> Self {
                Self(Arc::from(id.as_ref()))
            }

            /// Returns the id text.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(Arc::from(id))
            }
        }

        impl core::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifies an axis.
    AxisId
);

string_id!(
    /// Identifies a Y domain group shared by one or more axes.
    GroupId
);

impl Default for GroupId {
    fn default() -> Self {
        Self::new(DEFAULT_GLOBAL_ID)
    }
}

/// The chart edge an axis is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Position {
    /// Above the plot area.
    Top,
    /// Below the plot area.
    Bottom,
    /// Left of the plot area.
    Left,
    /// Right of the plot area.
    Right,
}

impl Position {
    /// Returns `true` for `Left` and `Right`.
    #[must_use]
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Returns `true` for `Top` and `Bottom`.
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        !self.is_vertical()
    }
}

/// Chart rotation in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "i32", into = "i32")
)]
pub enum Rotation {
    /// No rotation.
    #[default]
    Deg0,
    /// Rotated clockwise by a quarter turn.
    Deg90,
    /// Rotated counter-clockwise by a quarter turn.
    DegNeg90,
    /// Upside down.
    Deg180,
}

impl Rotation {
    /// Returns the rotation in degrees.
    #[must_use]
    pub fn degrees(self) -> i32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::DegNeg90 => -90,
            Self::Deg180 => 180,
        }
    }
}

impl TryFrom<i32> for Rotation {
    type Error = LayoutError;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            -90 => Ok(Self::DegNeg90),
            180 => Ok(Self::Deg180),
            _ => Err(LayoutError::InvalidRotation { degrees }),
        }
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

/// A value on an axis: a number (or epoch milliseconds) or a category.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum TickValue {
    /// A continuous value.
    Number(f64),
    /// An ordinal category.
    Category(Arc<str>),
}

impl TickValue {
    /// Returns the numeric value, if any.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Category(_) => None,
        }
    }
}

impl From<f64> for TickValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for TickValue {
    fn from(value: &str) -> Self {
        Self::Category(Arc::from(value))
    }
}

impl fmt::Display for TickValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Normalizes `-0` to `0`.
            Self::Number(v) if *v == 0.0 => f.write_str("0"),
            Self::Number(v) => write!(f, "{v}"),
            Self::Category(c) => f.write_str(c),
        }
    }
}

/// A declarative axis.
#[derive(Clone)]
pub struct AxisSpec {
    /// Unique axis id.
    pub id: AxisId,
    /// The Y domain group this axis renders when it is Y-oriented.
    pub group_id: GroupId,
    /// The edge the axis is attached to.
    pub position: Position,
    /// Hides the axis entirely.
    pub hide: bool,
    /// Keeps ticks that would overlap a neighbour's label (with a blank label).
    pub show_overlapping_ticks: bool,
    /// Keeps labels that would overlap a neighbour's label.
    pub show_overlapping_labels: bool,
    /// Keeps consecutive ticks whose labels are identical.
    pub show_duplicated_ticks: bool,
    /// Emits grid lines across the plot area for each visible tick.
    pub show_grid_lines: bool,
    /// Optional axis title.
    pub title: Option<String>,
    /// Renders tick values as labels.
    pub tick_format: TickFormatter,
    /// Per-axis style, overriding the theme.
    pub style: Option<AxisStyle>,
    /// Custom Y domain bounds.
    pub domain: Option<DomainRange>,
    /// Keeps only integral tick values.
    pub integers_only: bool,
    /// Requested tick count; the scale default when `None`.
    pub ticks: Option<usize>,
}

impl fmt::Debug for AxisSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisSpec")
            .field("id", &self.id)
            .field("group_id", &self.group_id)
            .field("position", &self.position)
            .field("hide", &self.hide)
            .field("show_overlapping_ticks", &self.show_overlapping_ticks)
            .field("show_overlapping_labels", &self.show_overlapping_labels)
            .field("show_duplicated_ticks", &self.show_duplicated_ticks)
            .field("show_grid_lines", &self.show_grid_lines)
            .field("title", &self.title)
            .field("style", &self.style)
            .field("domain", &self.domain)
            .field("integers_only", &self.integers_only)
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

impl AxisSpec {
    /// Creates a visible axis in the global group with the default tick format.
    pub fn new(id: impl Into<AxisId>, position: Position) -> Self {
        Self {
            id: id.into(),
            group_id: GroupId::default(),
            position,
            hide: false,
            show_overlapping_ticks: false,
            show_overlapping_labels: false,
            show_duplicated_ticks: true,
            show_grid_lines: false,
            title: None,
            tick_format: default_tick_formatter(),
            style: None,
            domain: None,
            integers_only: false,
            ticks: None,
        }
    }

    /// Sets the Y domain group.
    #[must_use]
    pub fn with_group_id(mut self, group_id: impl Into<GroupId>) -> Self {
        self.group_id = group_id.into();
        self
    }

    /// Hides or shows the axis.
    #[must_use]
    pub fn with_hide(mut self, hide: bool) -> Self {
        self.hide = hide;
        self
    }

    /// Keeps overlapping ticks.
    #[must_use]
    pub fn with_show_overlapping_ticks(mut self, show: bool) -> Self {
        self.show_overlapping_ticks = show;
        self
    }

    /// Keeps overlapping labels.
    #[must_use]
    pub fn with_show_overlapping_labels(mut self, show: bool) -> Self {
        self.show_overlapping_labels = show;
        self
    }

    /// Keeps or collapses consecutive duplicate labels.
    #[must_use]
    pub fn with_show_duplicated_ticks(mut self, show: bool) -> Self {
        self.show_duplicated_ticks = show;
        self
    }

    /// Emits grid lines.
    #[must_use]
    pub fn with_grid_lines(mut self, show: bool) -> Self {
        self.show_grid_lines = show;
        self
    }

    /// Sets the axis title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the tick label formatter.
    #[must_use]
    pub fn with_tick_format(
        mut self,
        format: impl Fn(&TickValue, &TickFormatOptions) -> String + Send + Sync + 'static,
    ) -> Self {
        self.tick_format = Arc::new(format);
        self
    }

    /// Sets a shared tick label formatter.
    #[must_use]
    pub fn with_tick_formatter(mut self, formatter: TickFormatter) -> Self {
        self.tick_format = formatter;
        self
    }

    /// Overrides the theme style for this axis.
    #[must_use]
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Sets custom Y domain bounds.
    #[must_use]
    pub fn with_domain(mut self, domain: DomainRange) -> Self {
        self.domain = Some(domain);
        self
    }

    /// Keeps only integral tick values.
    #[must_use]
    pub fn with_integers_only(mut self, integers_only: bool) -> Self {
        self.integers_only = integers_only;
        self
    }

    /// Requests roughly `count` ticks.
    #[must_use]
    pub fn with_tick_count(mut self, count: usize) -> Self {
        self.ticks = Some(count);
        self
    }
}

/// Returns `true` when an axis at `position` renders a Y domain under `rotation`.
#[must_use]
pub fn is_y_domain(position: Position, rotation: Rotation) -> bool {
    let straight = matches!(rotation, Rotation::Deg0 | Rotation::Deg180);
    if position.is_vertical() {
        straight
    } else {
        !straight
    }
}

/// Builds the pixel scale for an axis over `range`.
///
/// Y-oriented axes use the Y domain whose group matches the axis group and
/// return `None` when there is none. X-oriented axes always resolve.
#[must_use]
pub fn scale_for_axis_spec(
    axis_spec: &AxisSpec,
    x_domain: &XDomain,
    y_domains: &[YDomain],
    bars: BarLayout,
    rotation: Rotation,
    range: (f64, f64),
) -> Option<Scale> {
    let tick_count = axis_spec.ticks.unwrap_or(DEFAULT_TICK_COUNT);
    if is_y_domain(axis_spec.position, rotation) {
        let y_domain = y_domains
            .iter()
            .find(|d| d.group_id == axis_spec.group_id)?;
        Some(compute_y_scale(
            y_domain,
            range,
            tick_count,
            axis_spec.integers_only,
        ))
    } else {
        Some(compute_x_scale(
            x_domain,
            bars,
            range,
            tick_count,
            axis_spec.integers_only,
        ))
    }
}
