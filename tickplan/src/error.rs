// Copyright 2025 the TickPlan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors raised during axis layout.

use alloc::string::String;

use crate::axis::{AxisId, GroupId};

/// A fatal configuration error.
///
/// Hidden axes, unknown groups and axes without measured dimensions are not
/// errors; they surface as [`AxisTicksOutcome`](crate::AxisTicksOutcome)
/// variants or as absent entries in the layout result.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// A custom domain was set on an axis that renders the X domain.
    #[error("[Axis {axis_id}]: custom domain for xDomain should be defined in Settings")]
    XDomainOnAxis {
        /// The offending axis.
        axis_id: AxisId,
    },
    /// A custom domain has `min > max`.
    #[error("[Axis {axis_id}]: custom domain is invalid, min is greater than max")]
    InvalidCustomDomain {
        /// The offending axis.
        axis_id: AxisId,
    },
    /// The axis could not be bound to any domain when positioning it.
    #[error("Cannot compute scale for axis spec {axis_id}")]
    MissingScale {
        /// The offending axis.
        axis_id: AxisId,
    },
    /// A lower-bound override lies above the computed domain maximum.
    #[error("custom yDomain for {group_id} is invalid, custom min is greater than computed max")]
    CustomMinAboveComputedMax {
        /// The Y domain group.
        group_id: GroupId,
    },
    /// An upper-bound override lies below the computed domain minimum.
    #[error("custom yDomain for {group_id} is invalid, computed min is greater than custom max")]
    ComputedMinAboveCustomMax {
        /// The Y domain group.
        group_id: GroupId,
    },
    /// A time zone string could not be parsed.
    #[error("invalid time zone `{time_zone}`, expected `utc`, `utc+H`, `utc-HH:MM` or `+HH:MM`")]
    InvalidTimeZone {
        /// The rejected input.
        time_zone: String,
    },
    /// A chart rotation other than 0, 90, -90 or 180 degrees.
    #[error("invalid chart rotation {degrees}, expected one of 0, 90, -90, 180")]
    InvalidRotation {
        /// The rejected angle.
        degrees: i32,
    },
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;

    use super::*;

    #[test]
    fn messages_name_the_offending_axis() {
        let err = LayoutError::XDomainOnAxis {
            axis_id: AxisId::new("axis_2"),
        };
        assert_eq!(
            err.to_string(),
            "[Axis axis_2]: custom domain for xDomain should be defined in Settings"
        );
        let err = LayoutError::MissingScale {
            axis_id: AxisId::new("axis_1"),
        };
        assert_eq!(err.to_string(), "Cannot compute scale for axis spec axis_1");
    }
}
