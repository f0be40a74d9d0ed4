// Copyright 2025 the TickPlan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolved domains and custom Y domain overrides.
//!
//! Axes may carry a [`DomainRange`] override for the Y group they render.
//! Overrides from axes sharing a group are merged by widening, then applied
//! on top of the Y domains computed from data.

use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::axis::{AxisSpec, GroupId, Rotation, TickValue, is_y_domain};
use crate::error::LayoutError;
use crate::scale::ScaleType;
use crate::time::TimeZone;

/// The values a scale maps from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Domain {
    /// A `(min, max)` interval.
    Continuous(f64, f64),
    /// Categories in display order.
    Ordinal(Vec<TickValue>),
}

/// The shared X domain of a chart.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct XDomain {
    /// Mapping kind.
    pub scale_type: ScaleType,
    /// Domain values.
    pub domain: Domain,
    /// Bars occupy whole intervals along this domain.
    pub is_band_scale: bool,
    /// Smallest gap between consecutive data points.
    pub min_interval: f64,
    /// Zone used to align and label time ticks.
    pub time_zone: Option<TimeZone>,
}

impl XDomain {
    /// A continuous domain over `(min, max)`.
    #[must_use]
    pub fn continuous(scale_type: ScaleType, domain: (f64, f64)) -> Self {
        Self {
            scale_type,
            domain: Domain::Continuous(domain.0, domain.1),
            is_band_scale: false,
            min_interval: 0.0,
            time_zone: None,
        }
    }

    /// An ordinal domain over `categories`.
    #[must_use]
    pub fn ordinal(categories: Vec<TickValue>) -> Self {
        Self {
            scale_type: ScaleType::Ordinal,
            domain: Domain::Ordinal(categories),
            is_band_scale: true,
            min_interval: 0.0,
            time_zone: None,
        }
    }

    /// Marks the domain as a band domain with the given data interval.
    #[must_use]
    pub fn with_band_scale(mut self, min_interval: f64) -> Self {
        self.is_band_scale = true;
        self.min_interval = min_interval;
        self
    }

    /// Sets the smallest gap between data points.
    #[must_use]
    pub fn with_min_interval(mut self, min_interval: f64) -> Self {
        self.min_interval = min_interval;
        self
    }

    /// Sets the time zone.
    #[must_use]
    pub fn with_time_zone(mut self, time_zone: TimeZone) -> Self {
        self.time_zone = Some(time_zone);
        self
    }
}

/// A computed Y domain for one group.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct YDomain {
    /// The group whose axes render this domain.
    pub group_id: GroupId,
    /// Mapping kind.
    pub scale_type: ScaleType,
    /// `(min, max)` interval.
    pub domain: (f64, f64),
    /// Bars occupy whole intervals along this domain.
    pub is_band_scale: bool,
}

impl YDomain {
    /// A linear domain for `group_id`.
    #[must_use]
    pub fn new(group_id: impl Into<GroupId>, domain: (f64, f64)) -> Self {
        Self {
            group_id: group_id.into(),
            scale_type: ScaleType::Linear,
            domain,
            is_band_scale: false,
        }
    }

    /// Sets the mapping kind.
    #[must_use]
    pub fn with_scale_type(mut self, scale_type: ScaleType) -> Self {
        self.scale_type = scale_type;
        self
    }
}

/// Custom domain bounds; either side may be left open.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DomainRange {
    /// Lower bound.
    pub min: Option<f64>,
    /// Upper bound.
    pub max: Option<f64>,
}

impl DomainRange {
    /// Both bounds.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Lower bound only.
    #[must_use]
    pub fn lower(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Upper bound only.
    #[must_use]
    pub fn upper(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Widens `self` to also cover `other`; open sides keep the established bound.
    #[must_use]
    pub fn widen(self, other: Self) -> Self {
        Self {
            min: pick(self.min, other.min, f64::min),
            max: pick(self.max, other.max, f64::max),
        }
    }
}

fn pick(a: Option<f64>, b: Option<f64>, f: fn(f64, f64) -> f64) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(f(a, b)),
        (a, b) => a.or(b),
    }
}

/// Merges the custom domains of Y-oriented axes by group id.
///
/// Fails when an X-oriented axis carries a domain, or when a complete domain
/// has `min > max`.
pub fn merge_y_custom_domains_by_group_id(
    axis_specs: &[AxisSpec],
    rotation: Rotation,
) -> Result<HashMap<GroupId, DomainRange>, LayoutError> {
    let mut merged: HashMap<GroupId, DomainRange> = HashMap::new();
    for spec in axis_specs {
        let Some(domain) = spec.domain else {
            continue;
        };
        if !is_y_domain(spec.position, rotation) {
            return Err(LayoutError::XDomainOnAxis {
                axis_id: spec.id.clone(),
            });
        }
        if let (Some(min), Some(max)) = (domain.min, domain.max) {
            if min > max {
                return Err(LayoutError::InvalidCustomDomain {
                    axis_id: spec.id.clone(),
                });
            }
        }
        merged
            .entry(spec.group_id.clone())
            .and_modify(|prev| *prev = prev.widen(domain))
            .or_insert(domain);
    }
    Ok(merged)
}

/// Applies merged custom domains onto computed Y domains.
///
/// Complete overrides replace both bounds. A one-sided override keeps the
/// computed value on the open side, and fails if it would invert the domain.
pub fn apply_custom_y_domains(
    y_domains: &[YDomain],
    custom_domains: &HashMap<GroupId, DomainRange>,
) -> Result<Vec<YDomain>, LayoutError> {
    y_domains
        .iter()
        .map(|y_domain| {
            let Some(custom) = custom_domains.get(&y_domain.group_id) else {
                return Ok(y_domain.clone());
            };
            let (computed_min, computed_max) = y_domain.domain;
            let domain = match (custom.min, custom.max) {
                (Some(min), Some(max)) => (min, max),
                (Some(min), None) => {
                    if min > computed_max {
                        return Err(LayoutError::CustomMinAboveComputedMax {
                            group_id: y_domain.group_id.clone(),
                        });
                    }
                    (min, computed_max)
                }
                (None, Some(max)) => {
                    if computed_min > max {
                        return Err(LayoutError::ComputedMinAboveCustomMax {
                            group_id: y_domain.group_id.clone(),
                        });
                    }
                    (computed_min, max)
                }
                (None, None) => y_domain.domain,
            };
            Ok(YDomain {
                domain,
                ..y_domain.clone()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::axis::{AxisId, Position};

    fn left(id: &str, group: &str, domain: DomainRange) -> AxisSpec {
        AxisSpec::new(id, Position::Left)
            .with_group_id(group)
            .with_domain(domain)
    }

    #[test]
    fn domains_in_a_group_are_widened() {
        let specs = vec![
            left("axis_1", "group_1", DomainRange::new(0.0, 5.0)),
            left("axis_2", "group_1", DomainRange::new(-3.0, 3.0)),
            left("axis_3", "group_2", DomainRange::new(1.0, 2.0)),
            AxisSpec::new("axis_4", Position::Right).with_group_id("group_2"),
        ];
        let merged = merge_y_custom_domains_by_group_id(&specs, Rotation::Deg0).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged["group_1"], DomainRange::new(-3.0, 5.0));
        assert_eq!(merged["group_2"], DomainRange::new(1.0, 2.0));
    }

    #[test]
    fn missing_bounds_never_erase_established_ones() {
        let specs = vec![
            left("axis_1", "g", DomainRange::upper(9.0)),
            left("axis_2", "g", DomainRange::new(0.0, 7.0)),
        ];
        let merged = merge_y_custom_domains_by_group_id(&specs, Rotation::Deg0).unwrap();
        assert_eq!(merged["g"], DomainRange::new(0.0, 9.0));

        let specs = vec![
            left("axis_1", "g", DomainRange::lower(2.0)),
            left("axis_2", "g", DomainRange::upper(4.0)),
            left("axis_3", "g", DomainRange::lower(1.0)),
        ];
        let merged = merge_y_custom_domains_by_group_id(&specs, Rotation::Deg0).unwrap();
        assert_eq!(merged["g"], DomainRange::new(1.0, 4.0));
    }

    #[test]
    fn x_axis_domain_is_rejected() {
        let specs = vec![
            AxisSpec::new("axis_2", Position::Bottom).with_domain(DomainRange::new(0.0, 1.0)),
        ];
        assert_eq!(
            merge_y_custom_domains_by_group_id(&specs, Rotation::Deg0),
            Err(LayoutError::XDomainOnAxis {
                axis_id: AxisId::new("axis_2")
            })
        );
        // A quarter turn makes the bottom axis Y-oriented.
        assert!(merge_y_custom_domains_by_group_id(&specs, Rotation::Deg90).is_ok());
    }

    #[test]
    fn inverted_domain_is_rejected() {
        let specs = vec![left("axis_1", "g", DomainRange::new(3.0, 1.0))];
        assert_eq!(
            merge_y_custom_domains_by_group_id(&specs, Rotation::Deg0),
            Err(LayoutError::InvalidCustomDomain {
                axis_id: AxisId::new("axis_1")
            })
        );
    }

    #[test]
    fn custom_bounds_replace_computed_ones() {
        let computed = vec![YDomain::new("a", (0.0, 10.0)), YDomain::new("b", (0.0, 10.0))];
        let mut custom = HashMap::new();
        custom.insert(GroupId::new("a"), DomainRange::lower(2.0));
        custom.insert(GroupId::new("b"), DomainRange::new(-1.0, 1.0));
        let applied = apply_custom_y_domains(&computed, &custom).unwrap();
        assert_eq!(applied[0].domain, (2.0, 10.0));
        assert_eq!(applied[1].domain, (-1.0, 1.0));

        custom.insert(GroupId::new("a"), DomainRange::upper(5.0));
        let applied = apply_custom_y_domains(&computed, &custom).unwrap();
        assert_eq!(applied[0].domain, (0.0, 5.0));
    }

    #[test]
    fn one_sided_bounds_cannot_invert_the_domain() {
        let computed = vec![YDomain::new("a", (0.0, 10.0))];
        let mut custom = HashMap::new();
        custom.insert(GroupId::new("a"), DomainRange::lower(11.0));
        assert_eq!(
            apply_custom_y_domains(&computed, &custom),
            Err(LayoutError::CustomMinAboveComputedMax {
                group_id: GroupId::new("a")
            })
        );
        custom.insert(GroupId::new("a"), DomainRange::upper(-1.0));
        assert_eq!(
            apply_custom_y_domains(&computed, &custom),
            Err(LayoutError::ComputedMinAboveCustomMax {
                group_id: GroupId::new("a")
            })
        );
    }
}
