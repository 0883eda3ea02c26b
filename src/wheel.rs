//! Placement of cards around the virtual wheel.
//!
//! Every card shares one pivot, `radius` pixels below its top anchor, and is
//! only ever rotated about that pivot. The arc and the spacing between cards
//! fall out of the rotation alone.

use std::f64::consts::PI;

use nalgebra as na;
use serde::Serialize;

use crate::geometry::GeometryConfig;
use crate::helper::pivot_rotation;

pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 60.0;

/// z-index resolution: one step per hundredth of a degree.
const Z_STEPS_PER_DEGREE: f64 = 100.0;
const Z_CEILING: f64 = 1_000_000.0;

/// Angular distance between neighbouring cards, in degrees.
pub fn compute_angle_step(config: &GeometryConfig) -> f64 {
    let circumference = 2.0 * PI * config.radius;
    config.footprint() / circumference * 360.0
}

/// Folds `raw_angle` into `[-total_spread / 2, total_spread / 2]`.
pub fn wrap_angle(raw_angle: f64, total_spread: f64) -> f64 {
    if total_spread.is_nan() || total_spread <= 0.0 || !raw_angle.is_finite() {
        return 0.0;
    }
    let half = total_spread / 2.0;
    -half + (raw_angle + half).rem_euclid(total_spread)
}

pub fn is_visible(angle: f64, threshold: f64) -> bool {
    angle.abs() <= threshold
}

/// Stacking order: the card at the top of the arc is painted last.
///
/// Distances are rounded to a hundredth of a degree, so the order is strict
/// only between angles whose magnitudes differ by at least 0.01°. Angles
/// closer than that (and mirrored angles) share a z-index. Beyond 10 000°
/// everything clamps to 0.
pub fn z_order(angle: f64) -> i32 {
    let depth = (angle.abs() * Z_STEPS_PER_DEGREE).round();
    (Z_CEILING - depth).max(0.0) as i32
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPlacement {
    pub index: usize,
    pub source_index: usize,
    pub angle_degrees: f64,
    pub visible: bool,
    pub z_order: i32,
}

impl ItemPlacement {
    /// Affine transform of the card for a top anchor at `(anchor_x, anchor_y)`.
    pub fn transform(&self, anchor_x: f64, anchor_y: f64, radius: f64) -> na::Matrix3<f64> {
        pivot_rotation(self.angle_degrees, anchor_x, anchor_y + radius)
    }
}

/// Layout of one extended sequence under one geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct WheelLayout {
    geometry: GeometryConfig,
    sequence_len: usize,
    source_len: usize,
    angle_step: f64,
    total_spread: f64,
    visibility_threshold: f64,
}

impl WheelLayout {
    pub fn new(geometry: GeometryConfig, source_len: usize, visibility_threshold: f64) -> Self {
        let sequence_len = source_len.saturating_mul(geometry.duplication_count);
        let angle_step = compute_angle_step(&geometry);
        Self {
            geometry,
            sequence_len,
            source_len,
            angle_step,
            total_spread: sequence_len as f64 * angle_step,
            visibility_threshold,
        }
    }

    pub fn geometry(&self) -> &GeometryConfig {
        &self.geometry
    }

    pub fn angle_step(&self) -> f64 {
        self.angle_step
    }

    pub fn total_spread(&self) -> f64 {
        self.total_spread
    }

    pub fn sequence_len(&self) -> usize {
        self.sequence_len
    }

    pub fn angle_for(&self, index: usize, rotation: f64) -> f64 {
        wrap_angle(rotation + index as f64 * self.angle_step, self.total_spread)
    }

    pub fn placement(&self, index: usize, rotation: f64) -> ItemPlacement {
        let angle = self.angle_for(index, rotation);
        ItemPlacement {
            index,
            source_index: if self.source_len == 0 { 0 } else { index % self.source_len },
            angle_degrees: angle,
            visible: is_visible(angle, self.visibility_threshold),
            z_order: z_order(angle),
        }
    }

    pub fn layout(&self, rotation: f64) -> Vec<ItemPlacement> {
        if self.sequence_len == 0 {
            return Vec::new();
        }
        (0..self.sequence_len)
            .map(|index| self.placement(index, rotation))
            .collect()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn wrap_stays_in_range(raw in -1.0e7f64..1.0e7, spread in 0.001f64..5000.0) {
            let angle = wrap_angle(raw, spread);
            prop_assert!(angle >= -spread / 2.0 && angle <= spread / 2.0,
                "wrap({}, {}) = {}", raw, spread, angle);
        }

        #[test]
        fn wrap_preserves_residue(raw in -1.0e4f64..1.0e4, spread in 1.0f64..2000.0) {
            let angle = wrap_angle(raw, spread);
            let turns = (raw - angle) / spread;
            prop_assert!((turns - turns.round()).abs() < 1e-6);
        }

        #[test]
        fn visibility_is_symmetric(angle in -720.0f64..720.0, threshold in 0.0f64..180.0) {
            prop_assert_eq!(is_visible(angle, threshold), is_visible(-angle, threshold));
        }

        /// Strictly decreasing for angles on the 0.01° grid, the finest step
        /// `z_order` distinguishes.
        #[test]
        fn z_order_decreases_with_distance(a in -500_000i64..500_000, b in -500_000i64..500_000) {
            let (a, b) = (a as f64 / 100.0, b as f64 / 100.0);
            prop_assume!(a.abs() != b.abs());
            let (near, far) = if a.abs() < b.abs() { (a, b) } else { (b, a) };
            prop_assert!(z_order(near) > z_order(far));
        }

        #[test]
        fn placements_are_bounded(rotation in -1.0e6f64..1.0e6, items in 1usize..8) {
            let layout = WheelLayout::new(GeometryConfig::FULL, items, DEFAULT_VISIBILITY_THRESHOLD);
            let half = layout.total_spread() / 2.0;
            for p in layout.layout(rotation) {
                prop_assert!(p.angle_degrees.abs() <= half);
                prop_assert_eq!(p.visible, p.angle_degrees.abs() <= DEFAULT_VISIBILITY_THRESHOLD);
            }
        }
    }
}
