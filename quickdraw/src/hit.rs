// Copyright 2025 the Quickdraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Narrow-phase point tests used to resolve pointer targets.
//!
//! The stage walks its touch targets in priority order and asks each one
//! whether it contains the pointer. Geometry answers in its own local space;
//! [`Node`](crate::Node) maps the surface point through the inverse of its
//! transform first, so a rotated shape is hit exactly where it was drawn.

use kurbo::{BezPath, Point, Shape};

/// Parameters controlling point-in-geometry tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitParams {
    /// Inclusive tolerance, in local units, around filled regions.
    ///
    /// With a positive tolerance a point inside the inflated bounding box but
    /// outside the fill still counts, which helps with small targets under
    /// coarse pointers. Zero means an exact fill test.
    pub fill_tolerance: f64,
}

impl Default for HitParams {
    fn default() -> Self {
        Self {
            fill_tolerance: 0.0,
        }
    }
}

/// Geometry that can answer "does this local-space point hit me?".
pub trait PreciseHitTest {
    /// Test `pt`, given in the implementor's local coordinate space.
    fn hit_test_local(&self, pt: Point, params: &HitParams) -> bool;
}

/// Fill-only hit using [`kurbo::Shape::contains`] (non-zero winding).
impl PreciseHitTest for BezPath {
    fn hit_test_local(&self, pt: Point, params: &HitParams) -> bool {
        let bounds = self.bounding_box();
        let inflated = if params.fill_tolerance > 0.0 {
            bounds.inflate(params.fill_tolerance, params.fill_tolerance)
        } else {
            bounds
        };
        if !inflated.contains(pt) {
            return false;
        }
        self.contains(pt) || params.fill_tolerance > 0.0
    }
}
