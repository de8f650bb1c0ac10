// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned model bounds.
//!
//! Computed from the composed scene (the furnished asset when one is
//! attached, wall primitives otherwise) and used to fit the orbital camera
//! and to place the first-person start pose. Recomputed whenever the asset
//! is (re)loaded.

use nalgebra::{Point3, Vector3};

/// Axis-aligned bounding box in f64 precision
#[derive(Debug, Clone, Copy)]
pub struct ModelBounds {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
    sample_count: usize,
}

impl ModelBounds {
    /// Create new bounds initialized to invalid state
    pub fn new() -> Self {
        Self {
            min: Point3::new(f64::MAX, f64::MAX, f64::MAX),
            max: Point3::new(f64::MIN, f64::MIN, f64::MIN),
            sample_count: 0,
        }
    }

    /// Check if bounds are valid (at least one point added)
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.sample_count > 0
    }

    /// Expand bounds to include a point
    #[inline]
    pub fn expand(&mut self, point: Point3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
        self.sample_count += 1;
    }

    /// Merge another bounds into this one
    pub fn merge(&mut self, other: &ModelBounds) {
        if other.is_valid() {
            self.expand(other.min);
            self.expand(other.max);
            // expand() counted the two corners; keep the sample total honest
            self.sample_count += other.sample_count;
            self.sample_count -= 2;
        }
    }

    /// Center of the bounding box, origin when invalid
    #[inline]
    pub fn center(&self) -> Point3<f64> {
        if !self.is_valid() {
            return Point3::origin();
        }
        Point3::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }

    /// Extent along each axis, zero when invalid
    #[inline]
    pub fn size(&self) -> Vector3<f64> {
        if !self.is_valid() {
            return Vector3::zeros();
        }
        self.max - self.min
    }

    /// Largest extent over the three axes
    #[inline]
    pub fn largest_extent(&self) -> f64 {
        let size = self.size();
        size.x.max(size.y).max(size.z)
    }
}

impl Default for ModelBounds {
    fn default() -> Self {
        Self::new()
    }
}
