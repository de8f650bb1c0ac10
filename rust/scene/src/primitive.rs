// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Renderable primitives and their arena.
//!
//! Every wall (and the ground reference) is one axis-aligned box yawed
//! about the vertical, stored in an arena keyed by a stable ID: the wall
//! segment ID for structured walls, a synthetic per-pixel index for raster
//! cells. The arena is rebuilt wholesale on each reconstruction rather
//! than patched in place, and disposal is safe to repeat.

use nalgebra::{Point3, Rotation3, Vector3};
use replan_core::ModelBounds;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Visual channel / grouping of a wall primitive.
///
/// Bearing and non-bearing are the two fixed channels of the structured
/// path (bearing walls must never be visually indistinguishable from
/// non-bearing ones); external and internal are the raster-cell
/// collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallGroup {
    /// Load-bearing; rendered in the fixed "do not modify" channel
    Bearing,
    /// Non-bearing; rendered in the fixed "modifiable" channel
    NonBearing,
    /// Raster cell on the outer envelope
    External,
    /// Raster cell classified as partition wall
    Internal,
}

impl WallGroup {
    /// Fixed per-group RGB color
    pub fn color(&self) -> [f32; 3] {
        match self {
            WallGroup::Bearing => [0.86, 0.21, 0.18],
            WallGroup::NonBearing => [0.24, 0.68, 0.34],
            WallGroup::External => [0.42, 0.45, 0.50],
            WallGroup::Internal => [0.78, 0.76, 0.70],
        }
    }

    /// Whether the host may offer edits on walls of this group
    pub fn is_modifiable(&self) -> bool {
        matches!(self, WallGroup::NonBearing | WallGroup::Internal)
    }
}

/// Stable identity of a primitive across one reconstruction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveId {
    /// Structured wall, keyed by its segment ID
    Segment(String),
    /// Raster wall cell, keyed by placement index
    Cell(u32),
    /// One wall of the generic default shell
    Shell(u8),
    /// The ground reference plane
    Ground,
}

/// What a primitive represents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Wall(WallGroup),
    Ground,
}

/// One renderable box.
///
/// Local axes before the yaw: thickness along x, height along y, length
/// along z; `yaw = atan2(dir.x, dir.z)` maps the local z axis onto the
/// wall direction.
#[derive(Debug, Clone)]
pub struct RenderPrimitive {
    pub id: PrimitiveId,
    pub kind: PrimitiveKind,
    pub center: Point3<f64>,
    pub length: f64,
    pub height: f64,
    pub thickness: f64,
    pub yaw: f64,
    disposed: bool,
}

impl RenderPrimitive {
    pub fn wall(
        id: PrimitiveId,
        group: WallGroup,
        center: Point3<f64>,
        length: f64,
        height: f64,
        thickness: f64,
        yaw: f64,
    ) -> Self {
        Self {
            id,
            kind: PrimitiveKind::Wall(group),
            center,
            length,
            height,
            thickness,
            yaw,
            disposed: false,
        }
    }

    /// Flat ground reference centered on the origin
    pub fn ground(span: f64) -> Self {
        Self {
            id: PrimitiveId::Ground,
            kind: PrimitiveKind::Ground,
            center: Point3::origin(),
            length: span,
            height: 0.0,
            thickness: span,
            yaw: 0.0,
            disposed: false,
        }
    }

    pub fn group(&self) -> Option<WallGroup> {
        match self.kind {
            PrimitiveKind::Wall(group) => Some(group),
            PrimitiveKind::Ground => None,
        }
    }

    /// Release the primitive's GPU-side resources. Safe to call on an
    /// already-disposed primitive.
    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// The eight box corners with the yaw applied
    pub fn corners(&self) -> [Point3<f64>; 8] {
        let rotation = Rotation3::from_axis_angle(&Vector3::y_axis(), self.yaw);
        let hx = self.thickness / 2.0;
        let hy = self.height / 2.0;
        let hz = self.length / 2.0;

        let mut corners = [Point3::origin(); 8];
        let mut index = 0;
        for &sx in &[-1.0, 1.0] {
            for &sy in &[-1.0, 1.0] {
                for &sz in &[-1.0, 1.0] {
                    let local = Vector3::new(sx * hx, sy * hy, sz * hz);
                    corners[index] = self.center + rotation * local;
                    index += 1;
                }
            }
        }
        corners
    }

    /// Axis-aligned bounds of the yawed box
    pub fn bounds(&self) -> ModelBounds {
        let mut bounds = ModelBounds::new();
        for corner in self.corners() {
            bounds.expand(corner);
        }
        bounds
    }
}

/// Arena of renderable primitives keyed by stable IDs
#[derive(Debug, Default)]
pub struct PrimitiveArena {
    items: FxHashMap<PrimitiveId, RenderPrimitive>,
    order: Vec<PrimitiveId>,
}

impl PrimitiveArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a primitive; a duplicate ID replaces the existing entry
    pub fn insert(&mut self, primitive: RenderPrimitive) {
        if !self.items.contains_key(&primitive.id) {
            self.order.push(primitive.id.clone());
        }
        self.items.insert(primitive.id.clone(), primitive);
    }

    pub fn get(&self, id: &PrimitiveId) -> Option<&RenderPrimitive> {
        self.items.get(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Primitives in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &RenderPrimitive> {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    /// Number of wall primitives in the given group
    pub fn group_count(&self, group: WallGroup) -> usize {
        self.iter()
            .filter(|primitive| primitive.group() == Some(group))
            .count()
    }

    /// Dispose every primitive and empty the arena. Returns the number of
    /// primitives that were still live. Repeating the call is a no-op.
    pub fn dispose_and_clear(&mut self) -> usize {
        let mut live = 0;
        for primitive in self.items.values_mut() {
            if !primitive.is_disposed() {
                primitive.dispose();
                live += 1;
            }
        }
        self.items.clear();
        self.order.clear();
        live
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_yaw_aligns_length_axis() {
        // Wall along +x: direction (1, 0), yaw = atan2(1, 0)
        let yaw = 1.0f64.atan2(0.0);
        let wall = RenderPrimitive::wall(
            PrimitiveId::Segment("w".into()),
            WallGroup::Bearing,
            Point3::new(2.0, 1.35, 0.0),
            4.0,
            2.7,
            0.15,
            yaw,
        );

        let bounds = wall.bounds();
        // Long axis ends up along world x, thickness along world z
        assert_relative_eq!(bounds.max.x - bounds.min.x, 4.0, epsilon = 1e-9);
        assert_relative_eq!(bounds.max.z - bounds.min.z, 0.15, epsilon = 1e-9);
        assert_relative_eq!(bounds.max.y - bounds.min.y, 2.7, epsilon = 1e-9);
    }

    #[test]
    fn test_dispose_idempotent() {
        let mut wall = RenderPrimitive::wall(
            PrimitiveId::Cell(0),
            WallGroup::External,
            Point3::origin(),
            0.1,
            3.0,
            0.1,
            0.0,
        );
        assert!(!wall.is_disposed());
        wall.dispose();
        wall.dispose();
        assert!(wall.is_disposed());
    }

    #[test]
    fn test_arena_insert_and_order() {
        let mut arena = PrimitiveArena::new();
        arena.insert(RenderPrimitive::ground(20.0));
        arena.insert(RenderPrimitive::wall(
            PrimitiveId::Cell(0),
            WallGroup::Internal,
            Point3::origin(),
            0.1,
            3.0,
            0.1,
            0.0,
        ));

        let ids: Vec<_> = arena.iter().map(|primitive| primitive.id.clone()).collect();
        assert_eq!(ids, vec![PrimitiveId::Ground, PrimitiveId::Cell(0)]);
        assert_eq!(arena.group_count(WallGroup::Internal), 1);
        assert_eq!(arena.group_count(WallGroup::Bearing), 0);
    }

    #[test]
    fn test_arena_dispose_and_clear_idempotent() {
        let mut arena = PrimitiveArena::new();
        arena.insert(RenderPrimitive::ground(20.0));
        assert_eq!(arena.dispose_and_clear(), 1);
        assert_eq!(arena.dispose_and_clear(), 0);
        assert!(arena.is_empty());
    }

    #[test]
    fn test_fixed_channels_are_distinct() {
        assert_ne!(
            WallGroup::Bearing.color(),
            WallGroup::NonBearing.color()
        );
        assert!(!WallGroup::Bearing.is_modifiable());
        assert!(WallGroup::NonBearing.is_modifiable());
    }
}
