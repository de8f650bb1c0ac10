// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene composition.
//!
//! Owns the lighting rig, the ground reference, the wall-primitive arena
//! and the optional furnished asset. Every reconstruction clears the
//! previously attached wall/ground primitives and the asset instance while
//! preserving the lights; the asset's decoded node stays alive in the
//! engine-owned cache.

use std::fmt;
use std::sync::Arc;

use nalgebra::{Point3, Vector3};
use replan_core::ModelBounds;
use tracing::{debug, warn};

use crate::asset::SceneNode;
use crate::primitive::{PrimitiveArena, PrimitiveKind, RenderPrimitive, WallGroup};

/// Side of the ground reference plane in meters
pub const GROUND_SPAN: f64 = 20.0;
/// Assets smaller than this along every axis are scaled up
pub const MIN_ASSET_EXTENT: f64 = 1.0;
/// Assets larger than this along any axis are scaled down
pub const MAX_ASSET_EXTENT: f64 = 50.0;

/// Uniform sky light
#[derive(Debug, Clone)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Single directional key light
#[derive(Debug, Clone)]
pub struct DirectionalLight {
    pub position: Point3<f64>,
    pub color: [f32; 3],
    pub intensity: f32,
}

/// The lighting rig, created once and preserved across reconstructions
#[derive(Debug, Clone)]
pub struct LightRig {
    pub ambient: AmbientLight,
    pub directional: DirectionalLight,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            ambient: AmbientLight {
                color: [1.0, 1.0, 1.0],
                intensity: 0.5,
            },
            directional: DirectionalLight {
                position: Point3::new(10.0, 10.0, 5.0),
                color: [1.0, 1.0, 1.0],
                intensity: 1.0,
            },
        }
    }
}

/// Non-fatal conditions the host UI may surface as a banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneWarning {
    /// The furnished asset decoded to zero meshes (or no vertices)
    EmptyAsset,
    /// The asset has vertices but no measurable extent
    DegenerateAsset,
}

impl fmt::Display for SceneWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneWarning::EmptyAsset => write!(f, "furnished asset contains no meshes"),
            SceneWarning::DegenerateAsset => {
                write!(f, "furnished asset has no measurable extent")
            }
        }
    }
}

/// A furnished asset normalized into the scene: centered on x/z, resting
/// on y = 0, uniformly scaled into the permitted envelope
#[derive(Debug, Clone)]
pub struct AssetInstance {
    pub node: Arc<SceneNode>,
    pub scale: f64,
    pub offset: Vector3<f64>,
    bounds: ModelBounds,
}

impl AssetInstance {
    /// Bounds of the normalized asset in world space
    pub fn bounds(&self) -> ModelBounds {
        self.bounds
    }
}

/// Composes walls, ground, lights and the optional furnished asset into
/// one renderable scene
#[derive(Debug, Default)]
pub struct SceneComposer {
    lights: LightRig,
    arena: PrimitiveArena,
    asset: Option<AssetInstance>,
}

impl SceneComposer {
    pub fn new() -> Self {
        Self {
            lights: LightRig::default(),
            arena: PrimitiveArena::new(),
            asset: None,
        }
    }

    pub fn lights(&self) -> &LightRig {
        &self.lights
    }

    /// Replace all reconstructed content with a fresh ground reference and
    /// the given wall primitives. Lights survive.
    pub fn rebuild_walls(&mut self, walls: Vec<RenderPrimitive>) {
        let disposed = self.clear_reconstructed();
        debug!(disposed, rebuilt = walls.len(), "scene rebuilt");

        self.arena.insert(RenderPrimitive::ground(GROUND_SPAN));
        for wall in walls {
            self.arena.insert(wall);
        }
    }

    /// Attach the furnished asset, normalizing position and scale.
    /// Returns a non-fatal warning instead of failing on unusable assets.
    pub fn attach_asset(&mut self, node: Arc<SceneNode>) -> Option<SceneWarning> {
        if node.mesh_count() == 0 {
            warn!(name = %node.name, "furnished asset has no meshes; scene keeps walls only");
            return Some(SceneWarning::EmptyAsset);
        }

        let raw = node.bounds();
        if !raw.is_valid() {
            warn!(name = %node.name, "furnished asset has no vertices; scene keeps walls only");
            return Some(SceneWarning::EmptyAsset);
        }

        let extent = raw.largest_extent();
        let (scale, warning) = if extent < 1e-9 {
            (1.0, Some(SceneWarning::DegenerateAsset))
        } else if extent > MAX_ASSET_EXTENT {
            (MAX_ASSET_EXTENT / extent, None)
        } else if extent < MIN_ASSET_EXTENT {
            (MIN_ASSET_EXTENT / extent, None)
        } else {
            (1.0, None)
        };

        // Center on x/z, rest the lowest point on the ground plane
        let center = raw.center();
        let offset = Vector3::new(
            -center.x * scale,
            -raw.min.y * scale,
            -center.z * scale,
        );

        let mut bounds = ModelBounds::new();
        bounds.expand(Point3::new(
            raw.min.x * scale + offset.x,
            raw.min.y * scale + offset.y,
            raw.min.z * scale + offset.z,
        ));
        bounds.expand(Point3::new(
            raw.max.x * scale + offset.x,
            raw.max.y * scale + offset.y,
            raw.max.z * scale + offset.z,
        ));

        debug!(name = %node.name, scale, "furnished asset attached");
        self.asset = Some(AssetInstance {
            node,
            scale,
            offset,
            bounds,
        });
        warning
    }

    /// Dispose and drop all reconstructed content (walls, ground, asset
    /// instance), preserving the lighting rig. Idempotent; returns the
    /// number of primitives that were still live.
    pub fn clear_reconstructed(&mut self) -> usize {
        self.asset = None;
        self.arena.dispose_and_clear()
    }

    /// Bounds used for camera placement: the furnished asset when one is
    /// attached, the wall primitives otherwise
    pub fn bounds(&self) -> ModelBounds {
        if let Some(asset) = &self.asset {
            return asset.bounds();
        }
        let mut bounds = ModelBounds::new();
        for wall in self.wall_primitives() {
            bounds.merge(&wall.bounds());
        }
        bounds
    }

    pub fn primitives(&self) -> impl Iterator<Item = &RenderPrimitive> {
        self.arena.iter()
    }

    pub fn wall_primitives(&self) -> impl Iterator<Item = &RenderPrimitive> {
        self.arena
            .iter()
            .filter(|primitive| matches!(primitive.kind, PrimitiveKind::Wall(_)))
    }

    pub fn ground(&self) -> Option<&RenderPrimitive> {
        self.arena
            .iter()
            .find(|primitive| primitive.kind == PrimitiveKind::Ground)
    }

    pub fn group_count(&self, group: WallGroup) -> usize {
        self.arena.group_count(group)
    }

    pub fn asset(&self) -> Option<&AssetInstance> {
        self.asset.as_ref()
    }
}
