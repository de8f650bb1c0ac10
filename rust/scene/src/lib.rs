// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RePlan Scene
//!
//! Turns resolved plan inputs into a renderable scene: box primitives for
//! walls (structured segments or raster cells), a ground reference, a
//! fixed lighting rig, and an optional furnished asset normalized into the
//! scene. Primitives live in an arena keyed by stable IDs and are rebuilt
//! wholesale on every reconstruction; disposal is idempotent.

pub mod asset;
pub mod builder;
pub mod composer;
pub mod primitive;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use asset::{AssetCache, AssetSource, MeshData, SceneNode};
pub use builder::{
    build_default_shell, build_raster_walls, build_structured_walls, SHELL_HEIGHT, SHELL_SPAN,
    SHELL_THICKNESS,
};
pub use composer::{
    AmbientLight, AssetInstance, DirectionalLight, LightRig, SceneComposer, SceneWarning,
    GROUND_SPAN, MAX_ASSET_EXTENT, MIN_ASSET_EXTENT,
};
pub use primitive::{PrimitiveArena, PrimitiveId, PrimitiveKind, RenderPrimitive, WallGroup};
