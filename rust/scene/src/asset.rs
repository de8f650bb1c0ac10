// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Furnished 3D asset: scene-graph nodes and the process-wide cache.
//!
//! Fetch and decode (including draco-style compressed payloads) are the
//! host's job behind [`AssetSource`]; the engine only sees decoded
//! [`SceneNode`] trees. The cache is an explicit object owned by the
//! engine, keyed by URL, populated at most once per URL and never
//! invalidated, so repeated view-mode switches don't re-fetch.

use std::sync::Arc;

use nalgebra::{Point3, Vector3};
use replan_core::{LoadError, ModelBounds};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Host-provided fetch + decode of a furnished asset
pub trait AssetSource {
    fn load_asset(&self, url: &str) -> Result<SceneNode, LoadError>;
}

/// Triangle mesh payload of one node
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeshData {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Vertex normals (nx, ny, nz)
    pub normals: Vec<f32>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// One node of a decoded asset's scene graph
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    /// Translation relative to the parent node
    pub translation: Vector3<f64>,
    /// Uniform scale relative to the parent node
    pub scale: f64,
    pub meshes: Vec<MeshData>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            translation: Vector3::zeros(),
            scale: 1.0,
            meshes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Total mesh count across the subtree
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
            + self
                .children
                .iter()
                .map(SceneNode::mesh_count)
                .sum::<usize>()
    }

    /// Bounds of all vertices in the subtree, node transforms applied
    pub fn bounds(&self) -> ModelBounds {
        let mut bounds = ModelBounds::new();
        self.expand_bounds(&mut bounds, Vector3::zeros(), 1.0);
        bounds
    }

    fn expand_bounds(&self, bounds: &mut ModelBounds, offset: Vector3<f64>, scale: f64) {
        let offset = offset + scale * self.translation;
        let scale = scale * self.scale;

        for mesh in &self.meshes {
            for vertex in mesh.positions.chunks_exact(3) {
                let point = Point3::new(
                    vertex[0] as f64 * scale + offset.x,
                    vertex[1] as f64 * scale + offset.y,
                    vertex[2] as f64 * scale + offset.z,
                );
                bounds.expand(point);
            }
        }
        for child in &self.children {
            child.expand_bounds(bounds, offset, scale);
        }
    }
}

/// Process-wide furnished-asset cache. Invalidation policy: never.
#[derive(Debug, Default)]
pub struct AssetCache {
    entries: FxHashMap<String, Arc<SceneNode>>,
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<Arc<SceneNode>> {
        self.entries.get(url).cloned()
    }

    /// Return the cached asset or load it through the source. Only a
    /// successful load populates the cache; failures leave the entry
    /// empty so a later reconstruction may retry.
    pub fn get_or_load(
        &mut self,
        url: &str,
        source: &dyn AssetSource,
    ) -> Result<Arc<SceneNode>, LoadError> {
        if let Some(node) = self.entries.get(url) {
            debug!(url, "furnished asset served from cache");
            return Ok(node.clone());
        }
        let node = Arc::new(source.load_asset(url)?);
        self.entries.insert(url.to_string(), node.clone());
        Ok(node)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
