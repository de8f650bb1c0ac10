// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structured geometry document: wall segments in plan space.
//!
//! The wire format is the camelCase JSON the variant backend emits:
//!
//! ```json
//! { "geometry": { "walls": [
//!     { "id": "w1", "start": {"x": 0, "y": 0}, "end": {"x": 4, "y": 0},
//!       "height": 2.7, "thickness": 0.15, "isBearing": true }
//! ], "rooms": [], "openings": [] } }
//! ```
//!
//! Coordinates are meters in plan space; the origin is arbitrary but
//! consistent within one geometry. `height`, `thickness` and `isBearing`
//! are optional and take defaults during deserialization. Missing `start`
//! or `end` coordinates are tolerated here and rejected segment-by-segment
//! by the wall builder, so one malformed entry never blocks the batch.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default floor-to-ceiling wall height in meters
pub const DEFAULT_WALL_HEIGHT: f64 = 2.7;

/// Default wall thickness in meters
pub const DEFAULT_WALL_THICKNESS: f64 = 0.15;

/// Segments shorter than this (meters) are treated as degenerate
pub const MIN_WALL_LENGTH: f64 = 1e-4;

/// A 2D point in plan space (meters)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PlanPoint {
    pub x: f64,
    pub y: f64,
}

impl PlanPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &PlanPoint) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// One wall segment of the structured geometry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WallSegment {
    /// Stable identifier assigned by the geometry source
    #[serde(default)]
    pub id: Option<String>,
    /// Segment start in plan space; absent in malformed entries
    #[serde(default)]
    pub start: Option<PlanPoint>,
    /// Segment end in plan space; absent in malformed entries
    #[serde(default)]
    pub end: Option<PlanPoint>,
    /// Wall height in meters
    #[serde(default = "default_height")]
    pub height: f64,
    /// Wall thickness in meters
    #[serde(default = "default_thickness")]
    pub thickness: f64,
    /// Load-bearing flag; bearing walls must stay visually distinct
    #[serde(default)]
    pub is_bearing: bool,
}

fn default_height() -> f64 {
    DEFAULT_WALL_HEIGHT
}

fn default_thickness() -> f64 {
    DEFAULT_WALL_THICKNESS
}

impl WallSegment {
    /// Create a segment with default height/thickness
    pub fn new(id: impl Into<String>, start: PlanPoint, end: PlanPoint) -> Self {
        Self {
            id: Some(id.into()),
            start: Some(start),
            end: Some(end),
            height: DEFAULT_WALL_HEIGHT,
            thickness: DEFAULT_WALL_THICKNESS,
            is_bearing: false,
        }
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn bearing(mut self, is_bearing: bool) -> Self {
        self.is_bearing = is_bearing;
        self
    }

    /// Both endpoints, if present and finite
    pub fn endpoints(&self) -> Option<(PlanPoint, PlanPoint)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start.is_finite() && end.is_finite() => {
                Some((start, end))
            }
            _ => None,
        }
    }

    /// Segment length in meters, 0.0 when endpoints are missing
    pub fn length(&self) -> f64 {
        self.endpoints()
            .map(|(start, end)| start.distance_to(&end))
            .unwrap_or(0.0)
    }

    /// Near-zero or malformed segments are excluded from rendering
    pub fn is_degenerate(&self) -> bool {
        self.length() < MIN_WALL_LENGTH
    }

    pub fn midpoint(&self) -> Option<PlanPoint> {
        self.endpoints().map(|(start, end)| {
            PlanPoint::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0)
        })
    }
}

/// Metadata attached to a plan geometry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanMeta {
    /// Plan-space scale factor (meters per source unit)
    #[serde(default = "default_scale")]
    pub scale: f64,
}

fn default_scale() -> f64 {
    1.0
}

impl Default for PlanMeta {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

/// Structured wall geometry for one plan variant
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlanGeometry {
    #[serde(default)]
    pub meta: PlanMeta,
    #[serde(default)]
    pub walls: Vec<WallSegment>,
    /// Accepted and ignored; forward-compatible with richer documents
    #[serde(default)]
    pub rooms: Vec<serde_json::Value>,
    /// Accepted and ignored; forward-compatible with richer documents
    #[serde(default)]
    pub openings: Vec<serde_json::Value>,
}

/// Top-level structured geometry document
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlanDocument {
    #[serde(default)]
    pub geometry: PlanGeometry,
}

impl PlanDocument {
    /// Parse the backend's JSON wire format
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The structured path is only taken for a non-empty wall list
    pub fn has_walls(&self) -> bool {
        !self.geometry.walls.is_empty()
    }
}
