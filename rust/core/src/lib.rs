// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RePlan Core
//!
//! Plan-space data model shared by every reconstruction path:
//!
//! - the structured geometry document ([`PlanDocument`]) as emitted by the
//!   backend (camelCase JSON, meters)
//! - the reconstruction path resolver ([`resolve`])
//! - axis-aligned model bounds ([`ModelBounds`]) used for camera placement
//!
//! The engine never persists any of these; documents are read-only inputs
//! and are discarded when a new plan variant is selected.

pub mod bounds;
pub mod error;
pub mod plan;
pub mod resolver;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};

pub use bounds::ModelBounds;
pub use error::{Error, LoadError, Result};
pub use plan::{
    PlanDocument, PlanGeometry, PlanMeta, PlanPoint, WallSegment, DEFAULT_WALL_HEIGHT,
    DEFAULT_WALL_THICKNESS, MIN_WALL_LENGTH,
};
pub use resolver::{resolve, ReconstructionPath};
