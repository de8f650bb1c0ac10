// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raster blueprint analysis.
//!
//! Fallback reconstruction path taken when no structured geometry is
//! available: classify dark pixels as wall material, keep only boundary
//! pixels (the wall outline, not its interior fill), split them into
//! external envelope vs. internal partition by an edge-margin heuristic,
//! and emit one placed [`WallCell`] per boundary pixel.
//!
//! The classification is a best-effort proxy with no access to semantic
//! room labels; its thresholds live in [`RasterConfig`] and are tunable,
//! not calibrated truths. The pipeline is deterministic for identical
//! pixel input and configuration.

pub mod config;
pub mod error;
pub mod extract;
pub mod pixel;
pub mod types;
pub mod wall_map;

pub use config::RasterConfig;
pub use error::{Error, Result};
pub use extract::{extract_wall_cells, ExtractionOutcome};
pub use pixel::{ImageSource, PixelBuffer};
pub use types::{WallCell, WallCellSet};
pub use wall_map::WallMap;
