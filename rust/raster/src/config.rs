// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration for the raster extraction pipeline.

use serde::{Deserialize, Serialize};

/// Tunable parameters for raster wall extraction.
///
/// Defaults match the behavior the rest of the system expects; none of the
/// thresholds are calibrated against a blueprint corpus, so hosts may
/// override them per document class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RasterConfig {
    /// A pixel is wall material iff all three color channels are below this
    pub darkness_threshold: u8,
    /// Fraction of each image dimension treated as the outer-envelope band
    pub margin_fraction: f64,
    /// World meters spanned by the image's longer axis; the shorter axis
    /// scales aspect-preserving
    pub world_span: f64,
    /// Height of each placed wall cell in meters
    pub cell_height: f64,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            darkness_threshold: 50,
            margin_fraction: 0.05,
            world_span: 20.0,
            cell_height: 3.0,
        }
    }
}
