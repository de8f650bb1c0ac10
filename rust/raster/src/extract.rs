// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boundary-cell extraction pipeline.
//!
//! Classification -> boundary detection -> external/internal split ->
//! world-space placement. External vs. internal is an edge-margin
//! heuristic standing in for "outer envelope vs. partition wall"; it is
//! intentionally approximate and only used when structured geometry is
//! absent.

use tracing::debug;

use crate::config::RasterConfig;
use crate::pixel::PixelBuffer;
use crate::types::{WallCell, WallCellSet};
use crate::wall_map::WallMap;

/// Result of one extraction run
#[derive(Debug, Clone)]
pub enum ExtractionOutcome {
    /// At least one boundary pixel qualified
    Cells(WallCellSet),
    /// Blank or fully degenerate image; caller falls back to the default shell
    Empty,
}

/// Run the full raster pipeline over a decoded blueprint.
///
/// Deterministic given identical pixels and configuration: cells are
/// placed in row-major pixel order, centered on the plan origin, with the
/// image's longer axis spanning `config.world_span` meters.
pub fn extract_wall_cells(pixels: &PixelBuffer, config: &RasterConfig) -> ExtractionOutcome {
    let map = WallMap::from_pixels(pixels, config.darkness_threshold);
    let width = map.width();
    let height = map.height();

    // Uniform meters-per-pixel keeps the aspect ratio of the drawing
    let scale = config.world_span / (width.max(height) as f64);
    let span_x = width as f64 * scale;
    let span_z = height as f64 * scale;

    let margin_x = width as f64 * config.margin_fraction;
    let margin_y = height as f64 * config.margin_fraction;

    let mut cells = WallCellSet::default();

    for (x, y) in map.boundary_pixels() {
        let is_external = classify_external(&map, x, y, margin_x, margin_y);
        cells.push(WallCell {
            x: (x as f64 + 0.5) * scale - span_x / 2.0,
            z: (y as f64 + 0.5) * scale - span_z / 2.0,
            pixel_size_x: scale,
            pixel_size_z: scale,
            is_external,
        });
    }

    debug!(
        wall_pixels = map.wall_count(),
        external = cells.external.len(),
        internal = cells.internal.len(),
        "raster extraction finished"
    );

    if cells.is_empty() {
        ExtractionOutcome::Empty
    } else {
        ExtractionOutcome::Cells(cells)
    }
}

/// External iff the boundary pixel sits on the image's outer edge, inside
/// the margin band of any border, or next to a non-wall pixel that is
/// itself inside the band.
fn classify_external(map: &WallMap, x: u32, y: u32, margin_x: f64, margin_y: f64) -> bool {
    let width = map.width();
    let height = map.height();

    if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
        return true;
    }
    if in_margin(x, y, width, height, margin_x, margin_y) {
        return true;
    }

    let neighbors = [
        (x as i64 - 1, y as i64),
        (x as i64 + 1, y as i64),
        (x as i64, y as i64 - 1),
        (x as i64, y as i64 + 1),
    ];
    neighbors.iter().any(|&(nx, ny)| {
        nx >= 0
            && ny >= 0
            && (nx as u32) < width
            && (ny as u32) < height
            && !map.is_wall(nx, ny)
            && in_margin(nx as u32, ny as u32, width, height, margin_x, margin_y)
    })
}

#[inline]
fn in_margin(x: u32, y: u32, width: u32, height: u32, margin_x: f64, margin_y: f64) -> bool {
    let xf = x as f64;
    let yf = y as f64;
    xf < margin_x
        || xf > (width as f64 - 1.0) - margin_x
        || yf < margin_y
        || yf > (height as f64 - 1.0) - margin_y
}
