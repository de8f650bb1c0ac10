// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall classification grid.
//!
//! Ephemeral per-reconstruction buffer: `true` where a pixel was
//! classified as wall material, discarded after cell extraction.

use crate::pixel::PixelBuffer;

/// Boolean wall mask over the analyzed image resolution
#[derive(Debug, Clone)]
pub struct WallMap {
    cells: Vec<bool>,
    width: u32,
    height: u32,
}

impl WallMap {
    /// Classify pixels: wall iff all three channels are below `threshold`
    pub fn from_pixels(pixels: &PixelBuffer, threshold: u8) -> Self {
        let width = pixels.width();
        let height = pixels.height();
        let mut cells = Vec::with_capacity((width as usize) * (height as usize));

        for y in 0..height {
            for x in 0..width {
                let [r, g, b] = pixels.rgb(x, y);
                cells.push(r < threshold && g < threshold && b < threshold);
            }
        }

        Self {
            cells,
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Wall test with out-of-bounds treated as non-wall
    #[inline]
    pub fn is_wall(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return false;
        }
        self.cells[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// A wall pixel sitting on the edge of a wall run: at least one
    /// 4-connected neighbor is out of bounds or not a wall. Interior fill
    /// pixels fail this test and are never emitted.
    #[inline]
    pub fn is_boundary(&self, x: u32, y: u32) -> bool {
        let (xi, yi) = (x as i64, y as i64);
        if !self.is_wall(xi, yi) {
            return false;
        }
        !self.is_wall(xi - 1, yi)
            || !self.is_wall(xi + 1, yi)
            || !self.is_wall(xi, yi - 1)
            || !self.is_wall(xi, yi + 1)
    }

    /// All boundary pixels in row-major order (deterministic)
    pub fn boundary_pixels(&self) -> Vec<(u32, u32)> {
        let mut boundary = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.is_boundary(x, y) {
                    boundary.push((x, y));
                }
            }
        }
        boundary
    }

    /// Number of wall-classified pixels
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|&&wall| wall).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_from(width: u32, height: u32, dark: &[(u32, u32)]) -> WallMap {
        let mut pixels = PixelBuffer::solid(width, height, [255, 255, 255]).unwrap();
        for &(x, y) in dark {
            pixels.put_rgb(x, y, [0, 0, 0]);
        }
        WallMap::from_pixels(&pixels, 50)
    }

    #[test]
    fn test_classification_threshold() {
        let mut pixels = PixelBuffer::solid(2, 1, [255, 255, 255]).unwrap();
        pixels.put_rgb(0, 0, [49, 49, 49]);
        pixels.put_rgb(1, 0, [49, 49, 50]); // one channel at threshold -> not wall

        let map = WallMap::from_pixels(&pixels, 50);
        assert!(map.is_wall(0, 0));
        assert!(!map.is_wall(1, 0));
        assert_eq!(map.wall_count(), 1);
    }

    #[test]
    fn test_out_of_bounds_is_not_wall() {
        let map = map_from(2, 2, &[(0, 0)]);
        assert!(!map.is_wall(-1, 0));
        assert!(!map.is_wall(0, 2));
    }

    #[test]
    fn test_interior_fill_is_not_boundary() {
        // 3x3 solid block: center pixel is interior, the ring is boundary
        let all: Vec<(u32, u32)> = (0..3).flat_map(|y| (0..3).map(move |x| (x, y))).collect();
        let map = map_from(5, 5, &all.iter().map(|&(x, y)| (x + 1, y + 1)).collect::<Vec<_>>());

        assert!(!map.is_boundary(2, 2));
        assert_eq!(map.boundary_pixels().len(), 8);
    }

    #[test]
    fn test_single_pixel_is_boundary() {
        let map = map_from(3, 3, &[(1, 1)]);
        assert!(map.is_boundary(1, 1));
        assert_eq!(map.boundary_pixels(), vec![(1, 1)]);
    }
}
