// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placed wall cells produced by raster extraction.

use serde::{Deserialize, Serialize};

/// One discretized 3D wall proxy for a boundary pixel.
///
/// Positioned in world meters on the ground plane (x across, z deep),
/// sized to the pixel's world footprint. Owned by the scene composer's
/// wall groups; destroyed and rebuilt on every geometry change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WallCell {
    pub x: f64,
    pub z: f64,
    pub pixel_size_x: f64,
    pub pixel_size_z: f64,
    pub is_external: bool,
}

/// Wall cells grouped into outer envelope vs. partition collections
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WallCellSet {
    pub external: Vec<WallCell>,
    pub internal: Vec<WallCell>,
}

impl WallCellSet {
    pub fn push(&mut self, cell: WallCell) {
        if cell.is_external {
            self.external.push(cell);
        } else {
            self.internal.push(cell);
        }
    }

    pub fn len(&self) -> usize {
        self.external.len() + self.internal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.external.is_empty() && self.internal.is_empty()
    }

    /// External cells first, then internal, both in placement order
    pub fn iter(&self) -> impl Iterator<Item = &WallCell> {
        self.external.iter().chain(self.internal.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_groups_by_classification() {
        let mut set = WallCellSet::default();
        set.push(WallCell {
            x: 0.0,
            z: 0.0,
            pixel_size_x: 0.1,
            pixel_size_z: 0.1,
            is_external: true,
        });
        set.push(WallCell {
            x: 1.0,
            z: 1.0,
            pixel_size_x: 0.1,
            pixel_size_z: 0.1,
            is_external: false,
        });

        assert_eq!(set.external.len(), 1);
        assert_eq!(set.internal.len(), 1);
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
    }
}
