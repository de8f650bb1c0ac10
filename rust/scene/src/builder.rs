// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall primitive synthesis.
//!
//! Three producers, one per reconstruction path: structured segments,
//! raster cells, and the generic default shell. Plan-space y maps to
//! world z; walls rest on y = 0.

use nalgebra::Point3;
use replan_core::{PlanGeometry, MIN_WALL_LENGTH};
use replan_raster::WallCellSet;
use tracing::warn;

use crate::primitive::{PrimitiveId, RenderPrimitive, WallGroup};

/// Footprint of the generic default room shell in meters
pub const SHELL_SPAN: f64 = 20.0;
/// Height of the default shell walls
pub const SHELL_HEIGHT: f64 = 2.0;
/// Thickness of the default shell walls
pub const SHELL_THICKNESS: f64 = 0.2;

/// Build one box primitive per valid wall segment.
///
/// Malformed entries (missing coordinates) and near-zero-length segments
/// are skipped with a diagnostic; one bad segment never blocks the batch.
/// Channel assignment is binary on the bearing flag.
pub fn build_structured_walls(geometry: &PlanGeometry) -> Vec<RenderPrimitive> {
    let mut walls = Vec::with_capacity(geometry.walls.len());

    for (index, segment) in geometry.walls.iter().enumerate() {
        let Some((start, end)) = segment.endpoints() else {
            warn!(index, id = ?segment.id, "skipping wall segment with missing coordinates");
            continue;
        };

        let length = start.distance_to(&end);
        if length < MIN_WALL_LENGTH {
            warn!(index, id = ?segment.id, length, "skipping near-zero-length wall segment");
            continue;
        }

        // Plan y becomes world z; yaw maps the box's long axis onto the
        // segment direction
        let direction_x = end.x - start.x;
        let direction_z = end.y - start.y;
        let yaw = direction_x.atan2(direction_z);

        let mid_x = (start.x + end.x) / 2.0;
        let mid_z = (start.y + end.y) / 2.0;

        let group = if segment.is_bearing {
            WallGroup::Bearing
        } else {
            WallGroup::NonBearing
        };
        let id = segment
            .id
            .clone()
            .unwrap_or_else(|| format!("wall-{index}"));

        walls.push(RenderPrimitive::wall(
            PrimitiveId::Segment(id),
            group,
            Point3::new(mid_x, segment.height / 2.0, mid_z),
            length,
            segment.height,
            segment.thickness,
            yaw,
        ));
    }

    walls
}

/// Build one box primitive per placed raster cell
pub fn build_raster_walls(cells: &WallCellSet, cell_height: f64) -> Vec<RenderPrimitive> {
    cells
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let group = if cell.is_external {
                WallGroup::External
            } else {
                WallGroup::Internal
            };
            RenderPrimitive::wall(
                PrimitiveId::Cell(index as u32),
                group,
                Point3::new(cell.x, cell_height / 2.0, cell.z),
                cell.pixel_size_z,
                cell_height,
                cell.pixel_size_x,
                0.0,
            )
        })
        .collect()
}

/// The generic single-room shell used when neither structured geometry
/// nor a usable blueprint is available
pub fn build_default_shell() -> Vec<RenderPrimitive> {
    let half = SHELL_SPAN / 2.0;
    let y = SHELL_HEIGHT / 2.0;
    // Two walls running along x (yaw pi/2), two along z
    let placements = [
        (Point3::new(0.0, y, -half), std::f64::consts::FRAC_PI_2),
        (Point3::new(0.0, y, half), std::f64::consts::FRAC_PI_2),
        (Point3::new(-half, y, 0.0), 0.0),
        (Point3::new(half, y, 0.0), 0.0),
    ];

    placements
        .iter()
        .enumerate()
        .map(|(index, &(center, yaw))| {
            RenderPrimitive::wall(
                PrimitiveId::Shell(index as u8),
                WallGroup::External,
                center,
                SHELL_SPAN,
                SHELL_HEIGHT,
                SHELL_THICKNESS,
                yaw,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use replan_core::{PlanPoint, WallSegment};
    use replan_raster::WallCell;

    fn geometry_with(walls: Vec<WallSegment>) -> PlanGeometry {
        PlanGeometry {
            walls,
            ..PlanGeometry::default()
        }
    }

    #[test]
    fn test_bearing_and_non_bearing_channels() {
        let geometry = geometry_with(vec![
            WallSegment::new("w1", PlanPoint::new(0.0, 0.0), PlanPoint::new(4.0, 0.0))
                .bearing(true),
            WallSegment::new("w2", PlanPoint::new(0.0, 0.0), PlanPoint::new(0.0, 3.0)),
        ]);

        let walls = build_structured_walls(&geometry);
        assert_eq!(walls.len(), 2);
        assert_eq!(walls[0].group(), Some(WallGroup::Bearing));
        assert_eq!(walls[1].group(), Some(WallGroup::NonBearing));
    }

    #[test]
    fn test_segment_placement() {
        let geometry = geometry_with(vec![WallSegment::new(
            "w1",
            PlanPoint::new(0.0, 0.0),
            PlanPoint::new(4.0, 0.0),
        )]);

        let walls = build_structured_walls(&geometry);
        let wall = &walls[0];
        assert_relative_eq!(wall.length, 4.0);
        assert_relative_eq!(wall.center.x, 2.0);
        assert_relative_eq!(wall.center.y, replan_core::DEFAULT_WALL_HEIGHT / 2.0);
        assert_relative_eq!(wall.center.z, 0.0);
        // Direction (4, 0) in plan space: yaw = atan2(4, 0)
        assert_relative_eq!(wall.yaw, std::f64::consts::FRAC_PI_2);

        let bounds = wall.bounds();
        assert_relative_eq!(bounds.max.x - bounds.min.x, 4.0, epsilon = 1e-9);
        assert_relative_eq!(bounds.min.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_and_malformed_skipped() {
        let point = PlanPoint::new(1.0, 1.0);
        let geometry = geometry_with(vec![
            WallSegment::new("zero", point, point),
            WallSegment {
                id: Some("missing".into()),
                start: None,
                end: None,
                height: 2.7,
                thickness: 0.15,
                is_bearing: false,
            },
            WallSegment::new("ok", PlanPoint::new(0.0, 0.0), PlanPoint::new(2.0, 0.0)),
        ]);

        let walls = build_structured_walls(&geometry);
        assert_eq!(walls.len(), 1);
        assert_eq!(walls[0].id, PrimitiveId::Segment("ok".into()));
    }

    #[test]
    fn test_raster_cells_grouped() {
        let mut cells = WallCellSet::default();
        cells.push(WallCell {
            x: 1.0,
            z: -1.0,
            pixel_size_x: 0.1,
            pixel_size_z: 0.1,
            is_external: true,
        });
        cells.push(WallCell {
            x: 0.0,
            z: 0.0,
            pixel_size_x: 0.1,
            pixel_size_z: 0.1,
            is_external: false,
        });

        let walls = build_raster_walls(&cells, 3.0);
        assert_eq!(walls.len(), 2);
        assert_eq!(walls[0].group(), Some(WallGroup::External));
        assert_eq!(walls[1].group(), Some(WallGroup::Internal));
        assert_relative_eq!(walls[0].center.y, 1.5);
        assert_relative_eq!(walls[0].height, 3.0);
    }

    #[test]
    fn test_default_shell() {
        let shell = build_default_shell();
        assert_eq!(shell.len(), 4);
        assert!(shell
            .iter()
            .all(|wall| wall.group() == Some(WallGroup::External)));

        // The four walls enclose the shell footprint
        let mut bounds = replan_core::ModelBounds::new();
        for wall in &shell {
            bounds.merge(&wall.bounds());
        }
        assert_relative_eq!(bounds.max.x - bounds.min.x, SHELL_SPAN + SHELL_THICKNESS, epsilon = 1e-9);
        assert_relative_eq!(bounds.max.z - bounds.min.z, SHELL_SPAN + SHELL_THICKNESS, epsilon = 1e-9);
    }
}
