// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry source resolution.
//!
//! Pure selection logic, re-evaluated every time the active plan variant
//! changes: structured geometry wins over the raster blueprint, which wins
//! over the generic default shell.

use crate::plan::PlanDocument;

/// The reconstruction path selected for one render request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconstructionPath {
    /// Build walls from the structured geometry document
    Structured,
    /// Extract wall cells from the blueprint image
    Raster,
    /// Single generic room shell
    DefaultBox,
}

/// Select exactly one reconstruction path.
///
/// `Structured` requires a document with a non-empty wall list; `Raster`
/// requires a non-empty image URL. No side effects.
pub fn resolve(document: Option<&PlanDocument>, image_url: Option<&str>) -> ReconstructionPath {
    if document.map(PlanDocument::has_walls).unwrap_or(false) {
        return ReconstructionPath::Structured;
    }
    if image_url.map(|url| !url.trim().is_empty()).unwrap_or(false) {
        return ReconstructionPath::Raster;
    }
    ReconstructionPath::DefaultBox
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{PlanPoint, WallSegment};

    fn document_with_walls() -> PlanDocument {
        let mut document = PlanDocument::default();
        document.geometry.walls.push(WallSegment::new(
            "w1",
            PlanPoint::new(0.0, 0.0),
            PlanPoint::new(4.0, 0.0),
        ));
        document
    }

    #[test]
    fn test_structured_wins() {
        let document = document_with_walls();
        assert_eq!(
            resolve(Some(&document), Some("https://cdn.example/plan.png")),
            ReconstructionPath::Structured
        );
    }

    #[test]
    fn test_empty_walls_falls_to_raster() {
        let document = PlanDocument::default();
        assert_eq!(
            resolve(Some(&document), Some("https://cdn.example/plan.png")),
            ReconstructionPath::Raster
        );
    }

    #[test]
    fn test_blank_url_is_not_raster() {
        assert_eq!(resolve(None, Some("   ")), ReconstructionPath::DefaultBox);
    }

    #[test]
    fn test_nothing_available() {
        assert_eq!(resolve(None, None), ReconstructionPath::DefaultBox);
    }
}
