// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Viewer engine facade.
//!
//! Ties the resolver, the two wall producers, the scene composer and the
//! camera/input rigs into one frame-driven engine. All mutation happens on
//! the caller's thread; the host-provided sources are the only suspension
//! points, and their completions are validated against the generation
//! token so a superseded reconstruction can never apply a stale scene.
//!
//! No reconstruction failure propagates: a dead image URL degrades to the
//! default shell, a dead asset URL leaves the walls standing, and the
//! host reads [`EngineWarning`]s instead of catching errors.

use std::fmt;
use std::sync::Arc;

use replan_core::{resolve, PlanDocument, PlanGeometry, ReconstructionPath};
use replan_raster::{extract_wall_cells, ExtractionOutcome, ImageSource, PixelBuffer, RasterConfig};
use replan_scene::{
    build_default_shell, build_raster_walls, build_structured_walls, AssetCache, AssetSource,
    SceneComposer, SceneNode, SceneWarning,
};
use tracing::{debug, info, warn};

use crate::camera::{CameraRig, ViewMode};
use crate::controller::{controller_for, InputController, InputEvent};
use crate::lifecycle::{AnimationLoop, Applied, Generation, GenerationCounter};

/// Engine-wide configuration
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub raster: RasterConfig,
}

/// Inputs of one reconstruction: the active variant's structured
/// geometry, blueprint image URL and furnished-asset URL, all optional
#[derive(Debug, Clone, Default)]
pub struct ReconstructionRequest {
    pub plan: Option<PlanDocument>,
    pub image_url: Option<String>,
    pub asset_url: Option<String>,
}

/// Fetch/decode progress surfaced to the host UI (loading indicator)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Ready,
}

/// Non-fatal conditions surfaced to the host UI as banners
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineWarning {
    /// The furnished asset decoded but contains no usable meshes
    EmptyAsset,
    /// The furnished asset has no measurable extent
    DegenerateAsset,
    /// The furnished asset could not be fetched or decoded
    AssetUnavailable { url: String },
    /// The blueprint image could not be fetched or decoded
    ImageUnavailable { url: String },
}

impl fmt::Display for EngineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineWarning::EmptyAsset => write!(f, "furnished model is empty"),
            EngineWarning::DegenerateAsset => write!(f, "furnished model has no extent"),
            EngineWarning::AssetUnavailable { url } => {
                write!(f, "furnished model unavailable: {url}")
            }
            EngineWarning::ImageUnavailable { url } => {
                write!(f, "blueprint image unavailable: {url}")
            }
        }
    }
}

impl From<SceneWarning> for EngineWarning {
    fn from(warning: SceneWarning) -> Self {
        match warning {
            SceneWarning::EmptyAsset => EngineWarning::EmptyAsset,
            SceneWarning::DegenerateAsset => EngineWarning::DegenerateAsset,
        }
    }
}

/// The blueprint-to-3D viewer engine
pub struct ViewerEngine {
    config: EngineConfig,
    composer: SceneComposer,
    cache: AssetCache,
    rig: CameraRig,
    controller: Box<dyn InputController>,
    mode: ViewMode,
    generations: GenerationCounter,
    animation: AnimationLoop,
    phase: LoadPhase,
    warnings: Vec<EngineWarning>,
    width: f64,
    height: f64,
}

impl ViewerEngine {
    /// Create an engine rendering into a container of the given pixel size
    pub fn new(config: EngineConfig, width: f64, height: f64) -> Self {
        let composer = SceneComposer::new();
        let mode = ViewMode::Orbit;
        let rig = CameraRig::for_mode(mode, &composer.bounds(), aspect_of(width, height));
        let mut controller = controller_for(mode);
        controller.attach();

        Self {
            config,
            composer,
            cache: AssetCache::new(),
            rig,
            controller,
            mode,
            generations: GenerationCounter::new(),
            animation: AnimationLoop::new(),
            phase: LoadPhase::Idle,
            warnings: Vec::new(),
            width,
            height,
        }
    }

    /// Start a reconstruction cycle: tear down the previous scene (stop
    /// the loop, dispose primitives, detach input) and select the path.
    /// The returned generation must accompany every completion call.
    pub fn begin_reconstruction(
        &mut self,
        request: &ReconstructionRequest,
    ) -> (Generation, ReconstructionPath) {
        let generation = self.generations.begin();
        self.phase = LoadPhase::Loading;
        self.warnings.clear();

        self.animation.stop();
        self.composer.clear_reconstructed();
        self.controller.detach();

        let path = resolve(request.plan.as_ref(), request.image_url.as_deref());
        debug!(%generation, ?path, "reconstruction started");
        (generation, path)
    }

    /// Apply structured geometry. A stale generation is a no-op.
    pub fn complete_structured(
        &mut self,
        generation: Generation,
        geometry: &PlanGeometry,
    ) -> Applied {
        if !self.generations.is_current(generation) {
            debug!(%generation, "discarding superseded structured result");
            return Applied::Superseded;
        }

        let mut walls = build_structured_walls(geometry);
        if walls.is_empty() {
            // Every segment was degenerate; still show something
            info!("structured geometry yielded no walls; using default shell");
            walls = build_default_shell();
        }
        self.composer.rebuild_walls(walls);
        self.finish(generation);
        Applied::Applied
    }

    /// Apply a decoded blueprint image. A stale generation is a no-op.
    pub fn complete_raster(&mut self, generation: Generation, pixels: &PixelBuffer) -> Applied {
        if !self.generations.is_current(generation) {
            debug!(%generation, "discarding superseded raster result");
            return Applied::Superseded;
        }

        let walls = match extract_wall_cells(pixels, &self.config.raster) {
            ExtractionOutcome::Cells(cells) => {
                build_raster_walls(&cells, self.config.raster.cell_height)
            }
            ExtractionOutcome::Empty => {
                info!("blueprint has no wall pixels; using default shell");
                build_default_shell()
            }
        };
        self.composer.rebuild_walls(walls);
        self.finish(generation);
        Applied::Applied
    }

    /// Apply the default shell. A stale generation is a no-op.
    pub fn complete_default(&mut self, generation: Generation) -> Applied {
        if !self.generations.is_current(generation) {
            debug!(%generation, "discarding superseded default-shell result");
            return Applied::Superseded;
        }
        self.composer.rebuild_walls(build_default_shell());
        self.finish(generation);
        Applied::Applied
    }

    /// Attach a loaded furnished asset and refit the camera to its
    /// bounds. A stale generation is a no-op.
    pub fn complete_asset(&mut self, generation: Generation, node: Arc<SceneNode>) -> Applied {
        if !self.generations.is_current(generation) {
            debug!(%generation, "discarding superseded asset result");
            return Applied::Superseded;
        }
        if let Some(warning) = self.composer.attach_asset(node) {
            self.warnings.push(warning.into());
        }
        self.reset_camera();
        Applied::Applied
    }

    /// Synchronous convenience wrapper over the begin/complete API:
    /// performs the fetches through the host sources and degrades
    /// structured -> raster -> default shell on failure. Never errors.
    pub fn reconstruct(
        &mut self,
        images: &dyn ImageSource,
        assets: &dyn AssetSource,
        request: &ReconstructionRequest,
    ) -> Generation {
        let (generation, path) = self.begin_reconstruction(request);

        match path {
            ReconstructionPath::Structured => {
                let geometry = request
                    .plan
                    .as_ref()
                    .map(|document| document.geometry.clone())
                    .unwrap_or_default();
                self.complete_structured(generation, &geometry);
            }
            ReconstructionPath::Raster => {
                let url = request.image_url.clone().unwrap_or_default();
                match images.load_image(&url) {
                    Ok(pixels) => {
                        self.complete_raster(generation, &pixels);
                    }
                    Err(error) => {
                        warn!(%error, "blueprint load failed; falling back to default shell");
                        self.warnings.push(EngineWarning::ImageUnavailable { url });
                        self.complete_default(generation);
                    }
                }
            }
            ReconstructionPath::DefaultBox => {
                self.complete_default(generation);
            }
        }

        if let Some(url) = request.asset_url.as_deref() {
            match self.cache.get_or_load(url, assets) {
                Ok(node) => {
                    self.complete_asset(generation, node);
                }
                Err(error) => {
                    warn!(%error, "furnished asset load failed; walls still render");
                    self.warnings.push(EngineWarning::AssetUnavailable {
                        url: url.to_string(),
                    });
                }
            }
        }

        generation
    }

    /// Switch interaction mode. Supersedes any in-flight reconstruction,
    /// swaps the input rig and refits the camera from the current bounds.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if self.mode == mode {
            return;
        }
        self.generations.invalidate();
        self.controller.detach();
        self.mode = mode;
        self.rig = CameraRig::for_mode(mode, &self.composer.bounds(), self.aspect());
        self.controller = controller_for(mode);
        self.controller.attach();
        debug!(%mode, "view mode switched");
    }

    /// Propagate a container resize to the active camera
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.rig.resize(width, height);
    }

    /// Feed one host input event to the active controller
    pub fn handle_input(&mut self, event: &InputEvent) {
        self.controller.handle(event, &mut self.rig);
    }

    /// One frame tick: integrates first-person movement while the
    /// animation loop is running
    pub fn update(&mut self, frame_delta: f64) {
        if !self.animation.is_running() {
            return;
        }
        self.controller.update(&mut self.rig, frame_delta);
    }

    /// Full teardown: stop the loop, dispose primitives, detach input.
    /// The furnished-asset cache is intentionally kept for reuse.
    /// Safe to call repeatedly.
    pub fn dispose(&mut self) {
        self.animation.stop();
        self.composer.clear_reconstructed();
        self.controller.detach();
        self.phase = LoadPhase::Idle;
    }

    fn finish(&mut self, generation: Generation) {
        self.reset_camera();
        self.controller = controller_for(self.mode);
        self.controller.attach();
        self.animation.start();
        self.phase = LoadPhase::Ready;
        debug!(%generation, walls = self.composer.wall_primitives().count(), "reconstruction applied");
    }

    fn reset_camera(&mut self) {
        self.rig = CameraRig::for_mode(self.mode, &self.composer.bounds(), self.aspect());
    }

    fn aspect(&self) -> f64 {
        aspect_of(self.width, self.height)
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn warnings(&self) -> &[EngineWarning] {
        &self.warnings
    }

    pub fn camera(&self) -> &CameraRig {
        &self.rig
    }

    pub fn scene(&self) -> &SceneComposer {
        &self.composer
    }

    pub fn asset_cache(&self) -> &AssetCache {
        &self.cache
    }

    pub fn is_running(&self) -> bool {
        self.animation.is_running()
    }
}

#[inline]
fn aspect_of(width: f64, height: f64) -> f64 {
    if height > 0.0 {
        width / height
    } else {
        1.0
    }
}
