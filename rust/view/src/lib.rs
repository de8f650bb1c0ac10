// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RePlan View
//!
//! The interactive half of the engine: per-mode cameras (orbit, top-down
//! orthographic, first-person walkthrough), the input controllers that
//! drive them, and the reconstruction lifecycle with generation-token
//! cancellation. [`ViewerEngine`] is the facade hosts embed; it always
//! degrades to something renderable instead of surfacing reconstruction
//! failures.

pub mod camera;
pub mod controller;
pub mod engine;
pub mod lifecycle;

pub use camera::{
    CameraRig, FirstPersonCamera, OrbitCamera, TopCamera, ViewMode, FAR_PLANE,
    FIRST_PERSON_FOV_DEG, MAX_ORBIT_RADIUS, MAX_POLAR_ANGLE, MIN_ORBIT_RADIUS, MIN_POLAR_ANGLE,
    NEAR_PLANE, ORBIT_FOV_DEG, TOP_CAMERA_HEIGHT, TOP_FRUSTUM_SIZE,
};
pub use controller::{
    controller_for, FirstPersonController, InputController, InputEvent, MoveKey, OrbitController,
    TopController, LOOK_SENSITIVITY, ROTATE_SENSITIVITY, WALK_SPEED, ZOOM_SENSITIVITY,
};
pub use engine::{
    EngineConfig, EngineWarning, LoadPhase, ReconstructionRequest, ViewerEngine,
};
pub use lifecycle::{AnimationLoop, Applied, Generation, GenerationCounter};
