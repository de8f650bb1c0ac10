// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-mode input controllers.
//!
//! One controller strategy per view mode, each owning its own
//! attach/detach lifecycle so the orbit and first-person rigs can never
//! leak input into each other. Detached controllers ignore every event,
//! and detaching clears transient state (drag, key flags, joystick), the
//! same as removing the host's event listeners.

use nalgebra::Vector3;
use tracing::trace;

use crate::camera::{CameraRig, ViewMode};

/// Orbit rotation, radians per pixel of pointer drag
pub const ROTATE_SENSITIVITY: f64 = 0.005;
/// First-person look, radians per pixel of pointer drag
pub const LOOK_SENSITIVITY: f64 = 0.005;
/// Orbit zoom, world units per wheel delta unit
pub const ZOOM_SENSITIVITY: f64 = 0.01;
/// First-person walking speed, meters per second
pub const WALK_SPEED: f64 = 3.0;

/// Logical movement key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKey {
    Forward,
    Backward,
    Left,
    Right,
}

impl MoveKey {
    /// Map a host keyboard code (WASD or arrows) to a movement key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" | "ArrowUp" => Some(MoveKey::Forward),
            "KeyS" | "ArrowDown" => Some(MoveKey::Backward),
            "KeyA" | "ArrowLeft" => Some(MoveKey::Left),
            "KeyD" | "ArrowRight" => Some(MoveKey::Right),
            _ => None,
        }
    }
}

/// Host input translated into engine events
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    /// Positive delta zooms out
    Wheel { delta_y: f64 },
    KeyDown(MoveKey),
    KeyUp(MoveKey),
    /// Virtual joystick deflection, components in [-1, 1], y forward
    JoystickMove { x: f64, y: f64 },
    JoystickEnd,
}

/// Mode-specific input strategy
pub trait InputController {
    fn attach(&mut self);
    fn detach(&mut self);
    fn is_attached(&self) -> bool;
    /// React to one input event; ignores events while detached and
    /// events meant for another rig
    fn handle(&mut self, event: &InputEvent, rig: &mut CameraRig);
    /// Per-frame integration (first-person movement)
    fn update(&mut self, rig: &mut CameraRig, frame_delta: f64);
}

/// Build the controller for a view mode
pub fn controller_for(mode: ViewMode) -> Box<dyn InputController> {
    match mode {
        ViewMode::Orbit => Box::new(OrbitController::new()),
        ViewMode::Top => Box::new(TopController::new()),
        ViewMode::FirstPerson => Box::new(FirstPersonController::new()),
    }
}

/// Pointer drag orbits, wheel zooms
#[derive(Debug, Default)]
pub struct OrbitController {
    attached: bool,
    dragging: bool,
    last_x: f64,
    last_y: f64,
}

impl OrbitController {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputController for OrbitController {
    fn attach(&mut self) {
        self.attached = true;
    }

    fn detach(&mut self) {
        self.attached = false;
        self.dragging = false;
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn handle(&mut self, event: &InputEvent, rig: &mut CameraRig) {
        if !self.attached {
            return;
        }
        let CameraRig::Orbit(camera) = rig else {
            return;
        };
        match *event {
            InputEvent::PointerDown { x, y } => {
                self.dragging = true;
                self.last_x = x;
                self.last_y = y;
            }
            InputEvent::PointerMove { x, y } => {
                if self.dragging {
                    let delta_x = x - self.last_x;
                    let delta_y = y - self.last_y;
                    camera.rotate(-delta_x * ROTATE_SENSITIVITY, -delta_y * ROTATE_SENSITIVITY);
                    self.last_x = x;
                    self.last_y = y;
                }
            }
            InputEvent::PointerUp => {
                self.dragging = false;
            }
            InputEvent::Wheel { delta_y } => {
                camera.zoom(delta_y * ZOOM_SENSITIVITY);
            }
            _ => {}
        }
    }

    fn update(&mut self, _rig: &mut CameraRig, _frame_delta: f64) {
        // Orbit state is re-derived on query; nothing to integrate
    }
}

/// The top-down view is fixed: no pointer or wheel interaction
#[derive(Debug, Default)]
pub struct TopController {
    attached: bool,
}

impl TopController {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputController for TopController {
    fn attach(&mut self) {
        self.attached = true;
    }

    fn detach(&mut self) {
        self.attached = false;
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn handle(&mut self, _event: &InputEvent, _rig: &mut CameraRig) {}

    fn update(&mut self, _rig: &mut CameraRig, _frame_delta: f64) {}
}

#[derive(Debug, Default)]
struct MoveFlags {
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
}

/// Keyboard + pointer-look + virtual-joystick walkthrough controls
#[derive(Debug, Default)]
pub struct FirstPersonController {
    attached: bool,
    dragging: bool,
    last_x: f64,
    last_y: f64,
    keys: MoveFlags,
    joystick: Option<(f64, f64)>,
}

impl FirstPersonController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keyboard and joystick contributions summed, then normalized once
    /// so touch and keys cannot double the speed
    fn direction(&self) -> Option<Vector3<f64>> {
        let mut strafe = 0.0;
        let mut forward = 0.0;
        if self.keys.forward {
            forward += 1.0;
        }
        if self.keys.backward {
            forward -= 1.0;
        }
        if self.keys.right {
            strafe += 1.0;
        }
        if self.keys.left {
            strafe -= 1.0;
        }
        if let Some((joystick_x, joystick_y)) = self.joystick {
            strafe += joystick_x;
            forward += joystick_y;
        }

        let direction = Vector3::new(strafe, 0.0, forward);
        let norm = direction.norm();
        if norm < 1e-9 {
            None
        } else {
            Some(direction / norm)
        }
    }
}

impl InputController for FirstPersonController {
    fn attach(&mut self) {
        self.attached = true;
    }

    fn detach(&mut self) {
        self.attached = false;
        self.dragging = false;
        self.keys = MoveFlags::default();
        self.joystick = None;
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn handle(&mut self, event: &InputEvent, rig: &mut CameraRig) {
        if !self.attached {
            return;
        }
        let CameraRig::FirstPerson(camera) = rig else {
            return;
        };
        match *event {
            InputEvent::PointerDown { x, y } => {
                self.dragging = true;
                self.last_x = x;
                self.last_y = y;
            }
            InputEvent::PointerMove { x, y } => {
                if self.dragging {
                    let delta_x = x - self.last_x;
                    let delta_y = y - self.last_y;
                    camera.rotate(-delta_x * LOOK_SENSITIVITY, -delta_y * LOOK_SENSITIVITY);
                    self.last_x = x;
                    self.last_y = y;
                }
            }
            InputEvent::PointerUp => {
                self.dragging = false;
            }
            InputEvent::KeyDown(key) => match key {
                MoveKey::Forward => self.keys.forward = true,
                MoveKey::Backward => self.keys.backward = true,
                MoveKey::Left => self.keys.left = true,
                MoveKey::Right => self.keys.right = true,
            },
            InputEvent::KeyUp(key) => match key {
                MoveKey::Forward => self.keys.forward = false,
                MoveKey::Backward => self.keys.backward = false,
                MoveKey::Left => self.keys.left = false,
                MoveKey::Right => self.keys.right = false,
            },
            InputEvent::JoystickMove { x, y } => {
                self.joystick = Some((x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0)));
            }
            InputEvent::JoystickEnd => {
                self.joystick = None;
            }
            InputEvent::Wheel { .. } => {}
        }
    }

    fn update(&mut self, rig: &mut CameraRig, frame_delta: f64) {
        if !self.attached {
            return;
        }
        let CameraRig::FirstPerson(camera) = rig else {
            return;
        };
        let Some(direction) = self.direction() else {
            return;
        };

        // Translate along the camera's local right/forward axes so the
        // motion always matches the facing direction
        let step = (camera.right() * direction.x + camera.horizontal_forward() * direction.z)
            * (WALK_SPEED * frame_delta);
        camera.position += step;
        trace!(?direction, frame_delta, "walkthrough step");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{FirstPersonCamera, OrbitCamera};
    use approx::assert_relative_eq;
    use replan_core::ModelBounds;

    fn orbit_rig() -> CameraRig {
        CameraRig::Orbit(OrbitCamera::from_bounds(&ModelBounds::new(), 1.0))
    }

    fn first_person_rig() -> CameraRig {
        CameraRig::FirstPerson(FirstPersonCamera::from_bounds(&ModelBounds::new(), 1.0))
    }

    #[test]
    fn test_key_codes() {
        assert_eq!(MoveKey::from_code("KeyW"), Some(MoveKey::Forward));
        assert_eq!(MoveKey::from_code("ArrowDown"), Some(MoveKey::Backward));
        assert_eq!(MoveKey::from_code("KeyQ"), None);
    }

    #[test]
    fn test_orbit_drag_rotates() {
        let mut rig = orbit_rig();
        let mut controller = OrbitController::new();
        controller.attach();

        let (theta_before, phi_before) = match &rig {
            CameraRig::Orbit(camera) => (camera.theta, camera.phi),
            _ => unreachable!(),
        };

        controller.handle(&InputEvent::PointerDown { x: 100.0, y: 100.0 }, &mut rig);
        controller.handle(&InputEvent::PointerMove { x: 140.0, y: 80.0 }, &mut rig);
        controller.handle(&InputEvent::PointerUp, &mut rig);
        // Moves without a press never rotate
        controller.handle(&InputEvent::PointerMove { x: 500.0, y: 500.0 }, &mut rig);

        match &rig {
            CameraRig::Orbit(camera) => {
                assert_relative_eq!(camera.theta, theta_before - 40.0 * ROTATE_SENSITIVITY);
                assert_relative_eq!(camera.phi, phi_before + 20.0 * ROTATE_SENSITIVITY);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_orbit_wheel_zooms() {
        let mut rig = orbit_rig();
        let mut controller = OrbitController::new();
        controller.attach();

        let radius_before = match &rig {
            CameraRig::Orbit(camera) => camera.radius,
            _ => unreachable!(),
        };
        controller.handle(&InputEvent::Wheel { delta_y: 100.0 }, &mut rig);
        match &rig {
            CameraRig::Orbit(camera) => {
                assert_relative_eq!(camera.radius, radius_before + 100.0 * ZOOM_SENSITIVITY);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_detached_controller_ignores_events() {
        let mut rig = orbit_rig();
        let mut controller = OrbitController::new();

        let radius_before = match &rig {
            CameraRig::Orbit(camera) => camera.radius,
            _ => unreachable!(),
        };
        controller.handle(&InputEvent::Wheel { delta_y: 100.0 }, &mut rig);
        match &rig {
            CameraRig::Orbit(camera) => assert_relative_eq!(camera.radius, radius_before),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_controller_ignores_foreign_rig() {
        // An orbit controller fed a first-person rig must not touch it
        let mut rig = first_person_rig();
        let mut controller = OrbitController::new();
        controller.attach();
        controller.handle(&InputEvent::Wheel { delta_y: 100.0 }, &mut rig);

        match &rig {
            CameraRig::FirstPerson(camera) => {
                assert_relative_eq!(camera.pitch, 0.0);
                assert_relative_eq!(camera.yaw, 0.0);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_walk_forward_matches_facing() {
        let mut rig = first_person_rig();
        let mut controller = FirstPersonController::new();
        controller.attach();

        controller.handle(&InputEvent::KeyDown(MoveKey::Forward), &mut rig);
        controller.update(&mut rig, 0.5);

        match &rig {
            CameraRig::FirstPerson(camera) => {
                // Yaw 0 faces -z
                assert_relative_eq!(camera.position.z, -WALK_SPEED * 0.5, epsilon = 1e-9);
                assert_relative_eq!(camera.position.x, 0.0, epsilon = 1e-9);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_keyboard_and_joystick_do_not_double_speed() {
        let mut rig = first_person_rig();
        let start = match &rig {
            CameraRig::FirstPerson(camera) => camera.position,
            _ => unreachable!(),
        };
        let mut controller = FirstPersonController::new();
        controller.attach();

        controller.handle(&InputEvent::KeyDown(MoveKey::Forward), &mut rig);
        controller.handle(&InputEvent::JoystickMove { x: 0.0, y: 1.0 }, &mut rig);
        controller.update(&mut rig, 1.0);

        match &rig {
            CameraRig::FirstPerson(camera) => {
                let distance = (camera.position - start).norm();
                // Combined vector is normalized before speed scaling
                assert_relative_eq!(distance, WALK_SPEED, epsilon = 1e-9);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_diagonal_movement_normalized() {
        let mut rig = first_person_rig();
        let start = match &rig {
            CameraRig::FirstPerson(camera) => camera.position,
            _ => unreachable!(),
        };
        let mut controller = FirstPersonController::new();
        controller.attach();

        controller.handle(&InputEvent::KeyDown(MoveKey::Forward), &mut rig);
        controller.handle(&InputEvent::KeyDown(MoveKey::Right), &mut rig);
        controller.update(&mut rig, 1.0);

        match &rig {
            CameraRig::FirstPerson(camera) => {
                assert_relative_eq!((camera.position - start).norm(), WALK_SPEED, epsilon = 1e-9);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_look_pitch_clamped_under_drag() {
        let mut rig = first_person_rig();
        let mut controller = FirstPersonController::new();
        controller.attach();

        controller.handle(&InputEvent::PointerDown { x: 0.0, y: 0.0 }, &mut rig);
        for step in 1..=200 {
            controller.handle(
                &InputEvent::PointerMove {
                    x: 0.0,
                    y: -(step as f64) * 50.0,
                },
                &mut rig,
            );
        }

        match &rig {
            CameraRig::FirstPerson(camera) => {
                assert!(camera.pitch <= std::f64::consts::FRAC_PI_2);
                assert!(camera.pitch >= -std::f64::consts::FRAC_PI_2);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_detach_clears_movement_state() {
        let mut rig = first_person_rig();
        let start = match &rig {
            CameraRig::FirstPerson(camera) => camera.position,
            _ => unreachable!(),
        };
        let mut controller = FirstPersonController::new();
        controller.attach();
        controller.handle(&InputEvent::KeyDown(MoveKey::Forward), &mut rig);
        controller.detach();
        controller.attach();
        controller.update(&mut rig, 1.0);

        match &rig {
            CameraRig::FirstPerson(camera) => {
                // The key flag did not survive the detach
                assert_relative_eq!((camera.position - start).norm(), 0.0);
            }
            _ => unreachable!(),
        }
    }
}
