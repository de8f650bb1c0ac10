// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-mode camera state and projection math.
//!
//! Exactly one camera is active per render session. Switching modes
//! rebuilds the state from the current model bounds (or a fixed default
//! pose when the scene is empty), and every mode recomputes its
//! projection on container resize so the frustum tracks `width/height`.

use nalgebra::{Matrix4, Orthographic3, Perspective3, Point3, Vector3};
use replan_core::ModelBounds;
use serde::{Deserialize, Serialize};

/// Orbital radius clamp in world units
pub const MIN_ORBIT_RADIUS: f64 = 5.0;
pub const MAX_ORBIT_RADIUS: f64 = 100.0;

/// Polar angle clamp keeping the orbit camera off the poles
pub const MIN_POLAR_ANGLE: f64 = 0.1;
pub const MAX_POLAR_ANGLE: f64 = std::f64::consts::PI - 0.1;

/// Vertical field of view of the orbit camera, degrees
pub const ORBIT_FOV_DEG: f64 = 50.0;
/// Vertical field of view of the first-person camera, degrees
pub const FIRST_PERSON_FOV_DEG: f64 = 75.0;

/// World units visible vertically in the top-down view
pub const TOP_FRUSTUM_SIZE: f64 = 20.0;
/// Fixed overhead position of the top-down camera
pub const TOP_CAMERA_HEIGHT: f64 = 20.0;

pub const NEAR_PLANE: f64 = 0.1;
pub const FAR_PLANE: f64 = 1000.0;

/// Orbit radius used when the scene has no measurable bounds
const DEFAULT_ORBIT_RADIUS: f64 = 25.0;
/// First-person eye height used when the scene has no measurable bounds
const DEFAULT_EYE_HEIGHT: f64 = 1.6;

/// The caller-selected interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    /// Orbiting perspective view
    #[serde(rename = "3d")]
    Orbit,
    /// Top-down orthographic view
    #[serde(rename = "top")]
    Top,
    /// First-person walkthrough
    #[serde(rename = "first-person")]
    FirstPerson,
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "3d" | "orbit" => Ok(ViewMode::Orbit),
            "top" => Ok(ViewMode::Top),
            "first-person" => Ok(ViewMode::FirstPerson),
            other => Err(format!("unknown view mode: {other}")),
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ViewMode::Orbit => "3d",
            ViewMode::Top => "top",
            ViewMode::FirstPerson => "first-person",
        };
        write!(f, "{name}")
    }
}

/// Spherical-coordinate camera orbiting a fixed center.
///
/// The Cartesian position and the look-at target are re-derived from the
/// spherical state on every query, so repeated updates cannot drift.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub radius: f64,
    /// Azimuth in radians, unconstrained
    pub theta: f64,
    /// Polar angle in radians, clamped off the poles
    pub phi: f64,
    pub center: Point3<f64>,
    pub aspect: f64,
}

impl OrbitCamera {
    pub fn from_bounds(bounds: &ModelBounds, aspect: f64) -> Self {
        let (center, radius) = if bounds.is_valid() {
            (
                bounds.center(),
                (bounds.largest_extent() * 1.5).clamp(MIN_ORBIT_RADIUS, MAX_ORBIT_RADIUS),
            )
        } else {
            (Point3::origin(), DEFAULT_ORBIT_RADIUS)
        };
        Self {
            radius,
            theta: std::f64::consts::FRAC_PI_4,
            phi: std::f64::consts::FRAC_PI_3,
            center,
            aspect,
        }
    }

    pub fn rotate(&mut self, delta_theta: f64, delta_phi: f64) {
        self.theta += delta_theta;
        self.phi = (self.phi + delta_phi).clamp(MIN_POLAR_ANGLE, MAX_POLAR_ANGLE);
    }

    pub fn zoom(&mut self, delta_radius: f64) {
        self.radius = (self.radius + delta_radius).clamp(MIN_ORBIT_RADIUS, MAX_ORBIT_RADIUS);
    }

    /// Cartesian position derived from the spherical state
    pub fn position(&self) -> Point3<f64> {
        let offset = Vector3::new(
            self.phi.sin() * self.theta.sin(),
            self.phi.cos(),
            self.phi.sin() * self.theta.cos(),
        ) * self.radius;
        self.center + offset
    }

    pub fn view_matrix(&self) -> Matrix4<f64> {
        Matrix4::look_at_rh(&self.position(), &self.center, &Vector3::y())
    }

    pub fn projection_matrix(&self) -> Matrix4<f64> {
        Perspective3::new(self.aspect, ORBIT_FOV_DEG.to_radians(), NEAR_PLANE, FAR_PLANE)
            .to_homogeneous()
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.aspect = aspect_of(width, height);
    }
}

/// Fixed overhead orthographic camera
#[derive(Debug, Clone)]
pub struct TopCamera {
    pub frustum_half_width: f64,
    pub frustum_half_height: f64,
}

impl TopCamera {
    pub fn new(aspect: f64) -> Self {
        let frustum_half_height = TOP_FRUSTUM_SIZE / 2.0;
        Self {
            frustum_half_width: frustum_half_height * aspect,
            frustum_half_height,
        }
    }

    pub fn position(&self) -> Point3<f64> {
        Point3::new(0.0, TOP_CAMERA_HEIGHT, 0.0)
    }

    pub fn view_matrix(&self) -> Matrix4<f64> {
        // Looking straight down; screen-up maps to -z
        Matrix4::look_at_rh(&self.position(), &Point3::origin(), &Vector3::new(0.0, 0.0, -1.0))
    }

    pub fn projection_matrix(&self) -> Matrix4<f64> {
        Orthographic3::new(
            -self.frustum_half_width,
            self.frustum_half_width,
            -self.frustum_half_height,
            self.frustum_half_height,
            NEAR_PLANE,
            FAR_PLANE,
        )
        .to_homogeneous()
    }

    pub fn aspect(&self) -> f64 {
        self.frustum_half_width / self.frustum_half_height
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.frustum_half_height = TOP_FRUSTUM_SIZE / 2.0;
        self.frustum_half_width = self.frustum_half_height * aspect_of(width, height);
    }
}

/// Perspective walkthrough camera: yaw-then-pitch, no roll
#[derive(Debug, Clone)]
pub struct FirstPersonCamera {
    pub position: Point3<f64>,
    /// Heading in radians; 0 faces -z
    pub yaw: f64,
    /// Elevation in radians, clamped to [-pi/2, pi/2]
    pub pitch: f64,
    pub aspect: f64,
}

impl FirstPersonCamera {
    pub fn from_bounds(bounds: &ModelBounds, aspect: f64) -> Self {
        let position = if bounds.is_valid() {
            let center = bounds.center();
            let eye = (bounds.min.y + 1.0)
                .max(bounds.min.y + 1.5)
                .min(bounds.max.y - 0.2);
            Point3::new(center.x, eye, center.z)
        } else {
            Point3::new(0.0, DEFAULT_EYE_HEIGHT, 0.0)
        };
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            aspect,
        }
    }

    pub fn rotate(&mut self, delta_yaw: f64, delta_pitch: f64) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch)
            .clamp(-std::f64::consts::FRAC_PI_2, std::f64::consts::FRAC_PI_2);
    }

    /// View direction: yaw about the vertical axis, then pitch
    pub fn forward(&self) -> Vector3<f64> {
        Vector3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
    }

    /// Horizontal facing direction, used for walking
    pub fn horizontal_forward(&self) -> Vector3<f64> {
        Vector3::new(self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Horizontal strafe direction
    pub fn right(&self) -> Vector3<f64> {
        Vector3::new(self.yaw.cos(), 0.0, self.yaw.sin())
    }

    pub fn view_matrix(&self) -> Matrix4<f64> {
        let forward = self.forward();
        // At full vertical pitch the world up is parallel to the view
        // direction; fall back to a horizontal up to keep look_at sound
        let up = if forward.y.abs() > 0.999 {
            -forward.y.signum() * self.horizontal_forward()
        } else {
            Vector3::y()
        };
        Matrix4::look_at_rh(&self.position, &(self.position + forward), &up)
    }

    pub fn projection_matrix(&self) -> Matrix4<f64> {
        Perspective3::new(
            self.aspect,
            FIRST_PERSON_FOV_DEG.to_radians(),
            NEAR_PLANE,
            FAR_PLANE,
        )
        .to_homogeneous()
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.aspect = aspect_of(width, height);
    }
}

/// The active camera of one render session
#[derive(Debug, Clone)]
pub enum CameraRig {
    Orbit(OrbitCamera),
    Top(TopCamera),
    FirstPerson(FirstPersonCamera),
}

impl CameraRig {
    /// Build the camera for a mode from the current model bounds
    pub fn for_mode(mode: ViewMode, bounds: &ModelBounds, aspect: f64) -> Self {
        match mode {
            ViewMode::Orbit => CameraRig::Orbit(OrbitCamera::from_bounds(bounds, aspect)),
            ViewMode::Top => CameraRig::Top(TopCamera::new(aspect)),
            ViewMode::FirstPerson => {
                CameraRig::FirstPerson(FirstPersonCamera::from_bounds(bounds, aspect))
            }
        }
    }

    pub fn mode(&self) -> ViewMode {
        match self {
            CameraRig::Orbit(_) => ViewMode::Orbit,
            CameraRig::Top(_) => ViewMode::Top,
            CameraRig::FirstPerson(_) => ViewMode::FirstPerson,
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        match self {
            CameraRig::Orbit(camera) => camera.resize(width, height),
            CameraRig::Top(camera) => camera.resize(width, height),
            CameraRig::FirstPerson(camera) => camera.resize(width, height),
        }
    }

    pub fn view_matrix(&self) -> Matrix4<f64> {
        match self {
            CameraRig::Orbit(camera) => camera.view_matrix(),
            CameraRig::Top(camera) => camera.view_matrix(),
            CameraRig::FirstPerson(camera) => camera.view_matrix(),
        }
    }

    pub fn projection_matrix(&self) -> Matrix4<f64> {
        match self {
            CameraRig::Orbit(camera) => camera.projection_matrix(),
            CameraRig::Top(camera) => camera.projection_matrix(),
            CameraRig::FirstPerson(camera) => camera.projection_matrix(),
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn bounds(min: (f64, f64, f64), max: (f64, f64, f64)) -> ModelBounds {
        let mut bounds = ModelBounds::new();
        bounds.expand(Point3::new(min.0, min.1, min.2));
        bounds.expand(Point3::new(max.0, max.1, max.2));
        bounds
    }

    #[test]
    fn test_view_mode_wire_names() {
        assert_eq!("3d".parse::<ViewMode>().unwrap(), ViewMode::Orbit);
        assert_eq!("top".parse::<ViewMode>().unwrap(), ViewMode::Top);
        assert_eq!(
            "first-person".parse::<ViewMode>().unwrap(),
            ViewMode::FirstPerson
        );
        assert!("isometric".parse::<ViewMode>().is_err());
        assert_eq!(ViewMode::FirstPerson.to_string(), "first-person");

        assert_eq!(
            serde_json::to_string(&ViewMode::Orbit).unwrap(),
            "\"3d\""
        );
        assert_eq!(
            serde_json::from_str::<ViewMode>("\"first-person\"").unwrap(),
            ViewMode::FirstPerson
        );
    }

    #[test]
    fn test_orbit_radius_clamped() {
        let mut camera = OrbitCamera::from_bounds(&ModelBounds::new(), 16.0 / 9.0);
        camera.zoom(-1000.0);
        assert_relative_eq!(camera.radius, MIN_ORBIT_RADIUS);
        camera.zoom(1000.0);
        assert_relative_eq!(camera.radius, MAX_ORBIT_RADIUS);
    }

    #[test]
    fn test_orbit_polar_clamped_azimuth_free() {
        let mut camera = OrbitCamera::from_bounds(&ModelBounds::new(), 1.0);
        for _ in 0..100 {
            camera.rotate(1.0, 1.0);
        }
        assert_relative_eq!(camera.phi, MAX_POLAR_ANGLE);
        for _ in 0..50 {
            camera.rotate(-1.0, -1.0);
        }
        assert_relative_eq!(camera.phi, MIN_POLAR_ANGLE);
        // Azimuth accumulated the full 50 radians; it is never wrapped
        assert!(camera.theta > 2.0 * std::f64::consts::PI);
    }

    #[test]
    fn test_orbit_position_respects_radius() {
        let camera = OrbitCamera::from_bounds(&bounds((-5.0, 0.0, -5.0), (5.0, 3.0, 5.0)), 1.0);
        let to_center = camera.position() - camera.center;
        assert_relative_eq!(to_center.norm(), camera.radius, epsilon = 1e-9);
    }

    #[test]
    fn test_resize_tracks_aspect() {
        // Orthographic frustum ratio and perspective aspect must both
        // equal width/height after a resize
        let mut top = TopCamera::new(1.0);
        top.resize(800.0, 400.0);
        assert_relative_eq!(top.aspect(), 2.0, epsilon = 1e-12);
        let projection = top.projection_matrix();
        // right-left over top-bottom recovered from the orthographic matrix
        let width_over_height = (2.0 / projection[(0, 0)]) / (2.0 / projection[(1, 1)]);
        assert_relative_eq!(width_over_height, 2.0, epsilon = 1e-9);

        let mut orbit = OrbitCamera::from_bounds(&ModelBounds::new(), 1.0);
        orbit.resize(800.0, 400.0);
        assert_relative_eq!(orbit.aspect, 2.0, epsilon = 1e-12);

        let mut walkthrough = FirstPersonCamera::from_bounds(&ModelBounds::new(), 1.0);
        walkthrough.resize(1024.0, 512.0);
        assert_relative_eq!(walkthrough.aspect, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_first_person_start_from_bounds() {
        let camera =
            FirstPersonCamera::from_bounds(&bounds((-4.0, 0.0, -4.0), (4.0, 3.0, 4.0)), 1.0);
        assert_relative_eq!(camera.position.x, 0.0);
        assert_relative_eq!(camera.position.z, 0.0);
        // Eye lands at min.y + 1.5, below the ceiling margin
        assert_relative_eq!(camera.position.y, 1.5);

        // Low ceiling: the eye stays below max.y - 0.2
        let cramped =
            FirstPersonCamera::from_bounds(&bounds((0.0, 0.0, 0.0), (4.0, 1.2, 4.0)), 1.0);
        assert_relative_eq!(cramped.position.y, 1.0);
    }

    #[test]
    fn test_first_person_pitch_clamped() {
        let mut camera = FirstPersonCamera::from_bounds(&ModelBounds::new(), 1.0);
        for _ in 0..1000 {
            camera.rotate(0.3, 0.5);
        }
        assert!(camera.pitch <= std::f64::consts::FRAC_PI_2);
        for _ in 0..1000 {
            camera.rotate(-0.3, -0.5);
        }
        assert!(camera.pitch >= -std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn test_first_person_no_roll() {
        let mut camera = FirstPersonCamera::from_bounds(&ModelBounds::new(), 1.0);
        camera.rotate(1.2, 0.4);
        // The strafe axis stays horizontal regardless of yaw/pitch
        assert_relative_eq!(camera.right().y, 0.0);
        assert_relative_eq!(camera.forward().norm(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_first_person_view_defined_at_full_pitch() {
        let mut camera = FirstPersonCamera::from_bounds(&ModelBounds::new(), 1.0);
        camera.rotate(0.0, 10.0); // clamps to pi/2, looking straight up
        let view = camera.view_matrix();
        assert!(view.iter().all(|value| value.is_finite()));
    }

    #[test]
    fn test_rig_mode_switch_rebuilds_state() {
        let scene_bounds = bounds((-10.0, 0.0, -10.0), (10.0, 3.0, 10.0));
        let rig = CameraRig::for_mode(ViewMode::Orbit, &scene_bounds, 1.5);
        assert_eq!(rig.mode(), ViewMode::Orbit);

        let rig = CameraRig::for_mode(ViewMode::FirstPerson, &scene_bounds, 1.5);
        assert_eq!(rig.mode(), ViewMode::FirstPerson);
        match rig {
            CameraRig::FirstPerson(camera) => {
                assert_relative_eq!(camera.position.y, 1.5);
            }
            _ => panic!("expected first-person rig"),
        }
    }
}
