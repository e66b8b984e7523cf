//! Orbit camera controller.

use std::f32::consts::{PI, TAU};

use cgmath::{Deg, EuclideanSpace, Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};
use tinycube_prefs::ViewPreferences;

/// Near clipping plane distance.
const NEAR_PLANE: f32 = 0.1;

/// Camera that orbits the center of the puzzle.
///
/// The position is stored in spherical coordinates. The camera is independent
/// of the puzzle state.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Distance from the center of the puzzle.
    radius: f32,
    /// Angle around the Y axis, measured from +Z toward +X, in `(-π, π]`.
    azimuth: f32,
    /// Angle down from the +Y axis.
    polar: f32,

    prefs: ViewPreferences,
}
impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(&ViewPreferences::default())
    }
}
impl OrbitCamera {
    /// Constructs a camera at the initial position given by `prefs`.
    pub fn new(prefs: &ViewPreferences) -> Self {
        let mut ret = Self {
            radius: prefs.radius,
            azimuth: prefs.azimuth,
            polar: prefs.polar,
            prefs: prefs.clone(),
        };
        ret.clamp();
        ret
    }

    /// Returns the distance from the center of the puzzle.
    pub fn radius(&self) -> f32 {
        self.radius
    }
    /// Returns the angle around the Y axis.
    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }
    /// Returns the angle down from the +Y axis.
    pub fn polar(&self) -> f32 {
        self.polar
    }

    /// Returns the view preferences that constrain the camera.
    pub fn prefs(&self) -> &ViewPreferences {
        &self.prefs
    }
    /// Replaces the view preferences. The camera keeps its position, moved
    /// back within the new limits if necessary.
    pub fn set_prefs(&mut self, prefs: &ViewPreferences) {
        self.prefs = prefs.clone();
        self.clamp();
    }

    /// Rotates the camera in response to a pointer drag, in pixels.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        let s = self.prefs.drag_sensitivity;
        self.azimuth -= dx * s;
        self.polar -= dy * s;
        self.clamp();
    }

    /// Moves the camera closer (positive `wheel_delta`) or farther away.
    pub fn zoom(&mut self, wheel_delta: f32) {
        if !wheel_delta.is_finite() {
            return;
        }
        self.radius *= (-wheel_delta * self.prefs.zoom_sensitivity).exp();
        self.clamp();
    }

    /// Returns the position of the camera.
    pub fn eye(&self) -> Point3<f32> {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        Point3::new(
            self.radius * sin_polar * sin_azimuth,
            self.radius * cos_polar,
            self.radius * sin_polar * cos_azimuth,
        )
    }

    /// Returns the view matrix, looking at the center of the puzzle with +Y
    /// up.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye(), Point3::origin(), Vector3::unit_y())
    }

    /// Returns the perspective projection matrix for a viewport with the
    /// given aspect ratio (width / height).
    pub fn projection_matrix(&self, aspect: f32) -> Matrix4<f32> {
        let far = self.prefs.max_radius * 2.0;
        cgmath::perspective(Deg(self.prefs.fov), aspect, NEAR_PLANE, far)
    }

    fn clamp(&mut self) {
        let p = &self.prefs;
        self.radius = self.radius.clamp(p.min_radius, p.max_radius);
        self.polar = self.polar.clamp(p.polar_margin, PI - p.polar_margin);
        self.azimuth = wrap_angle(self.azimuth);
    }
}

/// Wraps an angle to the range `(-π, π]`.
fn wrap_angle(angle: f32) -> f32 {
    let ret = (angle + PI).rem_euclid(TAU) - PI;
    if ret <= -PI { ret + TAU } else { ret }
}
