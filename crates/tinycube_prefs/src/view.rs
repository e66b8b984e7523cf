//! Camera preferences.

use serde::{Deserialize, Serialize};

/// Orbit camera preferences.
///
/// Angles are in radians and distances are in cubie widths.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ViewPreferences {
    /// Initial distance from the camera to the center of the puzzle.
    pub radius: f32,
    /// Closest the camera may get to the center of the puzzle.
    pub min_radius: f32,
    /// Farthest the camera may get from the center of the puzzle.
    pub max_radius: f32,
    /// Initial angle around the vertical axis, measured from +Z toward +X.
    pub azimuth: f32,
    /// Initial angle down from the +Y axis.
    pub polar: f32,
    /// Minimum distance of the polar angle from either pole.
    pub polar_margin: f32,
    /// Radians of rotation per pixel of pointer drag.
    pub drag_sensitivity: f32,
    /// Zoom per unit of scroll wheel movement.
    pub zoom_sensitivity: f32,
    /// Vertical field of view, in degrees.
    pub fov: f32,
}
impl Default for ViewPreferences {
    fn default() -> Self {
        crate::DEFAULT_PREFS.view.clone()
    }
}
