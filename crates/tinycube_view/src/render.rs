//! Visual transforms for drawing the puzzle.

use cgmath::{Matrix4, Quaternion, Rotation, Vector3};
use serde::{Deserialize, Serialize};
use tinycube_core::{ColorScheme, CubeEngine, CubieId, Face, FaceColor, GridPos, TWIST_ANGLE};
use tinycube_prefs::InterpolateFn;

/// Everything a renderer needs to draw one cubie for one frame.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CubieRenderData {
    /// ID of the cubie in the registry.
    pub id: CubieId,
    /// Home position of the cubie.
    pub grid_position: GridPos,
    /// Visual position of the cubie's center.
    pub position: [f32; 3],
    /// Visual rotation of the cubie as a unit quaternion `[x, y, z, w]`.
    pub rotation: [f32; 4],
    /// Visual model matrix (translation times rotation), column-major.
    pub matrix: [[f32; 4]; 4],
    /// Sticker color for each face of the cubie in its own frame, indexed by
    /// [`Face::idx()`]. Faces inside the puzzle have no sticker.
    pub stickers: [Option<FaceColor>; Face::COUNT],
}

/// Computes the visual transform of every cubie.
///
/// Cubies gripped by the twist in progress are rotated around the center of
/// the puzzle by the partial twist angle on top of their committed transform.
/// Every other cubie is drawn exactly where the registry has it.
pub fn render_data(
    engine: &CubeEngine,
    interpolation: InterpolateFn,
    colors: &ColorScheme,
) -> Vec<CubieRenderData> {
    let sweep = engine.current().map(|anim| {
        let t = interpolation.interpolate(anim.fraction());
        (anim, anim.twist().partial_rotation(t * TWIST_ANGLE))
    });

    engine
        .registry()
        .iter()
        .map(|(id, cubie)| {
            let mut position = cubie.position();
            let mut rotation = cubie.orientation().to_quaternion();
            if let Some((anim, sweep)) = sweep {
                if anim.is_gripped(id) {
                    position = sweep.rotate_vector(position);
                    rotation = sweep * rotation;
                }
            }
            CubieRenderData {
                id,
                grid_position: cubie.grid_position(),
                position: position.into(),
                rotation: quaternion_to_array(rotation),
                matrix: model_matrix(position, rotation).into(),
                stickers: colors.sticker_colors(cubie.grid_position()),
            }
        })
        .collect()
}

fn model_matrix(position: Vector3<f32>, rotation: Quaternion<f32>) -> Matrix4<f32> {
    Matrix4::from_translation(position) * Matrix4::from(rotation)
}

fn quaternion_to_array(q: Quaternion<f32>) -> [f32; 4] {
    [q.v.x, q.v.y, q.v.z, q.s]
}
