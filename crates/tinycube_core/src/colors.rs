//! Sticker colors.

use serde::{Deserialize, Serialize};

use crate::{Face, GridPos};

/// Color of a sticker.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::VariantArray,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[allow(missing_docs)]
pub enum FaceColor {
    White,
    Yellow,
    Red,
    Orange,
    Green,
    Blue,
}
impl FaceColor {
    /// Returns the sRGB color.
    pub const fn rgb(self) -> [u8; 3] {
        match self {
            Self::White => [0xff, 0xff, 0xff],
            Self::Yellow => [0xff, 0xd5, 0x00],
            Self::Red => [0xb7, 0x12, 0x34],
            Self::Orange => [0xff, 0x58, 0x00],
            Self::Green => [0x00, 0x9b, 0x48],
            Self::Blue => [0x00, 0x46, 0xad],
        }
    }
}

/// Assignment of colors to the faces of the puzzle.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ColorScheme {
    /// Color for each face, indexed by [`Face::idx()`].
    pub faces: [FaceColor; Face::COUNT],
}
impl Default for ColorScheme {
    fn default() -> Self {
        let mut faces = [FaceColor::White; Face::COUNT];
        faces[Face::R.idx()] = FaceColor::Red;
        faces[Face::L.idx()] = FaceColor::Orange;
        faces[Face::U.idx()] = FaceColor::White;
        faces[Face::D.idx()] = FaceColor::Yellow;
        faces[Face::F.idx()] = FaceColor::Green;
        faces[Face::B.idx()] = FaceColor::Blue;
        Self { faces }
    }
}
impl ColorScheme {
    /// Returns the color of a face.
    pub fn color(&self, face: Face) -> FaceColor {
        self.faces[face.idx()]
    }

    /// Returns the sticker colors of the cubie whose home is `grid_pos`, in
    /// the cubie's own frame, indexed by [`Face::idx()`].
    ///
    /// Faces that are inside the puzzle have no sticker.
    pub fn sticker_colors(&self, grid_pos: GridPos) -> [Option<FaceColor>; Face::COUNT] {
        let mut ret = [None; Face::COUNT];
        for face in grid_pos.outer_faces() {
            ret[face.idx()] = Some(self.color(face));
        }
        ret
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::Layer;

    #[test]
    fn test_sticker_counts() {
        let scheme = ColorScheme::default();
        let mut total = 0;
        for pos in GridPos::iter() {
            let colors = scheme.sticker_colors(pos);
            let count = colors.iter().flatten().count();
            let nonzero_coords = pos.0.iter().filter(|&&l| l != Layer::Mid).count();
            assert_eq!(nonzero_coords, count);
            total += count;
        }
        assert_eq!(54, total);
    }

    #[test]
    fn test_default_scheme_is_distinct() {
        let scheme = ColorScheme::default();
        let distinct = scheme
            .faces
            .iter()
            .collect::<std::collections::HashSet<_>>();
        assert_eq!(Face::COUNT, distinct.len());
    }
}
