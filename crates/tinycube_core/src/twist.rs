//! Quarter-turn twists of a single slice.

use std::fmt;

use cgmath::{Quaternion, Rad, Rotation3};
use serde::{Deserialize, Serialize};

use crate::{Axis, Face, Layer, Orientation, Sign};

/// Angle of a single twist, in radians.
pub const TWIST_ANGLE: f32 = std::f32::consts::FRAC_PI_2;

/// Quarter turn of one slice of the puzzle.
///
/// Positive `direction` is counterclockwise when looking from the positive
/// end of `axis` toward the origin (right-hand rule).
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Twist {
    /// Axis to rotate around.
    pub axis: Axis,
    /// Slice along `axis` that is rotated.
    pub layer: Layer,
    /// Direction of rotation.
    pub direction: Sign,
}
impl fmt::Display for Twist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (family, is_inverted) = self.family();
        write!(f, "{}", family.symbol())?;
        if is_inverted {
            write!(f, "'")?;
        }
        Ok(())
    }
}
impl Twist {
    /// Constructs a twist.
    pub const fn new(axis: Axis, layer: Layer, direction: Sign) -> Self {
        Self {
            axis,
            layer,
            direction,
        }
    }

    /// Returns the clockwise twist of an outer face, as seen when looking at
    /// that face.
    pub fn face(face: Face) -> Self {
        Self::new(face.axis, face.layer(), -face.sign)
    }

    /// Returns the twist that undoes this one.
    #[must_use]
    pub fn rev(self) -> Self {
        Self {
            direction: -self.direction,
            ..self
        }
    }

    /// Returns the exact rotation applied to each gripped cubie.
    pub fn rotation(self) -> Orientation {
        Orientation::rot90(self.axis, self.direction)
    }

    /// Returns the rotation of the gripped slice partway through the twist,
    /// where `angle` is the unsigned angle swept so far in radians.
    pub fn partial_rotation(self, angle: f32) -> Quaternion<f32> {
        Quaternion::from_axis_angle(self.axis.unit_vector(), Rad(angle * self.direction.float()))
    }

    /// Returns the named twist family and whether this twist is its inverse
    /// (prime).
    pub fn family(self) -> (TwistFamily, bool) {
        let family = TwistFamily::from_axis_layer(self.axis, self.layer);
        (family, self.direction != family.twist().direction)
    }
}

/// Named slice of the puzzle, used for notation.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, strum::VariantArray,
)]
pub enum TwistFamily {
    /// Right face.
    R,
    /// Left face.
    L,
    /// Up face.
    U,
    /// Down face.
    D,
    /// Front face.
    F,
    /// Back face.
    B,
    /// Middle slice between L and R, turning like L.
    M,
    /// Equatorial slice between U and D, turning like D.
    E,
    /// Standing slice between F and B, turning like F.
    S,
}
impl TwistFamily {
    /// Returns the one-letter symbol for the family.
    pub const fn symbol(self) -> char {
        match self {
            Self::R => 'R',
            Self::L => 'L',
            Self::U => 'U',
            Self::D => 'D',
            Self::F => 'F',
            Self::B => 'B',
            Self::M => 'M',
            Self::E => 'E',
            Self::S => 'S',
        }
    }
    /// Returns the family with a given symbol.
    pub fn from_symbol(c: char) -> Option<Self> {
        <Self as strum::VariantArray>::VARIANTS
            .iter()
            .copied()
            .find(|family| family.symbol() == c)
    }
    /// Returns the uninverted twist for this family.
    pub fn twist(self) -> Twist {
        match self {
            Self::R => Twist::face(Face::R),
            Self::L => Twist::face(Face::L),
            Self::U => Twist::face(Face::U),
            Self::D => Twist::face(Face::D),
            Self::F => Twist::face(Face::F),
            Self::B => Twist::face(Face::B),
            Self::M => Twist::new(Axis::X, Layer::Mid, Sign::Pos),
            Self::E => Twist::new(Axis::Y, Layer::Mid, Sign::Pos),
            Self::S => Twist::new(Axis::Z, Layer::Mid, Sign::Neg),
        }
    }
    fn from_axis_layer(axis: Axis, layer: Layer) -> Self {
        match (axis, layer) {
            (Axis::X, Layer::Pos) => Self::R,
            (Axis::X, Layer::Neg) => Self::L,
            (Axis::Y, Layer::Pos) => Self::U,
            (Axis::Y, Layer::Neg) => Self::D,
            (Axis::Z, Layer::Pos) => Self::F,
            (Axis::Z, Layer::Neg) => Self::B,
            (Axis::X, Layer::Mid) => Self::M,
            (Axis::Y, Layer::Mid) => Self::E,
            (Axis::Z, Layer::Mid) => Self::S,
        }
    }
}
