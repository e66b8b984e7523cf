//! Axes, signs, layers, faces, grid positions, and exact 90-degree rotations.

use std::fmt;
use std::ops::{Index, IndexMut, Mul, Neg};

use cgmath::{Matrix3, Quaternion, Vector3};
use serde::{Deserialize, Serialize};

/// A 3-dimensional axis.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::VariantArray,
)]
pub enum Axis {
    /// X axis (right).
    X = 0,
    /// Y axis (up).
    Y = 1,
    /// Z axis (towards the camera).
    Z = 2,
}
impl Axis {
    /// Returns an integer index for this axis; X = 0, Y = 1, Z = 2.
    pub const fn int(self) -> usize {
        self as usize
    }
    /// Returns the two axes perpendicular to this one, using the right-hand
    /// rule. (The cross product of the returned axes is this axis.)
    ///
    /// A positive quarter turn around `self` takes the first returned axis to
    /// the second.
    pub const fn perpendiculars(self) -> (Axis, Axis) {
        match self {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::Z, Axis::X),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }
    /// Returns the unit vector along this axis.
    pub fn unit_vector(self) -> Vector3<f32> {
        let mut ret = Vector3::new(0.0, 0.0, 0.0);
        ret[self.int()] = 1.0;
        ret
    }
    /// Returns an iterator over all axes.
    pub fn iter() -> impl Clone + Iterator<Item = Axis> {
        [Axis::X, Axis::Y, Axis::Z].into_iter()
    }
}

/// Positive or negative.
///
/// Used for rotation direction (positive is counterclockwise when looking
/// down the axis toward the origin) and for which end of an axis a face is
/// on.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Sign {
    /// Positive
    #[default]
    Pos,
    /// Negative
    Neg,
}
impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::Pos => write!(f, "+"),
            Sign::Neg => write!(f, "-"),
        }
    }
}
impl Neg for Sign {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Sign::Pos => Sign::Neg,
            Sign::Neg => Sign::Pos,
        }
    }
}
impl Mul for Sign {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        match self {
            Sign::Pos => rhs,
            Sign::Neg => -rhs,
        }
    }
}
impl Sign {
    /// Returns `1` or `-1`.
    pub const fn int(self) -> i8 {
        match self {
            Sign::Pos => 1,
            Sign::Neg => -1,
        }
    }
    /// Returns `1.0` or `-1.0`.
    pub const fn float(self) -> f32 {
        self.int() as f32
    }
    /// Returns the sign of an integer, or `None` if it is zero.
    pub fn from_int(i: i32) -> Option<Self> {
        match i.signum() {
            1 => Some(Sign::Pos),
            -1 => Some(Sign::Neg),
            _ => None,
        }
    }
    /// Returns an iterator over both signs.
    pub fn iter() -> impl Clone + Iterator<Item = Sign> {
        [Sign::Pos, Sign::Neg].into_iter()
    }
}

/// Slice along an axis: negative, middle, or positive.
#[derive(
    Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(into = "i8", try_from = "i8")]
pub enum Layer {
    /// Negative layer (-1).
    Neg = -1,
    /// Middle layer (0).
    #[default]
    Mid = 0,
    /// Positive layer (+1).
    Pos = 1,
}
impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.int())
    }
}
impl Neg for Layer {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Layer::Neg => Layer::Pos,
            Layer::Mid => Layer::Mid,
            Layer::Pos => Layer::Neg,
        }
    }
}
impl Mul<Sign> for Layer {
    type Output = Self;

    fn mul(self, rhs: Sign) -> Self::Output {
        match rhs {
            Sign::Pos => self,
            Sign::Neg => -self,
        }
    }
}
impl From<Sign> for Layer {
    fn from(sign: Sign) -> Self {
        match sign {
            Sign::Pos => Layer::Pos,
            Sign::Neg => Layer::Neg,
        }
    }
}
impl From<Layer> for i8 {
    fn from(layer: Layer) -> Self {
        layer.int()
    }
}
impl TryFrom<i8> for Layer {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        Layer::from_int(value.into()).ok_or_else(|| format!("invalid layer {value}"))
    }
}
impl Layer {
    /// Returns `-1`, `0`, or `1`.
    pub const fn int(self) -> i8 {
        self as i8
    }
    /// Returns `-1.0`, `0.0`, or `1.0`.
    pub const fn float(self) -> f32 {
        self.int() as f32
    }
    /// Returns the layer for an integer in the range `-1..=1`.
    pub const fn from_int(i: i32) -> Option<Self> {
        match i {
            -1 => Some(Layer::Neg),
            0 => Some(Layer::Mid),
            1 => Some(Layer::Pos),
            _ => None,
        }
    }
    /// Returns the layer containing a coordinate, rounding to the nearest
    /// integer. Returns `None` if the coordinate is not near any layer.
    ///
    /// Rounding (not truncation) matters: a coordinate that should be `1` may
    /// have drifted to `0.999999`.
    pub fn from_coordinate(x: f32) -> Option<Self> {
        let rounded = x.round();
        if rounded.is_finite() {
            Self::from_int(rounded as i32)
        } else {
            None
        }
    }
    /// Returns the sign of the layer, or `None` for the middle layer.
    pub const fn sign(self) -> Option<Sign> {
        match self {
            Layer::Neg => Some(Sign::Neg),
            Layer::Mid => None,
            Layer::Pos => Some(Sign::Pos),
        }
    }
    /// Returns an iterator over all layers, from negative to positive.
    pub fn iter() -> impl Clone + Iterator<Item = Layer> {
        [Layer::Neg, Layer::Mid, Layer::Pos].into_iter()
    }
}

/// A face of the cube, also used as a signed axis direction.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Face {
    /// Axis perpendicular to the face.
    pub axis: Axis,
    /// Which end of the axis the face is on.
    pub sign: Sign,
}
impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
impl Neg for Face {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            sign: -self.sign,
            ..self
        }
    }
}
impl Mul<Sign> for Face {
    type Output = Self;

    fn mul(self, rhs: Sign) -> Self::Output {
        Self {
            sign: self.sign * rhs,
            ..self
        }
    }
}
impl Face {
    /// Number of faces on a cube.
    pub const COUNT: usize = 6;

    /// Right face (+X).
    pub const R: Face = Face::new(Axis::X, Sign::Pos);
    /// Left face (-X).
    pub const L: Face = Face::new(Axis::X, Sign::Neg);
    /// Up face (+Y).
    pub const U: Face = Face::new(Axis::Y, Sign::Pos);
    /// Down face (-Y).
    pub const D: Face = Face::new(Axis::Y, Sign::Neg);
    /// Front face (+Z).
    pub const F: Face = Face::new(Axis::Z, Sign::Pos);
    /// Back face (-Z).
    pub const B: Face = Face::new(Axis::Z, Sign::Neg);

    /// Returns the face on the given axis with the given sign.
    pub const fn new(axis: Axis, sign: Sign) -> Self {
        Self { axis, sign }
    }
    /// Returns a unique index for the face, in the range `0..6`.
    pub const fn idx(self) -> usize {
        match (self.axis, self.sign) {
            (Axis::X, Sign::Pos) => 0,
            (Axis::X, Sign::Neg) => 1,
            (Axis::Y, Sign::Pos) => 2,
            (Axis::Y, Sign::Neg) => 3,
            (Axis::Z, Sign::Pos) => 4,
            (Axis::Z, Sign::Neg) => 5,
        }
    }
    /// Returns the standard one-letter name for the face.
    pub const fn symbol(self) -> char {
        match (self.axis, self.sign) {
            (Axis::X, Sign::Pos) => 'R',
            (Axis::X, Sign::Neg) => 'L',
            (Axis::Y, Sign::Pos) => 'U',
            (Axis::Y, Sign::Neg) => 'D',
            (Axis::Z, Sign::Pos) => 'F',
            (Axis::Z, Sign::Neg) => 'B',
        }
    }
    /// Returns the layer that the face is on.
    pub fn layer(self) -> Layer {
        self.sign.into()
    }
    /// Returns the outward normal vector of the face.
    pub fn normal(self) -> Vector3<f32> {
        self.axis.unit_vector() * self.sign.float()
    }
    /// Returns an iterator over all faces, in index order.
    pub fn iter() -> impl Clone + Iterator<Item = Face> {
        Axis::iter().flat_map(|axis| Sign::iter().map(move |sign| Face::new(axis, sign)))
    }
}

/// A lattice point in `{-1, 0, 1}³`.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct GridPos(pub [Layer; 3]);
impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.0;
        write!(f, "({x}, {y}, {z})")
    }
}
impl Index<Axis> for GridPos {
    type Output = Layer;

    fn index(&self, axis: Axis) -> &Layer {
        &self.0[axis.int()]
    }
}
impl IndexMut<Axis> for GridPos {
    fn index_mut(&mut self, axis: Axis) -> &mut Layer {
        &mut self.0[axis.int()]
    }
}
impl GridPos {
    /// Number of lattice points.
    pub const COUNT: usize = 27;

    /// Returns the grid position at the center of the puzzle.
    pub const fn core() -> Self {
        Self([Layer::Mid; 3])
    }
    /// Constructs a grid position from integer coordinates, or returns `None`
    /// if any coordinate is outside `-1..=1`.
    pub fn from_ints(x: i32, y: i32, z: i32) -> Option<Self> {
        Some(Self([
            Layer::from_int(x)?,
            Layer::from_int(y)?,
            Layer::from_int(z)?,
        ]))
    }
    /// Returns the nearest lattice point to `v`, or `None` if any component
    /// rounds to something outside `-1..=1`.
    pub fn from_vector_rounded(v: Vector3<f32>) -> Option<Self> {
        Some(Self([
            Layer::from_coordinate(v.x)?,
            Layer::from_coordinate(v.y)?,
            Layer::from_coordinate(v.z)?,
        ]))
    }
    /// Returns the grid position as a floating-point vector.
    pub fn to_vector(self) -> Vector3<f32> {
        let [x, y, z] = self.0;
        Vector3::new(x.float(), y.float(), z.float())
    }
    /// Returns the integer coordinates.
    pub fn ints(self) -> [i8; 3] {
        self.0.map(Layer::int)
    }
    /// Returns the faces of the puzzle that this position is on the surface
    /// of.
    pub fn outer_faces(self) -> impl Iterator<Item = Face> {
        Face::iter().filter(move |face| self[face.axis] == face.layer())
    }
    /// Returns an iterator over all 27 lattice points, with X varying fastest.
    pub fn iter() -> impl Iterator<Item = GridPos> {
        Layer::iter().flat_map(|z| {
            Layer::iter().flat_map(move |y| Layer::iter().map(move |x| GridPos([x, y, z])))
        })
    }
}

/// An exact rotation of the cube, represented as a signed permutation of the
/// axes.
///
/// `self[axis]` is the direction that the positive end of `axis` points after
/// the rotation. This is the same as a 3x3 orthonormal integer matrix whose
/// columns are those directions.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Orientation([Face; 3]);
impl Default for Orientation {
    fn default() -> Self {
        Self::IDENT
    }
}
impl Index<Axis> for Orientation {
    type Output = Face;

    fn index(&self, axis: Axis) -> &Face {
        &self.0[axis.int()]
    }
}
impl IndexMut<Axis> for Orientation {
    fn index_mut(&mut self, axis: Axis) -> &mut Face {
        &mut self.0[axis.int()]
    }
}
/// Composition: `(a * b)` applies `b` first, then `a`.
impl Mul for Orientation {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(rhs.0.map(|face| self.transform_face(face)))
    }
}
impl Orientation {
    /// Identity rotation.
    pub const IDENT: Self = Self([Face::R, Face::U, Face::F]);

    /// Returns a quarter turn around `axis` in the direction `direction`
    /// (positive is counterclockwise when looking from the positive end of
    /// the axis toward the origin).
    #[must_use]
    pub fn rot90(axis: Axis, direction: Sign) -> Self {
        let (ax1, ax2) = axis.perpendiculars();
        let mut ret = Self::IDENT;
        ret[ax1] = Face::new(ax2, direction);
        ret[ax2] = Face::new(ax1, -direction);
        ret
    }

    /// Returns the inverse rotation.
    #[must_use]
    pub fn rev(self) -> Self {
        let mut ret = Self::IDENT;
        for axis in Axis::iter() {
            let image = self[axis];
            ret[image.axis] = Face::new(axis, image.sign);
        }
        ret
    }

    /// Returns whether this is the identity rotation.
    pub fn is_ident(self) -> bool {
        self == Self::IDENT
    }

    /// Returns the direction that `face` points after the rotation.
    pub fn transform_face(self, face: Face) -> Face {
        self[face.axis] * face.sign
    }
    /// Rotates a grid position.
    pub fn transform_grid_pos(self, pos: GridPos) -> GridPos {
        let mut ret = GridPos::core();
        for axis in Axis::iter() {
            let image = self[axis];
            ret[image.axis] = pos[axis] * image.sign;
        }
        ret
    }
    /// Rotates a vector exactly.
    ///
    /// Each output component is a single input component, possibly negated,
    /// so no rounding error is introduced.
    pub fn transform_vector(self, v: Vector3<f32>) -> Vector3<f32> {
        let mut ret = Vector3::new(0.0, 0.0, 0.0);
        for axis in Axis::iter() {
            let image = self[axis];
            ret[image.axis.int()] = v[axis.int()] * image.sign.float();
        }
        ret
    }

    /// Returns the rotation as a floating-point matrix.
    pub fn to_matrix3(self) -> Matrix3<f32> {
        let [x, y, z] = self.0.map(Face::normal);
        Matrix3::from_cols(x, y, z)
    }
    /// Returns the rotation as a unit quaternion.
    pub fn to_quaternion(self) -> Quaternion<f32> {
        Quaternion::from(self.to_matrix3())
    }

    /// Returns an iterator over all 24 rotations of the cube.
    pub fn iter() -> impl Iterator<Item = Orientation> {
        Face::iter().flat_map(|x| {
            Face::iter()
                .filter(move |y| y.axis != x.axis)
                .map(move |y| {
                    // Third column is the cross product of the first two.
                    let z_axis = Axis::iter()
                        .find(|&a| a != x.axis && a != y.axis)
                        .unwrap_or(Axis::Z);
                    let (p1, _) = x.axis.perpendiculars();
                    let cyclic = y.axis == p1;
                    let sign = x.sign * y.sign * if cyclic { Sign::Pos } else { Sign::Neg };
                    Orientation([x, y, Face::new(z_axis, sign)])
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{InnerSpace, Rotation, Rotation3};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_rot90_matches_right_hand_rule() {
        // Quarter turn around +Y takes +Z to +X and +X to -Z.
        let rot = Orientation::rot90(Axis::Y, Sign::Pos);
        assert_eq!(rot.transform_face(Face::F), Face::R);
        assert_eq!(rot.transform_face(Face::R), Face::B);
        assert_eq!(rot.transform_face(Face::U), Face::U);

        // Compare against a floating-point rotation.
        for axis in Axis::iter() {
            for direction in Sign::iter() {
                let exact = Orientation::rot90(axis, direction);
                let float = cgmath::Basis3::from_axis_angle(
                    axis.unit_vector(),
                    cgmath::Rad(std::f32::consts::FRAC_PI_2 * direction.float()),
                );
                for face in Face::iter() {
                    let expected = float.rotate_vector(face.normal());
                    let actual = exact.transform_face(face).normal();
                    assert!((expected - actual).magnitude() < 1e-5, "{axis} {direction}");
                }
            }
        }
    }

    #[test]
    fn test_orientation_group() {
        let all = Orientation::iter().collect::<Vec<_>>();
        assert_eq!(24, all.len());
        assert_eq!(24, all.iter().collect::<std::collections::HashSet<_>>().len());
        for &o in &all {
            assert!((o * o.rev()).is_ident());
            assert!((o.rev() * o).is_ident());
            // Every element is a proper rotation.
            assert_eq!(1.0, cgmath::SquareMatrix::determinant(&o.to_matrix3()));
        }
        // Closed under composition.
        for &a in &all {
            for &b in &all {
                assert!(all.contains(&(a * b)));
            }
        }
    }

    #[test]
    fn test_quarter_turn_closure() {
        for axis in Axis::iter() {
            for direction in Sign::iter() {
                let rot = Orientation::rot90(axis, direction);
                assert!((rot * rot * rot * rot).is_ident());
                assert_eq!(rot.rev(), Orientation::rot90(axis, -direction));
            }
        }
    }

    #[test]
    fn test_quaternion_matches_matrix() {
        for o in Orientation::iter() {
            let q = o.to_quaternion();
            for face in Face::iter() {
                let expected = o.transform_face(face).normal();
                let actual = q.rotate_vector(face.normal());
                assert!((expected - actual).magnitude() < 1e-5);
            }
        }
    }

    #[test]
    fn test_layer_from_coordinate_rounds() {
        assert_eq!(Some(Layer::Pos), Layer::from_coordinate(0.999999));
        assert_eq!(Some(Layer::Neg), Layer::from_coordinate(-1.000001));
        assert_eq!(Some(Layer::Mid), Layer::from_coordinate(-0.0000004));
        assert_eq!(None, Layer::from_coordinate(1.6));
        assert_eq!(None, Layer::from_coordinate(f32::NAN));
    }

    #[test]
    fn test_grid_positions() {
        assert_eq!(GridPos::COUNT, GridPos::iter().count());
        assert_eq!(
            GridPos::COUNT,
            GridPos::iter()
                .collect::<std::collections::HashSet<_>>()
                .len(),
        );
        let corner = GridPos([Layer::Pos, Layer::Neg, Layer::Pos]);
        assert_eq!(
            vec![Face::R, Face::D, Face::F],
            corner.outer_faces().collect::<Vec<_>>(),
        );
        assert_eq!(0, GridPos::core().outer_faces().count());
    }
}
