//! Spatial state of the 27 cubies.

use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

use cgmath::{InnerSpace, Matrix4, Vector3};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{Axis, Face, GridPos, Layer, Orientation, Sign};

/// Maximum distance of a resting cubie from its lattice point.
const LATTICE_EPSILON: f32 = 0.0001;

/// Number of cubies in one slice.
pub const SLICE_SIZE: usize = 9;

/// ID of a cubie in a [`CubieRegistry`].
#[derive(
    Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub struct CubieId(pub u8);
impl fmt::Display for CubieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cubie #{}", self.0)
    }
}
impl CubieId {
    fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Set of cubies affected by a twist.
pub type Grip = SmallVec<[CubieId; SLICE_SIZE]>;

/// Broken registry invariant.
///
/// These indicate a bug in the rotation math, not a condition that the user
/// can cause.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    /// The registry does not have one cubie per lattice point.
    #[error("expected {expected} cubies; got {actual}")]
    WrongCount {
        /// Expected number of cubies.
        expected: usize,
        /// Actual number of cubies.
        actual: usize,
    },
    /// A cubie is not resting on a lattice point.
    #[error("{cubie} is off the lattice at {position:?}")]
    OffLattice {
        /// Offending cubie.
        cubie: CubieId,
        /// Position of the cubie.
        position: [f32; 3],
    },
    /// Two cubies occupy the same lattice point.
    #[error("{a} and {b} both occupy {point}")]
    Collision {
        /// First cubie at the point.
        a: CubieId,
        /// Second cubie at the point.
        b: CubieId,
        /// Shared lattice point.
        point: GridPos,
    },
}

/// One of the 27 small cubes.
#[derive(Debug, Clone, PartialEq)]
pub struct Cubie {
    grid_position: GridPos,
    position: Vector3<f32>,
    orientation: Orientation,
}
impl Cubie {
    fn new(grid_position: GridPos) -> Self {
        Self {
            grid_position,
            position: grid_position.to_vector(),
            orientation: Orientation::IDENT,
        }
    }

    /// Returns the lattice point where the cubie started. This determines its
    /// sticker colors.
    pub fn grid_position(&self) -> GridPos {
        self.grid_position
    }
    /// Returns the committed position of the cubie.
    pub fn position(&self) -> Vector3<f32> {
        self.position
    }
    /// Returns the committed rotation of the cubie relative to its starting
    /// orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
    /// Returns the lattice point nearest the cubie's position, or `None` if
    /// the position is outside the puzzle.
    pub fn lattice_point(&self) -> Option<GridPos> {
        GridPos::from_vector_rounded(self.position)
    }
    /// Returns the committed transform of the cubie as a matrix.
    pub fn transform(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position) * Matrix4::from(self.orientation.to_matrix3())
    }

    /// Returns the direction that a face of the cubie (in its starting frame)
    /// currently points.
    pub fn facing(&self, local_face: Face) -> Face {
        self.orientation.transform_face(local_face)
    }
    /// Returns which face of the cubie (in its starting frame) currently
    /// points in the direction `world_face`.
    pub fn face_pointing(&self, world_face: Face) -> Face {
        self.orientation.rev().transform_face(world_face)
    }
}

/// Single source of truth for the spatial state of all 27 cubies.
#[derive(Debug, Clone, PartialEq)]
pub struct CubieRegistry {
    cubies: Vec<Cubie>,
}
impl Default for CubieRegistry {
    fn default() -> Self {
        Self::new()
    }
}
impl Index<CubieId> for CubieRegistry {
    type Output = Cubie;

    fn index(&self, id: CubieId) -> &Cubie {
        &self.cubies[id.idx()]
    }
}
impl CubieRegistry {
    /// Constructs a registry with every cubie at its home position.
    pub fn new() -> Self {
        let mut ret = Self { cubies: vec![] };
        ret.initialize();
        ret
    }

    /// Places every cubie back at its home position with no rotation.
    pub(crate) fn initialize(&mut self) {
        self.cubies = GridPos::iter().map(Cubie::new).collect();
    }

    /// Returns the number of cubies, which is always 27.
    pub fn len(&self) -> usize {
        self.cubies.len()
    }
    /// Returns `false`.
    pub fn is_empty(&self) -> bool {
        self.cubies.is_empty()
    }
    /// Returns the IDs of all cubies.
    pub fn ids(&self) -> impl Iterator<Item = CubieId> + use<> {
        (0..self.cubies.len() as u8).map(CubieId)
    }
    /// Returns an iterator over all cubies and their IDs.
    pub fn iter(&self) -> impl Iterator<Item = (CubieId, &Cubie)> {
        self.ids().zip(&self.cubies)
    }
    /// Returns a cubie, or `None` if the ID is out of range.
    pub fn cubie(&self, id: CubieId) -> Option<&Cubie> {
        self.cubies.get(id.idx())
    }
    /// Returns the cubie whose rounded position is `pos`.
    pub fn cubie_at(&self, pos: GridPos) -> Option<CubieId> {
        self.iter()
            .find(|(_, cubie)| cubie.lattice_point() == Some(pos))
            .map(|(id, _)| id)
    }

    /// Returns all cubies whose position along `axis`, rounded to the nearest
    /// integer, equals `layer`.
    pub fn cubies_in_slice(&self, axis: Axis, layer: Layer) -> Grip {
        self.iter()
            .filter(|(_, cubie)| {
                Layer::from_coordinate(cubie.position[axis.int()]) == Some(layer)
            })
            .map(|(id, _)| id)
            .collect()
    }

    /// Rotates each cubie in `ids` by an exact quarter turn around `axis`,
    /// then snaps its position to the nearest lattice point.
    pub(crate) fn apply_discrete_rotation(&mut self, ids: &[CubieId], axis: Axis, direction: Sign) {
        let rot = Orientation::rot90(axis, direction);
        for &id in ids {
            let cubie = &mut self.cubies[id.idx()];
            cubie.position = rot.transform_vector(cubie.position).map(f32::round);
            cubie.orientation = rot * cubie.orientation;
        }
    }

    /// Checks that every cubie rests on a distinct lattice point.
    pub fn check_lattice(&self) -> Result<(), InvariantViolation> {
        if self.cubies.len() != GridPos::COUNT {
            return Err(InvariantViolation::WrongCount {
                expected: GridPos::COUNT,
                actual: self.cubies.len(),
            });
        }

        let mut occupied = HashMap::new();
        for (id, cubie) in self.iter() {
            let off_lattice = || InvariantViolation::OffLattice {
                cubie: id,
                position: cubie.position.into(),
            };
            let point = cubie.lattice_point().ok_or_else(off_lattice)?;
            if (cubie.position - point.to_vector()).magnitude() > LATTICE_EPSILON {
                return Err(off_lattice());
            }
            if let Some(other) = occupied.insert(point, id) {
                return Err(InvariantViolation::Collision {
                    a: other,
                    b: id,
                    point,
                });
            }
        }

        Ok(())
    }

    /// Returns whether the puzzle is solved, allowing for a rotation of the
    /// whole puzzle. Slice twists can produce whole-puzzle rotations.
    ///
    /// This holds exactly when every cubie has the same orientation and sits
    /// where that orientation takes its home position.
    pub fn is_solved(&self) -> bool {
        let Some(first) = self.cubies.first() else {
            return true;
        };
        let rot = first.orientation;
        self.cubies.iter().all(|cubie| {
            cubie.orientation == rot
                && cubie.lattice_point() == Some(rot.transform_grid_pos(cubie.grid_position))
        })
    }
}
