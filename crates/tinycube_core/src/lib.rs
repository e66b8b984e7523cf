//! Cubie registry, twist queue, and rotation animator for an animated 3x3x3
//! puzzle.
//!
//! The registry is the single source of truth for where each cubie is. It only
//! changes when the animator finishes a twist, at which point the twist is
//! written in exactly and every cubie is snapped back onto the lattice.

macro_rules! debug_panic {
    ($($tok:tt)*) => {
        match cfg!(debug_assertions) {
            true => panic!($($tok)*),
            false => log::error!($($tok)*),
        }
    };
}

mod animator;
mod colors;
mod engine;
mod geometry;
pub mod notation;
mod queue;
mod registry;
pub mod scramble;
mod twist;

#[cfg(test)]
mod tests;

pub use animator::{AnimationState, RotationAnimator, TwistAnimation, TwistSpeed};
pub use colors::{ColorScheme, FaceColor};
pub use engine::{CubeEngine, TwistCommitted};
pub use geometry::{Axis, Face, GridPos, Layer, Orientation, Sign};
pub use notation::ParseTwistError;
pub use queue::TwistQueue;
pub use registry::{Cubie, CubieId, CubieRegistry, Grip, InvariantViolation, SLICE_SIZE};
pub use twist::{TWIST_ANGLE, Twist, TwistFamily};
