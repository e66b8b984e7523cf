//! Random twist sequences.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{Axis, Layer, Sign, Twist};

/// Returns a twist with axis, layer, and direction each chosen uniformly at
/// random.
pub fn random_twist(rng: &mut impl Rng) -> Twist {
    let axis = match rng.random_range(0..3) {
        0 => Axis::X,
        1 => Axis::Y,
        _ => Axis::Z,
    };
    let layer = match rng.random_range(-1..=1) {
        -1 => Layer::Neg,
        0 => Layer::Mid,
        _ => Layer::Pos,
    };
    let direction = match rng.random::<bool>() {
        true => Sign::Pos,
        false => Sign::Neg,
    };
    Twist::new(axis, layer, direction)
}

/// Returns `count` random twists.
///
/// With a seed, the output is the same on every platform and every run.
/// Consecutive twists may cancel each other.
pub fn scramble_twists(count: usize, seed: Option<u64>) -> Vec<Twist> {
    match seed {
        Some(seed) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..count).map(|_| random_twist(&mut rng)).collect()
        }
        None => {
            let mut rng = rand::rng();
            (0..count).map(|_| random_twist(&mut rng)).collect()
        }
    }
}

/// Returns the twists that undo `twists`, in the order they must be applied.
pub fn inverse_sequence(twists: &[Twist]) -> Vec<Twist> {
    twists.iter().rev().map(|t| t.rev()).collect()
}
