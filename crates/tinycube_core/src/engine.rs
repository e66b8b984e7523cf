//! Puzzle state together with its pending twists.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    CubieRegistry, RotationAnimator, Twist, TwistAnimation, TwistQueue, TwistSpeed, scramble,
};

/// Event emitted each time a twist is committed to the registry.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct TwistCommitted {
    /// Twist that was committed.
    pub twist: Twist,
    /// Number of twists committed since the last reset, including this one.
    pub count: u64,
}

/// Cubie registry, twist queue, and rotation animator.
///
/// This is the only way to change the registry from outside the crate, and
/// every change goes through the queue.
#[derive(Debug, Default, Clone)]
pub struct CubeEngine {
    registry: CubieRegistry,
    queue: TwistQueue,
    animator: RotationAnimator,

    commit_count: u64,
    events: Vec<TwistCommitted>,
}
impl CubeEngine {
    /// Constructs a solved puzzle with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the committed state of the cubies.
    pub fn registry(&self) -> &CubieRegistry {
        &self.registry
    }
    /// Returns the pending twists, including the one currently animating.
    pub fn queue(&self) -> &TwistQueue {
        &self.queue
    }
    /// Returns the twist currently animating, if any.
    pub fn current(&self) -> Option<&TwistAnimation> {
        self.animator.current()
    }
    /// Returns whether a twist is animating or waiting to animate.
    pub fn is_animating(&self) -> bool {
        !self.queue.is_empty()
    }
    /// Returns the number of twists committed since the last reset.
    pub fn commit_count(&self) -> u64 {
        self.commit_count
    }
    /// Returns whether the committed state is solved.
    pub fn is_solved(&self) -> bool {
        self.registry.is_solved()
    }

    /// Adds a twist to the back of the queue.
    pub fn enqueue(&mut self, twist: Twist) {
        self.queue.push(twist);
    }
    /// Adds twists to the back of the queue, in order.
    pub fn enqueue_all(&mut self, twists: impl IntoIterator<Item = Twist>) {
        self.queue.extend(twists);
    }

    /// Queues `count` random twists. Returns the twists that were queued.
    pub fn shuffle(&mut self, count: usize, seed: Option<u64>) -> Vec<Twist> {
        let twists = scramble::scramble_twists(count, seed);
        log::debug!("Shuffling with {count} twists (seed {seed:?})");
        self.queue.extend(twists.iter().copied());
        twists
    }

    /// Abandons the twist in progress, clears the queue, and returns every
    /// cubie to its home position.
    pub fn reset(&mut self) {
        log::debug!("Resetting puzzle");
        self.queue.clear();
        self.animator.reset();
        self.registry.initialize();
        self.commit_count = 0;
        self.events.clear();
    }

    /// Advances the animation by `delta`. Returns the twist committed during
    /// this step, if any.
    pub fn step(&mut self, delta: Duration, speed: TwistSpeed) -> Option<Twist> {
        let twist = self
            .animator
            .proceed(delta, speed, &mut self.registry, &mut self.queue)?;
        self.record_commit(twist);
        Some(twist)
    }

    /// Commits every pending twist immediately. Returns the number of twists
    /// committed.
    pub fn catch_up(&mut self) -> usize {
        let committed = self.animator.catch_up(&mut self.registry, &mut self.queue);
        log::debug!("Caught up {} twists", committed.len());
        for &twist in &committed {
            self.record_commit(twist);
        }
        committed.len()
    }

    /// Removes and returns all commit events since the last call.
    pub fn take_events(&mut self) -> Vec<TwistCommitted> {
        std::mem::take(&mut self.events)
    }

    fn record_commit(&mut self, twist: Twist) {
        self.commit_count += 1;
        self.events.push(TwistCommitted {
            twist,
            count: self.commit_count,
        });
    }
}
