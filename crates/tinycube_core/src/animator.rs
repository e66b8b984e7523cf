//! Animation logic.

use std::time::Duration;

use crate::{CubieId, CubieRegistry, Grip, SLICE_SIZE, TWIST_ANGLE, Twist, TwistQueue};

/// Tolerance on the swept angle when deciding whether a twist is finished, so
/// that float error doesn't add an extra frame.
const PROGRESS_EPSILON: f32 = 1e-4;

/// Higher number means faster exponential increase in twist speed.
const EXP_TWIST_FACTOR: f32 = 0.5;

/// How fast twists are animated.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TwistSpeed {
    /// Duration of one twist, in seconds.
    pub twist_duration: f32,
    /// Whether to twist exponentially faster when more twists are queued.
    pub dynamic: bool,
}
impl Default for TwistSpeed {
    fn default() -> Self {
        Self {
            twist_duration: 0.2,
            dynamic: false,
        }
    }
}
impl TwistSpeed {
    /// Returns the angular speed in radians per second, given the maximum
    /// length that the twist queue has reached since it was last empty.
    pub fn angular_speed(self, queue_max: usize) -> f32 {
        // Twist exponentially faster if there are/were more twists in the
        // queue.
        let speed_mod = match self.dynamic {
            true => (queue_max.saturating_sub(1) as f32 * EXP_TWIST_FACTOR).exp(),
            false => 1.0,
        };
        TWIST_ANGLE / self.twist_duration * speed_mod
    }
}

/// Twist in the middle of being animated.
#[derive(Debug, Clone, PartialEq)]
pub struct TwistAnimation {
    twist: Twist,
    /// Angle swept so far, from `0.0` to [`TWIST_ANGLE`].
    progress: f32,
    /// Cubies that were in the slice when the twist started. This must not be
    /// recomputed while the slice is moving.
    grip: Grip,
}
impl TwistAnimation {
    /// Returns the twist being animated.
    pub fn twist(&self) -> Twist {
        self.twist
    }
    /// Returns the unsigned angle swept so far, in radians.
    pub fn progress(&self) -> f32 {
        self.progress
    }
    /// Returns the progress as a fraction of the whole twist, from `0.0` to
    /// `1.0`.
    pub fn fraction(&self) -> f32 {
        self.progress / TWIST_ANGLE
    }
    /// Returns the cubies being rotated.
    pub fn grip(&self) -> &[CubieId] {
        &self.grip
    }
    /// Returns whether a cubie is being rotated.
    pub fn is_gripped(&self, cubie: CubieId) -> bool {
        self.grip.contains(&cubie)
    }
}

/// State of the rotation animator.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum AnimationState {
    /// No twist is animating.
    #[default]
    Idle,
    /// The twist at the front of the queue is animating.
    Animating(TwistAnimation),
}

/// State machine that animates the twist at the front of a [`TwistQueue`] and
/// commits it to a [`CubieRegistry`] once it finishes.
///
/// At most one twist animates at a time. A twist that has started always runs
/// to completion unless the animator is reset.
#[derive(Debug, Default, Clone)]
pub struct RotationAnimator {
    state: AnimationState,
    /// Maximum number of twists in the queue (reset when queue is empty).
    queue_max: usize,
}
impl RotationAnimator {
    /// Constructs an idle animator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    pub fn state(&self) -> &AnimationState {
        &self.state
    }
    /// Returns the twist currently animating, if any.
    pub fn current(&self) -> Option<&TwistAnimation> {
        match &self.state {
            AnimationState::Idle => None,
            AnimationState::Animating(anim) => Some(anim),
        }
    }
    /// Returns whether no twist is animating.
    pub fn is_idle(&self) -> bool {
        matches!(self.state, AnimationState::Idle)
    }

    /// Abandons any twist in progress without committing it.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Steps the animation forward by `delta`. Returns the twist that was
    /// committed during this step, if any.
    ///
    /// When a twist is committed, the next queued twist (if any) starts
    /// immediately so that queued twists animate back-to-back.
    pub fn proceed(
        &mut self,
        delta: Duration,
        speed: TwistSpeed,
        registry: &mut CubieRegistry,
        queue: &mut TwistQueue,
    ) -> Option<Twist> {
        if queue.is_empty() {
            if !self.is_idle() {
                debug_panic!("twist animating with empty queue");
                self.state = AnimationState::Idle;
            }
            self.queue_max = 0;
            return None;
        }

        // Update queue_max.
        self.queue_max = std::cmp::max(self.queue_max, queue.len());

        self.begin_next(registry, queue);
        let AnimationState::Animating(anim) = &mut self.state else {
            return None;
        };

        let delta_angle = delta.as_secs_f32() * speed.angular_speed(self.queue_max);
        // Handle the case where something went wrong with the calculation
        // (e.g., division by zero).
        if delta_angle.is_finite() && delta_angle >= 0.0 {
            anim.progress = (anim.progress + delta_angle).clamp(0.0, TWIST_ANGLE);
        } else {
            anim.progress = TWIST_ANGLE; // Instantly complete the twist.
        }

        if anim.progress < TWIST_ANGLE - PROGRESS_EPSILON {
            return None;
        }

        let AnimationState::Animating(anim) = std::mem::take(&mut self.state) else {
            return None;
        };
        let committed = Self::commit(anim, registry, queue);
        if queue.is_empty() {
            self.queue_max = 0;
        }
        self.begin_next(registry, queue);
        Some(committed)
    }

    /// Immediately commits the twist in progress and every queued twist, in
    /// order. Returns the committed twists.
    pub fn catch_up(&mut self, registry: &mut CubieRegistry, queue: &mut TwistQueue) -> Vec<Twist> {
        let mut committed = Vec::with_capacity(queue.len());
        loop {
            self.begin_next(registry, queue);
            match std::mem::take(&mut self.state) {
                AnimationState::Idle => break,
                AnimationState::Animating(anim) => {
                    committed.push(Self::commit(anim, registry, queue));
                }
            }
        }
        self.queue_max = 0;
        committed
    }

    /// Starts animating the twist at the front of the queue, if the animator
    /// is idle.
    fn begin_next(&mut self, registry: &CubieRegistry, queue: &TwistQueue) {
        if !self.is_idle() {
            return;
        }
        let Some(twist) = queue.front() else {
            return;
        };

        // Snapshot the slice once. Cubies rotate away from the slice while
        // animating, so membership must not be recomputed.
        let grip = registry.cubies_in_slice(twist.axis, twist.layer);
        assert!(
            !grip.is_empty() && grip.len() % SLICE_SIZE == 0,
            "slice for twist {twist} has {} cubies",
            grip.len(),
        );

        log::trace!("Starting twist {twist}");
        self.state = AnimationState::Animating(TwistAnimation {
            twist,
            progress: 0.0,
            grip,
        });
    }

    /// Writes a finished twist into the registry and removes it from the
    /// queue.
    fn commit(anim: TwistAnimation, registry: &mut CubieRegistry, queue: &mut TwistQueue) -> Twist {
        let TwistAnimation { twist, grip, .. } = anim;

        registry.apply_discrete_rotation(&grip, twist.axis, twist.direction);
        let popped = queue.pop_front();
        assert_eq!(
            popped,
            Some(twist),
            "twist queue changed while a twist was animating",
        );
        if let Err(e) = registry.check_lattice() {
            panic!("cubie registry corrupted by twist {twist}: {e}");
        }

        log::trace!("Committed twist {twist}");
        twist
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Axis, Layer, Sign, TwistFamily};

    const FRAME: Duration = Duration::from_millis(10);

    fn speed() -> TwistSpeed {
        TwistSpeed {
            twist_duration: 0.2,
            dynamic: false,
        }
    }

    #[test]
    fn test_idle_with_empty_queue() {
        let mut registry = CubieRegistry::new();
        let mut queue = TwistQueue::new();
        let mut animator = RotationAnimator::new();
        assert_eq!(None, animator.proceed(FRAME, speed(), &mut registry, &mut queue));
        assert!(animator.is_idle());
    }

    #[test]
    fn test_single_twist_sweep() {
        let mut registry = CubieRegistry::new();
        let mut queue = TwistQueue::new();
        let mut animator = RotationAnimator::new();
        let twist = TwistFamily::U.twist();
        queue.push(twist);

        // 0.2 seconds per twist at 10ms per frame is 20 frames.
        for i in 1..20 {
            assert_eq!(None, animator.proceed(FRAME, speed(), &mut registry, &mut queue));
            let anim = animator.current().expect("twist should be animating");
            assert_eq!(twist, anim.twist());
            assert!((anim.fraction() - i as f32 / 20.0).abs() < 1e-4);
            // Nothing is committed until the sweep finishes.
            assert_eq!(CubieRegistry::new(), registry);
            assert_eq!(1, queue.len());
        }
        assert_eq!(
            Some(twist),
            animator.proceed(FRAME * 2, speed(), &mut registry, &mut queue),
        );
        assert!(animator.is_idle());
        assert!(queue.is_empty());
        assert_ne!(CubieRegistry::new(), registry);
    }

    #[test]
    fn test_grip_is_frozen_during_sweep() {
        let mut registry = CubieRegistry::new();
        let mut queue = TwistQueue::new();
        let mut animator = RotationAnimator::new();
        queue.push(Twist::new(Axis::X, Layer::Pos, Sign::Pos));

        animator.proceed(FRAME, speed(), &mut registry, &mut queue);
        let initial_grip = animator.current().unwrap().grip().to_vec();
        assert_eq!(SLICE_SIZE, initial_grip.len());
        for _ in 0..10 {
            animator.proceed(FRAME, speed(), &mut registry, &mut queue);
            assert_eq!(initial_grip, animator.current().unwrap().grip());
        }
    }

    #[test]
    fn test_next_twist_starts_immediately_with_fresh_grip() {
        let mut registry = CubieRegistry::new();
        let mut queue = TwistQueue::new();
        let mut animator = RotationAnimator::new();
        let r = TwistFamily::R.twist();
        let u = TwistFamily::U.twist();
        queue.extend([r, u]);

        let mut committed = None;
        while committed.is_none() {
            committed = animator.proceed(FRAME, speed(), &mut registry, &mut queue);
        }
        assert_eq!(Some(r), committed);

        // U started on the same tick that R was committed, and its grip was
        // computed from the state after R.
        let anim = animator.current().expect("U should already be animating");
        assert_eq!(u, anim.twist());
        assert_eq!(0.0, anim.progress());
        let mut expected_grip = registry.cubies_in_slice(Axis::Y, Layer::Pos).to_vec();
        let mut actual_grip = anim.grip().to_vec();
        expected_grip.sort();
        actual_grip.sort();
        assert_eq!(expected_grip, actual_grip);
        let mut stale_grip = CubieRegistry::new().cubies_in_slice(Axis::Y, Layer::Pos).to_vec();
        stale_grip.sort();
        assert_ne!(stale_grip, actual_grip);
    }

    #[test]
    fn test_slow_frame_shows_partial_sweep() {
        let mut registry = CubieRegistry::new();
        let mut queue = TwistQueue::new();
        let mut animator = RotationAnimator::new();
        queue.push(TwistFamily::U.twist());

        // 100ms is half of a 0.2 second twist.
        let step = Duration::from_millis(100);
        assert_eq!(None, animator.proceed(step, speed(), &mut registry, &mut queue));
        let anim = animator.current().expect("twist should be animating");
        assert!((anim.fraction() - 0.5).abs() < 1e-4);
        assert_eq!(CubieRegistry::new(), registry);

        assert_eq!(
            Some(TwistFamily::U.twist()),
            animator.proceed(step, speed(), &mut registry, &mut queue),
        );
    }

    #[test]
    fn test_large_delta_is_clamped() {
        let mut registry = CubieRegistry::new();
        let mut queue = TwistQueue::new();
        let mut animator = RotationAnimator::new();
        queue.extend([TwistFamily::F.twist(), TwistFamily::F.twist()]);
        let commit = animator.proceed(Duration::from_secs(5), speed(), &mut registry, &mut queue);
        assert_eq!(Some(TwistFamily::F.twist()), commit);
        // Only one twist is committed per step, and the next one starts from
        // the beginning.
        assert_eq!(1, queue.len());
        assert_eq!(0.0, animator.current().unwrap().progress());

        // Zero duration completes instantly instead of dividing by zero.
        let instant = TwistSpeed {
            twist_duration: 0.0,
            dynamic: false,
        };
        let commit = animator.proceed(FRAME, instant, &mut registry, &mut queue);
        assert_eq!(Some(TwistFamily::F.twist()), commit);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_dynamic_speed() {
        let fixed = speed();
        let dynamic = TwistSpeed {
            dynamic: true,
            ..fixed
        };
        assert_eq!(fixed.angular_speed(1), dynamic.angular_speed(1));
        assert_eq!(fixed.angular_speed(10), fixed.angular_speed(1));
        assert!(dynamic.angular_speed(10) > dynamic.angular_speed(2));
    }

    #[test]
    fn test_dynamic_speed_resets_after_drain() {
        let mut registry = CubieRegistry::new();
        let mut queue = TwistQueue::new();
        let mut animator = RotationAnimator::new();
        let dynamic = TwistSpeed {
            dynamic: true,
            ..speed()
        };
        queue.extend(std::iter::repeat_n(TwistFamily::R.twist(), 20));
        while !queue.is_empty() {
            animator.proceed(FRAME, dynamic, &mut registry, &mut queue);
        }
        assert!(animator.is_idle());

        // A lone twist afterwards runs at the normal speed.
        queue.push(TwistFamily::U.twist());
        assert_eq!(None, animator.proceed(FRAME, dynamic, &mut registry, &mut queue));
        let anim = animator.current().expect("twist should be animating");
        assert!((anim.fraction() - 0.05).abs() < 1e-4);
    }

    #[test]
    fn test_catch_up() {
        let mut registry = CubieRegistry::new();
        let mut queue = TwistQueue::new();
        let mut animator = RotationAnimator::new();
        let twists = [
            TwistFamily::R.twist(),
            TwistFamily::U.twist(),
            TwistFamily::M.twist(),
        ];
        queue.extend(twists);
        animator.proceed(FRAME, speed(), &mut registry, &mut queue);
        assert!(!animator.is_idle());

        assert_eq!(twists.to_vec(), animator.catch_up(&mut registry, &mut queue));
        assert!(animator.is_idle());
        assert!(queue.is_empty());
        registry.check_lattice().unwrap();
    }

    #[test]
    fn test_reset_abandons_twist() {
        let mut registry = CubieRegistry::new();
        let mut queue = TwistQueue::new();
        let mut animator = RotationAnimator::new();
        queue.push(TwistFamily::B.twist());
        animator.proceed(FRAME, speed(), &mut registry, &mut queue);
        animator.reset();
        assert_eq!(&AnimationState::Idle, animator.state());
        assert_eq!(CubieRegistry::new(), registry);
    }
}
