use std::collections::VecDeque;

use crate::Twist;

/// First-in-first-out queue of twists waiting to be animated.
///
/// The front of the queue is the twist currently animating (or about to
/// start). Twists are never reordered, combined, or skipped.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TwistQueue {
    twists: VecDeque<Twist>,
}
impl TwistQueue {
    /// Constructs an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a twist to the back of the queue.
    pub fn push(&mut self, twist: Twist) {
        self.twists.push_back(twist);
    }
    /// Returns the twist at the front of the queue.
    pub fn front(&self) -> Option<Twist> {
        self.twists.front().copied()
    }
    /// Removes the twist at the front of the queue. Only the animator calls
    /// this, at the moment a twist is committed.
    pub(crate) fn pop_front(&mut self) -> Option<Twist> {
        self.twists.pop_front()
    }
    /// Removes all twists.
    pub(crate) fn clear(&mut self) {
        self.twists.clear();
    }

    /// Returns the number of twists in the queue.
    pub fn len(&self) -> usize {
        self.twists.len()
    }
    /// Returns whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.twists.is_empty()
    }
    /// Returns an iterator over the queued twists, front first.
    pub fn iter(&self) -> impl Iterator<Item = Twist> {
        self.twists.iter().copied()
    }
}
impl Extend<Twist> for TwistQueue {
    fn extend<T: IntoIterator<Item = Twist>>(&mut self, iter: T) {
        self.twists.extend(iter);
    }
}
