//! Puzzle simulation shared by every frontend.

use tinycube_core::{
    Axis, CubeEngine, Layer, ParseTwistError, Sign, Twist, TwistCommitted, notation,
};
use tinycube_prefs::Preferences;
use web_time::{Duration, Instant};

use crate::{CubieRenderData, OrbitCamera, render};

const ASSUMED_FPS: f32 = 120.0;

/// Puzzle simulation, which manages the puzzle state, twist animation, and
/// camera.
#[derive(Debug, Clone)]
pub struct CubeSimulation {
    /// Puzzle state and pending twists.
    engine: CubeEngine,
    /// Orbit camera.
    camera: OrbitCamera,
    /// Preferences used for animation and rendering.
    prefs: Preferences,

    /// Time of last frame, or `None` if we are not in the middle of an
    /// animation.
    last_frame_time: Option<Instant>,
}
impl Default for CubeSimulation {
    fn default() -> Self {
        Self::new(Preferences::default())
    }
}
impl CubeSimulation {
    /// Constructs a new simulation with a solved puzzle.
    pub fn new(prefs: Preferences) -> Self {
        Self {
            engine: CubeEngine::new(),
            camera: OrbitCamera::new(&prefs.view),
            prefs,

            last_frame_time: None,
        }
    }

    /// Returns the puzzle state and pending twists.
    pub fn engine(&self) -> &CubeEngine {
        &self.engine
    }
    /// Returns the preferences.
    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }
    /// Replaces the preferences. The camera keeps its current position
    /// unless it is outside the new limits.
    pub fn set_prefs(&mut self, prefs: Preferences) {
        self.camera.set_prefs(&prefs.view);
        self.prefs = prefs;
    }
    /// Returns the camera.
    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }
    /// Returns the camera mutably.
    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    /// Queues a twist.
    pub fn enqueue_twist(&mut self, axis: Axis, layer: Layer, direction: Sign) {
        self.engine.enqueue(Twist::new(axis, layer, direction));
    }
    /// Parses twists and queues them. Nothing is queued if parsing fails.
    /// Returns the number of quarter twists queued.
    pub fn enqueue_notation(&mut self, s: &str) -> Result<usize, ParseTwistError> {
        let twists = notation::parse_twists(s)?;
        let count = twists.len();
        self.engine.enqueue_all(twists);
        Ok(count)
    }
    /// Queues `count` random twists using an unpredictable seed. Returns the
    /// queued twists.
    pub fn shuffle(&mut self, count: usize) -> Vec<Twist> {
        self.engine.shuffle(count, None)
    }
    /// Queues `count` random twists using a fixed seed. Returns the queued
    /// twists.
    pub fn shuffle_seeded(&mut self, count: usize, seed: u64) -> Vec<Twist> {
        self.engine.shuffle(count, Some(seed))
    }
    /// Resets the puzzle to solved, abandoning all pending twists. The camera
    /// is not reset.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.last_frame_time = None;
    }
    /// Finishes all pending twists immediately. Returns the number of twists
    /// committed.
    pub fn catch_up(&mut self) -> usize {
        self.last_frame_time = None;
        self.engine.catch_up()
    }

    /// Steps the animation forward by `delta`. Returns whether the puzzle
    /// needs to be redrawn.
    pub fn step(&mut self, delta: Duration) -> bool {
        if !self.engine.is_animating() {
            return false;
        }
        let speed = self.prefs.animation.twist_speed();
        if let Some(twist) = self.engine.step(delta, speed) {
            log::trace!("Twist {twist} finished (queue: {})", self.queue_len());
        }
        true
    }

    /// Steps the animation forward by the time since the last frame. Returns
    /// whether the puzzle needs to be redrawn.
    pub fn step_realtime(&mut self) -> bool {
        let now = Instant::now();
        let delta = match self.last_frame_time {
            Some(then) => now - then,
            None => Duration::from_secs_f32(1.0 / ASSUMED_FPS),
        };

        let needs_redraw = self.step(delta);

        if needs_redraw && self.engine.is_animating() {
            self.last_frame_time = Some(now);
        } else {
            self.last_frame_time = None;
        }

        needs_redraw
    }

    /// Returns the visual state of every cubie for the current frame.
    pub fn render_data(&self) -> Vec<CubieRenderData> {
        render::render_data(
            &self.engine,
            self.prefs.animation.twist_interpolation,
            &self.prefs.colors,
        )
    }

    /// Returns whether a twist is animating or queued.
    pub fn is_animating(&self) -> bool {
        self.engine.is_animating()
    }
    /// Returns the number of pending twists, including the one animating.
    pub fn queue_len(&self) -> usize {
        self.engine.queue().len()
    }
    /// Returns the number of twists committed since the last reset.
    pub fn commit_count(&self) -> u64 {
        self.engine.commit_count()
    }
    /// Removes and returns all commit events since the last call.
    pub fn take_events(&mut self) -> Vec<TwistCommitted> {
        self.engine.take_events()
    }
    /// Returns whether the puzzle is solved.
    pub fn is_solved(&self) -> bool {
        self.engine.is_solved()
    }
}
