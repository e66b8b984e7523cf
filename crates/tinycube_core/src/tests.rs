use std::time::Duration;

use cgmath::Vector3;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::*;

const FRAME: Duration = Duration::from_micros(16_667);

impl Arbitrary for Twist {
    type Parameters = ();

    fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
        let axis = prop_oneof![Just(Axis::X), Just(Axis::Y), Just(Axis::Z)];
        let layer = prop_oneof![Just(Layer::Neg), Just(Layer::Mid), Just(Layer::Pos)];
        let direction = prop_oneof![Just(Sign::Pos), Just(Sign::Neg)];
        (axis, layer, direction)
            .prop_map(|(axis, layer, direction)| Twist::new(axis, layer, direction))
            .boxed()
    }

    type Strategy = BoxedStrategy<Self>;
}

/// Steps the engine at 60 FPS until the queue is empty, returning the number
/// of frames taken.
fn run_until_idle(engine: &mut CubeEngine) -> usize {
    let mut frames = 0;
    while engine.is_animating() {
        engine.step(FRAME, TwistSpeed::default());
        frames += 1;
        assert!(frames < 100_000, "animation never finished");
    }
    frames
}

fn assert_at_home(registry: &CubieRegistry) {
    for (id, cubie) in registry.iter() {
        assert_eq!(cubie.grid_position().to_vector(), cubie.position(), "{id}");
        assert!(cubie.orientation().is_ident(), "{id}");
    }
}

#[test]
fn test_u_twist_example() {
    let mut engine = CubeEngine::new();
    engine.enqueue(Twist::new(Axis::Y, Layer::Pos, Sign::Neg));
    run_until_idle(&mut engine);

    let registry = engine.registry();
    registry.check_lattice().unwrap();
    let id = registry
        .iter()
        .find(|(_, cubie)| cubie.grid_position() == GridPos::from_ints(1, 1, 0).unwrap())
        .map(|(id, _)| id)
        .unwrap();
    assert_eq!(Vector3::new(0.0, 1.0, 1.0), registry[id].position());

    for (_, cubie) in registry.iter() {
        let home = cubie.grid_position();
        if home[Axis::Y] != Layer::Pos {
            assert_eq!(home.to_vector(), cubie.position());
            assert!(cubie.orientation().is_ident());
        } else if home[Axis::Z] == Layer::Pos {
            // Front stickers of the top layer now face left.
            assert_eq!(Face::L, cubie.facing(Face::F));
        }
    }
}

#[test]
fn test_queue_draining() {
    let mut engine = CubeEngine::new();
    let twists = notation::parse_twists("R U R' U' F2 M E S").unwrap();
    let n = twists.len();
    engine.enqueue_all(twists.iter().copied());
    assert_eq!(n, engine.queue().len());

    let frames = run_until_idle(&mut engine);
    // Twists run back-to-back with no idle frame in between.
    let frames_per_twist = (TwistSpeed::default().twist_duration / FRAME.as_secs_f32()).ceil();
    assert!(frames <= n * (frames_per_twist as usize + 1));

    assert!(engine.queue().is_empty());
    assert!(engine.current().is_none());
    assert_eq!(n as u64, engine.commit_count());
    let events = engine.take_events();
    assert_eq!(twists, events.iter().map(|e| e.twist).collect::<Vec<_>>());
    assert_eq!(n as u64, events.last().unwrap().count);
}

#[test]
fn test_queued_twists_commit_back_to_back() {
    let mut engine = CubeEngine::new();
    engine.enqueue_all([TwistFamily::R.twist(), TwistFamily::U.twist()]);
    let frame = Duration::from_millis(10);

    // 0.2 seconds per twist at 10ms per frame is 20 frames per twist.
    let mut commit_frames = vec![];
    for i in 1..=40 {
        if engine.step(frame, TwistSpeed::default()).is_some() {
            commit_frames.push(i);
        }
        if i == 21 {
            let anim = engine.current().expect("U should be animating");
            assert_eq!(TwistFamily::U.twist(), anim.twist());
            assert!(anim.progress() > 0.0);
        }
    }
    assert_eq!(vec![20, 40], commit_frames);
    assert!(!engine.is_animating());
}

#[test]
fn test_shuffle_then_undo() {
    let mut engine = CubeEngine::new();
    let twists = engine.shuffle(20, Some(2024));
    assert_eq!(20, twists.len());
    run_until_idle(&mut engine);
    engine.registry().check_lattice().unwrap();

    engine.enqueue_all(scramble::inverse_sequence(&twists));
    run_until_idle(&mut engine);
    assert_at_home(engine.registry());
    assert!(engine.is_solved());
    assert_eq!(40, engine.commit_count());
}

#[test]
fn test_whole_puzzle_rotation_is_solved() {
    let mut engine = CubeEngine::new();
    // R M' L' turns the whole puzzle around X.
    engine.enqueue_all(notation::parse_twists("R M' L'").unwrap());
    engine.catch_up();
    assert!(engine.is_solved());
    assert!(engine.registry().iter().all(|(_, c)| !c.orientation().is_ident()));

    engine.enqueue(TwistFamily::U.twist());
    engine.catch_up();
    assert!(!engine.is_solved());
}

#[test]
fn test_reset_during_shuffle() {
    let mut engine = CubeEngine::new();
    engine.shuffle(15, None);
    for _ in 0..30 {
        engine.step(FRAME, TwistSpeed::default());
    }
    engine.reset();
    assert!(engine.current().is_none());
    assert!(!engine.is_animating());
    assert_at_home(engine.registry());

    // The engine is usable again after a reset.
    engine.enqueue(TwistFamily::F.twist());
    run_until_idle(&mut engine);
    assert_eq!(1, engine.commit_count());
}

proptest! {
    #[test]
    fn proptest_lattice_invariant(twists: Vec<Twist>) {
        let mut engine = CubeEngine::new();
        engine.enqueue_all(twists);
        while engine.is_animating() {
            engine.step(Duration::from_millis(50), TwistSpeed::default());
            // Committed state is always on the lattice, even mid-sweep.
            engine.registry().check_lattice().unwrap();
            for axis in Axis::iter() {
                for layer in Layer::iter() {
                    prop_assert_eq!(
                        SLICE_SIZE,
                        engine.registry().cubies_in_slice(axis, layer).len(),
                    );
                }
            }
        }
    }

    #[test]
    fn proptest_twist_then_inverse(twists: Vec<Twist>) {
        let mut engine = CubeEngine::new();
        engine.enqueue_all(twists.iter().copied());
        engine.enqueue_all(scramble::inverse_sequence(&twists));
        engine.catch_up();
        assert_at_home(engine.registry());
    }

    #[test]
    fn proptest_four_fold_closure(prefix: Vec<Twist>, twist: Twist) {
        let mut engine = CubeEngine::new();
        engine.enqueue_all(prefix);
        engine.catch_up();
        let before = engine.registry().clone();

        engine.enqueue_all([twist; 4]);
        engine.catch_up();
        prop_assert_eq!(&before, engine.registry());
    }

    #[test]
    fn proptest_animation_matches_catch_up(twists in any::<Vec<Twist>>(), frame_ms in 1_u64..100) {
        let mut animated = CubeEngine::new();
        animated.enqueue_all(twists.iter().copied());
        while animated.is_animating() {
            animated.step(Duration::from_millis(frame_ms), TwistSpeed::default());
        }

        let mut instant = CubeEngine::new();
        instant.enqueue_all(twists);
        instant.catch_up();

        prop_assert_eq!(instant.registry(), animated.registry());
        prop_assert_eq!(instant.commit_count(), animated.commit_count());
    }
}
