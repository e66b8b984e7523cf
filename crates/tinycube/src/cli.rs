use std::path::PathBuf;
use std::time::Duration;

use eyre::{Context, Result};
use itertools::Itertools;
use serde::Serialize;
use tinycube_core::{Twist, notation, scramble};
use tinycube_prefs::Preferences;
use tinycube_view::CubeSimulation;

/// Upper bound on simulated frames, so that a zero frame rate or a runaway
/// animation can't hang the program.
const MAX_FRAMES: usize = 10_000_000;

/// Animated 3x3x3 puzzle engine, run headless
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    /// Preferences file to layer on top of the defaults.
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,
    /// Simulated frames per second.
    #[arg(long, global = true, default_value_t = 60.0)]
    pub fps: f32,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug, PartialEq)]
pub(crate) enum Subcommand {
    /// Animate a sequence of twists, such as `R U R' U'`, and print the
    /// resulting state as YAML.
    Play {
        /// Twists to perform.
        #[arg(required = true, allow_hyphen_values = true)]
        twists: Vec<String>,
    },
    /// Animate a random shuffle and print the resulting state as YAML.
    Shuffle {
        /// Number of random twists.
        count: usize,
        /// Seed for a reproducible shuffle.
        #[arg(long)]
        seed: Option<u64>,
        /// Undo the shuffle afterwards, one twist at a time.
        #[arg(long)]
        undo: bool,
    },
    /// Print the solved state as YAML.
    State,
}

/// Summary of a simulation run.
#[derive(Serialize, Debug)]
struct Report {
    /// Twists that were committed, in order.
    twists: String,
    commit_count: u64,
    frames: usize,
    solved: bool,
    cubies: Vec<CubieReport>,
}

#[derive(Serialize, Debug)]
struct CubieReport {
    home: [i8; 3],
    position: [f32; 3],
    rotation: [f32; 4],
}

pub(crate) fn exec(args: Args) -> Result<()> {
    eyre::ensure!(
        args.fps.is_finite() && args.fps > 0.0,
        "frame rate must be positive; got {}",
        args.fps,
    );
    let prefs = match &args.prefs {
        Some(path) => Preferences::try_load(Some(path.as_path()))
            .wrap_err_with(|| format!("error loading preferences from {}", path.display()))?,
        None => Preferences::default(),
    };
    let mut sim = CubeSimulation::new(prefs);
    let frame = Duration::from_secs_f32(1.0 / args.fps);

    let mut committed = vec![];
    let mut frames = 0;
    match args.subcommand {
        Subcommand::Play { twists } => {
            let s = twists.iter().join(" ");
            let count = sim.enqueue_notation(&s)?;
            log::info!("Playing {count} twists");
            frames += run_until_idle(&mut sim, frame, &mut committed)?;
        }
        Subcommand::Shuffle { count, seed, undo } => {
            let twists = match seed {
                Some(seed) => sim.shuffle_seeded(count, seed),
                None => sim.shuffle(count),
            };
            log::info!("Shuffling: {}", notation::format_twists(&twists));
            frames += run_until_idle(&mut sim, frame, &mut committed)?;
            if undo {
                for twist in scramble::inverse_sequence(&twists) {
                    sim.enqueue_twist(twist.axis, twist.layer, twist.direction);
                }
                log::info!("Undoing shuffle");
                frames += run_until_idle(&mut sim, frame, &mut committed)?;
            }
        }
        Subcommand::State => (),
    }

    let report = Report {
        twists: notation::format_twists(&committed),
        commit_count: sim.commit_count(),
        frames,
        solved: sim.is_solved(),
        cubies: sim
            .render_data()
            .into_iter()
            .map(|cubie| CubieReport {
                home: cubie.grid_position.ints(),
                position: cubie.position,
                rotation: cubie.rotation,
            })
            .collect(),
    };
    println!("{}", serde_norway::to_string(&report)?);
    Ok(())
}

/// Steps the simulation at a fixed frame duration until no twists remain.
/// Returns the number of frames simulated.
fn run_until_idle(
    sim: &mut CubeSimulation,
    frame: Duration,
    committed: &mut Vec<Twist>,
) -> Result<usize> {
    let mut frames = 0;
    while sim.step(frame) {
        frames += 1;
        for event in sim.take_events() {
            log::debug!("Committed {} (#{})", event.twist, event.count);
            committed.push(event.twist);
        }
        eyre::ensure!(frames < MAX_FRAMES, "animation did not finish");
    }
    Ok(frames)
}
