//! Simulation and camera controller for tinycube, shared by every frontend.

mod camera;
mod render;
mod simulation;

pub use camera::OrbitCamera;
pub use render::{CubieRenderData, render_data};
pub use simulation::CubeSimulation;
