//! Gravity-driven motion of a wheel along a track curve.

mod body;
mod config;
pub mod physics;

pub use body::{Body, BodyState, Kinematics};
pub use config::{
    ContactPolicy, SimulationConfig, BODY_RADIUS, GRAVITY, MIN_SPEED, RIM_SAMPLES, SPOKE_COUNT,
    START_PARAMETER,
};
