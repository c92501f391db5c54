//! Track curves and a gravity-driven wheel riding them.
//!
//! - **geometry**: Catmull-Rom track curve and the `Curve` trait
//! - **simulation**: the body state machine and its physics
//! - **tessellation**: wheel rim and spoke geometry
//! - **render**: primitives handed to the host renderer, viewport mapping
//! - **scene**: event-driven host-side driver

pub mod error;
pub mod geometry;
pub mod math;
pub mod render;
pub mod scene;
pub mod simulation;
pub mod tessellation;

pub use error::{CableCarError, Result};
pub use geometry::{CatmullRomCurve, Curve};
pub use scene::{InputEvent, Scene};
pub use simulation::{Body, BodyState, SimulationConfig};
