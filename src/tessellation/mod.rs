//! Render-facing geometry of the wheel.
//!
//! Pure functions of centre, rotation, radius and sample count; nothing
//! here holds state.

mod wheel;

pub use wheel::{rim_points, spoke_endpoints};
