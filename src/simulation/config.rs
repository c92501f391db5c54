use crate::error::{ConfigError, Result};
use crate::geometry::curve::POLYLINE_SAMPLES;

/// Gravitational acceleration in scene units per second squared.
pub const GRAVITY: f64 = 40.0;

/// Radius of the wheel in scene units.
pub const BODY_RADIUS: f64 = 2.0;

/// Curve parameter the body is placed at when started.
pub const START_PARAMETER: f64 = 0.01;

/// Speed floor applied when the energy balance yields (almost) nothing.
pub const MIN_SPEED: f64 = 0.1;

/// Number of points on the drawn wheel rim.
pub const RIM_SAMPLES: usize = 32;

/// Number of drawn wheel spokes.
pub const SPOKE_COUNT: usize = 4;

/// How the simulation decides whether the body is still on the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactPolicy {
    /// The body never leaves the track.
    #[default]
    AlwaysAttached,
    /// The body leaves the track once the normal force the track would have
    /// to exert becomes negative (the track would have to pull).
    NormalForce,
}

/// Parameters of the track simulation and its render-facing geometry.
///
/// Owned by the application and handed to [`Scene::new`](crate::scene::Scene::new)
/// or [`Body::new`](super::Body::new) once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Gravitational acceleration.
    pub gravity: f64,
    /// Wheel radius; also the offset of the wheel centre from the track.
    pub body_radius: f64,
    /// Initial curve parameter on start.
    pub start_parameter: f64,
    /// Lower bound for the energy-derived speed.
    pub min_speed: f64,
    /// Samples in the display polyline.
    pub polyline_samples: usize,
    /// Points on the wheel rim.
    pub rim_samples: usize,
    /// Number of spokes.
    pub spoke_count: usize,
    /// Track contact rule.
    pub contact: ContactPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            body_radius: BODY_RADIUS,
            start_parameter: START_PARAMETER,
            min_speed: MIN_SPEED,
            polyline_samples: POLYLINE_SAMPLES,
            rim_samples: RIM_SAMPLES,
            spoke_count: SPOKE_COUNT,
            contact: ContactPolicy::AlwaysAttached,
        }
    }
}

impl SimulationConfig {
    /// Returns the config with a different gravitational acceleration.
    #[must_use]
    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    /// Returns the config with a different wheel radius.
    #[must_use]
    pub fn with_body_radius(mut self, body_radius: f64) -> Self {
        self.body_radius = body_radius;
        self
    }

    /// Returns the config with a different start parameter.
    #[must_use]
    pub fn with_start_parameter(mut self, start_parameter: f64) -> Self {
        self.start_parameter = start_parameter;
        self
    }

    /// Returns the config with a different speed floor.
    #[must_use]
    pub fn with_min_speed(mut self, min_speed: f64) -> Self {
        self.min_speed = min_speed;
        self
    }

    /// Returns the config with a different contact policy.
    #[must_use]
    pub fn with_contact(mut self, contact: ContactPolicy) -> Self {
        self.contact = contact;
        self
    }

    /// Checks that every parameter is usable.
    ///
    /// # Errors
    ///
    /// Returns an error for non-finite values, non-positive gravity or
    /// radius, a negative start parameter or speed floor, or fewer than
    /// two polyline samples.
    pub fn validate(&self) -> Result<()> {
        positive("gravity", self.gravity)?;
        positive("body_radius", self.body_radius)?;
        non_negative("start_parameter", self.start_parameter)?;
        non_negative("min_speed", self.min_speed)?;
        if self.polyline_samples < 2 {
            #[allow(clippy::cast_precision_loss)]
            let value = self.polyline_samples as f64;
            return Err(ConfigError::InvalidParameter {
                name: "polyline_samples",
                value,
                reason: "need at least 2 samples",
            }
            .into());
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            value,
            reason: "must be positive and finite",
        }
        .into())
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            value,
            reason: "must be non-negative and finite",
        }
        .into())
    }
}
