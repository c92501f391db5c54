//! Scalar physics helpers used by [`Body::step`](super::Body::step).

use crate::math::{Vector2, EPSILON};

use super::ContactPolicy;

/// Speed from energy conservation relative to the start height.
///
/// `v = sqrt(2 g (h0 - h))`, with a negative kinetic energy (the body sits
/// above its start height) treated as rest.
#[must_use]
pub fn energy_speed(gravity: f64, start_height: f64, height: f64) -> f64 {
    (2.0 * gravity * (start_height - height)).max(0.0).sqrt()
}

/// Signed curvature term `(r'' . N) / |r'|^2`.
///
/// Positive when the path bends toward `normal`. The derivative magnitude
/// is clamped to [`EPSILON`] so a stalled parameterization stays finite.
#[must_use]
pub fn curvature(first: &Vector2, second: &Vector2, normal: &Vector2) -> f64 {
    let speed = first.norm().max(EPSILON);
    second.dot(normal) / (speed * speed)
}

/// Combined gravity and centripetal term `K = g N + v^2 kappa N`.
#[must_use]
pub fn contact_term(gravity: f64, speed: f64, curvature: f64, normal: &Vector2) -> Vector2 {
    normal * (gravity + speed * speed * curvature)
}

/// Normal force per unit mass the track has to exert on a body riding on
/// the `normal` side of it.
///
/// Negative means the track would have to pull, i.e. the body lifts off.
#[must_use]
pub fn normal_force(gravity: f64, speed: f64, curvature: f64, normal: &Vector2) -> f64 {
    speed * speed * curvature + gravity * normal.y
}

/// Second-order update of a rotation angle.
#[must_use]
pub fn integrate_rotation(angle: f64, angular_velocity: f64, angular_acceleration: f64, dt: f64) -> f64 {
    angle + angular_velocity * dt + 0.5 * angular_acceleration * dt * dt
}

impl ContactPolicy {
    /// Returns whether a body with the given state stays on the track.
    #[must_use]
    pub fn keeps_contact(self, gravity: f64, speed: f64, curvature: f64, normal: &Vector2) -> bool {
        match self {
            Self::AlwaysAttached => true,
            Self::NormalForce => normal_force(gravity, speed, curvature, normal) >= 0.0,
        }
    }
}
