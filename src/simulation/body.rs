use tracing::{debug, info, trace, warn};

use crate::geometry::Curve;
use crate::math::{perp, try_normalize, Point2, Vector2, EPSILON};
use crate::scene::TrackId;
use crate::tessellation;

use super::{physics, SimulationConfig};

/// Lifecycle of a [`Body`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyState {
    /// Placed on a track but not started.
    #[default]
    Idle,
    /// Riding the track; advanced on every step.
    Moving,
    /// Lost contact with the track. Terminal: the body is frozen.
    Detached,
}

/// Snapshot of a body's kinematic state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    /// Position along the curve, in curve-parameter units.
    pub parameter: f64,
    /// Scalar speed along the track.
    pub speed: f64,
    /// Unit tangent of the track at `parameter`.
    pub tangent: Vector2,
    /// Unit normal, the tangent rotated by +90°.
    pub normal: Vector2,
    /// Wheel centre, offset from the track along `normal` by the body radius.
    pub center: Point2,
    /// Accumulated rotation angle in radians.
    pub rotation: f64,
    pub angular_velocity: f64,
    pub angular_acceleration: f64,
}

impl Kinematics {
    fn at_rest() -> Self {
        Self {
            parameter: 0.0,
            speed: 0.0,
            tangent: Vector2::x(),
            normal: Vector2::y(),
            center: Point2::origin(),
            rotation: 0.0,
            angular_velocity: 0.0,
            angular_acceleration: 0.0,
        }
    }
}

/// A wheel rolling along a track curve under gravity.
///
/// The body is bound to one track by its [`TrackId`] and never owns the
/// curve; callers pass the curve to [`Body::start`] and [`Body::step`].
///
/// Speed is not integrated: every step recomputes it from the height lost
/// since the start of the track, `v = sqrt(2 g (y_start - y))`, floored at
/// [`SimulationConfig::min_speed`] so a body resting on a hump still creeps
/// forward.
#[derive(Debug, Clone)]
pub struct Body {
    track: TrackId,
    config: SimulationConfig,
    state: BodyState,
    kinematics: Kinematics,
    start_height: f64,
    curvature: f64,
    contact_term: Vector2,
}

impl Body {
    /// Creates an idle body bound to `track`.
    #[must_use]
    pub fn new(track: TrackId, config: SimulationConfig) -> Self {
        Self {
            track,
            config,
            state: BodyState::Idle,
            kinematics: Kinematics::at_rest(),
            start_height: 0.0,
            curvature: 0.0,
            contact_term: Vector2::zeros(),
        }
    }

    /// Places the body at the start of `curve` and sets it moving.
    ///
    /// Does nothing unless the body is idle and the curve has at least two
    /// control points. Returns whether the body was started.
    pub fn start<C: Curve + ?Sized>(&mut self, curve: &C) -> bool {
        if self.state != BodyState::Idle {
            debug!(state = ?self.state, "start ignored, body already started");
            return false;
        }
        let domain = match curve.domain() {
            Ok(domain) => domain,
            Err(err) => {
                debug!(%err, "start ignored");
                return false;
            }
        };

        let tau = domain.t_min + self.config.start_parameter;
        let tangent = curve.unit_tangent(tau).unwrap_or_else(|_| {
            warn!(tau, "degenerate tangent at start, assuming +x");
            Vector2::x()
        });
        let normal = perp(&tangent);

        self.kinematics = Kinematics {
            parameter: tau,
            tangent,
            normal,
            center: curve.evaluate(tau) + normal * self.config.body_radius,
            ..Kinematics::at_rest()
        };
        self.start_height = curve.evaluate(domain.t_min).y;
        self.curvature = 0.0;
        self.contact_term = Vector2::zeros();
        self.state = BodyState::Moving;

        debug!(tau, start_height = self.start_height, "body started");
        true
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// Only moving bodies advance. `dt` is used as given; large steps make
    /// large parameter jumps. Once the parameter passes the end of the curve
    /// the body stays parked on the last control point.
    pub fn step<C: Curve + ?Sized>(&mut self, curve: &C, dt: f64) {
        if self.state != BodyState::Moving {
            return;
        }
        if !dt.is_finite() || dt < 0.0 {
            warn!(dt, "ignoring invalid time step");
            return;
        }
        let Ok(domain) = curve.domain() else {
            return;
        };
        let k = self.kinematics;
        if k.parameter >= domain.t_max {
            return;
        }

        let gravity = self.config.gravity;
        let first = curve.first_derivative(k.parameter);
        let second = curve.second_derivative(k.parameter);
        let curvature = physics::curvature(&first, &second, &k.normal);
        let height = curve.evaluate(k.parameter).y;
        let speed =
            physics::energy_speed(gravity, self.start_height, height).max(self.config.min_speed);

        self.curvature = curvature;
        self.contact_term = physics::contact_term(gravity, speed, curvature, &k.normal);
        if !self
            .config
            .contact
            .keeps_contact(gravity, speed, curvature, &k.normal)
        {
            info!(tau = k.parameter, speed, curvature, "body left the track");
            self.kinematics.speed = speed;
            self.state = BodyState::Detached;
            return;
        }

        let tau = k.parameter + speed * dt / first.norm().max(EPSILON);

        let first = curve.first_derivative(tau);
        let second = curve.second_derivative(tau);
        let (tangent, normal) = if let Some(tangent) = try_normalize(&first) {
            (tangent, perp(&tangent))
        } else {
            warn!(tau, "degenerate tangent, keeping previous frame");
            (k.tangent, k.normal)
        };
        let rate = first.norm().max(EPSILON);
        let angular_velocity = speed / rate;
        let angular_acceleration = second.norm() / rate;

        self.kinematics = Kinematics {
            parameter: tau,
            speed,
            tangent,
            normal,
            center: curve.evaluate(tau) + normal * self.config.body_radius,
            rotation: physics::integrate_rotation(
                k.rotation,
                angular_velocity,
                angular_acceleration,
                dt,
            ),
            angular_velocity,
            angular_acceleration,
        };
        trace!(tau, speed, rotation = self.kinematics.rotation, "body stepped");
    }

    /// Returns `count` evenly spaced points on the wheel rim.
    #[must_use]
    pub fn rim_points(&self, count: usize) -> Vec<Point2> {
        tessellation::rim_points(
            &self.kinematics.center,
            self.kinematics.rotation,
            self.config.body_radius,
            count,
        )
    }

    /// Returns `count` spokes as `(centre, rim)` pairs.
    #[must_use]
    pub fn spoke_endpoints(&self, count: usize) -> Vec<(Point2, Point2)> {
        tessellation::spoke_endpoints(
            &self.kinematics.center,
            self.kinematics.rotation,
            self.config.body_radius,
            count,
        )
    }

    /// Returns the track this body rides on.
    #[must_use]
    pub fn track(&self) -> TrackId {
        self.track
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> BodyState {
        self.state
    }

    /// Returns a copy of the full kinematic state.
    #[must_use]
    pub fn kinematics(&self) -> Kinematics {
        self.kinematics
    }

    #[must_use]
    pub fn parameter(&self) -> f64 {
        self.kinematics.parameter
    }

    #[must_use]
    pub fn speed(&self) -> f64 {
        self.kinematics.speed
    }

    #[must_use]
    pub fn tangent(&self) -> Vector2 {
        self.kinematics.tangent
    }

    #[must_use]
    pub fn normal(&self) -> Vector2 {
        self.kinematics.normal
    }

    #[must_use]
    pub fn center(&self) -> Point2 {
        self.kinematics.center
    }

    /// Accumulated rotation angle in radians.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.kinematics.rotation
    }

    #[must_use]
    pub fn angular_velocity(&self) -> f64 {
        self.kinematics.angular_velocity
    }

    #[must_use]
    pub fn angular_acceleration(&self) -> f64 {
        self.kinematics.angular_acceleration
    }

    /// Curvature term from the last step.
    #[must_use]
    pub fn curvature(&self) -> f64 {
        self.curvature
    }

    /// Gravity plus centripetal term `K` from the last step.
    #[must_use]
    pub fn contact_term(&self) -> Vector2 {
        self.contact_term
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{CatmullRomCurve, Line};
    use crate::simulation::ContactPolicy;
    use approx::assert_relative_eq;

    fn body() -> Body {
        Body::new(TrackId::default(), SimulationConfig::default())
    }

    fn step_curve() -> CatmullRomCurve {
        CatmullRomCurve::from_points(&[
            Point2::new(0.0, 10.0),
            Point2::new(1.0, 10.0),
            Point2::new(2.0, 0.0),
            Point2::new(3.0, 0.0),
        ])
    }

    fn descent() -> CatmullRomCurve {
        CatmullRomCurve::from_points(&[
            Point2::new(0.0, 10.0),
            Point2::new(1.0, 9.0),
            Point2::new(2.0, 6.0),
            Point2::new(3.0, 2.0),
            Point2::new(4.0, -3.0),
            Point2::new(5.0, -9.0),
        ])
    }

    #[test]
    fn new_body_is_idle() {
        let b = body();
        assert_eq!(b.state(), BodyState::Idle);
        assert_eq!(b.kinematics(), Kinematics::at_rest());
    }

    #[test]
    fn start_needs_two_control_points() {
        let mut curve = CatmullRomCurve::new();
        curve.add_control_point(Point2::new(0.0, 10.0));
        let mut b = body();
        assert!(!b.start(&curve));
        assert_eq!(b.state(), BodyState::Idle);
        assert_eq!(b.kinematics(), Kinematics::at_rest());
        assert_relative_eq!(b.curvature(), 0.0);
    }

    #[test]
    fn start_only_once() {
        let curve = step_curve();
        let mut b = body();
        assert!(b.start(&curve));
        b.step(&curve, 0.1);
        let before = b.kinematics();
        assert!(!b.start(&curve));
        assert_eq!(b.kinematics(), before);
    }

    #[test]
    fn step_before_start_does_nothing() {
        let curve = step_curve();
        let mut b = body();
        b.step(&curve, 0.1);
        assert_eq!(b.state(), BodyState::Idle);
        assert_eq!(b.kinematics(), Kinematics::at_rest());
    }

    #[test]
    fn start_places_body_near_track_start() {
        let curve = step_curve();
        let mut b = body();
        assert!(b.start(&curve));
        assert_eq!(b.state(), BodyState::Moving);
        assert_relative_eq!(b.parameter(), 0.01);
        assert_relative_eq!(b.speed(), 0.0);
        assert_relative_eq!(b.rotation(), 0.0);
        assert_relative_eq!(b.tangent().norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(b.tangent().dot(&b.normal()), 0.0, epsilon = 1e-12);
        let offset = b.center() - curve.evaluate(b.parameter());
        assert_relative_eq!(offset.norm(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn first_step_moves_forward() {
        let curve = step_curve();
        let mut b = body();
        b.start(&curve);
        let tau0 = b.parameter();
        b.step(&curve, 0.1);

        assert_eq!(b.state(), BodyState::Moving);
        assert!(b.parameter() > tau0);
        assert!(b.speed() > 0.0);

        let on_track = curve.evaluate(b.parameter());
        let offset = b.center() - on_track;
        assert_relative_eq!(offset.norm(), 2.0, epsilon = 1e-9);
        assert_relative_eq!(offset.dot(&b.normal()), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn frame_stays_orthonormal() {
        let curve = descent();
        let mut b = body();
        b.start(&curve);
        for _ in 0..50 {
            b.step(&curve, 0.02);
            assert_relative_eq!(b.tangent().norm(), 1.0, epsilon = 1e-9);
            assert_relative_eq!(b.normal().norm(), 1.0, epsilon = 1e-9);
            assert_relative_eq!(b.tangent().dot(&b.normal()), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn speed_follows_energy_conservation() {
        let curve = descent();
        let g = SimulationConfig::default().gravity;
        let mut b = body();
        b.start(&curve);
        b.step(&curve, 0.05);

        let tau_a = b.parameter();
        b.step(&curve, 0.05);
        let v_a = b.speed();
        let tau_b = b.parameter();
        b.step(&curve, 0.05);
        let v_b = b.speed();

        let y_a = curve.evaluate(tau_a).y;
        let y_b = curve.evaluate(tau_b).y;
        assert!(y_b < y_a);
        assert_relative_eq!(v_b * v_b, v_a * v_a + 2.0 * g * (y_a - y_b), epsilon = 1e-9);
    }

    #[test]
    fn rotation_accumulates_on_straight_track() {
        let line = Line::from_points(Point2::new(0.0, 0.0), Point2::new(100.0, 0.0)).unwrap();
        let config = SimulationConfig::default().with_min_speed(5.0);
        let mut b = Body::new(TrackId::default(), config);
        b.start(&line);

        let n: u32 = 20;
        let dt = 0.05;
        for _ in 0..n {
            b.step(&line, dt);
        }
        let omega = b.angular_velocity();
        assert_relative_eq!(omega, 0.05, epsilon = 1e-12);
        assert_relative_eq!(b.angular_acceleration(), 0.0);
        assert_relative_eq!(b.rotation(), omega * f64::from(n) * dt, epsilon = 1e-12);
    }

    #[test]
    fn rim_and_spokes_follow_body() {
        let curve = step_curve();
        let mut b = body();
        b.start(&curve);
        b.step(&curve, 0.1);
        let rim = b.rim_points(32);
        assert_eq!(rim.len(), 32);
        for p in &rim {
            assert_relative_eq!((p - b.center()).norm(), 2.0, epsilon = 1e-9);
        }
        let spokes = b.spoke_endpoints(4);
        assert_eq!(spokes.len(), 4);
        assert!(spokes.iter().all(|(hub, _)| *hub == b.center()));
    }

    #[test]
    fn body_parks_at_end_of_track() {
        let curve = step_curve();
        let mut b = body();
        b.start(&curve);
        for _ in 0..1000 {
            b.step(&curve, 0.1);
        }
        assert!(b.parameter() >= 3.0);
        let parked = b.kinematics();
        b.step(&curve, 0.1);
        assert_eq!(b.kinematics(), parked);
        assert_eq!(b.state(), BodyState::Moving);

        let offset = b.center() - Point2::new(3.0, 0.0);
        assert_relative_eq!(offset.norm(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn degenerate_track_stays_finite() {
        let curve = CatmullRomCurve::from_points(&[
            Point2::new(1.0, 5.0),
            Point2::new(1.0, 5.0),
            Point2::new(1.0, 5.0),
        ]);
        let mut b = body();
        assert!(b.start(&curve));
        for _ in 0..5 {
            b.step(&curve, 0.1);
        }
        let k = b.kinematics();
        assert!(k.parameter.is_finite());
        assert!(k.speed.is_finite());
        assert!(k.rotation.is_finite());
        assert!(k.center.x.is_finite() && k.center.y.is_finite());
        assert_relative_eq!(k.tangent.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn invalid_dt_is_ignored() {
        let curve = step_curve();
        let mut b = body();
        b.start(&curve);
        let before = b.kinematics();
        b.step(&curve, f64::NAN);
        b.step(&curve, -0.1);
        assert_eq!(b.kinematics(), before);
    }

    #[test]
    fn always_attached_never_detaches() {
        // Runs right to left, so the normal points down and the wheel hangs
        // below the track.
        let line = Line::from_points(Point2::new(10.0, 0.0), Point2::new(0.0, -1.0)).unwrap();
        let mut b = body();
        b.start(&line);
        b.step(&line, 0.1);
        assert_eq!(b.state(), BodyState::Moving);
    }

    #[test]
    fn normal_force_policy_detaches_hanging_body() {
        let line = Line::from_points(Point2::new(10.0, 0.0), Point2::new(0.0, -1.0)).unwrap();
        let config = SimulationConfig::default().with_contact(ContactPolicy::NormalForce);
        let mut b = Body::new(TrackId::default(), config);
        b.start(&line);
        let tau = b.parameter();
        b.step(&line, 0.1);
        assert_eq!(b.state(), BodyState::Detached);
        assert_relative_eq!(b.parameter(), tau);

        let frozen = b.kinematics();
        b.step(&line, 0.1);
        assert_eq!(b.kinematics(), frozen);
    }

    #[test]
    fn normal_force_policy_keeps_resting_body() {
        let curve = step_curve();
        let config = SimulationConfig::default().with_contact(ContactPolicy::NormalForce);
        let mut b = Body::new(TrackId::default(), config);
        b.start(&curve);
        b.step(&curve, 0.1);
        assert_eq!(b.state(), BodyState::Moving);
        assert!(b.contact_term().y > 0.0);
    }
}
