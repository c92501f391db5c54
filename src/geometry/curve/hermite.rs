use crate::math::{Point2, Vector2};

/// One cubic Hermite piece of a [`CatmullRomCurve`](super::CatmullRomCurve).
///
/// Stored in power-basis form over the local parameter
/// `u = (t - t0) / dt`:
///
/// ```text
/// P(u) = a0 + a1*u + a2*u^2 + a3*u^3
/// ```
///
/// Position and both derivatives are evaluated from the same coefficients,
/// so they always agree with each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HermiteSegment {
    index: usize,
    t0: f64,
    dt: f64,
    a0: Vector2,
    a1: Vector2,
    a2: Vector2,
    a3: Vector2,
}

impl HermiteSegment {
    /// Builds the segment from end positions `p1`/`p2`, end tangents `v0`/`v1`
    /// and the parameter values `t0`/`t1` at the two ends.
    ///
    /// `index` is the position of the segment's first control point.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        index: usize,
        p1: Point2,
        v0: Vector2,
        t0: f64,
        p2: Point2,
        v1: Vector2,
        t1: f64,
    ) -> Self {
        let dt = t1 - t0;
        let a0 = p1.coords;
        let a1 = v0 * dt;
        let a2 = (p2 - p1) * 3.0 - (v1 + v0 * 2.0) * dt;
        let a3 = (p1 - p2) * 2.0 + (v1 + v0) * dt;
        Self {
            index,
            t0,
            dt,
            a0,
            a1,
            a2,
            a3,
        }
    }

    /// Index of the control point this segment starts at.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Maps the outer parameter `t` to the local parameter `u`.
    #[must_use]
    pub fn local(&self, t: f64) -> f64 {
        (t - self.t0) / self.dt
    }

    /// Evaluates the position at outer parameter `t`.
    #[must_use]
    pub fn position(&self, t: f64) -> Point2 {
        let u = self.local(t);
        Point2::from(((self.a3 * u + self.a2) * u + self.a1) * u + self.a0)
    }

    /// First derivative with respect to the outer parameter `t`.
    #[must_use]
    pub fn first_derivative(&self, t: f64) -> Vector2 {
        let u = self.local(t);
        ((self.a3 * 3.0 * u + self.a2 * 2.0) * u + self.a1) / self.dt
    }

    /// Second derivative with respect to the outer parameter `t`.
    #[must_use]
    pub fn second_derivative(&self, t: f64) -> Vector2 {
        let u = self.local(t);
        (self.a3 * 6.0 * u + self.a2 * 2.0) / (self.dt * self.dt)
    }
}
