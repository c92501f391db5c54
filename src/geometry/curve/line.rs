use crate::error::{GeometryError, Result};
use crate::math::{Point2, Vector2, TOLERANCE};

use super::{Curve, CurveDomain};

/// A straight track segment.
///
/// The parametric form is: `P(t) = start + t * (end - start)` for `t` in `[0, 1]`.
/// Outside that range the endpoints are returned, matching the clamping of
/// [`CatmullRomCurve`](super::CatmullRomCurve).
#[derive(Debug, Clone)]
pub struct Line {
    start: Point2,
    direction: Vector2,
}

impl Line {
    /// Creates a line running from `start` to `end`.
    ///
    /// # Errors
    ///
    /// Returns an error if the two points coincide.
    pub fn from_points(start: Point2, end: Point2) -> Result<Self> {
        let direction = end - start;
        if direction.norm() < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self { start, direction })
    }

    /// Returns the start point of the line.
    #[must_use]
    pub fn start(&self) -> &Point2 {
        &self.start
    }

    /// Returns the (non-normalized) direction `end - start`.
    #[must_use]
    pub fn direction(&self) -> &Vector2 {
        &self.direction
    }
}

impl Curve for Line {
    fn evaluate(&self, t: f64) -> Point2 {
        self.start + self.direction * t.clamp(0.0, 1.0)
    }

    fn first_derivative(&self, _t: f64) -> Vector2 {
        self.direction
    }

    fn second_derivative(&self, _t: f64) -> Vector2 {
        Vector2::zeros()
    }

    fn domain(&self) -> Result<CurveDomain> {
        Ok(CurveDomain::new(0.0, 1.0))
    }
}
