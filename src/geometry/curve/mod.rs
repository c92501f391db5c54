mod catmull_rom;
mod hermite;
mod line;

pub use catmull_rom::{CatmullRomCurve, MIN_CONTROL_POINTS, POLYLINE_SAMPLES};
pub use hermite::HermiteSegment;
pub use line::Line;

use crate::error::{GeometryError, Result};
use crate::math::{try_normalize, Point2, Vector2};

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// Returns whether `t` lies inside the closed range.
    #[must_use]
    pub fn contains(&self, t: f64) -> bool {
        self.t_min <= t && t <= self.t_max
    }

    /// Returns the length of the range.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.t_max - self.t_min
    }
}

/// Trait for parametric curves in the plane.
///
/// Evaluation never fails: implementations fall back to a well-defined
/// value outside their domain so a body riding the curve can't pick up
/// NaNs. Use [`Curve::domain`] to find out whether the curve is usable.
pub trait Curve {
    /// Evaluates the curve at parameter `t`.
    fn evaluate(&self, t: f64) -> Point2;

    /// First derivative with respect to `t`.
    fn first_derivative(&self, t: f64) -> Vector2;

    /// Second derivative with respect to `t`.
    fn second_derivative(&self, t: f64) -> Vector2;

    /// Returns the parameter domain of the curve.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve has too few control points to be evaluated.
    fn domain(&self) -> Result<CurveDomain>;

    /// Computes the unit tangent at parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] when the first derivative vanishes.
    fn unit_tangent(&self, t: f64) -> Result<Vector2> {
        try_normalize(&self.first_derivative(t)).ok_or_else(|| GeometryError::ZeroVector.into())
    }
}
