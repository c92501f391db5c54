use crate::error::{GeometryError, Result};
use crate::math::{Point2, Vector2};

use super::{Curve, CurveDomain, HermiteSegment};

/// Minimum number of control points for the curve to be evaluable.
pub const MIN_CONTROL_POINTS: usize = 2;

/// Default number of samples in the display polyline.
pub const POLYLINE_SAMPLES: usize = 101;

/// Where a parameter value falls relative to the curve's segments.
#[derive(Debug, Clone, Copy)]
enum Location {
    /// Fewer than two control points.
    Empty,
    /// Before the first parameter value.
    Before,
    /// After the last parameter value (or not comparable, e.g. NaN).
    After,
    Inside(HermiteSegment),
}

/// Interpolating Catmull-Rom curve through user-placed control points.
///
/// Control point `i` sits at parameter `t = i`. Each span between two
/// neighbouring points is a cubic Hermite segment whose end tangents are
/// centred differences of the surrounding points; at the two ends the
/// boundary point is duplicated.
///
/// The display polyline is cached and goes stale on every mutation; call
/// [`CatmullRomCurve::build_polyline`] after editing.
#[derive(Debug, Clone, Default)]
pub struct CatmullRomCurve {
    control_points: Vec<Point2>,
    parameters: Vec<f64>,
    polyline: Vec<Point2>,
    polyline_stale: bool,
}

impl CatmullRomCurve {
    /// Creates an empty curve.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a curve from a list of control points, with the polyline built.
    #[must_use]
    pub fn from_points(points: &[Point2]) -> Self {
        let mut curve = Self::new();
        for p in points {
            curve.add_control_point(*p);
        }
        curve.build_polyline(POLYLINE_SAMPLES);
        curve
    }

    /// Appends a control point at the next integer parameter value.
    ///
    /// Coincident points are accepted; they produce zero-length tangents
    /// that the simulation guards against.
    pub fn add_control_point(&mut self, p: Point2) {
        #[allow(clippy::cast_precision_loss)]
        let t = self.control_points.len() as f64;
        self.control_points.push(p);
        self.parameters.push(t);
        self.polyline.clear();
        self.polyline_stale = true;
    }

    /// Removes all control points and the cached polyline.
    pub fn clear(&mut self) {
        self.control_points.clear();
        self.parameters.clear();
        self.polyline.clear();
        self.polyline_stale = false;
    }

    /// Returns the control points in traversal order.
    #[must_use]
    pub fn control_points(&self) -> &[Point2] {
        &self.control_points
    }

    /// Returns the parameter value of each control point.
    #[must_use]
    pub fn parameters(&self) -> &[f64] {
        &self.parameters
    }

    /// Returns the cached display polyline (empty until built).
    #[must_use]
    pub fn polyline(&self) -> &[Point2] {
        &self.polyline
    }

    /// Returns whether control points changed since the last polyline build.
    #[must_use]
    pub fn is_polyline_stale(&self) -> bool {
        self.polyline_stale
    }

    /// Regenerates the display polyline with `samples` evenly spaced
    /// parameter values over the whole domain.
    ///
    /// At least two samples are always taken. With fewer than two control
    /// points the polyline stays empty.
    pub fn build_polyline(&mut self, samples: usize) {
        self.polyline.clear();
        self.polyline_stale = false;

        let Ok(domain) = self.domain() else {
            return;
        };
        let samples = samples.max(2);
        #[allow(clippy::cast_precision_loss)]
        let last = (samples - 1) as f64;
        self.polyline.reserve(samples);
        for i in 0..samples {
            #[allow(clippy::cast_precision_loss)]
            let t = domain.t_min + domain.span() * (i as f64 / last);
            let p = self.evaluate(t);
            self.polyline.push(p);
        }
    }

    /// Returns the Hermite segment containing `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve has fewer than two control points or
    /// `t` lies outside the parameter domain.
    pub fn segment_at(&self, t: f64) -> Result<HermiteSegment> {
        match self.locate(t) {
            Location::Inside(segment) => Ok(segment),
            Location::Empty => Err(self.insufficient().into()),
            Location::Before | Location::After => {
                let domain = self.domain()?;
                Err(GeometryError::ParameterOutOfRange {
                    parameter: "t",
                    value: t,
                    min: domain.t_min,
                    max: domain.t_max,
                }
                .into())
            }
        }
    }

    fn insufficient(&self) -> GeometryError {
        GeometryError::InsufficientControlPoints {
            required: MIN_CONTROL_POINTS,
            actual: self.control_points.len(),
        }
    }

    /// Builds segment `i`, between control points `i` and `i + 1`.
    fn segment(&self, i: usize) -> HermiteSegment {
        let pts = &self.control_points;
        let p1 = pts[i];
        let p2 = pts[i + 1];
        let p0 = if i > 0 { pts[i - 1] } else { p1 };
        let p3 = if i + 2 < pts.len() { pts[i + 2] } else { p2 };
        let v0 = (p2 - p0) * 0.5;
        let v1 = (p3 - p1) * 0.5;
        HermiteSegment::new(
            i,
            p1,
            v0,
            self.parameters[i],
            p2,
            v1,
            self.parameters[i + 1],
        )
    }

    /// First segment whose closed parameter range contains `t`.
    fn locate(&self, t: f64) -> Location {
        let n = self.control_points.len();
        if n < MIN_CONTROL_POINTS {
            return Location::Empty;
        }
        let ts = &self.parameters;
        if let Some(i) = (0..n - 1).find(|&i| ts[i] <= t && t <= ts[i + 1]) {
            return Location::Inside(self.segment(i));
        }
        if t < ts[0] {
            Location::Before
        } else {
            Location::After
        }
    }

    /// Clamps `t` to the nearest end segment for derivative queries.
    fn clamped_segment(&self, t: f64) -> Option<(HermiteSegment, f64)> {
        let n = self.control_points.len();
        match self.locate(t) {
            Location::Empty => None,
            Location::Inside(segment) => Some((segment, t)),
            Location::Before => Some((self.segment(0), self.parameters[0])),
            Location::After => Some((self.segment(n - 2), self.parameters[n - 1])),
        }
    }
}

impl Curve for CatmullRomCurve {
    fn evaluate(&self, t: f64) -> Point2 {
        match self.locate(t) {
            Location::Inside(segment) => segment.position(t),
            Location::Before => self.control_points[0],
            Location::After | Location::Empty => self
                .control_points
                .last()
                .copied()
                .unwrap_or_else(Point2::origin),
        }
    }

    fn first_derivative(&self, t: f64) -> Vector2 {
        self.clamped_segment(t)
            .map_or_else(Vector2::zeros, |(segment, t)| segment.first_derivative(t))
    }

    fn second_derivative(&self, t: f64) -> Vector2 {
        self.clamped_segment(t)
            .map_or_else(Vector2::zeros, |(segment, t)| segment.second_derivative(t))
    }

    fn domain(&self) -> Result<CurveDomain> {
        match (self.parameters.first(), self.parameters.last()) {
            (Some(&t_min), Some(&t_max)) if self.parameters.len() >= MIN_CONTROL_POINTS => {
                Ok(CurveDomain::new(t_min, t_max))
            }
            _ => Err(self.insufficient().into()),
        }
    }
}
