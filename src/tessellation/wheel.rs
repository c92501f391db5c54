use std::f64::consts::TAU;

use crate::math::{Point2, Vector2};

/// Point on a circle of `radius` around `center` at `angle`.
fn on_circle(center: &Point2, radius: f64, angle: f64) -> Point2 {
    center + Vector2::new(angle.cos(), angle.sin()) * radius
}

/// Angle of sample `i` out of `count`, turned back by `rotation`.
fn sample_angle(i: usize, count: usize, rotation: f64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let fraction = i as f64 / count as f64;
    TAU * fraction - rotation
}

/// Returns `count` evenly spaced rim points of a wheel rotated by `rotation`.
///
/// Point `i` sits at angle `2*pi*i/count - rotation`, so a positive
/// rotation turns the wheel clockwise, i.e. rolling to the right.
#[must_use]
pub fn rim_points(center: &Point2, rotation: f64, radius: f64, count: usize) -> Vec<Point2> {
    (0..count)
        .map(|i| on_circle(center, radius, sample_angle(i, count, rotation)))
        .collect()
}

/// Returns `count` spokes as `(center, rim)` pairs, spaced like [`rim_points`].
#[must_use]
pub fn spoke_endpoints(
    center: &Point2,
    rotation: f64,
    radius: f64,
    count: usize,
) -> Vec<(Point2, Point2)> {
    (0..count)
        .map(|i| (*center, on_circle(center, radius, sample_angle(i, count, rotation))))
        .collect()
}
