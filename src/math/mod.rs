/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Smallest derivative magnitude used as a divisor in the simulation.
pub const EPSILON: f64 = 1e-6;

/// Rotates `v` by +90° (counter-clockwise).
#[must_use]
pub fn perp(v: &Vector2) -> Vector2 {
    Vector2::new(-v.y, v.x)
}

/// Returns `v / |v|`, or `None` when `|v|` is below [`TOLERANCE`].
#[must_use]
pub fn try_normalize(v: &Vector2) -> Option<Vector2> {
    let len = v.norm();
    if len < TOLERANCE || !len.is_finite() {
        return None;
    }
    Some(v / len)
}
