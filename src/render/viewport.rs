use crate::error::{ConfigError, Result};
use crate::math::{Point2, Vector2};

/// Default window width in pixels.
pub const DEFAULT_WIDTH: u32 = 600;

/// Default window height in pixels.
pub const DEFAULT_HEIGHT: u32 = 600;

/// Default half extent of the visible world rectangle.
pub const DEFAULT_HALF_EXTENT: f64 = 20.0;

/// Maps between window pixels and world coordinates.
///
/// The window shows the world rectangle `center ± half_extent`. Pixel
/// `(0, 0)` is the top-left corner, world `y` grows upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width_px: u32,
    height_px: u32,
    center: Point2,
    half_extent: Vector2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width_px: DEFAULT_WIDTH,
            height_px: DEFAULT_HEIGHT,
            center: Point2::origin(),
            half_extent: Vector2::new(DEFAULT_HALF_EXTENT, DEFAULT_HALF_EXTENT),
        }
    }
}

impl Viewport {
    /// Creates a viewport.
    ///
    /// # Errors
    ///
    /// Returns an error if a pixel dimension is zero or the half extent is
    /// not positive and finite.
    pub fn new(width_px: u32, height_px: u32, center: Point2, half_extent: Vector2) -> Result<Self> {
        if width_px == 0 || height_px == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "viewport size",
                value: f64::from(width_px.min(height_px)),
                reason: "window dimensions must be non-zero",
            }
            .into());
        }
        for value in [half_extent.x, half_extent.y] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidParameter {
                    name: "half_extent",
                    value,
                    reason: "must be positive and finite",
                }
                .into());
            }
        }
        Ok(Self {
            width_px,
            height_px,
            center,
            half_extent,
        })
    }

    #[must_use]
    pub fn width_px(&self) -> u32 {
        self.width_px
    }

    #[must_use]
    pub fn height_px(&self) -> u32 {
        self.height_px
    }

    #[must_use]
    pub fn center(&self) -> Point2 {
        self.center
    }

    #[must_use]
    pub fn half_extent(&self) -> Vector2 {
        self.half_extent
    }

    /// Converts a pixel position to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, px: f64, py: f64) -> Point2 {
        let nx = 2.0 * px / f64::from(self.width_px) - 1.0;
        let ny = 1.0 - 2.0 * py / f64::from(self.height_px);
        self.center + Vector2::new(nx * self.half_extent.x, ny * self.half_extent.y)
    }

    /// Converts a world position to normalized device coordinates (`[-1, 1]`
    /// across the visible rectangle).
    #[must_use]
    pub fn world_to_ndc(&self, p: &Point2) -> Point2 {
        let d = p - self.center;
        Point2::new(d.x / self.half_extent.x, d.y / self.half_extent.y)
    }
}
