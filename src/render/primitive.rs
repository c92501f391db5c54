use crate::math::Point2;

/// How a vertex list is assembled into shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Points,
    LineStrip,
    LineLoop,
    /// Independent segments from consecutive vertex pairs.
    Lines,
    TriangleFan,
}

/// Linear RGB color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    pub const YELLOW: Self = Self::new(1.0, 1.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Creates a color from its components in `[0, 1]`.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// One draw call: a vertex list in world coordinates plus how to draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    pub color: Color,
    /// Line width for line kinds, point size for [`PrimitiveKind::Points`].
    pub size: f32,
    pub vertices: Vec<Point2>,
}

impl Primitive {
    /// Creates a primitive with unit size.
    #[must_use]
    pub fn new(kind: PrimitiveKind, color: Color, vertices: Vec<Point2>) -> Self {
        Self {
            kind,
            color,
            size: 1.0,
            vertices,
        }
    }

    /// Returns the primitive with a different line width or point size.
    #[must_use]
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }
}

/// Rendering backend supplied by the host application.
pub trait Renderer {
    /// Draws one primitive.
    fn draw(&mut self, primitive: &Primitive);
}
