//! Boundary to the host's rendering backend.
//!
//! The crate never talks to a graphics API. It describes what to draw as
//! [`Primitive`]s and hands them to a [`Renderer`] supplied by the host.

mod primitive;
mod viewport;

pub use primitive::{Color, Primitive, PrimitiveKind, Renderer};
pub use viewport::Viewport;
