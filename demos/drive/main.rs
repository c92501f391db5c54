//! Headless gondola run on the preset track.
//!
//! Usage:
//! ```text
//! cargo run --example drive
//! RUST_LOG=cablecar=trace cargo run --example drive
//! ```

use cablecar::render::{Primitive, Renderer};
use cablecar::{InputEvent, Result, Scene};

/// Control points of the preset track, in window pixels.
const PRESET: [(f64, f64); 8] = [
    (50.0, 85.0),
    (163.0, 503.0),
    (408.0, 501.0),
    (344.0, 311.0),
    (218.0, 376.0),
    (286.0, 478.0),
    (451.0, 440.0),
    (557.0, 55.0),
];

/// Frame interval of the simulated clock.
const FRAME_DT: f64 = 1.0 / 60.0;

/// Counts vertices instead of drawing them.
#[derive(Default)]
struct VertexCounter {
    primitives: usize,
    vertices: usize,
}

impl Renderer for VertexCounter {
    fn draw(&mut self, primitive: &Primitive) {
        self.primitives += 1;
        self.vertices += primitive.vertices.len();
    }
}

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for cablecar.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("drive=info".parse().unwrap_or_default())
        .add_directive("cablecar=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut scene = Scene::default();
    for (px, py) in PRESET {
        scene.add_control_point_screen(px, py)?;
    }
    scene.handle(InputEvent::StartSimulation)?;

    for frame in 0..600 {
        scene.handle(InputEvent::AdvanceTime(FRAME_DT))?;
        if frame % 60 == 0 {
            let body = scene.body();
            let center = body.center();
            tracing::info!(
                frame,
                tau = body.parameter(),
                speed = body.speed(),
                rotation = body.rotation(),
                x = center.x,
                y = center.y,
                "gondola"
            );
        }
    }

    let mut counter = VertexCounter::default();
    scene.render(&mut counter);
    tracing::info!(
        primitives = counter.primitives,
        vertices = counter.vertices,
        state = ?scene.body().state(),
        "final frame"
    );
    Ok(())
}
