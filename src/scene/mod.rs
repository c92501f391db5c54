//! Host-facing driver: one track, one body, input events in, primitives out.

mod store;

pub use store::{TrackId, TrackStore};

use tracing::debug;

use crate::error::Result;
use crate::geometry::CatmullRomCurve;
use crate::math::Point2;
use crate::render::{Color, Primitive, PrimitiveKind, Renderer, Viewport};
use crate::simulation::{Body, BodyState, SimulationConfig};

/// Line width of the track and the wheel outline.
const LINE_WIDTH: f32 = 3.0;

/// Size of the drawn control points.
const POINT_SIZE: f32 = 10.0;

/// Discrete events delivered by the host's input and timing layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A control point placed at a world position.
    AddControlPoint(Point2),
    StartSimulation,
    /// Wall-clock time elapsed since the previous tick, in seconds.
    AdvanceTime(f64),
}

/// The gondola scene.
///
/// Owns the active track and the body riding it, and is driven entirely
/// through [`Scene::handle`] from a single thread.
#[derive(Debug)]
pub struct Scene {
    config: SimulationConfig,
    viewport: Viewport,
    tracks: TrackStore,
    body: Body,
}

impl Default for Scene {
    fn default() -> Self {
        Self::build(SimulationConfig::default(), Viewport::default())
    }
}

impl Scene {
    /// Creates a scene with an empty track.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation.
    pub fn new(config: SimulationConfig, viewport: Viewport) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, viewport))
    }

    fn build(config: SimulationConfig, viewport: Viewport) -> Self {
        let mut tracks = TrackStore::new();
        let track = tracks.add_track(CatmullRomCurve::new());
        Self {
            config,
            viewport,
            tracks,
            body: Body::new(track, config),
        }
    }

    /// Applies one input event.
    ///
    /// # Errors
    ///
    /// Returns an error if the body's track is missing from the store.
    pub fn handle(&mut self, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::AddControlPoint(p) => self.add_control_point(p),
            InputEvent::StartSimulation => self.start().map(|_| ()),
            InputEvent::AdvanceTime(dt) => self.advance(dt),
        }
    }

    /// Appends a control point and rebuilds the track polyline.
    ///
    /// # Errors
    ///
    /// Returns an error if the body's track is missing from the store.
    pub fn add_control_point(&mut self, p: Point2) -> Result<()> {
        let samples = self.config.polyline_samples;
        let track = self.tracks.track_mut(self.body.track())?;
        track.add_control_point(p);
        track.build_polyline(samples);
        Ok(())
    }

    /// Appends a control point given in window pixels.
    ///
    /// # Errors
    ///
    /// Returns an error if the body's track is missing from the store.
    pub fn add_control_point_screen(&mut self, px: f64, py: f64) -> Result<()> {
        let p = self.viewport.screen_to_world(px, py);
        self.add_control_point(p)
    }

    /// Starts the body. Returns whether it actually started.
    ///
    /// # Errors
    ///
    /// Returns an error if the body's track is missing from the store.
    pub fn start(&mut self) -> Result<bool> {
        let track = self.tracks.track(self.body.track())?;
        Ok(self.body.start(track))
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the body's track is missing from the store.
    pub fn advance(&mut self, dt: f64) -> Result<()> {
        let track = self.tracks.track(self.body.track())?;
        self.body.step(track, dt);
        Ok(())
    }

    /// Discards the track and the body and starts over with empty ones.
    pub fn reset(&mut self) {
        self.tracks.remove_track(self.body.track());
        let track = self.tracks.add_track(CatmullRomCurve::new());
        self.body = Body::new(track, self.config);
        debug!("scene reset");
    }

    /// Returns the active track.
    ///
    /// # Errors
    ///
    /// Returns an error if the body's track is missing from the store.
    pub fn track(&self) -> Result<&CatmullRomCurve> {
        Ok(self.tracks.track(self.body.track())?)
    }

    #[must_use]
    pub fn body(&self) -> &Body {
        &self.body
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Display polyline of the active track.
    #[must_use]
    pub fn polyline(&self) -> &[Point2] {
        self.track().map(CatmullRomCurve::polyline).unwrap_or_default()
    }

    /// Control points of the active track.
    #[must_use]
    pub fn control_points(&self) -> &[Point2] {
        self.track().map(CatmullRomCurve::control_points).unwrap_or_default()
    }

    #[must_use]
    pub fn body_center(&self) -> Point2 {
        self.body.center()
    }

    /// Body rotation angle in radians.
    #[must_use]
    pub fn body_rotation(&self) -> f64 {
        self.body.rotation()
    }

    #[must_use]
    pub fn rim_points(&self, count: usize) -> Vec<Point2> {
        self.body.rim_points(count)
    }

    #[must_use]
    pub fn spoke_endpoints(&self, count: usize) -> Vec<(Point2, Point2)> {
        self.body.spoke_endpoints(count)
    }

    /// Builds the primitives for one frame.
    ///
    /// The wheel is drawn first and only once the body has been started;
    /// the track follows once it has at least two control points, then the
    /// control points themselves.
    #[must_use]
    pub fn draw_list(&self) -> Vec<Primitive> {
        let mut primitives = Vec::with_capacity(5);

        if self.body.state() != BodyState::Idle {
            let rim = self.rim_points(self.config.rim_samples);
            let spokes = self
                .spoke_endpoints(self.config.spoke_count)
                .into_iter()
                .flat_map(|(hub, tip)| [hub, tip])
                .collect();
            primitives.push(Primitive::new(
                PrimitiveKind::TriangleFan,
                Color::WHITE,
                rim.clone(),
            ));
            primitives.push(
                Primitive::new(PrimitiveKind::LineLoop, Color::WHITE, rim).with_size(LINE_WIDTH),
            );
            primitives.push(
                Primitive::new(PrimitiveKind::Lines, Color::WHITE, spokes).with_size(LINE_WIDTH),
            );
        }

        let points = self.control_points();
        if points.len() > 1 {
            primitives.push(
                Primitive::new(
                    PrimitiveKind::LineStrip,
                    Color::YELLOW,
                    self.polyline().to_vec(),
                )
                .with_size(LINE_WIDTH),
            );
        }
        if !points.is_empty() {
            primitives.push(
                Primitive::new(PrimitiveKind::Points, Color::RED, points.to_vec())
                    .with_size(POINT_SIZE),
            );
        }

        primitives
    }

    /// Draws the current frame with `renderer`.
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        for primitive in &self.draw_list() {
            renderer.draw(primitive);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::CableCarError;
    use crate::geometry::Curve;
    use crate::simulation::GRAVITY;
    use approx::assert_relative_eq;

    #[derive(Default)]
    struct Recorder {
        kinds: Vec<PrimitiveKind>,
    }

    impl Renderer for Recorder {
        fn draw(&mut self, primitive: &Primitive) {
            self.kinds.push(primitive.kind);
        }
    }

    fn scene_with_step_track() -> Scene {
        let mut scene = Scene::default();
        for p in [(0.0, 10.0), (1.0, 10.0), (2.0, 0.0), (3.0, 0.0)] {
            scene
                .handle(InputEvent::AddControlPoint(Point2::new(p.0, p.1)))
                .unwrap();
        }
        scene
    }

    #[test]
    fn invalid_config_rejected() {
        let config = SimulationConfig::default().with_gravity(-GRAVITY);
        let err = Scene::new(config, Viewport::default()).unwrap_err();
        assert!(matches!(err, CableCarError::Config(_)));
    }

    #[test]
    fn adding_points_rebuilds_polyline() {
        let scene = scene_with_step_track();
        assert_eq!(scene.control_points().len(), 4);
        assert_eq!(scene.polyline().len(), 101);
        assert!(!scene.track().unwrap().is_polyline_stale());
    }

    #[test]
    fn start_with_one_point_is_ignored() {
        let mut scene = Scene::default();
        scene
            .handle(InputEvent::AddControlPoint(Point2::new(0.0, 0.0)))
            .unwrap();
        assert!(!scene.start().unwrap());
        scene.handle(InputEvent::AdvanceTime(0.1)).unwrap();
        assert_eq!(scene.body().state(), BodyState::Idle);
    }

    #[test]
    fn events_drive_the_body() {
        let mut scene = scene_with_step_track();
        scene.handle(InputEvent::StartSimulation).unwrap();
        assert_eq!(scene.body().state(), BodyState::Moving);
        assert_relative_eq!(scene.body().parameter(), 0.01);

        scene.handle(InputEvent::AdvanceTime(0.1)).unwrap();
        let body = scene.body();
        assert!(body.parameter() > 0.01);
        assert!(body.speed() > 0.0);
        let on_track = scene.track().unwrap().evaluate(body.parameter());
        let offset = scene.body_center() - on_track;
        assert_relative_eq!(offset.dot(&body.normal()), 2.0, epsilon = 1e-9);
        assert!(scene.body_rotation() > 0.0);
    }

    #[test]
    fn screen_points_go_through_viewport() {
        let mut scene = Scene::default();
        scene.add_control_point_screen(300.0, 150.0).unwrap();
        let p = scene.control_points()[0];
        assert_relative_eq!(p.x, 0.0);
        assert_relative_eq!(p.y, 10.0);
    }

    #[test]
    fn idle_scene_draws_only_track() {
        let scene = scene_with_step_track();
        let kinds: Vec<_> = scene.draw_list().iter().map(|p| p.kind).collect();
        assert_eq!(kinds, vec![PrimitiveKind::LineStrip, PrimitiveKind::Points]);
    }

    #[test]
    fn single_point_draws_only_the_point() {
        let mut scene = Scene::default();
        scene.add_control_point(Point2::new(1.0, 1.0)).unwrap();
        let list = scene.draw_list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].kind, PrimitiveKind::Points);
        assert_eq!(list[0].color, Color::RED);
    }

    #[test]
    fn moving_scene_draws_wheel_first() {
        let mut scene = scene_with_step_track();
        scene.start().unwrap();
        scene.advance(0.1).unwrap();
        let list = scene.draw_list();
        let kinds: Vec<_> = list.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PrimitiveKind::TriangleFan,
                PrimitiveKind::LineLoop,
                PrimitiveKind::Lines,
                PrimitiveKind::LineStrip,
                PrimitiveKind::Points,
            ]
        );
        assert_eq!(list[0].vertices.len(), 32);
        assert_eq!(list[2].vertices.len(), 8);
        assert_eq!(list[3].color, Color::YELLOW);
    }

    #[test]
    fn render_feeds_every_primitive() {
        let mut scene = scene_with_step_track();
        scene.start().unwrap();
        let mut recorder = Recorder::default();
        scene.render(&mut recorder);
        assert_eq!(recorder.kinds.len(), 5);
    }

    #[test]
    fn reset_rebuilds_track_and_body() {
        let mut scene = scene_with_step_track();
        scene.start().unwrap();
        let old_track = scene.body().track();
        scene.reset();
        assert_ne!(scene.body().track(), old_track);
        assert_eq!(scene.body().state(), BodyState::Idle);
        assert!(scene.control_points().is_empty());
        assert!(scene.polyline().is_empty());
        assert_eq!(scene.tracks.len(), 1);
    }
}
