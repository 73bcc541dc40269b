//! Scene lifecycle
//!
//! Exactly one scene is current. `set` is a flat replace: the old scene
//! exits before the new one enters, and nothing carries over between them.

use glam::Vec2;

use crate::Engine;
use crate::renderer::Surface;

/// A screen of the game. Every hook defaults to doing nothing.
pub trait Scene {
    fn enter(&mut self, _engine: &mut Engine) {}

    fn exit(&mut self, _engine: &mut Engine) {}

    /// Simulation step; `dt` in seconds
    fn update(&mut self, _engine: &mut Engine, _dt: f32) {}

    /// Render; `ts` in seconds
    fn draw(&mut self, _engine: &Engine, _surface: &mut dyn Surface, _ts: f64) {}

    fn pointer(&mut self, _engine: &mut Engine, _x: f32, _y: f32) {}

    /// Each touch is an independent pointer event, in arrival order
    fn touch(&mut self, engine: &mut Engine, points: &[Vec2]) {
        for p in points {
            self.pointer(engine, p.x, p.y);
        }
    }
}

/// Holds the current scene and drives it with the shared engine systems
#[derive(Default)]
pub struct SceneManager {
    current: Option<Box<dyn Scene>>,
    /// Delta from the latest update, reused to step particles at draw time
    last_dt: f32,
}

impl SceneManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current scene, returning the one that was running
    pub fn set(&mut self, engine: &mut Engine, scene: Box<dyn Scene>) -> Option<Box<dyn Scene>> {
        let mut previous = self.current.take();
        if let Some(prev) = previous.as_mut() {
            prev.exit(engine);
        }
        let current = self.current.insert(scene);
        current.enter(engine);
        previous
    }

    pub fn has_scene(&self) -> bool {
        self.current.is_some()
    }

    /// Update the scene, then advance tweens
    pub fn update(&mut self, engine: &mut Engine, dt: f32) {
        if let Some(scene) = self.current.as_mut() {
            scene.update(engine, dt);
        }
        self.last_dt = dt;
        let now = engine.now();
        engine.tweens.advance(now);
    }

    /// Draw the scene, then step and draw particles on top
    pub fn draw(&mut self, engine: &mut Engine, surface: &mut dyn Surface, ts: f64) {
        if let Some(scene) = self.current.as_mut() {
            scene.draw(engine, surface, ts);
        }
        engine.particles.advance_and_render(self.last_dt, surface);
    }

    pub fn pointer(&mut self, engine: &mut Engine, x: f32, y: f32) {
        if let Some(scene) = self.current.as_mut() {
            scene.pointer(engine, x, y);
        }
    }

    pub fn touch(&mut self, engine: &mut Engine, points: &[Vec2]) {
        if let Some(scene) = self.current.as_mut() {
            scene.touch(engine, points);
        }
    }
}
