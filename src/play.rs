//! Gameplay scene: one round after another until the lives run out

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;

use crate::Engine;
use crate::consts::ORB_SPRITE_SIZE;
use crate::renderer::{ImageId, Paint, Rect, Surface, draw_parallax};
use crate::scene::Scene;
use crate::sim::{Orb, RoundController, RoundPhase};

const TIMER_INSET: f32 = 42.0;
const TIMER_RADIUS: f32 = 26.0;
const TIMER_WIDTH: f32 = 6.0;
const HINT_WIDTH: f32 = 4.0;

pub struct PlayScene {
    round: RoundController,
}

impl PlayScene {
    /// Continue from persisted progress
    pub fn new(engine: &Engine) -> Self {
        Self {
            round: RoundController::load(engine.save()),
        }
    }

    /// Fresh game from level 1 with full lives
    pub fn new_game(engine: &mut Engine) -> Self {
        let mut round = RoundController::load(engine.save());
        round.reset_progress(engine);
        Self { round }
    }

    pub fn round(&self) -> &RoundController {
        &self.round
    }

    fn draw_orb(surface: &mut dyn Surface, orb: &Orb, now_ms: f64) {
        let anim = *orb.anim.borrow();
        let r = orb.radius * (1.0 + 0.03 * anim.wobble.sin()) * anim.bump;

        surface.set_alpha(anim.alpha);
        let size = ORB_SPRITE_SIZE;
        let src = Rect::new(orb.sprite_index() as f32 * size, 0.0, size, size);
        surface.draw_sprite(ImageId::Orbs, src, Rect::centered(orb.pos, r));

        if orb.correct {
            let pulse = ((now_ms / 333.0) as f32 + orb.pos.x * 0.01).sin() * 6.0;
            surface.stroke_arc(orb.pos, (r + pulse).max(0.0), 0.0, TAU, HINT_WIDTH, Paint::white(0.9));
        }

        surface.text(
            &orb.label,
            orb.pos,
            (r * 0.9).floor(),
            Paint::white(1.0),
            Paint::black(0.35),
        );
        surface.set_alpha(1.0);
    }

    fn draw_timer(&self, surface: &mut dyn Surface, width: f32) {
        let center = Vec2::new(width - TIMER_INSET, TIMER_INSET);
        let pct = self.round.time_fraction();
        surface.stroke_arc(center, TIMER_RADIUS, 0.0, TAU, TIMER_WIDTH, Paint::white(0.35));
        surface.stroke_arc(
            center,
            TIMER_RADIUS,
            -FRAC_PI_2,
            -FRAC_PI_2 + TAU * pct,
            TIMER_WIDTH,
            Paint::white(0.9),
        );
    }
}

impl Scene for PlayScene {
    fn enter(&mut self, engine: &mut Engine) {
        self.round.sync_hud(engine);
        self.round.start_round(engine);
    }

    fn exit(&mut self, _engine: &mut Engine) {
        self.round.abandon();
    }

    fn update(&mut self, engine: &mut Engine, dt: f32) {
        match self.round.phase() {
            RoundPhase::Won => self.round.start_round(engine),
            RoundPhase::Lost if !self.round.is_game_over() => self.round.start_round(engine),
            RoundPhase::Active => self.round.step(engine, dt),
            RoundPhase::Lost | RoundPhase::Idle => {}
        }
    }

    fn draw(&mut self, engine: &Engine, surface: &mut dyn Surface, ts: f64) {
        let size = engine.size();
        draw_parallax(surface, ts, size.x, size.y);

        let now = engine.now();
        for orb in self.round.orbs() {
            Self::draw_orb(surface, orb, now);
        }
        self.draw_timer(surface, size.x);
    }

    fn pointer(&mut self, engine: &mut Engine, x: f32, y: f32) {
        self.round.handle_tap(engine, Vec2::new(x, y));
    }
}
