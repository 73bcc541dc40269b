//! Tappable orbs

use std::cell::RefCell;
use std::f32::consts::TAU;
use std::rc::Rc;

use glam::Vec2;
use rand::Rng;

use super::prompt::Tag;
use super::tween::{Prop, Tweenable};
use crate::consts::*;

/// Transient animation state shared with the tween scheduler
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbAnim {
    /// Pop scale (1 = rest)
    pub bump: f32,
    pub alpha: f32,
    /// Breathing phase in radians
    pub wobble: f32,
}

impl Default for OrbAnim {
    fn default() -> Self {
        Self {
            bump: 1.0,
            alpha: 1.0,
            wobble: 0.0,
        }
    }
}

impl Tweenable for OrbAnim {
    fn get(&self, prop: Prop) -> Option<f32> {
        match prop {
            Prop::Scale => Some(self.bump),
            Prop::Alpha => Some(self.alpha),
            _ => None,
        }
    }

    fn set(&mut self, prop: Prop, value: f32) {
        match prop {
            Prop::Scale => self.bump = value,
            Prop::Alpha => self.alpha = value,
            _ => {}
        }
    }
}

/// A floating target
#[derive(Debug, Clone)]
pub struct Orb {
    pub pos: Vec2,
    /// Pixels per 1/60 s
    pub vel: Vec2,
    pub radius: f32,
    /// Seconds until the orb drifts away
    pub life: f32,
    pub tag: Tag,
    pub label: String,
    pub correct: bool,
    pub anim: Rc<RefCell<OrbAnim>>,
}

/// Uniform sample in `[lo, hi)`, collapsing to `lo` when the range is empty
fn sample(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

impl Orb {
    /// Random placement inside the `size` canvas
    pub fn spawn(rng: &mut impl Rng, size: Vec2, speed: f32, tag: Tag, correct: bool) -> Self {
        let pos = Vec2::new(
            sample(rng, ORB_MARGIN_X, size.x - ORB_MARGIN_X),
            sample(rng, ORB_MARGIN_Y, size.y - ORB_MARGIN_Y),
        );
        let radius = sample(rng, ORB_RADIUS_MIN, ORB_RADIUS_MAX);
        let vel = Vec2::new(sample(rng, -speed, speed), sample(rng, -speed, speed));
        let life = sample(rng, ORB_LIFE_MIN, ORB_LIFE_MAX);
        let anim = OrbAnim {
            wobble: sample(rng, 0.0, TAU),
            ..Default::default()
        };

        Self {
            pos,
            vel,
            radius,
            life,
            tag,
            label: tag.label(),
            correct,
            anim: Rc::new(RefCell::new(anim)),
        }
    }

    /// Drift, bounce off the canvas edges and age
    pub fn step(&mut self, dt: f32, size: Vec2) {
        self.pos += self.vel * VELOCITY_SCALE * dt;
        if self.pos.x < self.radius || self.pos.x > size.x - self.radius {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y < self.radius || self.pos.y > size.y - self.radius {
            self.vel.y = -self.vel.y;
        }
        self.life -= dt;
        if let Ok(mut anim) = self.anim.try_borrow_mut() {
            anim.wobble += dt * 3.0;
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.pos.distance(point) < self.radius
    }

    pub fn is_expired(&self) -> bool {
        self.life <= 0.0
    }

    pub fn sprite_index(&self) -> usize {
        self.tag.sprite_index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn orb_at(pos: Vec2, vel: Vec2) -> Orb {
        Orb {
            pos,
            vel,
            radius: 40.0,
            life: 12.0,
            tag: Tag::Num(1),
            label: "1".into(),
            correct: true,
            anim: Rc::new(RefCell::new(OrbAnim::default())),
        }
    }

    #[test]
    fn test_spawn_inside_margins() {
        let mut rng = Pcg32::seed_from_u64(42);
        let size = Vec2::new(800.0, 600.0);
        for _ in 0..100 {
            let orb = Orb::spawn(&mut rng, size, 1.6, Tag::Num(3), false);
            assert!(orb.pos.x >= 60.0 && orb.pos.x < 740.0);
            assert!(orb.pos.y >= 120.0 && orb.pos.y < 480.0);
            assert!(orb.radius >= 34.0 && orb.radius < 52.0);
            assert!(orb.vel.x.abs() <= 1.6 && orb.vel.y.abs() <= 1.6);
            assert!(orb.life >= 10.0 && orb.life < 14.0);
            assert_eq!(orb.label, "3");
        }
    }

    #[test]
    fn test_spawn_on_tiny_canvas() {
        let mut rng = Pcg32::seed_from_u64(1);
        let orb = Orb::spawn(&mut rng, Vec2::new(50.0, 50.0), 1.0, Tag::Num(0), true);
        assert_eq!(orb.pos, Vec2::new(60.0, 120.0));
    }

    #[test]
    fn test_bounce_off_right_edge() {
        let mut orb = orb_at(Vec2::new(795.0, 300.0), Vec2::new(2.0, 0.0));
        orb.step(1.0 / 60.0, Vec2::new(800.0, 600.0));
        assert!(orb.vel.x < 0.0);
        assert_eq!(orb.vel.y, 0.0);
    }

    #[test]
    fn test_hit_circle() {
        let orb = orb_at(Vec2::new(100.0, 100.0), Vec2::ZERO);
        assert!(orb.contains(Vec2::new(120.0, 120.0)));
        assert!(!orb.contains(Vec2::new(140.0, 100.0)));
    }

    #[test]
    fn test_ages_and_wobbles() {
        let mut orb = orb_at(Vec2::new(300.0, 300.0), Vec2::ZERO);
        orb.step(0.5, Vec2::new(800.0, 600.0));
        assert_eq!(orb.life, 11.5);
        assert_eq!(orb.anim.borrow().wobble, 1.5);
        assert!(!orb.is_expired());
    }
}
