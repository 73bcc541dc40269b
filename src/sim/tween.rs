//! Time-based property tweens
//!
//! Tweens are driven by absolute clock time rather than accumulated frame
//! deltas, so a dropped frame never stretches an animation.

use std::cell::RefCell;
use std::rc::Rc;

use crate::clamp;

/// Numeric properties a tween can drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prop {
    X,
    Y,
    Scale,
    Alpha,
    Radius,
}

/// Anything with named numeric properties
pub trait Tweenable {
    /// Current value, or `None` if the target has no such property
    fn get(&self, prop: Prop) -> Option<f32>;
    fn set(&mut self, prop: Prop, value: f32);
}

/// Shared, mutable tween target
pub type TweenTarget = Rc<RefCell<dyn Tweenable>>;

/// Completion callback
pub type OnDone = Box<dyn FnOnce()>;

/// Easing curves mapping progress in [0, 1] to a blend factor
#[derive(Debug, Clone, Copy)]
pub enum Easing {
    Linear,
    QuadOut,
    QuadIn,
    /// Cubic overshoot past 1 before settling
    BackOut,
    ExpoOut,
    Custom(fn(f32) -> f32),
}

impl Easing {
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadIn => t * t,
            Easing::BackOut => {
                let c1 = 1.70158;
                let c3 = c1 + 1.0;
                1.0 + c3 * (t - 1.0).powi(3) + c1 * (t - 1.0).powi(2)
            }
            Easing::ExpoOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f32.powf(-10.0 * t)
                }
            }
            Easing::Custom(f) => f(t),
        }
    }
}

/// Handle returned by [`TweenScheduler::schedule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenId(u64);

struct Channel {
    prop: Prop,
    from: f32,
    to: f32,
}

struct Tween {
    id: TweenId,
    target: TweenTarget,
    channels: Vec<Channel>,
    start_ms: f64,
    duration_ms: f64,
    easing: Easing,
    on_done: Option<OnDone>,
}

impl Tween {
    fn progress(&self, now_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        clamp(((now_ms - self.start_ms) / self.duration_ms) as f32, 0.0, 1.0)
    }
}

/// Set of in-flight tweens
#[derive(Default)]
pub struct TweenScheduler {
    active: Vec<Tween>,
    next_id: u64,
}

impl TweenScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tween starting at `now_ms`.
    ///
    /// Start values are read from the target immediately. Properties the
    /// target doesn't expose are ignored.
    pub fn schedule(
        &mut self,
        now_ms: f64,
        target: TweenTarget,
        props: &[(Prop, f32)],
        duration_ms: f64,
        easing: Easing,
        on_done: Option<OnDone>,
    ) -> TweenId {
        let channels = {
            let t = target.borrow();
            props
                .iter()
                .filter_map(|&(prop, to)| {
                    let from = t.get(prop);
                    if from.is_none() {
                        log::debug!("Tween target has no {:?}, skipping", prop);
                    }
                    from.map(|from| Channel { prop, from, to })
                })
                .collect()
        };

        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.active.push(Tween {
            id,
            target,
            channels,
            start_ms: now_ms,
            duration_ms,
            easing,
            on_done,
        });
        id
    }

    /// Advance every tween to `now_ms`, retiring the finished ones
    pub fn advance(&mut self, now_ms: f64) {
        let mut finished = Vec::new();

        for (i, tween) in self.active.iter().enumerate() {
            let k = tween.progress(now_ms);
            let blend = tween.easing.apply(k);
            match tween.target.try_borrow_mut() {
                Ok(mut target) => {
                    for ch in &tween.channels {
                        target.set(ch.prop, ch.from + (ch.to - ch.from) * blend);
                    }
                }
                Err(_) => {
                    log::debug!("Tween {:?} target busy, skipping frame", tween.id);
                    continue;
                }
            }
            if k >= 1.0 {
                finished.push(i);
            }
        }

        // Remove back to front so earlier indices stay valid
        let mut done = Vec::with_capacity(finished.len());
        for i in finished.into_iter().rev() {
            done.push(self.active.remove(i));
        }
        for mut tween in done.into_iter().rev() {
            if let Some(cb) = tween.on_done.take() {
                cb();
            }
        }
    }

    /// Whether the tween is still running
    pub fn is_active(&self, id: TweenId) -> bool {
        self.active.iter().any(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct Dot {
        x: f32,
        scale: f32,
    }

    impl Tweenable for Dot {
        fn get(&self, prop: Prop) -> Option<f32> {
            match prop {
                Prop::X => Some(self.x),
                Prop::Scale => Some(self.scale),
                _ => None,
            }
        }

        fn set(&mut self, prop: Prop, value: f32) {
            match prop {
                Prop::X => self.x = value,
                Prop::Scale => self.scale = value,
                _ => {}
            }
        }
    }

    const ALL_EASINGS: [Easing; 5] = [
        Easing::Linear,
        Easing::QuadOut,
        Easing::QuadIn,
        Easing::BackOut,
        Easing::ExpoOut,
    ];

    #[test]
    fn test_endpoints_for_every_easing() {
        for easing in ALL_EASINGS {
            let dot = Rc::new(RefCell::new(Dot { x: 10.0, scale: 1.0 }));
            let mut tweens = TweenScheduler::new();
            tweens.schedule(1000.0, dot.clone(), &[(Prop::X, 50.0)], 200.0, easing, None);

            tweens.advance(1000.0);
            assert!((dot.borrow().x - 10.0).abs() < 1e-4, "{:?} start", easing);

            tweens.advance(1200.0);
            assert!((dot.borrow().x - 50.0).abs() < 1e-4, "{:?} end", easing);
            assert!(tweens.is_empty());
        }
    }

    #[test]
    fn test_from_snapshotted_at_schedule() {
        let dot = Rc::new(RefCell::new(Dot { x: 0.0, scale: 0.8 }));
        let mut tweens = TweenScheduler::new();
        tweens.schedule(0.0, dot.clone(), &[(Prop::Scale, 1.0)], 100.0, Easing::Linear, None);

        // Changing the target before the first advance must not move the start
        dot.borrow_mut().scale = 5.0;
        tweens.advance(50.0);
        assert!((dot.borrow().scale - 0.9).abs() < 1e-5);
    }

    #[test]
    fn test_callback_fires_once_after_final_write() {
        let dot = Rc::new(RefCell::new(Dot::default()));
        let fired = Rc::new(Cell::new(0));
        let seen = Rc::new(Cell::new(0.0));

        let mut tweens = TweenScheduler::new();
        let (f, s, d) = (fired.clone(), seen.clone(), dot.clone());
        let id = tweens.schedule(
            0.0,
            dot.clone(),
            &[(Prop::X, 3.0)],
            100.0,
            Easing::QuadOut,
            Some(Box::new(move || {
                f.set(f.get() + 1);
                s.set(d.borrow().x);
            })),
        );

        tweens.advance(99.0);
        assert_eq!(fired.get(), 0);
        assert!(tweens.is_active(id));

        tweens.advance(150.0);
        tweens.advance(300.0);
        assert_eq!(fired.get(), 1);
        assert_eq!(seen.get(), 3.0);
        assert!(!tweens.is_active(id));
    }

    #[test]
    fn test_last_applied_wins() {
        let dot = Rc::new(RefCell::new(Dot::default()));
        let mut tweens = TweenScheduler::new();
        tweens.schedule(0.0, dot.clone(), &[(Prop::X, 10.0)], 100.0, Easing::Linear, None);
        tweens.schedule(0.0, dot.clone(), &[(Prop::X, -10.0)], 100.0, Easing::Linear, None);

        tweens.advance(50.0);
        assert!((dot.borrow().x + 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let dot = Rc::new(RefCell::new(Dot::default()));
        let mut tweens = TweenScheduler::new();
        tweens.schedule(0.0, dot.clone(), &[(Prop::X, 7.0)], 0.0, Easing::Linear, None);
        tweens.advance(0.0);
        assert_eq!(dot.borrow().x, 7.0);
        assert!(tweens.is_empty());
    }

    #[test]
    fn test_unknown_prop_ignored() {
        let dot = Rc::new(RefCell::new(Dot::default()));
        let mut tweens = TweenScheduler::new();
        tweens.schedule(0.0, dot.clone(), &[(Prop::Alpha, 1.0), (Prop::X, 2.0)], 10.0, Easing::Linear, None);
        tweens.advance(10.0);
        assert_eq!(dot.borrow().x, 2.0);
    }

    #[test]
    fn test_back_out_overshoots() {
        let peak = (1..100)
            .map(|i| Easing::BackOut.apply(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0);
    }

    proptest! {
        #[test]
        fn prop_easing_endpoints(idx in 0usize..5) {
            let e = ALL_EASINGS[idx];
            prop_assert!(e.apply(0.0).abs() < 1e-5);
            prop_assert!((e.apply(1.0) - 1.0).abs() < 1e-5);
        }

        #[test]
        fn prop_progress_clamped(start in 0.0f64..1e6, dur in 1.0f64..5000.0, late in 0.0f64..1e4) {
            let dot = Rc::new(RefCell::new(Dot::default()));
            let mut tweens = TweenScheduler::new();
            tweens.schedule(start, dot.clone(), &[(Prop::X, 1.0)], dur, Easing::Linear, None);
            tweens.advance(start + dur + late);
            prop_assert_eq!(dot.borrow().x, 1.0);
            prop_assert!(tweens.is_empty());
        }
    }
}
