//! Game shell: the engine, the scene manager and the frame clock
//!
//! The platform layer owns one `Game` and forwards animation frames, input
//! and button presses to it.

use glam::Vec2;

use crate::Engine;
use crate::play::PlayScene;
use crate::platform::FrameClock;
use crate::renderer::Surface;
use crate::scene::SceneManager;
use crate::settings::Settings;
use crate::sim::{PlayerState, RoundSettings};

pub struct Game {
    engine: Engine,
    scenes: SceneManager,
    frame: FrameClock,
    paused: bool,
}

impl Game {
    /// Apply stored preferences and enter the play scene
    pub fn new(mut engine: Engine) -> Self {
        let settings = Settings::load(engine.save());
        engine.set_sfx(settings.sfx_on);

        let mut scenes = SceneManager::new();
        let play = PlayScene::new(&engine);
        scenes.set(&mut engine, Box::new(play));

        Self {
            engine,
            scenes,
            frame: FrameClock::new(),
            paused: false,
        }
    }

    /// One animation frame at `ts_ms` (milliseconds)
    pub fn frame(&mut self, ts_ms: f64, surface: &mut dyn Surface) {
        let dt = self.frame.tick(ts_ms);
        let dt = if self.paused { 0.0 } else { dt };
        self.scenes.update(&mut self.engine, dt);

        let size = self.engine.size();
        surface.clear(size.x, size.y);
        self.scenes.draw(&mut self.engine, surface, ts_ms / 1000.0);
    }

    pub fn pointer(&mut self, x: f32, y: f32) {
        if !self.paused {
            self.scenes.pointer(&mut self.engine, x, y);
        }
    }

    pub fn touch(&mut self, points: &[Vec2]) {
        if !self.paused {
            self.scenes.touch(&mut self.engine, points);
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.engine.resize(Vec2::new(width, height));
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            log::info!("{}", if paused { "Paused" } else { "Resumed" });
        }
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// New game from level 1 with full lives
    pub fn restart(&mut self) {
        let play = PlayScene::new_game(&mut self.engine);
        self.scenes.set(&mut self.engine, Box::new(play));
        self.paused = false;
    }

    /// Persist preferences and round settings, then start a fresh round
    pub fn apply_settings(&mut self, settings: Settings, round: RoundSettings) {
        let save = self.engine.save();
        let mut state = PlayerState::load(save);
        state.apply(&round);
        state.save(save);
        settings.save(save);
        self.engine.set_sfx(settings.sfx_on);

        let play = PlayScene::new(&self.engine);
        self.scenes.set(&mut self.engine, Box::new(play));
        self.paused = false;
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Modes;
    use crate::audio::SoundEffect;
    use crate::audio::testing::RecordingAudio;
    use crate::renderer::NullSurface;
    use crate::renderer::testing::{DrawCmd, RecordingSurface};
    use crate::sim::Difficulty;
    use crate::ui::testing::RecordingHud;

    fn game() -> Game {
        Game::new(Engine::headless(Vec2::new(800.0, 600.0), 11))
    }

    #[test]
    fn test_frame_clears_first() {
        let mut game = game();
        let mut surface = RecordingSurface::default();
        game.frame(1000.0, &mut surface);
        assert_eq!(surface.cmds.first(), Some(&DrawCmd::Clear));
        assert!(surface.cmds.iter().any(|c| matches!(c, DrawCmd::Sprite { .. })));
    }

    #[test]
    fn test_new_enters_play_and_syncs_hud() {
        let hud = RecordingHud::default();
        let log = hud.log.clone();
        let engine = Engine::headless(Vec2::new(800.0, 600.0), 2).with_hud(Box::new(hud));
        let _game = Game::new(engine);

        let log = log.borrow();
        assert_eq!(log.level, 1);
        assert_eq!(log.lives, 3);
        assert!(!log.prompt.is_empty());
    }

    #[test]
    fn test_stored_sfx_flag_applied() {
        let audio = RecordingAudio::default();
        let played = audio.played.clone();
        let engine = Engine::headless(Vec2::new(800.0, 600.0), 2).with_audio(Box::new(audio));
        engine.save().set("SFX_ON", &false);

        let mut game = Game::new(engine);
        assert!(!game.engine().sfx_on());
        game.engine.play(SoundEffect::Good);
        assert!(played.borrow().is_empty());
    }

    #[test]
    fn test_paused_frames_do_not_advance() {
        let mut game = game();
        game.frame(0.0, &mut NullSurface);
        game.set_paused(true);
        for i in 1..=2000 {
            game.frame(i as f64 * 50.0, &mut NullSurface);
        }
        let state = PlayerState::load(game.engine().save());
        assert_eq!(state.lives, 3);

        // Taps while paused are ignored
        game.pointer(400.0, 300.0);
        game.set_paused(false);
        assert!(!game.is_paused());
    }

    #[test]
    fn test_timeouts_reach_game_over() {
        let mut game = game();
        let mut ts = 0.0;
        // 3 rounds of 30 s at 50 ms per frame, plus slack for round restarts
        for _ in 0..2000 {
            game.frame(ts, &mut NullSurface);
            ts += 50.0;
        }
        let state = PlayerState::load(game.engine().save());
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_restart_resets_progress() {
        let mut game = game();
        let spent = PlayerState {
            level: 4,
            lives: 0,
            score: 50,
            ..Default::default()
        };
        spent.save(game.engine().save());
        game.restart();

        let state = PlayerState::load(game.engine().save());
        assert_eq!((state.level, state.lives, state.score, state.streak), (1, 3, 0, 0));
    }

    #[test]
    fn test_apply_settings_persists() {
        let mut game = game();
        let settings = Settings {
            modes: Modes {
                numbers: false,
                letters: true,
                colors: false,
                addsub: false,
                shapes: false,
            },
            sfx_on: false,
            music_on: false,
        };
        let round = RoundSettings {
            targets_per_round: 2,
            round_time: 20.0,
            difficulty: Difficulty::Hard,
        };
        game.apply_settings(settings, round);

        let save = game.engine().save();
        let state = PlayerState::load(save);
        assert_eq!(state.targets_per_round, 2);
        assert_eq!(state.round_time, 20.0);
        assert_eq!(state.difficulty, Difficulty::Hard);
        assert_eq!(Settings::load(save), settings);
        assert!(!game.engine().sfx_on());
    }

    #[test]
    fn test_resize() {
        let mut game = game();
        game.resize(1024.0, 768.0);
        assert_eq!(game.engine().size(), Vec2::new(1024.0, 768.0));
    }
}
