//! Catch Stars entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, PointerEvent, TouchEvent};

    use catch_stars::audio::AudioManager;
    use catch_stars::persistence::{LocalStorage, Save};
    use catch_stars::platform::PerformanceClock;
    use catch_stars::renderer::CanvasSurface;
    use catch_stars::ui::DomHud;
    use catch_stars::{Engine, Game};

    /// Everything the browser callbacks share
    struct App {
        game: Game,
        surface: CanvasSurface,
        /// Second handle on the HUD elements, for the pause overlay buttons
        overlay: DomHud,
    }

    impl App {
        fn fit_canvas(&mut self) {
            let canvas = self.surface.canvas();
            let w = canvas.client_width().max(1) as u32;
            let h = canvas.client_height().max(1) as u32;
            self.surface.resize(w, h);
            self.game.resize(w as f32, h as f32);
        }

        fn pause(&mut self, title: &str) {
            self.game.set_paused(true);
            self.overlay.show_overlay(title);
        }

        fn resume(&mut self) {
            self.game.set_paused(false);
            self.overlay.hide_overlay();
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Catch Stars starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .ok_or("no #game canvas")?
            .dyn_into()?;
        let surface = CanvasSurface::new(canvas.clone()).ok_or("no 2d context")?;

        let save = match LocalStorage::open() {
            Some(storage) => Save::new(Box::new(storage)),
            None => {
                log::warn!("localStorage unavailable - progress will not persist");
                Save::in_memory()
            }
        };

        let seed = js_sys::Date::now() as u64;
        let size = Vec2::new(canvas.client_width() as f32, canvas.client_height() as f32);
        let engine = Engine::new(size, seed, Box::new(PerformanceClock::new()), save)
            .with_audio(Box::new(AudioManager::new()))
            .with_hud(Box::new(DomHud::new(&document)));
        log::info!("Engine initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            game: Game::new(engine),
            surface,
            overlay: DomHud::new(&document),
        }));
        app.borrow_mut().fit_canvas();

        setup_input_handlers(&canvas, app.clone());
        setup_buttons(&document, app.clone());
        setup_auto_pause(&document, app.clone());

        request_animation_frame(app);

        log::info!("Catch Stars running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                // touchstart delivers these
                if event.pointer_type() == "touch" {
                    return;
                }
                let (x, y) = (event.offset_x() as f32, event.offset_y() as f32);
                app.borrow_mut().game.pointer(x, y);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let rect = canvas_clone.get_bounding_client_rect();
                let touches = event.changed_touches();
                let points: Vec<Vec2> = (0..touches.length())
                    .filter_map(|i| touches.get(i))
                    .map(|t| {
                        Vec2::new(
                            (t.client_x() as f64 - rect.left()) as f32,
                            (t.client_y() as f64 - rect.top()) as f32,
                        )
                    })
                    .collect();
                app.borrow_mut().game.touch(&points);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().fit_canvas();
            });
            if let Some(window) = web_sys::window() {
                let _ = window
                    .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }
    }

    fn on_click(document: &Document, id: &str, app: Rc<RefCell<App>>, action: fn(&mut App)) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Button #{} missing", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            action(&mut app.borrow_mut());
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, app: Rc<RefCell<App>>) {
        on_click(document, "btnPause", app.clone(), |a| a.pause("Paused"));
        on_click(document, "btnResume", app.clone(), App::resume);
        on_click(document, "btnRestart", app, |a| {
            a.game.restart();
            a.overlay.hide_overlay();
            log::info!("Game restarted");
        });
    }

    fn setup_auto_pause(document: &Document, app: Rc<RefCell<App>>) {
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                let mut a = app.borrow_mut();
                if !a.game.is_paused() {
                    a.pause("Paused");
                    log::info!("Auto-paused (tab hidden)");
                }
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            let App { game, surface, .. } = &mut *a;
            game.frame(time, surface);
        }
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Catch Stars (native) starting...");
    log::info!("Native mode runs a headless demo - use `trunk serve` for the web version");

    headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// A minute of simulated play with a random tap every half second
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo() {
    use catch_stars::persistence::Save;
    use catch_stars::platform::ManualClock;
    use catch_stars::renderer::NullSurface;
    use catch_stars::sim::PlayerState;
    use catch_stars::ui::LogHud;
    use catch_stars::{Engine, Game};
    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    let size = Vec2::new(960.0, 640.0);
    let clock = ManualClock::new();
    let engine = Engine::new(size, 42, Box::new(clock.clone()), Save::in_memory())
        .with_hud(Box::new(LogHud));
    let mut game = Game::new(engine);
    let mut taps = Pcg32::seed_from_u64(7);

    for frame in 0..60 * 60 {
        clock.advance(FRAME_MS);
        game.frame(frame as f64 * FRAME_MS, &mut NullSurface);
        if frame % 30 == 0 {
            let x = taps.random_range(0.0..size.x);
            let y = taps.random_range(0.0..size.y);
            game.pointer(x, y);
        }
    }

    let state = PlayerState::load(game.engine().save());
    println!(
        "Demo finished: level {}, score {}, lives {}, best stars {}",
        state.level, state.score, state.lives, state.best_stars
    );
}
