//! Asteroids Arcade entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use asteroids_arcade::consts::{ARENA_HEIGHT, ARENA_WIDTH};
    use asteroids_arcade::platform::{CancelToken, SurfaceSlot};
    use asteroids_arcade::platform::canvas::Canvas2d;
    use asteroids_arcade::renderer::present;
    use asteroids_arcade::{GameLoop, Settings, Tuning};

    const CANVAS_ID: &str = "canvas";

    /// Handle of the pending animation frame request
    type FrameHandle = Rc<Cell<Option<i32>>>;

    /// Game instance plus the canvas it draws on
    struct Host {
        game: GameLoop,
        surface: SurfaceSlot<Canvas2d>,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Asteroids starting...");

        let window = web_sys::window().expect("no window");
        let element = window
            .document()
            .and_then(|d| d.get_element_by_id(CANVAS_ID));

        // Configuration rides on the canvas element as JSON data attributes
        let tuning_json = element.as_ref().and_then(|e| e.get_attribute("data-tuning"));
        let settings_json = element.as_ref().and_then(|e| e.get_attribute("data-settings"));
        let tuning = Tuning::load_or_default(tuning_json.as_deref());
        let settings = Settings::load_or_default(settings_json.as_deref());

        match element.map(|e| e.dyn_into::<HtmlCanvasElement>()) {
            Some(Ok(canvas)) => {
                canvas.set_width(ARENA_WIDTH as u32);
                canvas.set_height(ARENA_HEIGHT as u32);
            }
            _ => log::warn!("No #{} canvas yet, frames will not be drawn", CANVAS_ID),
        }

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Host {
            game: GameLoop::new(seed, tuning, settings),
            surface: SurfaceSlot::new(),
        }));
        let cancel = CancelToken::new();
        let handle: FrameHandle = Rc::new(Cell::new(None));

        setup_input_handlers(&window, game.clone());
        setup_teardown(&window, cancel.clone(), handle.clone());

        request_animation_frame(game, cancel, handle);

        log::info!("Asteroids running!");
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Host>>) {
        // Key down: only swallow keys the game uses
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().game.key_down(&event.code()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().game.key_up(&event.code()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: keyup events for held keys will never arrive
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().game.release_all();
                log::info!("Focus lost, released all controls");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Stop the frame loop when the page goes away
    fn setup_teardown(window: &web_sys::Window, cancel: CancelToken, handle: FrameHandle) {
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            cancel.cancel();
            if let Some(id) = handle.take() {
                let _ = window_clone.cancel_animation_frame(id);
            }
            log::info!("Page hidden, frame loop stopped");
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(
        game: Rc<RefCell<Host>>,
        cancel: CancelToken,
        handle: FrameHandle,
    ) {
        if cancel.is_cancelled() {
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        let next = handle.clone();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game, cancel, next);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => handle.set(Some(id)),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Host>>, cancel: CancelToken, handle: FrameHandle) {
        handle.set(None);
        if cancel.is_cancelled() {
            return;
        }

        {
            let mut host = game.borrow_mut();
            let host = &mut *host;
            let frame = host.game.frame();

            // Simulate even while the canvas is not mounted
            let surface = host.surface.get_or_lookup(|| Canvas2d::lookup(CANVAS_ID));
            present(&frame, surface);
        }

        request_animation_frame(game, cancel, handle);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    log::info!("Asteroids (native) starting...");
    log::info!("Native mode runs headless - serve the wasm build for the playable version");

    headless::run(headless::FRAMES);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted pilot driving the game without a display
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::{SystemTime, UNIX_EPOCH};

    use asteroids_arcade::renderer::{RecordingSurface, present};
    use asteroids_arcade::{Control, GameLoop, Settings, Tuning};

    /// One minute of play at 60 frames per second
    pub const FRAMES: u32 = 3600;

    const REPORT_EVERY: u32 = 600;

    pub fn run(frames: u32) {
        let tuning = Tuning::load_or_default(std::env::var("ASTEROIDS_TUNING").ok().as_deref());
        let settings =
            Settings::load_or_default(std::env::var("ASTEROIDS_SETTINGS").ok().as_deref());

        let seed = settings.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });
        let mut game = GameLoop::new(seed, tuning, settings);
        let mut surface = RecordingSurface::default();
        let mut games = 1;

        game.press(Control::RotateLeft);
        for n in 1..=frames {
            steer(&mut game, n);

            let frame = game.frame();
            surface.commands.clear();
            present(&frame, Some(&mut surface));

            if game.state().terminal {
                log::info!(
                    "Game {} over at frame {}: score {}, wave {}",
                    games,
                    n,
                    game.state().score,
                    game.state().wave
                );
                game.press(Control::Restart);
                games += 1;
            } else {
                game.release(Control::Restart);
            }

            if n % REPORT_EVERY == 0 {
                let state = game.state();
                log::info!(
                    "Frame {}: wave {}, score {}, lives {}, {} asteroids, {} draw commands",
                    n,
                    state.wave,
                    state.score,
                    state.lives,
                    state.asteroids.len(),
                    surface.commands.len()
                );
            }
        }

        let state = game.state();
        log::info!(
            "Finished {} frames over {} game(s): score {}, wave {}, lives {}",
            frames,
            games,
            state.score,
            state.wave,
            state.lives
        );
        match serde_json::to_string(state) {
            Ok(json) => log::debug!("Final state: {}", json),
            Err(e) => log::warn!("Could not serialize final state: {}", e),
        }
    }

    /// Spin slowly, tap fire every few frames and thrust in bursts
    fn steer(game: &mut GameLoop, frame: u32) {
        if frame % 8 == 0 {
            game.press(Control::Fire);
        } else {
            game.release(Control::Fire);
        }

        if frame % 240 < 30 {
            game.press(Control::Thrust);
        } else {
            game.release(Control::Thrust);
        }
    }
}
