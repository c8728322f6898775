//! Canvas Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use canvas_pong::input::{Command, LEFT_PADDLE_KEYS, RIGHT_PADDLE_KEYS};
    use canvas_pong::renderer::{DrawList, RenderState, Surface};
    use canvas_pong::sim::{GameEvent, RunState};
    use canvas_pong::{FrameOutcome, Game, Settings, SettingsError};

    /// Browser host: the game plus the resources that drive it
    struct Host {
        game: Game,
        render_state: Option<RenderState>,
        /// Pending requestAnimationFrame handle
        animation_id: Option<i32>,
    }

    impl Host {
        fn new(settings: Settings, seed: u64) -> Result<Self, SettingsError> {
            Ok(Self {
                game: Game::new(settings, seed)?,
                render_state: None,
                animation_id: None,
            })
        }

        /// Run the game's frame against whichever surface is available
        fn frame(&mut self, time: f64) -> FrameOutcome {
            let Host {
                game, render_state, ..
            } = self;
            match render_state {
                Some(rs) => {
                    let outcome = game.frame(time, rs);
                    present(rs);
                    outcome
                }
                None => game.frame(time, &mut DrawList::new()),
            }
        }

        /// Redraw the current state without advancing it
        fn redraw(&mut self) {
            if let Some(ref mut rs) = self.render_state {
                self.game.render(rs);
                present(rs);
            }
        }

        fn reset(&mut self) {
            cancel_frame(self);
            match self.render_state {
                Some(ref mut rs) => {
                    self.game.reset(Some(rs as &mut dyn Surface));
                    present(rs);
                }
                None => self.game.reset(None),
            }
        }

        /// Push any score changes to the DOM
        fn flush_events(&mut self) {
            let changed = self
                .game
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::Scored { .. } | GameEvent::ScoreReset));
            if changed {
                update_score(&self.game);
            }
        }
    }

    fn present(rs: &mut RenderState) {
        match rs.present() {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost) => {
                rs.resize(rs.size.0, rs.size.1);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }

    /// Write both scores into the page
    fn update_score(game: &Game) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let score = game.score();
        if let Some(el) = document.get_element_by_id("player1Score") {
            el.set_text_content(Some(&score.player1.to_string()));
        }
        if let Some(el) = document.get_element_by_id("player2Score") {
            el.set_text_content(Some(&score.player2.to_string()));
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Canvas Pong starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();
        let width = settings.width as u32;
        let height = settings.height as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let playfield = (settings.width, settings.height);
        let host = match Host::new(settings, seed) {
            Ok(host) => Rc::new(RefCell::new(host)),
            Err(e) => {
                log::error!("Cannot start game: {}", e);
                return;
            }
        };
        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, playfield).await;
        {
            let mut h = host.borrow_mut();
            h.render_state = Some(render_state);
            update_score(&h.game);
            h.redraw();
        }

        setup_keyboard(host.clone());
        setup_buttons(host.clone());
        setup_focus_loss(host);

        log::info!("Game Controls:");
        log::info!("Player 1: W (up), S (down)");
        log::info!("Player 2: Arrow Up, Arrow Down");
        log::info!("Enter/Space: start or resume, P/Escape: pause, R: reset");
        log::info!("Use the buttons to start, pause, or reset the game");
    }

    /// Request a frame if the game is live and none is pending
    fn ensure_scheduled(host: &Rc<RefCell<Host>>) {
        let needs_frame = {
            let h = host.borrow();
            h.game.run_state() != RunState::Stopped && h.animation_id.is_none()
        };
        if needs_frame {
            request_animation_frame(host.clone());
        }
    }

    fn cancel_frame(host: &mut Host) {
        if let Some(id) = host.animation_id.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
    }

    fn request_animation_frame(host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let callback_host = host.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(callback_host, time);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => host.borrow_mut().animation_id = Some(id),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(host: Rc<RefCell<Host>>, time: f64) {
        let outcome = {
            let mut h = host.borrow_mut();
            h.animation_id = None;
            let outcome = h.frame(time);
            h.flush_events();
            outcome
        };

        if outcome == FrameOutcome::Continue {
            request_animation_frame(host);
        }
    }

    fn is_game_key(key: &str) -> bool {
        [LEFT_PADDLE_KEYS, RIGHT_PADDLE_KEYS]
            .iter()
            .any(|k| k.up.contains(&key) || k.down.contains(&key))
            || canvas_pong::input::command_for_key(key).is_some()
    }

    fn setup_keyboard(host: Rc<RefCell<Host>>) {
        let window = web_sys::window().expect("no window");

        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if is_game_key(&key) {
                    // Keep arrows and space from scrolling the page
                    event.prevent_default();
                }
                let command = {
                    let mut h = host.borrow_mut();
                    let command = h.game.key_down(&key);
                    if command == Some(Command::Reset) {
                        cancel_frame(&mut h);
                        h.redraw();
                    }
                    h.flush_events();
                    command
                };
                if command.is_some() {
                    ensure_scheduled(&host);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                host.borrow_mut().game.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(host: Rc<RefCell<Host>>) {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .expect("no document");

        if let Some(btn) = document.get_element_by_id("startBtn") {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                if host.borrow_mut().game.start() {
                    ensure_scheduled(&host);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("pauseBtn") {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                host.borrow_mut().game.pause();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("resetBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut h = host.borrow_mut();
                h.reset();
                h.flush_events();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Held keys never see their keyup once the window loses focus
    fn setup_focus_loss(host: Rc<RefCell<Host>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            host.borrow_mut().game.release_all_keys();
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Canvas Pong (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    run_headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play a scripted rally against a recording surface and report the score
#[cfg(not(target_arch = "wasm32"))]
fn run_headless_demo() {
    use canvas_pong::renderer::DrawList;
    use canvas_pong::{FrameOutcome, Game, Settings};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const FRAMES: u32 = 60 * 30;

    let settings = Settings::load();
    let mut game = match Game::new(settings, 0x5eed) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Cannot start game: {}", e);
            return;
        }
    };
    let mut surface = DrawList::new();

    game.key_down("Enter");
    game.key_up("Enter");

    for frame in 0..FRAMES {
        // Left player sweeps up and down; right player camps at the bottom
        if frame % 120 == 0 {
            game.key_up("s");
            game.key_down("w");
        } else if frame % 120 == 60 {
            game.key_up("w");
            game.key_down("s");
        }
        if frame == 0 {
            game.key_down("ArrowDown");
        }

        if game.frame(frame as f64 * FRAME_MS, &mut surface) == FrameOutcome::Stop {
            break;
        }
        for event in game.drain_events() {
            log::debug!("{:?}", event);
        }
    }

    let score = game.score();
    log::info!(
        "After {} ticks: player 1 {} - player 2 {} ({} draw calls in last frame)",
        game.state().time_ticks,
        score.player1,
        score.player2,
        surface.commands.len()
    );
    println!("Final score: {} - {}", score.player1, score.player2);
}
