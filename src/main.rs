//! Otter River entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement, KeyboardEvent};

    use otter_river::audio::{AudioManager, SoundEffect};
    use otter_river::consts::*;
    use otter_river::cosmetics;
    use otter_river::hud::{HudSnapshot, format_time};
    use otter_river::leaderboard::{DISPLAY_ROWS, Leaderboard, LeaderboardEntry};
    use otter_river::platform::{
        FrameClock, KeyValueStore, KeyboardState, LocalStore, MemoryStore, is_scroll_key,
    };
    use otter_river::renderer::{RenderState, build_scene};
    use otter_river::settings::Settings;
    use otter_river::sim::{GameEvent, GamePhase, GameState};
    use otter_river::tuning::Tuning;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        keyboard: KeyboardState,
        clock: FrameClock,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        settings: Settings,
        leaderboard: Leaderboard,
        store: Box<dyn KeyValueStore>,
        audio: AudioManager,
        /// Final stats of the run that just ended
        last_result: Option<GameEvent>,
        /// Whether `last_result` already went onto the leaderboard
        submitted: bool,
        /// Last text written to each HUD field
        hud_cache: Option<HudSnapshot>,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let store: Box<dyn KeyValueStore> = match LocalStore::open() {
                Ok(store) => Box::new(store),
                Err(e) => {
                    log::warn!("LocalStorage unavailable ({}), scores won't persist", e);
                    Box::new(MemoryStore::new())
                }
            };
            let settings = Settings::load(store.as_ref());
            let leaderboard = Leaderboard::load(store.as_ref());
            let mut audio = AudioManager::new();
            audio.apply_settings(&settings);

            Self {
                state: GameState::new(seed, Tuning::default()),
                render_state: None,
                keyboard: KeyboardState::new(),
                clock: FrameClock::new(),
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                settings,
                leaderboard,
                store,
                audio,
                last_result: None,
                submitted: false,
                hud_cache: None,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let frame = self.clock.step(dt, &mut self.keyboard, &mut self.state);

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }

            if frame.run_started {
                self.audio.resume();
                self.audio.play(SoundEffect::Start);
            }

            for event in self.state.drain_events() {
                self.audio.play(SoundEffect::for_event(&event));
                if let GameEvent::GameOver { score, .. } = event {
                    self.finish_run(event, score);
                }
            }
        }

        /// Record unlocks for a finished run and wait for the name
        fn finish_run(&mut self, event: GameEvent, score: u64) {
            self.last_result = Some(event);
            self.submitted = false;
            match cosmetics::unlock_for_score(self.store.as_mut(), score) {
                Ok(fresh) => {
                    if self.settings.adopt_unlocks(&fresh) {
                        self.save_settings();
                    }
                }
                Err(e) => log::warn!("Failed to store unlocks: {}", e),
            }
        }

        fn save_settings(&mut self) {
            if let Err(e) = self.settings.save(self.store.as_mut()) {
                log::warn!("Failed to save settings: {}", e);
            }
        }

        /// Put the finished run on the leaderboard under `name`
        fn submit_score(&mut self, name: &str) {
            if self.submitted {
                return;
            }
            let Some(entry) = self
                .last_result
                .as_ref()
                .and_then(|event| LeaderboardEntry::from_event(name, event))
            else {
                return;
            };
            let is_best = self.leaderboard.best_score().is_none_or(|best| entry.score > best);
            let rank = self.leaderboard.submit(entry);
            self.submitted = true;
            log::info!("Score submitted at rank {}", rank);

            if let Err(e) = self.leaderboard.save(self.store.as_mut()) {
                log::warn!("Failed to save leaderboard: {}", e);
            }
            if is_best {
                self.audio.play(SoundEffect::HighScore);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = build_scene(&self.state, &self.settings);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, document: &Document) {
            let hud = HudSnapshot::from_state(&self.state);
            let old = self.hud_cache.take();

            let fields = [
                ("score", &hud.score, old.as_ref().map(|o| &o.score)),
                ("lives", &hud.lives, old.as_ref().map(|o| &o.lives)),
                ("level", &hud.level, old.as_ref().map(|o| &o.level)),
                ("timer", &hud.timer, old.as_ref().map(|o| &o.timer)),
            ];
            for (id, text, prev) in fields {
                if prev != Some(text) {
                    set_text(document, id, text);
                }
            }

            if let Some(el) = document.get_element_by_id("fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "");
                    el.set_text_content(Some(&self.fps.to_string()));
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            if old.as_ref().is_none_or(|o| o.phase != hud.phase) {
                set_visible(document, "start-screen", hud.phase == GamePhase::Ready);
                set_visible(document, "pause-menu", hud.phase == GamePhase::Paused);
                set_visible(document, "game-over", hud.phase == GamePhase::GameOver);

                if let Some(GameEvent::GameOver {
                    score,
                    level,
                    time_secs,
                }) = self.last_result
                {
                    if hud.phase == GamePhase::GameOver {
                        set_text(document, "final-score", &score.to_string());
                        set_text(document, "final-level", &level.to_string());
                        set_text(document, "final-time", &format_time(time_secs));
                        self.render_leaderboard(document);
                    }
                }
            }

            self.hud_cache = Some(hud);
        }

        /// Fill the leaderboard list with the top rows
        fn render_leaderboard(&self, document: &Document) {
            let Some(list) = document.get_element_by_id("leaderboard-list") else {
                return;
            };
            list.set_inner_html("");
            for (i, entry) in self.leaderboard.top(DISPLAY_ROWS).iter().enumerate() {
                let Ok(item) = document.create_element("li") else {
                    continue;
                };
                item.set_text_content(Some(&format!(
                    "{}. {} - {} (level {}, {})",
                    i + 1,
                    entry.name,
                    entry.score,
                    entry.level,
                    format_time(entry.time)
                )));
                let _ = list.append_child(&item);
            }
        }

        /// Reset game state and go straight into a new run
        fn restart(&mut self, seed: u64) {
            self.state.restart(seed);
            self.clock.reset();
            self.keyboard.release_all();
            self.keyboard.request_start();
            self.last_result = None;
            self.submitted = false;
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Otter River starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU; the game still runs (HUD, audio) without it
        match init_renderer(canvas.clone(), width, height).await {
            Some(render_state) => game.borrow_mut().render_state = Some(render_state),
            None => log::error!("No renderer available, running without graphics"),
        }

        setup_input_handlers(game.clone());
        setup_buttons(game.clone());
        setup_auto_pause(game.clone());

        // Show HUD
        set_visible(&document, "hud", true);

        // Start game loop
        request_animation_frame(game);

        log::info!("Otter River running!");
    }

    async fn init_renderer(
        canvas: HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Option<RenderState> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas)) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return None;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {}", e);
                return None;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height).await {
            Ok(render_state) => Some(render_state),
            Err(e) => {
                log::error!("{}", e);
                None
            }
        }
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                // Typing a name on the game-over screen is not steering
                if is_text_input_focused() {
                    return;
                }
                let key = event.key();
                // Keep arrows and space from scrolling the page
                if is_scroll_key(&key) {
                    event.prevent_default();
                }
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.keyboard.key_down(&key);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keyboard.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn is_text_input_focused() -> bool {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.active_element())
            .is_some_and(|el| el.dyn_ref::<HtmlInputElement>().is_some())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }

    fn on_click(
        document: &Document,
        id: &str,
        handler: impl FnMut(web_sys::MouseEvent) + 'static,
    ) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Missing #{}", id);
            return;
        };
        let closure = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(handler);
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        // Start screen
        {
            let game = game.clone();
            on_click(&document, "start-btn", move |_| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.keyboard.request_start();
            });
        }

        // Pause menu resume
        {
            let game = game.clone();
            on_click(&document, "resume-btn", move |_| {
                game.borrow_mut().keyboard.request_pause();
            });
        }

        // Restart
        {
            let game = game.clone();
            on_click(&document, "restart-btn", move |_| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().restart(seed);
                log::info!("Game restarted with seed: {}", seed);
            });
        }

        // Submit score
        on_click(&document, "submit-score", move |_| {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let name = document
                .get_element_by_id("player-name")
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                .map(|input| input.value())
                .unwrap_or_default();
            let mut g = game.borrow_mut();
            g.submit_score(&name);
            g.render_leaderboard(&document);
        });
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    g.keyboard.release_all();
                    if g.state.phase == GamePhase::Playing {
                        g.keyboard.request_pause();
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside): held keys would otherwise stick
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.keyboard.release_all();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
                if g.state.phase == GamePhase::Playing {
                    g.keyboard.request_pause();
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window focus: restore the configured mute
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                let muted = g.settings.muted;
                g.audio.set_muted(muted);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Longest headless run, in simulated seconds
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_CAP_SECS: f32 = 600.0;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use otter_river::consts::SIM_DT;
    use otter_river::cosmetics;
    use otter_river::hud::format_time;
    use otter_river::leaderboard::{Leaderboard, LeaderboardEntry};
    use otter_river::platform::MemoryStore;
    use otter_river::sim::{GameEvent, GameState, steer, tick};
    use std::time::{SystemTime, UNIX_EPOCH};

    env_logger::init();
    log::info!("Otter River (native) starting...");
    log::info!("Native mode runs a headless autopilot session - use `trunk serve` to play");

    let tuning = load_tuning();
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let mut state = GameState::new(seed, tuning);
    let max_ticks = (HEADLESS_CAP_SECS / SIM_DT) as u64;

    let mut result = None;
    while result.is_none() && state.time_ticks < max_ticks {
        let input = steer(&state);
        tick(&mut state, &input, SIM_DT);
        for event in state.drain_events() {
            match event {
                GameEvent::GameOver { .. } => result = Some(event),
                GameEvent::LevelUp { .. } | GameEvent::Hit { .. } => log::info!("{:?}", event),
                GameEvent::Collected { .. } => log::debug!("{:?}", event),
            }
        }
    }

    let result = result.unwrap_or_else(|| {
        log::info!("Time cap reached");
        GameEvent::GameOver {
            score: state.score,
            level: state.level,
            time_secs: state.elapsed_secs() as u32,
        }
    });

    let mut store = MemoryStore::new();
    let mut leaderboard = Leaderboard::load(&store);
    if let Some(entry) = LeaderboardEntry::from_event("Autopilot", &result) {
        log::info!(
            "Final: score {} level {} time {}",
            entry.score,
            entry.level,
            format_time(entry.time)
        );
        let rank = leaderboard.submit(entry);
        log::info!("Leaderboard rank {} of {}", rank, leaderboard.len());
    }
    if let Err(e) = leaderboard.save(&mut store) {
        log::warn!("Failed to save leaderboard: {}", e);
    }
    match cosmetics::unlock_for_score(&mut store, state.score) {
        Ok(fresh) => {
            for cosmetic in fresh {
                log::info!("Would unlock {}", cosmetic.display_name());
            }
        }
        Err(e) => log::warn!("Failed to store unlocks: {}", e),
    }
}

/// Tuning from `OTTER_RIVER_TUNING`, or the defaults
#[cfg(not(target_arch = "wasm32"))]
fn load_tuning() -> otter_river::Tuning {
    use otter_river::Tuning;

    let Ok(path) = std::env::var("OTTER_RIVER_TUNING") else {
        return Tuning::default();
    };
    let json = match std::fs::read_to_string(&path) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Can't read tuning file {}: {}, using defaults", path, e);
            return Tuning::default();
        }
    };
    match Tuning::from_json(&json) {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path);
            tuning
        }
        Err(e) => {
            log::warn!("Bad tuning file {}: {}, using defaults", path, e);
            Tuning::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
