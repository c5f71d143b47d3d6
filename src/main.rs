//! Neon Dash entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use neon_dash::audio::AudioManager;
    use neon_dash::consts::STEP_MS;
    use neon_dash::input::{Action, InputState, action_for_code};
    use neon_dash::profile::ShopOutcome;
    use neon_dash::renderer::{CanvasSurface, Surface};
    use neon_dash::sim::{GameEvent, RunSummary};
    use neon_dash::skins::SKINS;
    use neon_dash::{FrameDriver, Profile, Rgb, Settings};

    /// Page-level state around the frame driver
    struct Game {
        driver: FrameDriver,
        audio: AudioManager,
        input: InputState,
        profile: Profile,
        settings: Settings,
        surface: Option<CanvasSurface>,
        player_color: Rgb,
        last_time: f64,
        raf_handle: Option<i32>,
    }

    impl Game {
        fn new(settings: Settings, profile: Profile, surface: Option<CanvasSurface>) -> Self {
            let player_color = Rgb::cosmetic_or_default(profile.active().color);
            Self {
                driver: FrameDriver::new(settings.max_particles()),
                audio: AudioManager::new(&settings),
                input: InputState::new(),
                profile,
                settings,
                surface,
                player_color,
                last_time: 0.0,
                raf_handle: None,
            }
        }

        fn start_run(&mut self) -> bool {
            if self.driver.is_running() {
                return false;
            }
            let seed = js_sys::Date::now() as u64;
            self.audio.unlock();
            self.input.clear();
            self.last_time = 0.0;
            if !self.driver.start(seed) {
                return false;
            }
            if let Some(document) = document() {
                set_class(&document, "menu", "hidden");
                set_class(&document, "game-over", "hidden");
                set_class(&document, "hud", "");
                set_text(&document, "hud-level", "1");
                set_text(&document, "hud-orbs", "0");
            }
            true
        }

        /// Leave the play state; the pending frame is cancelled
        fn pause_run(&mut self) {
            if !self.driver.is_running() {
                return;
            }
            self.driver.stop();
            self.input.clear();
            if let (Some(handle), Some(window)) = (self.raf_handle.take(), web_sys::window()) {
                let _ = window.cancel_animation_frame(handle);
            }
            if let Some(document) = document() {
                set_text(&document, "menu-title", "PAUSED");
                set_class(&document, "menu", "");
            }
            log::info!("Auto-paused (tab hidden)");
        }

        /// One animation frame. Returns whether to request another.
        fn frame(&mut self, time: f64) -> bool {
            let dt = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                STEP_MS
            };
            self.last_time = time;

            let input = self.input.take_tick_input();
            let surface = self.surface.as_mut().map(|s| s as &mut dyn Surface);
            let outcome = self.driver.frame(
                &input,
                dt,
                self.player_color,
                time,
                &mut self.audio,
                surface,
            );

            if let Some(document) = document() {
                if let Some(score) = outcome.score {
                    set_text(&document, "hud-distance", &format!("{}m", score.floor()));
                }
                if let Some(state) = self.driver.state() {
                    set_text(&document, "hud-orbs", &state.session_orbs.to_string());
                }
            }

            for event in outcome.events {
                match event {
                    GameEvent::LevelChanged(level) => {
                        log::info!("Reached level {}", level);
                        if let Some(document) = document() {
                            set_text(&document, "hud-level", &level.to_string());
                        }
                    }
                    GameEvent::GameOver(summary) => self.finish_run(&summary),
                }
            }

            outcome.reschedule
        }

        fn finish_run(&mut self, summary: &RunSummary) {
            let new_best = self.profile.record_run(summary);
            self.profile.save();
            log::info!(
                "Game over: {:.0}m, {} orbs, level {}",
                summary.score,
                summary.orbs,
                summary.level
            );

            let Some(document) = document() else { return };
            set_text(&document, "final-distance", &format!("{}m", summary.score.floor()));
            set_text(&document, "final-orbs", &summary.orbs.to_string());
            set_text(&document, "final-level", &summary.level.to_string());
            set_text(
                &document,
                "best-distance",
                &format!("{}m", self.profile.best_score.floor()),
            );
            set_class(
                &document,
                "new-best",
                if new_best { "" } else { "hidden" },
            );
            set_class(&document, "game-over", "");
            self.refresh_shop(&document);
        }

        fn select_skin(&mut self, id: &str) {
            match self.profile.buy_or_select(id) {
                ShopOutcome::Purchased | ShopOutcome::Selected => {
                    self.player_color = Rgb::cosmetic_or_default(self.profile.active().color);
                    self.profile.save();
                }
                ShopOutcome::TooExpensive => log::info!("Not enough orbs for {}", id),
                ShopOutcome::Unknown => log::warn!("Unknown skin {}", id),
            }
            if let Some(document) = document() {
                self.refresh_shop(&document);
            }
        }

        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.audio.apply_settings(&self.settings);
            self.settings.save();
            if let Some(document) = document() {
                set_text(
                    &document,
                    "mute-btn",
                    if self.settings.muted { "SOUND OFF" } else { "SOUND ON" },
                );
            }
        }

        fn cycle_quality(&mut self) {
            self.settings.quality = self.settings.quality.next();
            self.apply_particle_settings();
        }

        fn toggle_particles(&mut self) {
            self.settings.particles = !self.settings.particles;
            self.apply_particle_settings();
        }

        fn apply_particle_settings(&mut self) {
            self.driver.set_max_particles(self.settings.max_particles());
            self.settings.save();
            if let Some(document) = document() {
                self.refresh_settings(&document);
            }
        }

        fn refresh_settings(&self, document: &Document) {
            set_text(document, "quality-btn", self.settings.quality.as_str());
            set_text(
                document,
                "particles-btn",
                if self.settings.particles { "PARTICLES ON" } else { "PARTICLES OFF" },
            );
        }

        /// Shop labels and wallet
        fn refresh_shop(&self, document: &Document) {
            set_text(document, "wallet-orbs", &self.profile.orbs.to_string());
            for skin in &SKINS {
                let label = if self.profile.active_skin == skin.id {
                    "ACTIVE".to_string()
                } else if self.profile.is_unlocked(skin.id) {
                    "SELECT".to_string()
                } else {
                    format!("{} ORBS", skin.price)
                };
                set_text(document, &format!("skin-{}-label", skin.id), &label);
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_class(document: &Document, id: &str, class: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", class);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Neon Dash starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Backing store at device resolution
        let dpr = window.device_pixel_ratio();
        canvas.set_width((canvas.client_width() as f64 * dpr) as u32);
        canvas.set_height((canvas.client_height() as f64 * dpr) as u32);

        let surface = CanvasSurface::new(canvas.clone());
        if surface.is_none() {
            log::error!("Canvas 2D context unavailable - running without rendering");
        }

        let settings = Settings::load();
        let profile = Profile::load();
        let game = Rc::new(RefCell::new(Game::new(settings, profile, surface)));
        game.borrow().refresh_shop(&document);
        game.borrow().refresh_settings(&document);

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());
        setup_auto_pause(game);

        log::info!("Neon Dash ready");
        Ok(())
    }

    fn start(game: &Rc<RefCell<Game>>) {
        if game.borrow_mut().start_run() {
            request_animation_frame(game.clone());
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(action) = action_for_code(&event.code()) {
                    event.prevent_default();
                    let mut g = game.borrow_mut();
                    g.audio.unlock();
                    g.input.press(action);
                } else if event.code() == "Enter" && !game.borrow().driver.is_running() {
                    start(&game);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(action) = action_for_code(&event.code()) {
                    game.borrow_mut().input.release(action);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch holds jump
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.audio.unlock();
                g.input.press(Action::Jump);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.release(Action::Jump);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let handle_game = game.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => handle_game.borrow_mut().raf_handle = Some(handle),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let reschedule = {
            let mut g = game.borrow_mut();
            g.raf_handle = None;
            g.frame(time)
        };

        if reschedule {
            request_animation_frame(game);
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = document() else { return };

        for id in ["start-btn", "retry-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    start(&game);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        let toggles: [(&str, fn(&mut Game)); 3] = [
            ("mute-btn", Game::toggle_mute),
            ("quality-btn", Game::cycle_quality),
            ("particles-btn", Game::toggle_particles),
        ];
        for (id, toggle) in toggles {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    toggle(&mut game.borrow_mut());
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        for skin in &SKINS {
            if let Some(btn) = document.get_element_by_id(&format!("skin-{}", skin.id)) {
                let game = game.clone();
                let id = skin.id;
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().select_skin(id);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let Some(document) = window.document() else { return };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().pause_run();
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur drops held keys
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().input.clear();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use neon_dash::consts::GROUND_Y;
    use neon_dash::sim::{GameState, ObstacleKind, TickInput};

    /// Steps of lookahead per unit of speed
    const LOOKAHEAD_STEPS: f32 = 12.0;

    /// Pick inputs that clear the nearest hazard ahead
    pub fn decide(state: &GameState) -> TickInput {
        let player = &state.player;
        let front = player.pos.x + player.size.x;
        let speed = state.settings.speed;

        let next = state
            .obstacles
            .iter()
            .filter(|o| o.kind.is_hazard() && o.pos.x + o.size.x > player.pos.x)
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

        let Some(hazard) = next else {
            return TickInput::default();
        };
        let gap = hazard.pos.x - front;
        if gap > speed * LOOKAHEAD_STEPS {
            return TickInput::default();
        }

        // Elevated blocks clear a runner on the ground
        let elevated =
            hazard.kind == ObstacleKind::Block && hazard.pos.y + hazard.size.y < GROUND_Y - 0.5;
        if elevated {
            return TickInput::default();
        }
        TickInput {
            jump: true,
            slide: false,
            dash: !player.grounded && gap < speed * 2.0,
        }
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use neon_dash::audio::Silent;
    use neon_dash::color::palette;
    use neon_dash::consts::STEP_MS;
    use neon_dash::sim::GameEvent;
    use neon_dash::{FrameDriver, Settings};

    env_logger::init();
    log::info!("Neon Dash (native) starting...");
    log::info!("Native mode runs a headless autopilot - use `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    let max_steps = 60 * 60 * 5;

    let settings = Settings::default();
    let mut driver = FrameDriver::new(settings.max_particles());
    driver.start(seed);

    let mut summary = None;
    for step in 0..max_steps {
        let Some(state) = driver.state() else { break };
        let input = autopilot::decide(state);
        let outcome = driver.frame(
            &input,
            STEP_MS,
            palette::PLAYER,
            step as f64 * STEP_MS,
            &mut Silent,
            None,
        );
        for event in outcome.events {
            match event {
                GameEvent::LevelChanged(level) => log::info!("Level {} at step {}", level, step),
                GameEvent::GameOver(run) => summary = Some(run),
            }
        }
        if !outcome.reschedule {
            break;
        }
    }

    match summary {
        Some(run) => println!(
            "Crashed: {:.0}m, {} orbs, level {}",
            run.score, run.orbs, run.level
        ),
        None => match driver.state() {
            Some(state) => {
                let run = state.summary();
                println!(
                    "Survived {} steps: {:.0}m, {} orbs, level {}",
                    max_steps, run.score, run.orbs, run.level
                );
            }
            None => println!("Run ended without a summary"),
        },
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
