//! Sky Flap entry point
//!
//! In the browser this wires the DOM, input and the animation-frame loop to
//! the driver, and hands each frame's draw instances to the JS renderer.
//! Natively it runs a headless autopilot session as a smoke test.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        DeviceOrientationEvent, Document, HtmlElement, HtmlInputElement, HtmlSelectElement,
        KeyboardEvent, MouseEvent, TouchEvent,
    };

    use sky_flap::Driver;
    use sky_flap::audio::AudioManager;
    use sky_flap::persistence::LocalStorage;
    use sky_flap::platform::{InputAction, TiltTrigger};
    use sky_flap::settings::Difficulty;
    use sky_flap::sim::GamePhase;

    // Hand-off to the 3D layer. Missing renderer is a silent no-op.
    #[wasm_bindgen(inline_js = "
        export function render_scene(sky, light, instances) {
            const r = window.skyFlapRenderer;
            if (r && typeof r.render === 'function') {
                r.render(sky, light, instances);
            }
        }
    ")]
    extern "C" {
        fn render_scene(sky: &[f32], light: f32, instances: &[f32]);
    }

    const SLIDERS: [&str; 4] = ["gravity", "jumpForce", "speed", "gapSize"];

    /// Game instance holding all front-end state
    struct Game {
        driver: Driver<LocalStorage>,
        audio: AudioManager,
        tilt: TiltTrigger,
        last_phase: GamePhase,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                driver: Driver::new(seed, LocalStorage),
                audio: AudioManager::new(),
                tilt: TiltTrigger::default(),
                last_phase: GamePhase::Idle,
            }
        }

        /// Run one frame and hand the result to the renderer
        fn update(&mut self, time: f64) {
            let events = self.driver.frame(time);
            self.audio.play_events(&events);

            let frame = self.driver.scene();
            render_scene(&frame.sky_color, frame.light_intensity, frame.as_floats());
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, document: &Document) {
            set_text(document, "score", &format!("Score: {}", self.driver.score()));
            set_text(
                document,
                "highScore",
                &format!("Best: {}", self.driver.high_score()),
            );

            let phase = self.driver.phase();
            if phase == self.last_phase {
                return;
            }
            match phase {
                GamePhase::Idle => {
                    set_visible(document, "startScreen", true);
                    set_visible(document, "gameOver", false);
                }
                GamePhase::Running => {
                    set_visible(document, "startScreen", false);
                    set_visible(document, "gameOver", false);
                    set_visible(document, "toggleSettings", true);
                    set_visible(document, "settings", false);
                }
                GamePhase::Ended => {
                    set_text(
                        document,
                        "finalScore",
                        &format!("Score: {}", self.driver.score()),
                    );
                    set_visible(document, "gameOver", true);
                }
            }
            self.last_phase = phase;
        }

        /// Push current settings into the sliders and their labels
        fn sync_sliders(&self, document: &Document) {
            let settings = self.driver.settings();
            for name in SLIDERS {
                let Some(text) = settings.display_value(name) else {
                    continue;
                };
                if let Some(slider) = input_element(document, &format!("{}Slider", name)) {
                    slider.set_value(&text);
                }
                set_text(document, &format!("{}Value", name), &text);
            }
        }

        fn press(&mut self, action: InputAction) {
            self.audio.resume();
            if action == InputAction::ToggleMute {
                let muted = !self.audio.is_muted();
                self.audio.set_muted(muted);
                return;
            }
            self.driver.press(action);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let display = if visible { "block" } else { "none" };
            let _ = el.style().set_property("display", display);
        }
    }

    fn input_element(document: &Document, id: &str) -> Option<HtmlInputElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Sky Flap starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document - cannot start");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        game.borrow().sync_sliders(&document);
        set_visible(&document, "toggleSettings", false);
        set_visible(&document, "settings", false);

        setup_input_handlers(&document, game.clone());
        setup_buttons(&document, game.clone());
        setup_settings(&document, game.clone());

        request_animation_frame(game);

        log::info!("Sky Flap running!");
    }

    fn setup_input_handlers(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(action) = InputAction::from_key_code(&event.code()) {
                    if action == InputAction::Jump {
                        event.prevent_default();
                    }
                    game.borrow_mut().press(action);
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().press(InputAction::Jump);
            });
            let _ = document
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click on the play area (not the overlay buttons)
        if let Some(container) = document.get_element_by_id("gameContainer") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().press(InputAction::Jump);
            });
            let _ = container
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Tilt
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: DeviceOrientationEvent| {
                let Some(beta) = event.beta() else { return };
                let mut g = game.borrow_mut();
                if g.tilt.sample(beta as f32) {
                    g.press(InputAction::Jump);
                }
            });
            let _ = window.add_event_listener_with_callback(
                "deviceorientation",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }
    }

    fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        let Some(el) = document.get_element_by_id(id) else {
            log::warn!("Missing #{}", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            handler();
        });
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            on_click(document, "startButton", move || {
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.driver.start();
            });
        }
        {
            let game = game.clone();
            on_click(document, "restartButton", move || {
                game.borrow_mut().press(InputAction::Restart);
            });
        }
        on_click(document, "toggleSettings", move || {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let open = document
                .get_element_by_id("settings")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                .and_then(|el| el.style().get_property_value("display").ok())
                .is_some_and(|d| d != "none");
            set_visible(&document, "settings", !open);
        });
    }

    fn setup_settings(document: &Document, game: Rc<RefCell<Game>>) {
        for name in SLIDERS {
            let Some(slider) = input_element(document, &format!("{}Slider", name)) else {
                continue;
            };
            let game = game.clone();
            let slider_clone = slider.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Ok(value) = slider_clone.value().parse::<f32>() else {
                    return;
                };
                let mut g = game.borrow_mut();
                if g.driver.set_setting(name, value) {
                    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                        if let Some(text) = g.driver.settings().display_value(name) {
                            set_text(&document, &format!("{}Value", name), &text);
                        }
                    }
                }
            });
            let _ = slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Volume (0-100)
        if let Some(slider) = input_element(document, "volumeSlider") {
            let game = game.clone();
            let slider_clone = slider.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if let Ok(value) = slider_clone.value().parse::<f32>() {
                    game.borrow_mut().audio.set_volume(value / 100.0);
                }
            });
            let _ = slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Difficulty preset overwrites all four sliders
        if let Some(select) = document
            .get_element_by_id("difficultySelect")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            let select_clone = select.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(preset) = Difficulty::from_str(&select_clone.value()) else {
                    return;
                };
                let mut g = game.borrow_mut();
                g.driver.apply_difficulty(preset);
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    g.sync_sliders(&document);
                }
            });
            let _ = select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
            g.update(time);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use sky_flap::Driver;
    use sky_flap::persistence::MemoryStorage;
    use sky_flap::settings::Difficulty;
    use sky_flap::sim::GameEvent;

    env_logger::init();
    log::info!("Sky Flap (native) starting...");
    log::info!("The game renders in the browser - running a headless autopilot session");

    let difficulty = std::env::args()
        .nth(1)
        .and_then(|arg| Difficulty::from_str(&arg))
        .unwrap_or_default();

    let mut driver = Driver::new(42, MemoryStorage::new());
    driver.apply_difficulty(difficulty);
    driver.set_autopilot(true);

    // Two minutes at 60 fps
    let max_frames = 60 * 120;
    let mut pickups = 0;
    for frame in 0..max_frames {
        let events = driver.frame(frame as f64 * 1000.0 / 60.0);
        pickups += events
            .iter()
            .filter(|e| matches!(e, GameEvent::PickupCollected(_)))
            .count();
        if driver.is_game_over() {
            log::info!("Crashed after {} frames", frame);
            break;
        }
    }

    println!(
        "\nDifficulty: {}  Score: {}  Best: {}  Pickups: {}",
        difficulty.as_str(),
        driver.score(),
        driver.high_score(),
        pickups
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
