//! WebAssembly facade
//!
//! A JavaScript host owns the 3D scene and the `requestAnimationFrame` loop.
//! Each frame it calls `frame(performance.now())`, draws `snapshot()` and
//! forwards key presses and button clicks. HUD screens are toggled here.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, Intent, TickInput, tick};
use crate::ui::{self, Presenter, Screen};

/// Screen containers toggled with the `hidden` class
const SCREEN_IDS: [&str; 3] = ["title-screen", "game-over-screen", "final-screen"];

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Lane Runner (web) starting...");
}

/// Shows and hides DOM screens in response to game events
struct DomHud {
    document: Option<Document>,
}

impl DomHud {
    fn new() -> Self {
        let document = web_sys::window().and_then(|w| w.document());
        if document.is_none() {
            log::warn!("No document available - HUD disabled");
        }
        Self { document }
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.document.as_ref()?.get_element_by_id(id)
    }

    fn set_hidden(&self, id: &str, hidden: bool) {
        if let Some(el) = self.element(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.element(id) {
            el.set_text_content(Some(text));
        }
    }

    fn show(&self, screen: Screen, state: &GameState) {
        for id in SCREEN_IDS {
            self.set_hidden(id, true);
        }
        self.set_hidden("hud", true);

        match screen {
            Screen::Title => self.set_hidden("title-screen", false),
            Screen::Hud => self.set_hidden("hud", false),
            Screen::GameOver => {
                self.set_text("final-score", &state.display_seconds().to_string());
                self.set_text(
                    "lives-remaining",
                    &format!("Lives remaining: {}", ui::hearts(state.lives)),
                );
                self.set_hidden("game-over-screen", false);
            }
            Screen::Final => {
                self.set_text("best-time", &state.display_seconds().to_string());
                self.set_hidden("final-screen", false);
            }
        }
    }
}

impl Presenter for DomHud {
    fn present(&mut self, event: &GameEvent, state: &GameState) {
        match event {
            GameEvent::PhaseChanged { to, .. } => self.show(Screen::for_phase(*to), state),
            GameEvent::ScoreTick { seconds } => self.set_text("score", &ui::format_time(*seconds)),
            GameEvent::LivesChanged { lives } => self.set_text("lives", &ui::hearts(*lives)),
            GameEvent::LifeLost {
                lives_remaining, ..
            } => log::info!("Life lost, {} remaining", lives_remaining),
            GameEvent::NewBestTime { seconds } => log::info!("New best time: {:.1}s", seconds),
            _ => {}
        }
    }
}

/// Game instance handed to JavaScript
#[wasm_bindgen]
pub struct WasmGame {
    state: GameState,
    input: TickInput,
    hud: DomHud,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a session on the title screen. `settings_json` overrides tuning.
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: Option<String>) -> Result<WasmGame, JsValue> {
        let settings = match settings_json {
            Some(json) => {
                Settings::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?
            }
            None => Settings::default(),
        };
        let seed = js_sys::Date::now() as u64;
        log::info!("New session with seed: {}", seed);
        let state =
            GameState::with_settings(seed, settings).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let mut game = WasmGame {
            state,
            input: TickInput::default(),
            hud: DomHud::new(),
        };
        game.hud.show(Screen::Title, &game.state);
        Ok(game)
    }

    /// Advance one frame. `now_ms` is `performance.now()`.
    /// Returns the frame's events as JSON for the scene to apply.
    pub fn frame(&mut self, now_ms: f64) -> String {
        let dt = self.state.clock.delta(now_ms / 1000.0);
        tick(&mut self.state, &self.input, dt);
        self.input.clear();

        let events = self.state.drain_events();
        for event in &events {
            self.hud.present(event, &self.state);
        }
        serde_json::to_string(&events).unwrap_or_else(|e| {
            log::warn!("Could not encode events: {}", e);
            "[]".to_string()
        })
    }

    /// Current world state as JSON
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.state.snapshot()).unwrap_or_else(|e| {
            log::warn!("Could not encode snapshot: {}", e);
            "{}".to_string()
        })
    }

    /// Forward a `KeyboardEvent.code`. Returns true if it became an intent.
    pub fn key_down(&mut self, code: &str) -> bool {
        match ui::intent_for_key(code) {
            Some(intent) => self.queue(intent),
            None => false,
        }
    }

    pub fn lane_left(&mut self) -> bool {
        self.queue(Intent::LaneLeft)
    }

    pub fn lane_right(&mut self) -> bool {
        self.queue(Intent::LaneRight)
    }

    pub fn jump(&mut self) -> bool {
        self.queue(Intent::Jump)
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.input.autopilot = enabled;
    }

    pub fn start(&mut self) -> bool {
        self.state.start()
    }

    pub fn restart(&mut self) -> bool {
        self.state.restart()
    }

    pub fn continue_run(&mut self) -> bool {
        self.state.continue_run()
    }

    pub fn title(&mut self) -> bool {
        self.state.return_to_title()
    }

    pub fn lives(&self) -> u8 {
        self.state.lives
    }

    pub fn score(&self) -> f32 {
        self.state.score
    }

    pub fn best_time(&self) -> Option<f32> {
        self.state.best_times.best()
    }
}

impl WasmGame {
    /// Intents are only accepted during a run
    fn queue(&mut self, intent: Intent) -> bool {
        if self.state.phase != GamePhase::Playing {
            return false;
        }
        self.input.push(intent);
        true
    }
}
