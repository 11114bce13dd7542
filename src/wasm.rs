//! Browser bindings
//!
//! The page owns the canvas, sprites, keyboard/touch wiring and the
//! `requestAnimationFrame` loop; it calls into `WasmGame` once per frame
//! and draws from the JSON snapshot.

use wasm_bindgen::prelude::*;

use crate::game::{FrameInput, Game};
use crate::platform::default_storage;
use crate::settings::Settings;
use crate::stats::{Counter, RunStats};

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Lion Splash (web) starting...");
}

/// Game handle exported to JavaScript
#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a game sized to the canvas. `seed` (a BigInt) pins the level.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, seed: Option<u64>) -> Result<WasmGame, JsValue> {
        let storage = default_storage();
        let mut settings = Settings::load(storage.as_ref());
        if seed.is_some() {
            settings.seed = seed;
        }
        let stats = RunStats::load(storage);
        let session_seed = js_sys::Date::now() as u64;

        let game = Game::new(width, height, settings, Box::new(stats), session_seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmGame { game })
    }

    /// Advance one animation frame
    pub fn frame(
        &mut self,
        now_ms: f64,
        move_left: bool,
        move_right: bool,
        jump: bool,
        splash: bool,
        restart: bool,
    ) {
        let input = FrameInput {
            move_left,
            move_right,
            jump,
            splash,
            restart,
        };
        self.game.frame(now_ms, &input);
    }

    pub fn jump(&mut self) {
        self.game.jump();
    }

    #[wasm_bindgen(js_name = requestSplash)]
    pub fn request_splash(&mut self) {
        self.game.request_splash();
    }

    /// New level around the current player; the pinned or next session
    /// seed if `seed` is omitted
    pub fn regenerate(&mut self, seed: Option<u64>) -> Result<(), JsValue> {
        self.game
            .regenerate(seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// New level and a fresh player
    pub fn restart(&mut self, seed: Option<u64>) -> Result<(), JsValue> {
        self.game
            .restart(seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Returns true if the level was rebuilt for the new size
    pub fn resize(&mut self, width: f32, height: f32) -> Result<bool, JsValue> {
        self.game
            .resize(width, height)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Seed of the current level as a BigInt, exact for sharing
    #[wasm_bindgen(js_name = levelSeed)]
    pub fn level_seed(&self) -> u64 {
        self.game.level_seed()
    }

    #[wasm_bindgen(getter)]
    pub fn won(&self) -> bool {
        self.game.world().is_won()
    }

    /// World state as JSON for the renderer
    pub fn snapshot(&self) -> Result<String, JsValue> {
        self.game
            .snapshot_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Lifetime counter by name (`levels_won`, `people_soaked`, ...)
    pub fn stat(&self, name: &str) -> f64 {
        Counter::from_str(name)
            .map(|c| self.game.stats().read(c) as f64)
            .unwrap_or(0.0)
    }
}
