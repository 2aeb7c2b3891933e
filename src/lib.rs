//! Tap Fruits core crate.
//!
//! Fruits fall from the top of the play area; tap them before they leave the
//! bottom. The round logic (`session`, `game`) is plain Rust and runs natively
//! under `cargo test`; the `web` module binds it to a canvas, DOM overlays and
//! `requestAnimationFrame`.

use wasm_bindgen::prelude::*;

pub mod clock;
pub mod config;
pub mod fruit;
pub mod game;
pub mod session;
pub mod storage;
mod web;

pub use config::{HIGH_SCORE_KEY, RoundConfig};
pub use fruit::{FRUIT_KINDS, Fruit, FruitId, FruitKind};
pub use game::{FrameReport, Game};
pub use session::{Catch, Phase, Session, Snapshot, fall_step};
pub use storage::{HighScoreStore, LocalStore, MemoryStore, StoreError};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

/// Mount the play area with default settings, showing the "Ready?" card.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::mount(RoundConfig::default())
}

/// Like `start_game`, with a JSON object overriding any `RoundConfig` fields.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let cfg = RoundConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    web::mount(cfg)
}

/// Start / Play again.
#[wasm_bindgen]
pub fn start_round() -> Result<(), JsValue> {
    web::start_round()
}

/// Remove the game from the page and cancel every pending callback.
#[wasm_bindgen]
pub fn stop_game() {
    web::stop();
}

/// Current round state as JSON, or `undefined` when nothing is mounted.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn snapshot_json() -> Option<String> {
    web::snapshot_json()
}
