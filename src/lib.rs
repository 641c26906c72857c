//! Carrot Field core crate.
//!
//! A timed clicker: pull every carrot on the field before the countdown ends,
//! and never touch a bug. Round rules live in [`game`] and build on the host;
//! [`web`] binds them to the page through web-sys. JS calls `start_game()` (or
//! `start_game_with_config(json)`) once the DOM is ready.

use wasm_bindgen::prelude::*;

pub mod error;
pub mod game;
pub mod logging;
pub mod rng;
pub mod web;

pub use error::{GameError, Result};
pub use game::{
    AssetPaths, ClickOutcome, GameBuilder, GameConfig, GameSession, ItemKind, Phase, StopReason,
    TickOutcome, Toggle, format_timer,
};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Mount the stock game: 10 seconds, 5 carrots, 5 bugs.
#[wasm_bindgen]
pub fn start_game() -> std::result::Result<(), JsValue> {
    web::mount(GameConfig::default()).map_err(Into::into)
}

/// Mount with a JSON config; keys left out keep their defaults.
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> std::result::Result<(), JsValue> {
    let config = GameConfig::from_json(json)?;
    web::mount(config).map_err(Into::into)
}
