//! Cat toy core crate.
//!
//! Clicking the canvas drops a cat; cats fall, jostle each other and bounce
//! off the side walls. Everything except `game`, `audio::SoundManager`,
//! `content::ContentManager` and `credits::load` is plain Rust and runs under
//! native `cargo test`.

use wasm_bindgen::prelude::*;

pub mod audio;
pub mod config;
pub mod content;
pub mod credits;
pub mod dice;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod input;
pub mod scene;

mod game; // browser runtime, wasm-only in practice

pub use config::GameConfig;
pub use error::GameError;
pub use geometry::{Circle, Point, Rect, Triangle};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by the host page; keep it.
        return;
    }
    log::info!("cat toy module initialized");
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    game::start(&GameConfig::default())
}

/// Start with a JSON object overriding any subset of [`GameConfig`] fields.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(json)?;
    game::start(&config)
}

#[wasm_bindgen]
pub fn stop_game() {
    game::stop();
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
