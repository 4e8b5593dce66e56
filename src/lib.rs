//! Type Dash core crate.
//!
//! A typing-speed game compiled to WASM: the page shows a fixed quote, the
//! player races the clock to retype it exactly, and personal-best times land
//! on a local top-3 leaderboard persisted in `localStorage`. The game rules
//! (session state machine, attempt cap, leaderboard maintenance) are pure
//! Rust and run under native `cargo test`; the `app` module adapts them to
//! the DOM.

use wasm_bindgen::prelude::*;

mod app;
pub mod attempts;
pub mod scoreboard;
pub mod session;
pub mod storage;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// The quote every session races against.
pub const QUOTE: &str = "The quick brown fox jumps over the lazy dog while the \
patient cat watches quietly from the warm windowsill above.";

/// Completed sessions allowed per player name.
pub const MAX_TRIES: u32 = 2;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Entrypoint called from the page once the module is loaded.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    app::start()
}
