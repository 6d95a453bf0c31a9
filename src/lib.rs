//! Valentine Card core crate.
//!
//! A single-page "Will you be my Valentine?" card rendered straight into the
//! DOM from WebAssembly: floating hearts, a No button that runs away, a photo
//! carousel and a delayed surprise once the answer is yes.
//!
//! Every component keeps its state in a plain struct (`PageController`,
//! `Carousel`, `AudioToggle`, `HeartField`) that can be driven and tested on
//! the host; the DOM views only mirror those models.

use wasm_bindgen::prelude::*;

mod app;
pub mod audio;
pub mod carousel;
pub mod config;
mod dom;
pub mod error;
pub mod hearts;
pub mod page;
pub mod rng;
mod surprise;

pub use audio::{AudioCommand, AudioToggle, Playback};
pub use carousel::{Carousel, ImageRole, Photo};
pub use config::CardConfig;
pub use error::{CardError, CardResult};
pub use hearts::{CelebrationParticle, HeartField, HeartParticle};
pub use page::{Accepted, Offset, PageController, Phase};
pub use rng::{RandomSource, SequenceRandom, SplitMix64};
pub use surprise::{DATE_IDEA, DISMISS_LABEL, TITLE as SURPRISE_TITLE};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

/// Mount the card with the built-in content.
#[wasm_bindgen]
pub fn start_card() -> Result<(), JsValue> {
    app::start(CardConfig::default()).map_err(JsValue::from)
}

/// Mount the card with a JSON `CardConfig`; missing fields take defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_card_with_config(json: &str) -> Result<(), JsValue> {
    let config = CardConfig::from_json(json)?;
    app::start(config).map_err(JsValue::from)
}

/// Tear the card down: stops the carousel and reveal timers, releases the
/// audio element and removes the DOM. Returns false if nothing was mounted.
#[wasm_bindgen]
pub fn stop_card() -> bool {
    app::stop()
}

#[wasm_bindgen]
pub fn card_is_celebrating() -> bool {
    app::is_celebrating()
}
