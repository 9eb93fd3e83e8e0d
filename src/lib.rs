//! Tet greeting page runtime.
//!
//! The host page loads the wasm module and calls `start_greeting()` once the
//! DOM is ready. That wires the falling-petal canvas, hero parallax,
//! reveal-on-scroll and the shake sensor. The envelope, permission and share
//! buttons call the other exported functions from their `onclick` handlers.
//!
//! Platform-free pieces (petal physics, envelope state machine, shake
//! detection, confetti planning, share URLs) are plain modules so they can be
//! tested on the host; `web` is the thin `web-sys` layer on top.

use log::Level;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod confetti;
pub mod envelope;
pub mod error;
pub mod petals;
pub mod random;
pub mod scroll;
pub mod shake;
pub mod share;
pub mod web;

pub use config::GreetingConfig;
pub use envelope::{EnvelopeController, EnvelopeState, WISHES};
pub use error::GreetingError;
pub use petals::{Particle, PetalField, PetalSurface};
pub use shake::{AccelSample, ShakeDetector};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(startup_level());
}

/// Log level before any config is applied: the config default.
fn startup_level() -> Level {
    GreetingConfig::default().level().unwrap_or(Level::Info)
}

// -----------------------------------------------------------------------------
// Entry points called from the page
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_greeting() -> Result<(), JsValue> {
    web::start(GreetingConfig::default())?;
    Ok(())
}

/// Same as `start_greeting` with a (partial) JSON config, e.g.
/// `{"shake_threshold": 12, "particle_count": 60}`.
#[wasm_bindgen]
pub fn start_greeting_with_config(json: &str) -> Result<(), JsValue> {
    let config = GreetingConfig::from_json(json)?;
    web::start(config)?;
    Ok(())
}

#[wasm_bindgen]
pub fn open_envelope() -> Result<(), JsValue> {
    web::envelope::open()?;
    Ok(())
}

#[wasm_bindgen]
pub fn reset_envelope() -> Result<(), JsValue> {
    web::envelope::reset()?;
    Ok(())
}

#[wasm_bindgen]
pub fn request_motion_permission() -> Result<(), JsValue> {
    web::motion::request_permission()?;
    Ok(())
}

#[wasm_bindgen]
pub fn share_to(platform: &str) -> Result<(), JsValue> {
    web::share::share_to(platform)?;
    Ok(())
}
