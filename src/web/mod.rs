//! Browser glue. Everything that touches `web-sys` lives under this module;
//! the state machines and maths it drives are in the platform-free modules.
//!
//! Page state (config, RNG, envelope, shake detector) is a single
//! [`PageState`] built once by [`start`] and shared by the event handlers
//! through [`with_page`]. Handlers never hold the borrow across a timer.

use std::cell::{Cell, RefCell};

use fastrand::Rng;
use log::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, Window, window};

use crate::config::GreetingConfig;
use crate::envelope::EnvelopeController;
use crate::error::{GreetingError, Result};
use crate::random::page_rng;
use crate::shake::ShakeDetector;

pub mod confetti;
pub mod envelope;
pub mod motion;
pub mod petals;
pub mod scroll;
pub mod share;

pub(crate) struct PageState {
    pub config: GreetingConfig,
    pub rng: Rng,
    pub envelope: EnvelopeController,
    pub shake: ShakeDetector,
    pub motion_attached: bool,
}

impl PageState {
    fn new(config: GreetingConfig) -> Self {
        let shake = ShakeDetector::new(config.shake_threshold, config.shake_debounce_ms);
        Self {
            config,
            rng: page_rng(),
            envelope: EnvelopeController::default(),
            shake,
            motion_attached: false,
        }
    }

    /// Swap in a new config. Envelope state and the attached sensor stream
    /// survive; the shake detector starts over with the new tuning.
    fn reconfigure(&mut self, config: GreetingConfig) {
        self.shake = ShakeDetector::new(config.shake_threshold, config.shake_debounce_ms);
        self.rng = page_rng();
        self.config = config;
    }
}

thread_local! {
    static PAGE_STATE: RefCell<Option<PageState>> = const { RefCell::new(None) };
    static PAGE_WIRED: Cell<bool> = const { Cell::new(false) };
}

/// Whether `start` has already wired the page listeners.
pub fn is_started() -> bool {
    PAGE_WIRED.with(Cell::get)
}

/// Run `f` against the page state, creating a default one if the page was
/// never started (e.g. the envelope is clicked before `start_greeting`).
pub(crate) fn with_page<R>(f: impl FnOnce(&mut PageState) -> R) -> R {
    PAGE_STATE.with(|cell| {
        let mut slot = cell.borrow_mut();
        let state = slot.get_or_insert_with(|| PageState::new(GreetingConfig::default()));
        f(state)
    })
}

/// Wire every page feature. Optional features that cannot start are logged
/// and skipped; only a missing window/document is an error.
///
/// Listeners are wired once per page. A later call only replaces the config;
/// settings read at wiring time (particle count, parallax factor) keep their
/// first values.
pub fn start(config: GreetingConfig) -> Result<()> {
    let win = window().ok_or(GreetingError::NoWindow)?;
    let doc = win.document().ok_or(GreetingError::NoDocument)?;
    if let Ok(level) = config.level() {
        log::set_max_level(level.to_level_filter());
    }
    if PAGE_WIRED.with(|wired| wired.replace(true)) {
        warn!("greeting page already started, only the config was replaced");
        with_page(|p| p.reconfigure(config));
        return Ok(());
    }
    let parallax_factor = config.parallax_factor;
    let particle_count = config.particle_count;
    with_page(|p| p.reconfigure(config));

    if let Err(e) = scroll::start_parallax(&win, parallax_factor) {
        warn!("parallax disabled: {e}");
    }
    scroll::start_reveal(&doc);
    match petals::start_petals(&win, &doc, particle_count) {
        Ok(true) => {}
        Ok(false) => warn!("petal canvas not available, animation not started"),
        Err(e) => warn!("petal animation disabled: {e}"),
    }
    if let Err(e) = motion::init() {
        warn!("shake detection disabled: {e}");
    }
    info!("greeting page started");
    Ok(())
}

// --- Small DOM helpers -------------------------------------------------------

pub(crate) fn query(doc: &Document, selector: &'static str) -> Result<Element> {
    doc.query_selector(selector)?
        .ok_or(GreetingError::MissingElement(selector))
}

pub(crate) fn as_html(el: Element, name: &'static str) -> Result<HtmlElement> {
    el.dyn_into::<HtmlElement>()
        .map_err(|_| GreetingError::WrongElementType(name))
}

/// Run `f` once after `ms` milliseconds.
pub(crate) fn set_timeout(win: &Window, ms: i32, f: impl FnOnce() + 'static) {
    let cb = Closure::once_into_js(f);
    if let Err(e) = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms)
    {
        warn!("setTimeout failed: {}", GreetingError::from(e));
    }
}

pub(crate) fn alert(win: &Window, message: &str) {
    if win.alert_with_message(message).is_err() {
        info!("{message}");
    }
}

/// Short haptic feedback, when the device supports it.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Buzz {
    Pattern(&'static [u32]),
    Single(u32),
}

pub(crate) fn vibrate(win: &Window, buzz: Buzz) {
    let nav = win.navigator();
    if !js_sys::Reflect::has(&nav, &JsValue::from_str("vibrate")).unwrap_or(false) {
        return;
    }
    match buzz {
        Buzz::Pattern(steps) => {
            let pattern: js_sys::Array = steps.iter().map(|ms| JsValue::from(*ms)).collect();
            nav.vibrate_with_pattern(&pattern);
        }
        Buzz::Single(ms) => {
            nav.vibrate_with_duration(ms);
        }
    }
}
