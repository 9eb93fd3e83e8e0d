//! Tunables for the page. Every field has a default so a host page can pass a
//! partial JSON object (or nothing at all) to `start_greeting_with_config`.

use serde::Deserialize;

use crate::error::{GreetingError, Result};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GreetingConfig {
    /// Number of petals kept alive on the canvas.
    pub particle_count: usize,
    /// Per-axis acceleration delta that counts towards a shake. Needs
    /// calibration on real devices.
    pub shake_threshold: f64,
    pub shake_debounce_ms: f64,
    /// Delay between the envelope opening and the message/confetti reveal.
    pub reveal_delay_ms: i32,
    /// Delay between a shake (envelope closed) and the envelope opening.
    pub shake_open_delay_ms: i32,
    pub shake_class_ms: i32,
    pub confetti_count: usize,
    pub confetti_spread_px: f64,
    pub confetti_duration_ms: i32,
    pub parallax_factor: f64,
    pub share_title: String,
    pub share_text: String,
    pub log_level: String,
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self {
            particle_count: 40,
            shake_threshold: 15.0,
            shake_debounce_ms: 1500.0,
            reveal_delay_ms: 300,
            shake_open_delay_ms: 500,
            shake_class_ms: 500,
            confetti_count: 20,
            confetti_spread_px: 100.0,
            confetti_duration_ms: 1000,
            parallax_factor: 0.3,
            share_title: "Chúc Mừng Năm Mới 2026".to_string(),
            share_text: "Chúc mừng năm mới 2026! Nhận lì xì ngay: ".to_string(),
            log_level: if cfg!(debug_assertions) { "debug" } else { "info" }.to_string(),
        }
    }
}

impl GreetingConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: GreetingConfig = if json.trim().is_empty() {
            GreetingConfig::default()
        } else {
            serde_json::from_str(json)?
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.particle_count == 0 {
            return Err(GreetingError::Config("particle_count must be > 0".into()));
        }
        if !(self.shake_threshold.is_finite() && self.shake_threshold > 0.0) {
            return Err(GreetingError::Config(
                "shake_threshold must be a positive number".into(),
            ));
        }
        if !(self.shake_debounce_ms.is_finite() && self.shake_debounce_ms >= 0.0) {
            return Err(GreetingError::Config(
                "shake_debounce_ms must be >= 0".into(),
            ));
        }
        if !(self.confetti_spread_px.is_finite() && self.parallax_factor.is_finite()) {
            return Err(GreetingError::Config(
                "confetti_spread_px and parallax_factor must be finite".into(),
            ));
        }
        for (name, ms) in [
            ("reveal_delay_ms", self.reveal_delay_ms),
            ("shake_open_delay_ms", self.shake_open_delay_ms),
            ("shake_class_ms", self.shake_class_ms),
            ("confetti_duration_ms", self.confetti_duration_ms),
        ] {
            if ms < 0 {
                return Err(GreetingError::Config(format!("{name} must be >= 0")));
            }
        }
        self.level()?;
        Ok(())
    }

    pub fn level(&self) -> Result<log::Level> {
        self.log_level
            .parse()
            .map_err(|_| GreetingError::Config(format!("unknown log_level '{}'", self.log_level)))
    }
}
