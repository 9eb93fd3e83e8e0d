//! Confetti burst played when a wish is revealed.

use fastrand::Rng;

use crate::random::{pick, range};

pub const CONFETTI_COLORS: [&str; 3] = ["#f00", "#ffd700", "#0f0"];

/// Edge length of a confetti square in px.
pub const CONFETTI_SIZE_PX: u32 = 8;

#[derive(Clone, Debug, PartialEq)]
pub struct ConfettiPiece {
    pub color: &'static str,
    pub dx: f64,
    pub dy: f64,
    pub rotation_deg: f64,
}

impl ConfettiPiece {
    /// CSS transform for the end of the flight.
    pub fn transform(&self) -> String {
        format!(
            "translate({:.1}px, {:.1}px) rotate({:.1}deg)",
            self.dx, self.dy, self.rotation_deg
        )
    }
}

/// `count` pieces flying to offsets within `±spread` px on each axis.
pub fn plan_burst(rng: &mut Rng, count: usize, spread: f64) -> Vec<ConfettiPiece> {
    (0..count)
        .map(|_| ConfettiPiece {
            color: pick(rng, &CONFETTI_COLORS).copied().unwrap_or(CONFETTI_COLORS[0]),
            dx: range(rng, -spread, spread),
            dy: range(rng, -spread, spread),
            rotation_deg: rng.f64() * 360.0,
        })
        .collect()
}
