//! Falling petals: a fixed-size field of independent particles that drift down
//! the viewport and respawn above the top edge once they fall past the bottom.
//!
//! The maths here is platform free; drawing goes through [`PetalSurface`] so the
//! browser canvas and the tests share the same frame code.

use fastrand::Rng;

use crate::random::{pick, range};

/// Soft pink (peach), yellow (ochna) and salmon.
pub const PETAL_COLORS: [&str; 3] = [
    "rgba(255, 183, 178, 0.8)",
    "rgba(255, 223, 0, 0.8)",
    "rgba(255, 160, 122, 0.8)",
];

/// Spawn height, just above the visible area.
pub const SPAWN_Y: f64 = -10.0;

const SIZE_RANGE: (f64, f64) = (3.0, 8.0);
const FALL_RANGE: (f64, f64) = (0.5, 2.0);
const DRIFT_RANGE: (f64, f64) = (-0.5, 0.5);
const SWAY_FREQ: f64 = 0.01;
const SWAY_AMPLITUDE: f64 = 0.5;

/// Anything petals can be painted on.
pub trait PetalSurface {
    fn clear(&mut self, width: f64, height: f64);
    /// Filled ellipse centred at `(x, y)`, rotated by `angle_rad`.
    fn fill_petal(&mut self, x: f64, y: f64, angle_rad: f64, rx: f64, ry: f64, color: &str);
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub speed_y: f64,
    pub speed_x: f64,
    /// Degrees.
    pub angle: f64,
    /// +1 or -1 degree per frame.
    pub spin: f64,
    pub color: &'static str,
}

impl Particle {
    pub fn spawn(width: f64, rng: &mut Rng) -> Self {
        let mut p = Particle {
            x: 0.0,
            y: SPAWN_Y,
            size: SIZE_RANGE.0,
            speed_y: FALL_RANGE.0,
            speed_x: 0.0,
            angle: 0.0,
            spin: 1.0,
            color: PETAL_COLORS[0],
        };
        reset(&mut p, width, rng);
        p
    }
}

/// Re-randomise a petal in place at the top of the canvas.
pub fn reset(p: &mut Particle, width: f64, rng: &mut Rng) {
    p.x = rng.f64() * width.max(0.0);
    p.y = SPAWN_Y;
    p.size = range(rng, SIZE_RANGE.0, SIZE_RANGE.1);
    p.speed_y = range(rng, FALL_RANGE.0, FALL_RANGE.1);
    p.speed_x = range(rng, DRIFT_RANGE.0, DRIFT_RANGE.1);
    p.angle = rng.f64() * 360.0;
    p.spin = if rng.bool() { 1.0 } else { -1.0 };
    p.color = pick(rng, &PETAL_COLORS).copied().unwrap_or(PETAL_COLORS[0]);
}

/// One frame of motion. Sway is derived from `y` so no extra state is needed.
pub fn advance(p: &mut Particle, width: f64, height: f64, rng: &mut Rng) {
    p.y += p.speed_y;
    p.x += p.speed_x + (p.y * SWAY_FREQ).sin() * SWAY_AMPLITUDE;
    p.angle += p.spin;
    if p.y > height {
        reset(p, width, rng);
    }
}

pub fn render<S: PetalSurface + ?Sized>(p: &Particle, surface: &mut S) {
    surface.fill_petal(p.x, p.y, p.angle.to_radians(), p.size, p.size / 2.0, p.color);
}

// --- Field ------------------------------------------------------------------

/// Fixed population of petals plus the logical canvas bounds.
pub struct PetalField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    rng: Rng,
}

impl PetalField {
    pub fn new(count: usize, width: f64, height: f64, mut rng: Rng) -> Self {
        let particles = (0..count).map(|_| Particle::spawn(width, &mut rng)).collect();
        Self {
            particles,
            width,
            height,
            rng,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Update the bounds only; petals already outside will reset on their own.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn step(&mut self) {
        let (w, h) = (self.width, self.height);
        for p in &mut self.particles {
            advance(p, w, h, &mut self.rng);
        }
    }

    /// Clear, advance and draw every petal: one display refresh worth of work.
    pub fn frame<S: PetalSurface + ?Sized>(&mut self, surface: &mut S) {
        surface.clear(self.width, self.height);
        let (w, h) = (self.width, self.height);
        for p in &mut self.particles {
            advance(p, w, h, &mut self.rng);
            render(p, surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        clears: usize,
        petals: Vec<(f64, f64, f64, f64, f64, String)>,
    }

    impl PetalSurface for Recorder {
        fn clear(&mut self, _w: f64, _h: f64) {
            self.clears += 1;
        }
        fn fill_petal(&mut self, x: f64, y: f64, a: f64, rx: f64, ry: f64, color: &str) {
            self.petals.push((x, y, a, rx, ry, color.to_string()));
        }
    }

    #[test]
    fn reset_respects_ranges() {
        let mut rng = Rng::with_seed(42);
        for _ in 0..500 {
            let p = Particle::spawn(800.0, &mut rng);
            assert!((0.0..800.0).contains(&p.x));
            assert_eq!(p.y, SPAWN_Y);
            assert!((3.0..8.0).contains(&p.size));
            assert!((0.5..2.0).contains(&p.speed_y));
            assert!((-0.5..0.5).contains(&p.speed_x));
            assert!((0.0..360.0).contains(&p.angle));
            assert!(p.spin == 1.0 || p.spin == -1.0);
            assert!(PETAL_COLORS.contains(&p.color));
        }
    }

    #[test]
    fn advance_applies_fall_sway_and_spin() {
        let mut rng = Rng::with_seed(3);
        let mut p = Particle {
            x: 100.0,
            y: 0.0,
            size: 4.0,
            speed_y: 1.0,
            speed_x: 0.25,
            angle: 10.0,
            spin: -1.0,
            color: PETAL_COLORS[1],
        };
        advance(&mut p, 800.0, 600.0, &mut rng);
        assert_eq!(p.y, 1.0);
        let expected_x = 100.0 + 0.25 + (0.01f64).sin() * 0.5;
        assert!((p.x - expected_x).abs() < 1e-12);
        assert_eq!(p.angle, 9.0);
    }

    #[test]
    fn petal_past_bottom_respawns_at_top() {
        let mut rng = Rng::with_seed(9);
        let mut p = Particle::spawn(300.0, &mut rng);
        p.y = 599.5;
        p.speed_y = 1.0;
        advance(&mut p, 300.0, 600.0, &mut rng);
        assert_eq!(p.y, SPAWN_Y);
    }

    #[test]
    fn y_stays_bounded_over_many_frames() {
        let (w, h) = (320.0, 480.0);
        let mut field = PetalField::new(40, w, h, Rng::with_seed(11));
        for _ in 0..5_000 {
            field.step();
            for p in field.particles() {
                assert!(p.y >= SPAWN_Y && p.y <= h, "y out of range: {}", p.y);
            }
        }
        assert_eq!(field.len(), 40);
    }

    #[test]
    fn frame_draws_every_petal_once() {
        let mut field = PetalField::new(40, 640.0, 480.0, Rng::with_seed(5));
        let mut rec = Recorder::default();
        for _ in 0..3 {
            field.frame(&mut rec);
        }
        assert_eq!(rec.clears, 3);
        assert_eq!(rec.petals.len(), 120);
        assert_eq!(field.len(), 40);
        for (_, _, _, rx, ry, color) in &rec.petals {
            assert!((ry * 2.0 - rx).abs() < 1e-12);
            assert!(PETAL_COLORS.contains(&color.as_str()));
        }
    }

    #[test]
    fn render_converts_degrees() {
        let p = Particle {
            x: 1.0,
            y: 2.0,
            size: 6.0,
            speed_y: 1.0,
            speed_x: 0.0,
            angle: 180.0,
            spin: 1.0,
            color: PETAL_COLORS[2],
        };
        let mut rec = Recorder::default();
        render(&p, &mut rec);
        let (x, y, a, rx, ry, _) = &rec.petals[0];
        assert_eq!((*x, *y, *rx, *ry), (1.0, 2.0, 6.0, 3.0));
        assert!((a - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn resize_keeps_positions() {
        let mut field = PetalField::new(10, 1000.0, 800.0, Rng::with_seed(2));
        let before: Vec<_> = field.particles().to_vec();
        field.resize(200.0, 100.0);
        assert_eq!(field.size(), (200.0, 100.0));
        assert_eq!(field.particles(), &before[..]);
    }
}
