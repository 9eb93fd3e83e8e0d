//! Randomness helpers. Everything random on the page goes through a
//! `fastrand::Rng` so tests can drive it with a fixed seed.

use fastrand::Rng;

// Used only when the platform entropy source is unavailable.
const FALLBACK_SEED: u64 = 0x5445_545f_3230_3236;

/// Create the page RNG, seeded from the platform entropy source.
pub fn page_rng() -> Rng {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => Rng::with_seed(u64::from_le_bytes(buf)),
        Err(e) => {
            log::warn!("entropy unavailable ({e}), using fixed seed");
            Rng::with_seed(FALLBACK_SEED)
        }
    }
}

/// Uniform float in `[lo, hi)`.
pub fn range(rng: &mut Rng, lo: f64, hi: f64) -> f64 {
    lo + rng.f64() * (hi - lo)
}

/// Uniform pick from a non-empty slice.
pub fn pick<'a, T>(rng: &mut Rng, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.usize(..items.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_stays_in_bounds() {
        let mut rng = Rng::with_seed(7);
        for _ in 0..1000 {
            let v = range(&mut rng, -0.5, 0.5);
            assert!((-0.5..0.5).contains(&v));
        }
    }

    #[test]
    fn pick_empty_is_none() {
        let mut rng = Rng::with_seed(1);
        let empty: [u8; 0] = [];
        assert!(pick(&mut rng, &empty).is_none());
        assert_eq!(pick(&mut rng, &[9]), Some(&9));
    }

    #[test]
    fn page_rng_is_usable() {
        let mut rng = page_rng();
        let v = rng.f64();
        assert!((0.0..1.0).contains(&v));
    }
}
