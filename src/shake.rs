//! Shake gesture detection over accelerometer samples (gravity included).

/// One `accelerationIncludingGravity` reading. Axes the device did not report
/// are read as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AccelSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl AccelSample {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn from_axes(x: Option<f64>, y: Option<f64>, z: Option<f64>) -> Self {
        Self {
            x: x.unwrap_or(0.0),
            y: y.unwrap_or(0.0),
            z: z.unwrap_or(0.0),
        }
    }
}

pub struct ShakeDetector {
    threshold: f64,
    debounce_ms: f64,
    last: Option<AccelSample>,
    last_shake_ms: Option<f64>,
}

impl ShakeDetector {
    pub fn new(threshold: f64, debounce_ms: f64) -> Self {
        Self {
            threshold,
            debounce_ms,
            last: None,
            last_shake_ms: None,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Feed one sample; true when it completes a (non-debounced) shake.
    ///
    /// Samples arriving inside the debounce window are dropped without
    /// replacing the stored reading.
    pub fn sample(&mut self, s: AccelSample, now_ms: f64) -> bool {
        if let Some(t) = self.last_shake_ms {
            if now_ms - t < self.debounce_ms {
                return false;
            }
        }
        let Some(prev) = self.last.replace(s) else {
            return false;
        };
        let over = [
            (prev.x - s.x).abs(),
            (prev.y - s.y).abs(),
            (prev.z - s.z).abs(),
        ]
        .iter()
        .filter(|d| **d > self.threshold)
        .count();
        if over >= 2 {
            self.last_shake_ms = Some(now_ms);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> ShakeDetector {
        ShakeDetector::new(15.0, 1500.0)
    }

    #[test]
    fn keeps_configured_threshold() {
        assert_eq!(ShakeDetector::new(12.5, 1500.0).threshold(), 12.5);
    }

    #[test]
    fn first_sample_only_primes() {
        let mut d = detector();
        assert!(!d.sample(AccelSample::new(40.0, 40.0, 40.0), 0.0));
    }

    #[test]
    fn needs_two_axes_over_threshold() {
        let mut d = detector();
        d.sample(AccelSample::new(0.0, 0.0, 9.8), 0.0);
        assert!(!d.sample(AccelSample::new(20.0, 0.0, 9.8), 10.0));
        assert!(!d.sample(AccelSample::new(20.0, 15.0, 9.8), 20.0)); // exactly 15 is not over
        assert!(d.sample(AccelSample::new(0.0, -1.0, 9.8), 30.0));
    }

    #[test]
    fn any_axis_pair_counts() {
        let mut d = detector();
        d.sample(AccelSample::default(), 0.0);
        assert!(d.sample(AccelSample::new(0.0, 16.0, -16.0), 10.0));
    }

    #[test]
    fn debounce_drops_second_shake() {
        let mut d = detector();
        d.sample(AccelSample::default(), 0.0);
        assert!(d.sample(AccelSample::new(20.0, 20.0, 0.0), 100.0));
        assert!(!d.sample(AccelSample::new(-20.0, -20.0, 0.0), 1_000.0));
        assert!(!d.sample(AccelSample::new(20.0, 20.0, 0.0), 1_599.0));
        // window over: compared against the reading from the shake itself
        assert!(!d.sample(AccelSample::new(20.0, 20.0, 0.0), 1_600.0));
        assert!(d.sample(AccelSample::new(-5.0, -5.0, 0.0), 1_700.0));
    }

    #[test]
    fn missing_axes_read_as_zero() {
        let s = AccelSample::from_axes(Some(1.0), None, Some(3.0));
        assert_eq!(s, AccelSample::new(1.0, 0.0, 3.0));
    }
}
