//! Explicit per-entity countdowns advanced by the tick loop.

use rand::Rng;

/// A countdown in seconds. Expires once the accumulated time reaches the duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    duration: f64,
    elapsed: f64,
}

impl Countdown {
    pub fn new(duration: f64) -> Self {
        Self {
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` seconds, returning true once the countdown has expired
    pub fn advance(&mut self, dt: f64) -> bool {
        if dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }
        self.is_expired()
    }

    pub fn is_expired(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn remaining(&self) -> f64 {
        self.duration - self.elapsed
    }

    /// Fraction of the countdown already elapsed, in [0, 1]
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            1.0
        } else {
            self.elapsed / self.duration
        }
    }
}

/// Uniform draw from `[min, max)`; a degenerate range yields `min`
pub fn uniform_seconds<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

/// Uniform draw from `[min, max]`; a degenerate range yields `min`
pub fn uniform_count<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> u32 {
    if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_countdown_expires_after_duration() {
        let mut timer = Countdown::new(1.0);
        assert!(!timer.advance(0.4));
        assert!((timer.progress() - 0.4).abs() < 1e-9);
        assert!(!timer.advance(0.5));
        assert!(timer.advance(0.2));
        assert_eq!(timer.remaining(), 0.0);
        assert_eq!(timer.progress(), 1.0);
    }

    #[test]
    fn test_zero_duration_countdown_is_expired() {
        let mut timer = Countdown::new(0.0);
        assert!(timer.is_expired());
        assert!(timer.advance(0.0));
        assert_eq!(timer.progress(), 1.0);
    }

    #[test]
    fn test_negative_dt_is_ignored() {
        let mut timer = Countdown::new(2.0);
        timer.advance(-5.0);
        assert_eq!(timer.elapsed(), 0.0);
    }

    #[test]
    fn test_uniform_draws_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let s = uniform_seconds(&mut rng, 5.0, 20.0);
            assert!((5.0..20.0).contains(&s));
            let c = uniform_count(&mut rng, 1, 4);
            assert!((1..=4).contains(&c));
        }
        assert_eq!(uniform_seconds(&mut rng, 3.0, 3.0), 3.0);
        assert_eq!(uniform_count(&mut rng, 2, 2), 2);
    }
}
