//! Value animation for the mouth.
//!
//! A [`PingPong`] linearly interpolates between two values over half of its period, then runs
//! back over the other half, forever. It owns no timer: the host feeds elapsed time through
//! [`PingPong::advance`] and reads the value back with [`PingPong::value`].

use crate::math::lerp;
use std::time::Duration;

/// Default full period (there and back) of the mouth animation
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(2000);

/// Auto-reversing, infinitely repeating linear oscillator
#[derive(Debug, Clone)]
pub struct PingPong {
    from: f64,
    to: f64,
    period: Duration,
    elapsed: Duration,
}

impl PingPong {
    pub fn new(from: f64, to: f64, period: Duration) -> Self {
        PingPong {
            from,
            to,
            period,
            elapsed: Duration::ZERO,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Moves the clock forward by `dt` and returns the new value
    pub fn advance(&mut self, dt: Duration) -> f64 {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.value()
    }

    /// Value at the current clock position
    pub fn value(&self) -> f64 {
        self.sample(self.elapsed)
    }

    /// Value at an arbitrary clock position
    pub fn sample(&self, elapsed: Duration) -> f64 {
        let period = self.period.as_secs_f64();
        if period <= 0.0 {
            return self.from;
        }
        let half = period / 2.0;
        let phase = elapsed.as_secs_f64().rem_euclid(period);
        if phase < half {
            lerp(self.from, self.to, phase / half)
        } else {
            lerp(self.to, self.from, (phase - half) / half)
        }
    }
}
