//! Mapping between a time domain and a pixel range.

use chrono::DateTime;

use crate::event::Timestamp;

/// Linear scale from a timestamp domain onto a pixel range, with tick
/// generation at round step sizes. Degenerate domains (a single instant) are
/// padded by thirty seconds on each side.
#[derive(Debug, Clone)]
pub struct TimeScale {
    d0: i64,
    d1: i64,
    r0: f32,
    r1: f32,
}

impl TimeScale {
    pub fn new(domain: (Timestamp, Timestamp), range: (f32, f32)) -> Self {
        let mut d0 = domain.0.and_utc().timestamp();
        let mut d1 = domain.1.and_utc().timestamp();
        if d0 == d1 {
            d0 -= 30;
            d1 += 30;
        }
        Self {
            d0,
            d1,
            r0: range.0,
            r1: range.1,
        }
    }

    pub fn map(&self, t: Timestamp) -> f32 {
        let secs = t.and_utc().timestamp();
        let frac = (secs - self.d0) as f64 / (self.d1 - self.d0) as f64;
        (self.r0 as f64 + frac * (self.r1 - self.r0) as f64) as f32
    }

    /// Tick instants at a round step, aiming for roughly `desired` ticks
    /// across the domain. Ticks are aligned to multiples of the step.
    pub fn ticks(&self, desired: usize) -> Vec<Timestamp> {
        let span = (self.d1 - self.d0).max(1);
        let step = nice_step(span as f64 / desired.max(1) as f64) as i64;
        let mut ticks = Vec::new();
        let mut v = self.d0.div_euclid(step) * step;
        if v < self.d0 {
            v += step;
        }
        while v <= self.d1 {
            if let Some(t) = DateTime::from_timestamp(v, 0) {
                ticks.push(t.naive_utc());
            }
            v += step;
        }
        ticks
    }
}

// Round a step up to 1, 2, or 5 x 10^k seconds
fn nice_step(raw: f64) -> f64 {
    if raw <= 1.0 {
        return 1.0;
    }
    let exp = raw.log10().floor();
    let base = 10f64.powf(exp);
    let mant = raw / base;
    let nice = if mant < 2.0 {
        2.0
    } else if mant < 5.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}
