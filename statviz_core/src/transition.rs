// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timed transitions.
//!
//! Time is a caller-supplied monotonic clock in milliseconds (`performance.now()` in a browser,
//! a synthetic clock in tests). The scene never reads a clock itself.

/// Easing curves applied to linear transition progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Symmetric cubic ease in/out (D3's `easeCubic`).
    #[default]
    CubicInOut,
}

impl Easing {
    /// Maps linear progress `t` in `[0, 1]` to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicInOut => {
                let t2 = t * 2.0;
                if t2 <= 1.0 {
                    t2 * t2 * t2 / 2.0
                } else {
                    let u = t2 - 2.0;
                    (u * u * u + 2.0) / 2.0
                }
            }
        }
    }
}

/// Duration and easing for an animated change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Duration in milliseconds. Non-positive durations complete immediately.
    pub duration_ms: f64,
    /// Easing curve.
    pub easing: Easing,
}

impl Transition {
    /// Creates a transition with the default cubic easing.
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            easing: Easing::default(),
        }
    }

    /// Sets the easing curve.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Returns eased progress for a transition started at `start_ms`, observed at `now_ms`.
    pub fn progress(&self, start_ms: f64, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 || !self.duration_ms.is_finite() {
            return 1.0;
        }
        self.easing.apply((now_ms - start_ms) / self.duration_ms)
    }

    /// Returns whether a transition started at `start_ms` has finished at `now_ms`.
    pub fn is_complete(&self, start_ms: f64, now_ms: f64) -> bool {
        self.duration_ms <= 0.0 || now_ms - start_ms >= self.duration_ms
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::new(1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubic_easing_hits_endpoints_and_midpoint() {
        let e = Easing::CubicInOut;
        assert_eq!(e.apply(0.0), 0.0);
        assert_eq!(e.apply(0.5), 0.5);
        assert_eq!(e.apply(1.0), 1.0);
        assert!(e.apply(0.25) < 0.25);
        assert!(e.apply(0.75) > 0.75);
    }

    #[test]
    fn progress_clamps_outside_the_window() {
        let tr = Transition::new(1000.0).with_easing(Easing::Linear);
        assert_eq!(tr.progress(100.0, 50.0), 0.0);
        assert_eq!(tr.progress(100.0, 600.0), 0.5);
        assert_eq!(tr.progress(100.0, 5000.0), 1.0);
        assert!(tr.is_complete(100.0, 1100.0));
        assert!(!tr.is_complete(100.0, 1099.0));
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let tr = Transition::new(0.0);
        assert_eq!(tr.progress(0.0, 0.0), 1.0);
        assert!(tr.is_complete(0.0, 0.0));
    }
}
