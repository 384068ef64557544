// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear scales.
//!
//! A [`ScaleLinear`] maps a continuous data domain onto a pixel range, like `d3.scaleLinear`.
//! Domains are usually derived from a table column with [`padded_domain`].

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use statviz_core::{ColId, TableData};

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    ///
    /// A zero-width domain maps everything to the start of the range. Non-finite inputs map to
    /// non-finite outputs.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Maps a value from range space back into domain space.
    pub fn invert(&self, y: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = r1 - r0;
        if denom == 0.0 {
            return d0;
        }
        let t = (y - r0) / denom;
        d0 + t * (d1 - d0)
    }

    /// Returns the domain as authored.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the range as authored.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns “nice” tick values that fall inside the domain, in ascending order.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        let eps = (hi - lo).abs() * 1.0e-9;
        nice_ticks(lo, hi, count)
            .into_iter()
            .filter(|v| *v >= lo - eps && *v <= hi + eps)
            .collect()
    }
}

/// Multiplicative padding applied to a column's extent to form a scale domain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DomainPadding {
    /// Factor applied to the minimum.
    pub lower: f64,
    /// Factor applied to the maximum.
    pub upper: f64,
}

impl DomainPadding {
    /// Creates a padding pair.
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }
}

impl Default for DomainPadding {
    fn default() -> Self {
        Self::new(0.8, 1.2)
    }
}

/// Computes `[min × lower, max × upper]` over the finite values of `col`.
///
/// If the column has no finite values the domain is `[0, 1]`. A zero-width result (for
/// example every value is `0`) is widened by one unit on each side so that the scale never
/// collapses.
pub fn padded_domain(data: &dyn TableData, col: ColId, padding: DomainPadding) -> (f64, f64) {
    let Some((min, max)) = infer_domain_f64(data, col) else {
        return (0.0, 1.0);
    };
    let d0 = min * padding.lower;
    let d1 = max * padding.upper;
    if d0 == d1 {
        (d0 - 1.0, d1 + 1.0)
    } else {
        (d0, d1)
    }
}

/// Returns `(min, max)` of the finite values in `col`, or `None` if there are none.
pub fn infer_domain_f64(data: &dyn TableData, col: ColId) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for row in 0..data.row_count() {
        let Some(v) = data.f64(row, col) else {
            continue;
        };
        if !v.is_finite() {
            continue;
        }
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        Some((min, max))
    } else {
        None
    }
}

/// Returns the spacing of `ticks`, or `0` if there are fewer than two.
pub fn tick_step(ticks: &[f64]) -> f64 {
    let step = ticks
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(f64::INFINITY, f64::min);
    if step.is_finite() { step } else { 0.0 }
}

fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let span = max - min;
    let step0 = span / count.max(1) as f64;
    let step = nice_step(step0);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let start = (min / step).floor() * step;
    let stop = (max / step).ceil() * step;

    let n_f = ((stop - start) / step).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        let n_f = n_f.min(10_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f as u64
        }
    } else {
        0
    };
    (0..=n)
        .map(|i| clean(start + step * i as f64, step))
        .collect()
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// Snaps float noise like `0.30000000000000004` back onto the tick grid.
fn clean(v: f64, step: f64) -> f64 {
    let q = (v / step).round();
    let snapped = q * step;
    if (snapped - v).abs() <= step * 1.0e-9 {
        // `q * step` can still be noisy for fractional steps; dividing by the inverse is exact
        // for the power-of-ten steps `nice_step` produces.
        if step < 1.0 {
            let inv = (1.0 / step).round();
            q / inv
        } else {
            snapped
        }
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use approx::assert_relative_eq;

    use super::*;

    struct Column(Vec<f64>);

    impl TableData for Column {
        fn row_count(&self) -> usize {
            self.0.len()
        }

        fn f64(&self, row: usize, _col: ColId) -> Option<f64> {
            self.0.get(row).copied()
        }
    }

    #[test]
    fn x_scale_is_increasing_and_y_scale_is_inverted() {
        let x = ScaleLinear::new((8.0, 36.0), (0.0, 660.0));
        assert!(x.map(10.0) < x.map(20.0));
        let y = ScaleLinear::new((4.0, 30.0), (400.0, 0.0));
        assert!(y.map(5.0) > y.map(15.0));
        assert_relative_eq!(y.map(4.0), 400.0);
        assert_relative_eq!(y.map(30.0), 0.0);
    }

    #[test]
    fn invert_undoes_map() {
        let s = ScaleLinear::new((8.0, 36.0), (0.0, 660.0));
        assert_relative_eq!(s.invert(s.map(17.5)), 17.5, epsilon = 1e-9);
    }

    #[test]
    fn padded_domain_scales_extent() {
        let col = Column(alloc::vec![10.0, 20.0, 30.0]);
        let (d0, d1) = padded_domain(&col, ColId(0), DomainPadding::default());
        assert_relative_eq!(d0, 8.0);
        assert_relative_eq!(d1, 36.0);
    }

    #[test]
    fn padded_domain_skips_nan_values() {
        let col = Column(alloc::vec![f64::NAN, 10.0, 20.0]);
        let (d0, d1) = padded_domain(&col, ColId(0), DomainPadding::default());
        assert_relative_eq!(d0, 8.0);
        assert_relative_eq!(d1, 24.0);
    }

    #[test]
    fn degenerate_domains_fall_back() {
        let empty = Column(Vec::new());
        assert_eq!(padded_domain(&empty, ColId(0), DomainPadding::default()), (0.0, 1.0));

        let all_nan = Column(alloc::vec![f64::NAN, f64::NAN]);
        assert_eq!(padded_domain(&all_nan, ColId(0), DomainPadding::default()), (0.0, 1.0));

        let zeros = Column(alloc::vec![0.0, 0.0]);
        assert_eq!(padded_domain(&zeros, ColId(0), DomainPadding::default()), (-1.0, 1.0));
    }

    #[test]
    fn zero_width_domain_maps_to_range_start() {
        let s = ScaleLinear::new((5.0, 5.0), (0.0, 100.0));
        assert_eq!(s.map(5.0), 0.0);
        assert_eq!(s.map(100.0), 0.0);
    }

    #[test]
    fn ticks_stay_inside_domain() {
        let s = ScaleLinear::new((8.0, 36.0), (0.0, 1.0));
        let ticks = s.ticks(10);
        assert_eq!(ticks.first().copied(), Some(8.0));
        assert_eq!(ticks.last().copied(), Some(36.0));
        assert_eq!(ticks.len(), 15);

        let s = ScaleLinear::new((9.0, 37.0), (0.0, 1.0));
        let ticks = s.ticks(10);
        assert_eq!(ticks.first().copied(), Some(10.0));
        assert_eq!(ticks.last().copied(), Some(36.0));
    }

    #[test]
    fn fractional_ticks_are_clean() {
        let s = ScaleLinear::new((0.0, 1.0), (0.0, 1.0));
        let ticks = s.ticks(10);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[3], 0.3);
        assert_relative_eq!(tick_step(&ticks), 0.1, epsilon = 1e-12);
    }
}
