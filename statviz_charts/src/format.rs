// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick label formatting.

extern crate alloc;

use alloc::format;
use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Formats a tick value using as many decimals as the tick `step` needs.
///
/// The integer part is grouped with `,` thousands separators, matching the default D3 axis
/// format (`45,000`, `12.5`). A `step` of `0` (a single tick) formats without decimals unless
/// the value itself is fractional.
pub fn format_tick_with_step(v: f64, step: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    let decimals = if step > 0.0 && step.is_finite() {
        step_decimals(step)
    } else {
        value_decimals(v)
    };
    let text = format!("{v:.decimals$}");
    let text = if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        String::from(&text[1..])
    } else {
        text
    };
    group_thousands(&text)
}

fn step_decimals(step: f64) -> usize {
    if step >= 1.0 {
        return 0;
    }
    let d = (-step.log10() - 1.0e-9).ceil().clamp(0.0, 12.0);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "clamped to a small non-negative range"
    )]
    {
        d as usize
    }
}

fn value_decimals(v: f64) -> usize {
    let mut d = 0;
    let mut x = v.abs();
    while d < 6 && (x - x.round()).abs() > 1.0e-9 {
        x *= 10.0;
        d += 1;
    }
    d
}

fn group_thousands(text: &str) -> String {
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (int, frac) = match rest.find('.') {
        Some(i) => rest.split_at(i),
        None => (rest, ""),
    };
    let mut out = String::with_capacity(text.len() + int.len() / 3);
    out.push_str(sign);
    let len = int.len();
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push_str(frac);
    out
}
