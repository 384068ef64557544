// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for chart-generated marks.
//!
//! Renderers sort by `(z_index, MarkId)`, so these values only need to be coarse.

/// Point series marks (marker circles).
pub const SERIES_POINTS: i32 = 20;
/// Per-point labels drawn on top of their markers.
pub const SERIES_LABELS: i32 = 25;

/// Axis domain line and tick marks.
pub const AXIS_RULES: i32 = 30;
/// Axis tick labels.
pub const AXIS_LABELS: i32 = 40;
/// Axis title labels (including clickable field selectors).
pub const AXIS_TITLES: i32 = 50;
