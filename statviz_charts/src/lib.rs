// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart building blocks for `statviz_core`.
//!
//! - **Scales** map data values into plot coordinates.
//! - **Guides** (axes) and **series** (points, per-row text) are built by generating
//!   `statviz_core::Mark`s with stable, index-based ids, so regenerating them against a new scale
//!   produces in-place updates that a scene can animate.
//!
//! Text shaping is out of scope; text marks store unshaped strings.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod axis;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod layout;
mod point_mark;
mod scale;
mod text_mark;
pub mod z_order;

pub use axis::{AxisOrient, AxisSpec, AxisStyle, DOMAIN_INDEX, LABEL_INDEX_BASE, TICK_INDEX_BASE};
pub use format::format_tick_with_step;
pub use layout::{ChartLayout, Margins, Size};
pub use point_mark::PointMarkSpec;
pub use scale::{DomainPadding, ScaleLinear, infer_domain_f64, padded_domain, tick_step};
pub use text_mark::{RowTextMarkSpec, TextMarkSpec};
