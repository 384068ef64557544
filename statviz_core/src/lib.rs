// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained scene runtime for `statviz`.
//!
//! - **Marks** are stable-identity elements (circles, text, rules) with CSS classes.
//! - A **scene** keeps the target state of every mark, diffs updates against it and
//!   interpolates animated changes over caller-driven time.
//! - **Tables** give mark generators read-only access to row data.
//!
//! Rendering is out of scope: surfaces consume [`MarkDiff`]s and mirror them into SVG text, a
//! DOM tree, or anything else.

#![no_std]

extern crate alloc;

mod diff;
mod mark;
mod scene;
mod table;
mod transition;

pub use diff::MarkDiff;
pub use mark::{
    CirclePayload, Layer, Mark, MarkId, MarkKind, MarkPayload, RulePayload, TextAnchor,
    TextBaseline, TextPayload,
};
pub use scene::Scene;
pub use table::{ColId, TableData};
pub use transition::{Easing, Transition};
