// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene change notifications.

extern crate alloc;

use alloc::boxed::Box;

use kurbo::Rect;

use crate::mark::{Mark, MarkId, MarkKind};

/// A change to the rendered scene, consumed by surfaces (SVG writers, DOM bindings).
///
/// `Enter` and `Update` carry the mark as it should be displayed *now*: during a transition
/// that is the interpolated payload, not the final target.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkDiff {
    /// A mark was added.
    Enter {
        /// Mark id.
        id: MarkId,
        /// Mark kind.
        kind: MarkKind,
        /// Render order hint.
        z_index: i32,
        /// Approximate bounds, if finite.
        bounds: Option<Rect>,
        /// The displayed mark.
        new: Box<Mark>,
    },
    /// A mark changed (payload, classes or z-index).
    Update {
        /// Mark id.
        id: MarkId,
        /// Mark kind.
        kind: MarkKind,
        /// Bounds before the change.
        old_bounds: Option<Rect>,
        /// Bounds after the change.
        new_bounds: Option<Rect>,
        /// The displayed mark.
        new: Box<Mark>,
    },
    /// A mark was removed.
    Exit {
        /// Mark id.
        id: MarkId,
        /// Mark kind.
        kind: MarkKind,
        /// Bounds of the removed mark.
        bounds: Option<Rect>,
    },
}

impl MarkDiff {
    /// Returns the id of the affected mark.
    pub fn id(&self) -> MarkId {
        match self {
            Self::Enter { id, .. } | Self::Update { id, .. } | Self::Exit { id, .. } => *id,
        }
    }

    /// Returns the displayed mark for `Enter`/`Update`.
    pub fn mark(&self) -> Option<&Mark> {
        match self {
            Self::Enter { new, .. } | Self::Update { new, .. } => Some(new),
            Self::Exit { .. } => None,
        }
    }
}
