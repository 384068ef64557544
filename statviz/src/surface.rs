// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing surfaces.
//!
//! A [`Surface`] mirrors the chart's scene: it receives the scene's diffs and the tooltip's
//! visibility. The in-memory [`SvgSurface`](crate::SvgSurface) serializes to SVG; the browser
//! binding creates DOM elements.

use kurbo::Point;
use statviz_charts::Size;
use statviz_core::MarkDiff;

use crate::tooltip::TooltipView;

/// Something a [`ScatterChart`](crate::ScatterChart) can draw into.
pub trait Surface {
    /// Removes whatever was mounted before and mounts an empty drawing of `canvas` size whose
    /// content group is translated by `origin`.
    fn reset(&mut self, canvas: Size, origin: Point);

    /// Mirrors scene changes into the current drawing.
    fn apply(&mut self, diffs: &[MarkDiff]);

    /// Shows (or moves) the tooltip overlay.
    fn show_tooltip(&mut self, view: &TooltipView);

    /// Hides the tooltip overlay.
    fn hide_tooltip(&mut self);
}
