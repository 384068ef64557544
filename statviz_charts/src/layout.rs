// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Margin-convention layout.
//!
//! The canvas is inset by fixed margins; everything inside the plot is drawn in a content group
//! translated by `(left, top)`, so plot coordinates start at the origin.

use kurbo::{Point, Rect};

/// A width/height pair used by chart layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in chart coordinate units.
    pub width: f64,
    /// Height in chart coordinate units.
    pub height: f64,
}

impl Size {
    /// Creates a size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Space reserved around the plot for axes and label controls.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margins {
    /// Top margin.
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin.
    pub bottom: f64,
    /// Left margin.
    pub left: f64,
}

impl Margins {
    /// Creates margins in CSS order (top, right, bottom, left).
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Output of the arrange pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    /// Outer canvas size.
    pub canvas: Size,
    /// Margins around the plot.
    pub margins: Margins,
    /// The plot rectangle in content-group coordinates (`x0 == y0 == 0`).
    pub plot: Rect,
}

impl ChartLayout {
    /// Computes the plot rectangle for `canvas` minus `margins`.
    ///
    /// Margins larger than the canvas yield an empty plot rather than a negative one.
    pub fn arrange(canvas: Size, margins: Margins) -> Self {
        let w = (canvas.width - margins.left - margins.right).max(0.0);
        let h = (canvas.height - margins.top - margins.bottom).max(0.0);
        Self {
            canvas,
            margins,
            plot: Rect::new(0.0, 0.0, w, h),
        }
    }

    /// Translation of the content group within the canvas.
    pub fn origin(&self) -> Point {
        Point::new(self.margins.left, self.margins.top)
    }

    /// Plot width.
    pub fn plot_width(&self) -> f64 {
        self.plot.width()
    }

    /// Plot height.
    pub fn plot_height(&self) -> f64 {
        self.plot.height()
    }

    /// Pixel range for a horizontal scale: left to right.
    pub fn x_range(&self) -> (f64, f64) {
        (self.plot.x0, self.plot.x1)
    }

    /// Pixel range for a vertical scale: bottom to top, so larger values sit higher.
    pub fn y_range(&self) -> (f64, f64) {
        (self.plot.y1, self.plot.y0)
    }
}
