// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text mark generation.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use peniko::Brush;
use statviz_core::{
    ColId, Layer, Mark, MarkId, MarkPayload, TableData, TextAnchor, TextBaseline, TextPayload,
};

use crate::scale::ScaleLinear;

/// A single, statically positioned text mark.
#[derive(Clone, Debug)]
pub struct TextMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// Text content (unshaped).
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Text rotation angle in degrees.
    pub angle: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
    /// Rendering order hint.
    pub z_index: i32,
}

impl TextMarkSpec {
    /// Creates a new text mark spec with default styling.
    pub fn new(id: MarkId, pos: Point, text: impl Into<String>) -> Self {
        Self {
            id,
            pos,
            text: text.into(),
            font_size: 12.0,
            angle: 0.0,
            anchor: TextAnchor::Middle,
            baseline: TextBaseline::Alphabetic,
            fill: Brush::default(),
            z_index: crate::z_order::AXIS_TITLES,
        }
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the text anchor.
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the text baseline.
    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the text rotation angle (degrees).
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the mark.
    pub fn mark(&self) -> Mark {
        Mark::new(
            self.id,
            MarkPayload::Text(TextPayload {
                pos: self.pos,
                text: self.text.clone(),
                font_size: self.font_size,
                angle: self.angle,
                anchor: self.anchor,
                baseline: self.baseline,
                fill: self.fill.clone(),
            }),
        )
        .with_z_index(self.z_index)
    }
}

/// One text mark per table row, centered on the row's scaled position.
#[derive(Clone, Debug)]
pub struct RowTextMarkSpec {
    /// Layer holding the generated marks.
    pub layer: Layer,
    /// Text column.
    pub text: ColId,
    /// Column for x values.
    pub x: ColId,
    /// Column for y values.
    pub y: ColId,
    /// X scale.
    pub x_scale: ScaleLinear,
    /// Y scale.
    pub y_scale: ScaleLinear,
    /// Font size.
    pub font_size: f64,
    /// Fill paint.
    pub fill: Brush,
    /// CSS class applied to every label.
    pub class: Option<&'static str>,
    /// Rendering order hint.
    pub z_index: i32,
}

impl RowTextMarkSpec {
    /// Creates a row text spec with a font size of 12, centered on the point.
    pub fn new(
        layer: Layer,
        text: ColId,
        x: ColId,
        y: ColId,
        x_scale: ScaleLinear,
        y_scale: ScaleLinear,
    ) -> Self {
        Self {
            layer,
            text,
            x,
            y,
            x_scale,
            y_scale,
            font_size: 12.0,
            fill: Brush::default(),
            class: None,
            z_index: crate::z_order::SERIES_LABELS,
        }
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the CSS class.
    pub fn with_class(mut self, class: &'static str) -> Self {
        self.class = Some(class);
        self
    }

    /// Generates one mark per row of `data`.
    pub fn marks(&self, data: &dyn TableData) -> Vec<Mark> {
        (0_u32..)
            .zip(0..data.row_count())
            .map(|(index, row)| {
                let x = data.f64(row, self.x).unwrap_or(f64::NAN);
                let y = data.f64(row, self.y).unwrap_or(f64::NAN);
                let mark = Mark::new(
                    MarkId::new(self.layer, index),
                    MarkPayload::Text(TextPayload {
                        pos: Point::new(self.x_scale.map(x), self.y_scale.map(y)),
                        text: data.text(row, self.text).map(String::from).unwrap_or_default(),
                        font_size: self.font_size,
                        angle: 0.0,
                        anchor: TextAnchor::Middle,
                        baseline: TextBaseline::Middle,
                        fill: self.fill.clone(),
                    }),
                )
                .with_z_index(self.z_index);
                match self.class {
                    Some(class) => mark.with_class(class),
                    None => mark,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    struct Abbrs;

    impl TableData for Abbrs {
        fn row_count(&self) -> usize {
            2
        }

        fn f64(&self, row: usize, _col: ColId) -> Option<f64> {
            Some(row as f64)
        }

        fn text(&self, row: usize, _col: ColId) -> Option<&str> {
            ["AL", "AK"].get(row).copied()
        }
    }

    #[test]
    fn row_labels_are_centered_on_points() {
        let spec = RowTextMarkSpec::new(
            Layer(4),
            ColId(0),
            ColId(1),
            ColId(2),
            ScaleLinear::new((0.0, 1.0), (0.0, 100.0)),
            ScaleLinear::new((0.0, 1.0), (100.0, 0.0)),
        )
        .with_class("stateText");
        let marks = spec.marks(&Abbrs);
        assert_eq!(marks.len(), 2);
        let MarkPayload::Text(t) = &marks[1].payload else {
            panic!("expected text");
        };
        assert_eq!(t.text, "AK");
        assert_eq!(t.pos, Point::new(100.0, 0.0));
        assert_eq!(t.anchor, TextAnchor::Middle);
        assert_eq!(t.baseline, TextBaseline::Middle);
        assert!(marks[1].has_class("stateText"));
    }

    #[test]
    fn static_text_keeps_rotation() {
        let m = TextMarkSpec::new(MarkId::from_raw(7), Point::new(1.0, 2.0), "Obese (%)")
            .with_angle(-90.0)
            .mark();
        let MarkPayload::Text(t) = &m.payload else {
            panic!("expected text");
        };
        assert_eq!(t.angle, -90.0);
        assert_eq!(m.z_index, crate::z_order::AXIS_TITLES);
    }
}
