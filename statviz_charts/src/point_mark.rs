// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point mark generation.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Point;
use peniko::Brush;
use statviz_core::{CirclePayload, ColId, Layer, Mark, MarkId, MarkPayload, TableData};

use crate::scale::ScaleLinear;

/// One circle per table row, positioned by two numeric columns.
///
/// The `i`-th row becomes `MarkId::new(layer, i)`, so re-generating against new scales yields
/// updates to the same marks.
#[derive(Clone, Debug)]
pub struct PointMarkSpec {
    /// Layer holding the generated marks.
    pub layer: Layer,
    /// Column for x values.
    pub x: ColId,
    /// Column for y values.
    pub y: ColId,
    /// X scale mapping data x into plot x.
    pub x_scale: ScaleLinear,
    /// Y scale mapping data y into plot y.
    pub y_scale: ScaleLinear,
    /// Circle radius.
    pub radius: f64,
    /// Fill paint.
    pub fill: Brush,
    /// Outline paint.
    pub stroke: Brush,
    /// Outline width; `0` disables the outline.
    pub stroke_width: f64,
    /// CSS class applied to every circle.
    pub class: Option<&'static str>,
    /// Rendering order hint.
    pub z_index: i32,
}

impl PointMarkSpec {
    /// Creates a point mark spec with a radius of 6 and a default fill.
    pub fn new(
        layer: Layer,
        x: ColId,
        y: ColId,
        x_scale: ScaleLinear,
        y_scale: ScaleLinear,
    ) -> Self {
        Self {
            layer,
            x,
            y,
            x_scale,
            y_scale,
            radius: 6.0,
            fill: Brush::default(),
            stroke: Brush::default(),
            stroke_width: 0.0,
            class: None,
            z_index: crate::z_order::SERIES_POINTS,
        }
    }

    /// Sets the radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
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

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Returns the center of `row`'s circle.
    ///
    /// Missing or unparseable values yield a non-finite coordinate.
    pub fn center(&self, data: &dyn TableData, row: usize) -> Point {
        let x = data.f64(row, self.x).unwrap_or(f64::NAN);
        let y = data.f64(row, self.y).unwrap_or(f64::NAN);
        Point::new(self.x_scale.map(x), self.y_scale.map(y))
    }

    /// Generates one mark per row of `data`.
    pub fn marks(&self, data: &dyn TableData) -> Vec<Mark> {
        (0_u32..)
            .zip(0..data.row_count())
            .map(|(index, row)| {
                let mark = Mark::new(
                    MarkId::new(self.layer, index),
                    MarkPayload::Circle(CirclePayload {
                        center: self.center(data, row),
                        radius: self.radius,
                        fill: self.fill.clone(),
                        stroke: self.stroke.clone(),
                        stroke_width: self.stroke_width,
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

    use alloc::vec;

    use peniko::color::palette::css;

    use super::*;

    struct Rows(Vec<[f64; 2]>);

    impl TableData for Rows {
        fn row_count(&self) -> usize {
            self.0.len()
        }

        fn f64(&self, row: usize, col: ColId) -> Option<f64> {
            let r = self.0.get(row)?;
            r.get(col.0 as usize).copied()
        }
    }

    fn spec() -> PointMarkSpec {
        PointMarkSpec::new(
            Layer(3),
            ColId(0),
            ColId(1),
            ScaleLinear::new((0.0, 10.0), (0.0, 100.0)),
            ScaleLinear::new((0.0, 10.0), (100.0, 0.0)),
        )
        .with_radius(14.0)
        .with_fill(css::LIGHT_BLUE)
        .with_class("stateCircle")
    }

    #[test]
    fn one_circle_per_row_at_scaled_position() {
        let rows = Rows(vec![[1.0, 2.0], [5.0, 5.0]]);
        let marks = spec().marks(&rows);
        assert_eq!(marks.len(), 2);
        assert_eq!(marks[1].id, MarkId::new(Layer(3), 1));
        assert!(marks[0].has_class("stateCircle"));
        let MarkPayload::Circle(c) = &marks[0].payload else {
            panic!("expected a circle");
        };
        assert_eq!(c.center, Point::new(10.0, 80.0));
        assert_eq!(c.radius, 14.0);
    }

    #[test]
    fn nan_values_produce_non_finite_marks() {
        let rows = Rows(vec![[f64::NAN, 2.0]]);
        let marks = spec().marks(&rows);
        assert!(!marks[0].payload.is_finite());
    }
}
