// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marker tooltips.

use kurbo::{Point, Vec2};

use crate::dataset::{DataRow, Field};
use crate::selection::{AxisSelection, XField, YField};
use crate::svg::escape_xml;

/// CSS class of the tooltip overlay.
pub const TOOLTIP_CLASS: &str = "tooltip";

/// Label prefixes for every `(x, y)` field pair.
#[derive(Clone, Copy, Debug, Default)]
pub struct TooltipTable;

impl TooltipTable {
    /// Number of `(x, y)` pairs.
    pub const PAIRS: usize = XField::ALL.len() * YField::ALL.len();

    /// Creates the table.
    pub fn new() -> Self {
        Self
    }

    /// Returns the `(x, y)` label prefixes for a selection.
    pub fn labels(&self, selection: &AxisSelection) -> (&'static str, &'static str) {
        use XField::{Age, Income, Poverty};
        use YField::{Healthcare, Obesity, Smokes};
        match (selection.x, selection.y) {
            (Poverty, Healthcare) => ("Poverty: ", "Healthcare: "),
            (Poverty, Smokes) => ("Poverty: ", "Smokes: "),
            (Poverty, Obesity) => ("Poverty: ", "Obesity: "),
            (Age, Healthcare) => ("Age: ", "Healthcare: "),
            (Age, Smokes) => ("Age: ", "Smokes: "),
            (Age, Obesity) => ("Age: ", "Obesity: "),
            (Income, Healthcare) => ("Income: ", "Healthcare: "),
            (Income, Smokes) => ("Income: ", "Smokes: "),
            (Income, Obesity) => ("Income: ", "Obesity: "),
        }
    }

    /// Formats the tooltip body for `row`.
    ///
    /// The state name is escaped. The X value carries a `%` suffix except for age; the Y value
    /// always does.
    pub fn html(&self, row: &DataRow, selection: &AxisSelection) -> String {
        let (label_x, label_y) = self.labels(selection);
        let x_field = selection.x.field();
        let suffix = if x_field == Field::Age { "" } else { "%" };
        format!(
            "{}<br>{label_x}{}{suffix}<br>{label_y}{}%",
            escape_xml(&row.state),
            row.value(x_field),
            row.value(selection.y.field()),
        )
    }
}

/// A visible tooltip.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipView {
    /// Row the tooltip describes.
    pub row: usize,
    /// Hovered marker center, in content-group coordinates.
    pub anchor: Point,
    /// Offset `[top, left]` from the anchor.
    pub offset: [f64; 2],
    /// Body markup.
    pub html: String,
}

impl TooltipView {
    /// Returns where the overlay is placed, in content-group coordinates.
    pub fn position(&self) -> Point {
        self.anchor + Vec2::new(self.offset[1], self.offset[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::AxisChoice;

    fn row() -> DataRow {
        DataRow::new("Alabama", "AL", [19.3, 38.6, 42830.0, 13.9, 33.5, 21.1])
    }

    #[test]
    fn table_covers_every_pair() {
        let table = TooltipTable::new();
        let mut seen = Vec::new();
        for x in XField::ALL {
            for y in YField::ALL {
                let (lx, ly) = table.labels(&AxisSelection::new(x, y));
                assert!(lx.to_lowercase().starts_with(x.field().name()));
                assert!(ly.to_lowercase().starts_with(y.field().name()));
                seen.push((lx, ly));
            }
        }
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), TooltipTable::PAIRS);
        assert_eq!(TooltipTable::PAIRS, 9);
    }

    #[test]
    fn state_name_is_escaped() {
        let row = DataRow::new("Trinidad & <Tobago>", "TT", [1.0; 6]);
        let html = TooltipTable::new().html(&row, &AxisSelection::default());
        assert_eq!(html, "Trinidad &amp; &lt;Tobago&gt;<br>Poverty: 1%<br>Healthcare: 1%");
    }

    #[test]
    fn default_pair_formats_percentages() {
        let html = TooltipTable::new().html(&row(), &AxisSelection::default());
        assert_eq!(html, "Alabama<br>Poverty: 19.3%<br>Healthcare: 13.9%");
    }

    #[test]
    fn age_has_no_percent_suffix() {
        let sel = AxisSelection::default().with(AxisChoice::X(XField::Age));
        let html = TooltipTable::new().html(&row(), &sel);
        assert_eq!(html, "Alabama<br>Age: 38.6<br>Healthcare: 13.9%");
    }

    #[test]
    fn income_label_is_capitalized_for_every_y() {
        let table = TooltipTable::new();
        for y in YField::ALL {
            let (lx, _) = table.labels(&AxisSelection::new(XField::Income, y));
            assert_eq!(lx, "Income: ");
        }
    }

    #[test]
    fn overlay_is_offset_from_marker() {
        let view = TooltipView {
            row: 0,
            anchor: Point::new(100.0, 200.0),
            offset: [80.0, -60.0],
            html: String::new(),
        };
        assert_eq!(view.position(), Point::new(40.0, 280.0));
    }
}
