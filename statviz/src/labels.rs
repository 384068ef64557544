// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The six clickable axis-label controls.
//!
//! Each control is a text mark with class `aText`, a `value` tag naming the field it selects,
//! and exactly one of `active` / `inactive`. X controls are stacked under the plot; Y controls
//! are rotated −90° left of it.

use kurbo::Point;
use peniko::Color;
use statviz_charts::{ChartLayout, TextMarkSpec};
use statviz_core::{Layer, Mark, MarkId, TextAnchor, TextBaseline};

use crate::selection::{Axis, AxisChoice, AxisSelection, XField, YField};

/// CSS class shared by every control.
pub const LABEL_CLASS: &str = "aText";
/// CSS class of the control matching the selection.
pub const ACTIVE_CLASS: &str = "active";
/// CSS class of the other controls.
pub const INACTIVE_CLASS: &str = "inactive";

const FONT_SIZE: f64 = 16.0;
const ACTIVE_FILL: Color = Color::from_rgb8(0x00, 0x00, 0x00);
const INACTIVE_FILL: Color = Color::from_rgb8(0xc9, 0xc9, 0xc9);

/// A label control's static description.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelControl {
    /// The choice the control makes when clicked.
    pub choice: AxisChoice,
    /// Display text.
    pub text: &'static str,
    /// Offset from the control group's origin, before rotation.
    offset: f64,
}

/// All controls, in mark-index order.
pub const CONTROLS: [LabelControl; 6] = [
    LabelControl {
        choice: AxisChoice::X(XField::Poverty),
        text: "In Poverty (%)",
        offset: 20.0,
    },
    LabelControl {
        choice: AxisChoice::X(XField::Age),
        text: "Age (Median)",
        offset: 40.0,
    },
    LabelControl {
        choice: AxisChoice::X(XField::Income),
        text: "Household Income (Median)",
        offset: 59.0,
    },
    LabelControl {
        choice: AxisChoice::Y(YField::Obesity),
        text: "Obese (%)",
        offset: 2.0,
    },
    LabelControl {
        choice: AxisChoice::Y(YField::Smokes),
        text: "Smokes (%)",
        offset: 22.0,
    },
    LabelControl {
        choice: AxisChoice::Y(YField::Healthcare),
        text: "Lacks Healthcare (%)",
        offset: 40.0,
    },
];

impl LabelControl {
    /// Returns the control's anchor in content-group coordinates.
    ///
    /// X controls hang from `(width / 2, height + 20)`; Y controls from `(-90, height / 2)`,
    /// where the −90° rotation turns the vertical offset into a horizontal one.
    pub fn position(&self, layout: &ChartLayout) -> Point {
        let w = layout.plot_width();
        let h = layout.plot_height();
        match self.choice.axis() {
            Axis::X => Point::new(w / 2.0, h + 20.0 + self.offset),
            Axis::Y => Point::new(-90.0 + self.offset, h / 2.0),
        }
    }

    /// Builds the control's mark for the given selection.
    pub fn mark(
        &self,
        layer: Layer,
        index: u32,
        layout: &ChartLayout,
        selection: &AxisSelection,
    ) -> Mark {
        let active = selection.is_active(self.choice);
        let angle = match self.choice.axis() {
            Axis::X => 0.0,
            Axis::Y => -90.0,
        };
        TextMarkSpec::new(MarkId::new(layer, index), self.position(layout), self.text)
            .with_font_size(FONT_SIZE)
            .with_angle(angle)
            .with_anchor(TextAnchor::Middle)
            .with_baseline(TextBaseline::Alphabetic)
            .with_fill(if active { ACTIVE_FILL } else { INACTIVE_FILL })
            .mark()
            .with_class(LABEL_CLASS)
            .with_class(if active { ACTIVE_CLASS } else { INACTIVE_CLASS })
            .with_value(self.choice.value())
    }
}

/// Builds all six control marks.
pub fn label_marks(layer: Layer, layout: &ChartLayout, selection: &AxisSelection) -> Vec<Mark> {
    (0_u32..)
        .zip(CONTROLS.iter())
        .map(|(i, c)| c.mark(layer, i, layout, selection))
        .collect()
}

/// Builds the three control marks of `axis`.
pub fn marks_for_axis(
    layer: Layer,
    layout: &ChartLayout,
    selection: &AxisSelection,
    axis: Axis,
) -> Vec<Mark> {
    (0_u32..)
        .zip(CONTROLS.iter())
        .filter(|(_, c)| c.choice.axis() == axis)
        .map(|(i, c)| c.mark(layer, i, layout, selection))
        .collect()
}

/// Returns the choice made by the control with mark `id`, if `id` is a control of `layer`.
pub fn control_for(layer: Layer, id: MarkId) -> Option<AxisChoice> {
    if id.layer() != layer {
        return None;
    }
    let index = usize::try_from(id.index()).ok()?;
    CONTROLS.get(index).map(|c| c.choice)
}

#[cfg(test)]
mod tests {
    use statviz_charts::{Margins, Size};
    use statviz_core::MarkPayload;

    use super::*;

    const LABELS: Layer = Layer(5);

    fn layout() -> ChartLayout {
        ChartLayout::arrange(Size::new(800.0, 500.0), Margins::new(20.0, 40.0, 80.0, 100.0))
    }

    fn active_values(marks: &[Mark]) -> Vec<&'static str> {
        marks
            .iter()
            .filter(|m| m.has_class(ACTIVE_CLASS))
            .filter_map(|m| m.value)
            .collect()
    }

    #[test]
    fn exactly_one_active_control_per_axis() {
        let marks = label_marks(LABELS, &layout(), &AxisSelection::default());
        assert_eq!(marks.len(), 6);
        assert_eq!(active_values(&marks), vec!["poverty", "healthcare"]);
        for m in &marks {
            assert!(m.has_class(LABEL_CLASS));
            assert_ne!(m.has_class(ACTIVE_CLASS), m.has_class(INACTIVE_CLASS));
        }
    }

    #[test]
    fn every_control_carries_its_own_field() {
        let marks = label_marks(LABELS, &layout(), &AxisSelection::default());
        let values: Vec<_> = marks.iter().filter_map(|m| m.value).collect();
        assert_eq!(
            values,
            vec!["poverty", "age", "income", "obesity", "smokes", "healthcare"]
        );
    }

    #[test]
    fn axis_subset_only_contains_that_axis() {
        let sel = AxisSelection::new(XField::Income, YField::Smokes);
        let marks = marks_for_axis(LABELS, &layout(), &sel, Axis::Y);
        assert_eq!(marks.len(), 3);
        assert_eq!(active_values(&marks), vec!["smokes"]);
        assert!(marks.iter().all(|m| m.id.index() >= 3));
    }

    #[test]
    fn positions_follow_the_margin_convention() {
        let l = layout();
        assert_eq!(CONTROLS[0].position(&l), Point::new(330.0, 440.0));
        assert_eq!(CONTROLS[2].position(&l), Point::new(330.0, 479.0));
        assert_eq!(CONTROLS[3].position(&l), Point::new(-88.0, 200.0));
        let marks = label_marks(LABELS, &l, &AxisSelection::default());
        let MarkPayload::Text(t) = &marks[5].payload else {
            panic!("expected text");
        };
        assert_eq!(t.angle, -90.0);
    }

    #[test]
    fn control_ids_resolve_to_choices() {
        assert_eq!(
            control_for(LABELS, MarkId::new(LABELS, 4)),
            Some(AxisChoice::Y(YField::Smokes))
        );
        assert_eq!(control_for(LABELS, MarkId::new(Layer(3), 4)), None);
        assert_eq!(control_for(LABELS, MarkId::new(LABELS, 6)), None);
    }
}
