// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! An [`AxisSpec`] turns a [`ScaleLinear`] into a domain line, one tick rule per tick and one
//! tick label per tick, in the shape of `d3.axisBottom` / `d3.axisLeft`. All marks live in the
//! axis' [`Layer`]:
//!
//! - index `0`: the domain line,
//! - index `1 + i`: the `i`-th tick rule,
//! - index `1000 + i`: the `i`-th tick label.
//!
//! Keeping ids index-based means an axis re-rendered against a new scale updates its existing
//! ticks in place (and they can be transitioned) instead of replacing them.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Brush;
use peniko::color::palette::css;
use statviz_core::{
    Layer, Mark, MarkId, MarkPayload, RulePayload, TextAnchor, TextBaseline, TextPayload,
};

use crate::format::format_tick_with_step;
use crate::scale::{ScaleLinear, tick_step};
use crate::z_order;

/// Index of the domain line within an axis layer.
pub const DOMAIN_INDEX: u32 = 0;
/// Index of the first tick rule within an axis layer.
pub const TICK_INDEX_BASE: u32 = 1;
/// Index of the first tick label within an axis layer.
pub const LABEL_INDEX_BASE: u32 = 1000;

/// Axis styling.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Paint for the domain line and tick rules.
    pub rule: Brush,
    /// Stroke width for the domain line and tick rules.
    pub stroke_width: f64,
    /// Fill paint for tick labels.
    pub label_fill: Brush,
    /// Font size for tick labels.
    pub label_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            rule: css::BLACK.into(),
            stroke_width: 1.0,
            label_fill: css::BLACK.into(),
            label_font_size: 10.0,
        }
    }
}

/// Axis placement relative to the plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A horizontal axis along the bottom edge of the plot.
    Bottom,
    /// A vertical axis along the left edge of the plot.
    Left,
}

/// An axis bound to a concrete scale.
#[derive(Clone)]
pub struct AxisSpec {
    /// Layer holding every mark of this axis.
    pub layer: Layer,
    /// Scale whose range is in plot coordinates.
    pub scale: ScaleLinear,
    /// Axis placement.
    pub orient: AxisOrient,
    /// Approximate number of ticks.
    pub tick_count: usize,
    /// Tick rule length, pointing away from the plot.
    pub tick_size: f64,
    /// Gap between a tick rule and its label.
    pub tick_padding: f64,
    /// Styling.
    pub style: AxisStyle,
    /// Extra CSS class applied to every mark (for example `x-axis`).
    pub class: Option<&'static str>,
    /// Optional tick label formatter taking `(value, step)`.
    pub tick_formatter: Option<Arc<dyn Fn(f64, f64) -> String>>,
}

impl core::fmt::Debug for AxisSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisSpec")
            .field("layer", &self.layer)
            .field("scale", &self.scale)
            .field("orient", &self.orient)
            .field("tick_count", &self.tick_count)
            .field("tick_size", &self.tick_size)
            .field("tick_padding", &self.tick_padding)
            .field("style", &self.style)
            .field("class", &self.class)
            .field("tick_formatter", &self.tick_formatter.is_some())
            .finish()
    }
}

impl AxisSpec {
    /// Creates an axis with D3's defaults: ten ticks, 6px ticks, 3px padding.
    pub fn new(layer: Layer, scale: ScaleLinear, orient: AxisOrient) -> Self {
        Self {
            layer,
            scale,
            orient,
            tick_count: 10,
            tick_size: 6.0,
            tick_padding: 3.0,
            style: AxisStyle::default(),
            class: None,
            tick_formatter: None,
        }
    }

    /// Convenience constructor for a bottom axis.
    pub fn bottom(layer: Layer, scale: ScaleLinear) -> Self {
        Self::new(layer, scale, AxisOrient::Bottom)
    }

    /// Convenience constructor for a left axis.
    pub fn left(layer: Layer, scale: ScaleLinear) -> Self {
        Self::new(layer, scale, AxisOrient::Left)
    }

    /// Sets the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Sets the tick size.
    pub fn with_tick_size(mut self, tick_size: f64) -> Self {
        self.tick_size = tick_size;
        self
    }

    /// Sets the tick padding.
    pub fn with_tick_padding(mut self, tick_padding: f64) -> Self {
        self.tick_padding = tick_padding;
        self
    }

    /// Sets the axis style.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Adds a CSS class to every generated mark.
    pub fn with_class(mut self, class: &'static str) -> Self {
        self.class = Some(class);
        self
    }

    /// Sets a custom tick label formatter.
    pub fn with_tick_formatter(mut self, f: impl Fn(f64, f64) -> String + 'static) -> Self {
        self.tick_formatter = Some(Arc::new(f));
        self
    }

    /// Returns the tick values that will be drawn, with their step.
    pub fn tick_values(&self) -> (Vec<f64>, f64) {
        let ticks = self.scale.ticks(self.tick_count);
        let step = tick_step(&ticks);
        (ticks, step)
    }

    fn format_tick(&self, v: f64, step: f64) -> String {
        match &self.tick_formatter {
            Some(f) => (f)(v, step),
            None => format_tick_with_step(v, step),
        }
    }

    fn decorate(&self, mark: Mark, part: &'static str) -> Mark {
        let mark = mark.with_class(part);
        match self.class {
            Some(class) => mark.with_class(class),
            None => mark,
        }
    }

    /// Generates axis marks for the given plot rectangle.
    pub fn marks(&self, plot: Rect) -> Vec<Mark> {
        let (ticks, step) = self.tick_values();
        let mut out = Vec::with_capacity(1 + 2 * ticks.len());

        let (p0, p1) = match self.orient {
            AxisOrient::Bottom => (Point::new(plot.x0, plot.y1), Point::new(plot.x1, plot.y1)),
            AxisOrient::Left => (Point::new(plot.x0, plot.y0), Point::new(plot.x0, plot.y1)),
        };
        out.push(self.decorate(
            self.rule(MarkId::new(self.layer, DOMAIN_INDEX), p0, p1),
            "domain",
        ));

        let tick_size = self.tick_size.abs();
        let gap = tick_size + self.tick_padding.max(0.0);
        for (i, v) in (0_u32..).zip(ticks) {
            let label = self.format_tick(v, step);
            let (t0, t1, pos, anchor, baseline) = match self.orient {
                AxisOrient::Bottom => {
                    let x = self.scale.map(v);
                    (
                        Point::new(x, plot.y1),
                        Point::new(x, plot.y1 + tick_size),
                        Point::new(x, plot.y1 + gap),
                        TextAnchor::Middle,
                        TextBaseline::Hanging,
                    )
                }
                AxisOrient::Left => {
                    let y = self.scale.map(v);
                    (
                        Point::new(plot.x0, y),
                        Point::new(plot.x0 - tick_size, y),
                        Point::new(plot.x0 - gap, y),
                        TextAnchor::End,
                        TextBaseline::Middle,
                    )
                }
            };
            out.push(self.decorate(
                self.rule(MarkId::new(self.layer, TICK_INDEX_BASE + i), t0, t1),
                "tick",
            ));
            out.push(self.decorate(
                Mark::new(
                    MarkId::new(self.layer, LABEL_INDEX_BASE + i),
                    MarkPayload::Text(TextPayload {
                        pos,
                        text: label,
                        font_size: self.style.label_font_size,
                        angle: 0.0,
                        anchor,
                        baseline,
                        fill: self.style.label_fill.clone(),
                    }),
                )
                .with_z_index(z_order::AXIS_LABELS),
                "tick",
            ));
        }
        out
    }

    fn rule(&self, id: MarkId, p0: Point, p1: Point) -> Mark {
        Mark::new(
            id,
            MarkPayload::Rule(RulePayload {
                p0,
                p1,
                stroke: self.style.rule.clone(),
                stroke_width: self.style.stroke_width,
            }),
        )
        .with_z_index(z_order::AXIS_RULES)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use statviz_core::MarkKind;

    use super::*;

    const X_AXIS: Layer = Layer(1);

    fn plot() -> Rect {
        Rect::new(0.0, 0.0, 660.0, 400.0)
    }

    fn labels(marks: &[Mark]) -> Vec<String> {
        marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn bottom_axis_emits_domain_ticks_and_labels() {
        let scale = ScaleLinear::new((8.0, 36.0), (0.0, 660.0));
        let axis = AxisSpec::bottom(X_AXIS, scale).with_tick_count(5);
        let (ticks, _) = axis.tick_values();
        let marks = axis.marks(plot());

        assert_eq!(marks.len(), 1 + 2 * ticks.len());
        assert_eq!(marks[0].id, MarkId::new(X_AXIS, DOMAIN_INDEX));
        assert!(marks[0].has_class("domain"));
        let MarkPayload::Rule(domain) = &marks[0].payload else {
            panic!("domain should be a rule");
        };
        assert_eq!(domain.p0, Point::new(0.0, 400.0));
        assert_eq!(domain.p1, Point::new(660.0, 400.0));

        assert_eq!(labels(&marks), vec!["10", "15", "20", "25", "30", "35"]);
    }

    #[test]
    fn ticks_stay_within_the_plot() {
        let scale = ScaleLinear::new((8.0, 36.0), (0.0, 660.0));
        let marks = AxisSpec::bottom(X_AXIS, scale).marks(plot());
        for m in marks.iter().filter(|m| m.has_class("tick")) {
            let x = m.payload.position().x;
            assert!((0.0..=660.0).contains(&x), "tick outside plot at {x}");
        }
    }

    #[test]
    fn left_axis_labels_are_end_anchored_left_of_plot() {
        let scale = ScaleLinear::new((4.0, 30.0), (400.0, 0.0));
        let marks = AxisSpec::left(Layer(2), scale).with_class("y-axis").marks(plot());
        let mut saw = 0_usize;
        for m in &marks {
            assert!(m.has_class("y-axis"));
            if let MarkPayload::Text(t) = &m.payload {
                assert_eq!(t.anchor, TextAnchor::End);
                assert!(t.pos.x < 0.0);
                saw += 1;
            }
        }
        assert!(saw > 0, "expected tick labels");
        assert_eq!(marks[0].kind(), MarkKind::Rule);
    }

    #[test]
    fn tick_ids_are_index_based() {
        let bottom = |domain| AxisSpec::bottom(X_AXIS, ScaleLinear::new(domain, (0.0, 660.0)));
        let a = bottom((8.0, 36.0)).marks(plot());
        let b = bottom((31.0, 72.0)).marks(plot());
        assert_eq!(a[1].id, b[1].id);
        assert_ne!(a[1].payload, b[1].payload);
    }

    #[test]
    fn custom_formatter_is_used() {
        let axis = AxisSpec::bottom(X_AXIS, ScaleLinear::new((0.0, 1.0), (0.0, 100.0)))
            .with_tick_count(2)
            .with_tick_formatter(|v, _| alloc::format!("{v}%"));
        let marks = axis.marks(plot());
        assert!(labels(&marks).iter().all(|s| s.ends_with('%')));
    }
}
