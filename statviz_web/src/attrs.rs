// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mark to DOM attribute translation.
//!
//! Kept free of `web-sys` so it builds and tests on every target.

use statviz::svg_paint;
use statviz_core::{Mark, MarkId, MarkPayload, TextAnchor, TextBaseline};

/// Attribute carrying a mark's raw id, used to resolve delegated events.
pub const MARK_ATTR: &str = "data-mark";

/// SVG namespace for `createElementNS`.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Everything needed to create or refresh the element of one mark.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementSpec {
    /// SVG tag name.
    pub tag: &'static str,
    /// Attributes to set, in order.
    pub attrs: Vec<(&'static str, String)>,
    /// Text content for `<text>` elements.
    pub text: Option<String>,
}

/// Returns the element description for `mark`.
///
/// Marks with non-finite geometry keep their element but are hidden.
pub fn element_spec(mark: &Mark) -> ElementSpec {
    let mut attrs = Vec::new();
    let mut text = None;
    let tag = match &mark.payload {
        MarkPayload::Circle(c) => {
            attrs.push(("cx", c.center.x.to_string()));
            attrs.push(("cy", c.center.y.to_string()));
            attrs.push(("r", c.radius.to_string()));
            push_paint(&mut attrs, "fill", "fill-opacity", &c.fill);
            if c.stroke_width > 0.0 {
                push_paint(&mut attrs, "stroke", "stroke-opacity", &c.stroke);
                attrs.push(("stroke-width", c.stroke_width.to_string()));
            }
            "circle"
        }
        MarkPayload::Rule(r) => {
            attrs.push(("x1", r.p0.x.to_string()));
            attrs.push(("y1", r.p0.y.to_string()));
            attrs.push(("x2", r.p1.x.to_string()));
            attrs.push(("y2", r.p1.y.to_string()));
            push_paint(&mut attrs, "stroke", "stroke-opacity", &r.stroke);
            attrs.push(("stroke-width", r.stroke_width.to_string()));
            "line"
        }
        MarkPayload::Text(t) => {
            attrs.push(("x", t.pos.x.to_string()));
            attrs.push(("y", t.pos.y.to_string()));
            attrs.push(("font-size", t.font_size.to_string()));
            attrs.push((
                "dominant-baseline",
                match t.baseline {
                    TextBaseline::Middle => "middle",
                    TextBaseline::Alphabetic => "alphabetic",
                    TextBaseline::Hanging => "hanging",
                }
                .to_owned(),
            ));
            attrs.push((
                "text-anchor",
                match t.anchor {
                    TextAnchor::Start => "start",
                    TextAnchor::Middle => "middle",
                    TextAnchor::End => "end",
                }
                .to_owned(),
            ));
            if t.angle != 0.0 {
                attrs.push(("transform", format!("rotate({} {} {})", t.angle, t.pos.x, t.pos.y)));
            }
            push_paint(&mut attrs, "fill", "fill-opacity", &t.fill);
            text = Some(t.text.clone());
            "text"
        }
    };
    if !mark.classes.is_empty() {
        attrs.push(("class", mark.classes.join(" ")));
    }
    if let Some(value) = mark.value {
        attrs.push(("value", value.to_owned()));
    }
    let visibility = if mark.payload.is_finite() {
        "visible"
    } else {
        "hidden"
    };
    attrs.push(("visibility", visibility.to_owned()));
    attrs.push((MARK_ATTR, mark.id.0.to_string()));
    ElementSpec { tag, attrs, text }
}

fn push_paint(
    attrs: &mut Vec<(&'static str, String)>,
    name: &'static str,
    opacity_name: &'static str,
    brush: &peniko::Brush,
) {
    let (value, opacity) = svg_paint(brush);
    attrs.push((name, value));
    attrs.push((opacity_name, opacity.unwrap_or(1.0).to_string()));
}

/// Resolves a [`MARK_ATTR`] value back to a mark id.
pub fn parse_mark_attr(value: &str) -> Option<MarkId> {
    value.trim().parse().ok().map(MarkId::from_raw)
}
