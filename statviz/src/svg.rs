// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory SVG surface.

use hashbrown::HashMap;
use kurbo::Point;
use peniko::Brush;
use statviz_charts::Size;
use statviz_core::{Mark, MarkDiff, MarkId, MarkPayload, TextAnchor, TextBaseline};

use crate::surface::Surface;
use crate::tooltip::{TOOLTIP_CLASS, TooltipView};

#[derive(Debug, Default)]
struct Drawing {
    canvas: Size,
    origin: Point,
    marks: HashMap<MarkId, Mark>,
}

/// A [`Surface`] that keeps the mounted drawing in memory and serializes it to SVG.
///
/// Elements carry the same `class` and `value` attributes a browser DOM would, plus a
/// `data-mark` attribute with the raw mark id.
#[derive(Debug)]
pub struct SvgSurface {
    selector: String,
    drawings: Vec<Drawing>,
    tooltip: Option<TooltipView>,
}

impl SvgSurface {
    /// Creates a surface standing in for the container matched by `selector`.
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            drawings: Vec::new(),
            tooltip: None,
        }
    }

    /// Returns the container selector.
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Returns how many drawings are mounted under the container.
    pub fn svg_count(&self) -> usize {
        self.drawings.len()
    }

    /// Returns the number of elements in the current drawing.
    pub fn element_count(&self) -> usize {
        self.drawings.last().map_or(0, |d| d.marks.len())
    }

    /// Returns the current drawing's mark for `id`.
    pub fn mark(&self, id: MarkId) -> Option<&Mark> {
        self.drawings.last()?.marks.get(&id)
    }

    /// Returns the visible tooltip, if any.
    pub fn tooltip(&self) -> Option<&TooltipView> {
        self.tooltip.as_ref()
    }

    /// Serializes the current drawing. Returns an empty string when nothing is mounted.
    pub fn to_svg_string(&self) -> String {
        let Some(drawing) = self.drawings.last() else {
            return String::new();
        };
        let mut out = String::new();
        out.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
            drawing.canvas.width, drawing.canvas.height
        ));
        out.push('\n');
        out.push_str(&format!(
            r#"<g transform="translate({}, {})">"#,
            drawing.origin.x, drawing.origin.y
        ));
        out.push('\n');

        let mut marks: Vec<&Mark> = drawing.marks.values().collect();
        marks.sort_by_key(|m| (m.z_index, m.id));
        for mark in marks {
            // Rows with missing values have nowhere to go.
            if !mark.payload.is_finite() {
                continue;
            }
            write_mark(&mut out, mark);
        }

        if let Some(tip) = &self.tooltip {
            let at = tip.position();
            out.push_str(&format!(
                r#"<foreignObject class="{TOOLTIP_CLASS}" x="{}" y="{}" width="200" height="80">"#,
                at.x, at.y
            ));
            out.push_str(r#"<div xmlns="http://www.w3.org/1999/xhtml">"#);
            // XHTML void elements must be self-closed.
            out.push_str(&tip.html.replace("<br>", "<br/>"));
            out.push_str("</div></foreignObject>");
            out.push('\n');
        }

        out.push_str("</g>\n</svg>\n");
        out
    }
}

impl Surface for SvgSurface {
    fn reset(&mut self, canvas: Size, origin: Point) {
        self.drawings.clear();
        self.tooltip = None;
        self.drawings.push(Drawing {
            canvas,
            origin,
            marks: HashMap::new(),
        });
    }

    fn apply(&mut self, diffs: &[MarkDiff]) {
        let Some(drawing) = self.drawings.last_mut() else {
            return;
        };
        for diff in diffs {
            match diff {
                MarkDiff::Enter { id, new, .. } | MarkDiff::Update { id, new, .. } => {
                    drawing.marks.insert(*id, (**new).clone());
                }
                MarkDiff::Exit { id, .. } => {
                    drawing.marks.remove(id);
                }
            }
        }
    }

    fn show_tooltip(&mut self, view: &TooltipView) {
        self.tooltip = Some(view.clone());
    }

    fn hide_tooltip(&mut self) {
        self.tooltip = None;
    }
}

fn write_common_attrs(out: &mut String, mark: &Mark) {
    if !mark.classes.is_empty() {
        out.push_str(&format!(r#" class="{}""#, mark.classes.join(" ")));
    }
    if let Some(value) = mark.value {
        out.push_str(&format!(r#" value="{}""#, escape_xml(value)));
    }
    out.push_str(&format!(r#" data-mark="{}""#, mark.id.0));
}

fn write_mark(out: &mut String, mark: &Mark) {
    match &mark.payload {
        MarkPayload::Circle(c) => {
            out.push_str(&format!(
                r#"<circle cx="{}" cy="{}" r="{}""#,
                c.center.x, c.center.y, c.radius
            ));
            write_paint_attr(out, "fill", &c.fill);
            if c.stroke_width > 0.0 {
                write_paint_attr(out, "stroke", &c.stroke);
                out.push_str(&format!(r#" stroke-width="{}""#, c.stroke_width));
            }
            write_common_attrs(out, mark);
            out.push_str("/>\n");
        }
        MarkPayload::Rule(r) => {
            out.push_str(&format!(
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
                r.p0.x, r.p0.y, r.p1.x, r.p1.y
            ));
            write_paint_attr(out, "stroke", &r.stroke);
            out.push_str(&format!(r#" stroke-width="{}""#, r.stroke_width));
            write_common_attrs(out, mark);
            out.push_str("/>\n");
        }
        MarkPayload::Text(t) => {
            let baseline = match t.baseline {
                TextBaseline::Middle => "middle",
                TextBaseline::Alphabetic => "alphabetic",
                TextBaseline::Hanging => "hanging",
            };
            out.push_str(&format!(
                r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{}""#,
                t.pos.x, t.pos.y, t.font_size, baseline
            ));
            if t.angle != 0.0 {
                out.push_str(&format!(
                    r#" transform="rotate({} {} {})""#,
                    t.angle, t.pos.x, t.pos.y
                ));
            }
            out.push_str(match t.anchor {
                TextAnchor::Start => r#" text-anchor="start""#,
                TextAnchor::Middle => r#" text-anchor="middle""#,
                TextAnchor::End => r#" text-anchor="end""#,
            });
            write_paint_attr(out, "fill", &t.fill);
            write_common_attrs(out, mark);
            out.push('>');
            out.push_str(&escape_xml(&t.text));
            out.push_str("</text>\n");
        }
    }
}

/// Converts a brush to an SVG paint and optional opacity.
pub fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

/// Escapes text for use in XML content and attribute values.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use peniko::color::palette::css;
    use statviz_core::{CirclePayload, Layer, Scene};

    use super::*;
    use crate::dataset::DataRow;
    use crate::selection::AxisSelection;
    use crate::tooltip::TooltipTable;

    fn circle(index: u32, x: f64) -> Mark {
        Mark::new(
            MarkId::new(Layer(3), index),
            MarkPayload::Circle(CirclePayload {
                center: Point::new(x, 10.0),
                radius: 14.0,
                fill: css::LIGHT_BLUE.into(),
                stroke: Brush::default(),
                stroke_width: 0.0,
            }),
        )
        .with_class("stateCircle")
    }

    fn mounted() -> SvgSurface {
        let mut surface = SvgSurface::new("#scatter");
        surface.reset(Size::new(800.0, 500.0), Point::new(100.0, 20.0));
        surface
    }

    #[test]
    fn reset_replaces_the_previous_drawing() {
        let mut surface = mounted();
        surface.apply(&Scene::new().tick([circle(0, 1.0)]));
        assert_eq!(surface.element_count(), 1);
        surface.reset(Size::new(800.0, 500.0), Point::new(100.0, 20.0));
        assert_eq!(surface.svg_count(), 1);
        assert_eq!(surface.element_count(), 0);
    }

    #[test]
    fn serializes_content_group_and_classes() {
        let mut surface = mounted();
        surface.apply(&Scene::new().tick([circle(0, 5.0)]));
        let svg = surface.to_svg_string();
        assert!(svg.contains(r#"<g transform="translate(100, 20)">"#));
        assert!(svg.contains(
            r##"<circle cx="5" cy="10" r="14" fill="#add8e6" class="stateCircle""##
        ));
    }

    #[test]
    fn non_finite_marks_are_not_drawn() {
        let mut surface = mounted();
        surface.apply(&Scene::new().tick([circle(0, f64::NAN), circle(1, 3.0)]));
        assert_eq!(surface.element_count(), 2);
        assert_eq!(surface.to_svg_string().matches("<circle").count(), 1);
    }

    #[test]
    fn exits_remove_elements() {
        let mut scene = Scene::new();
        let mut surface = mounted();
        surface.apply(&scene.tick([circle(0, 1.0), circle(1, 2.0)]));
        surface.apply(&scene.tick([circle(1, 2.0)]));
        assert!(surface.mark(MarkId::new(Layer(3), 0)).is_none());
        assert_eq!(surface.element_count(), 1);
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_xml(r#"<a & "b">"#), "&lt;a &amp; &quot;b&quot;&gt;");
    }

    #[test]
    fn tooltip_body_is_well_formed_xhtml() {
        let mut surface = mounted();
        let row = DataRow::new("Bosnia & Herzegovina", "BH", [12.0; 6]);
        surface.show_tooltip(&TooltipView {
            row: 0,
            anchor: Point::new(10.0, 10.0),
            offset: [0.0, 0.0],
            html: TooltipTable::new().html(&row, &AxisSelection::default()),
        });
        let svg = surface.to_svg_string();
        assert!(svg.contains("Bosnia &amp; Herzegovina<br/>Poverty: 12%<br/>Healthcare: 12%"));
        assert!(!svg.contains("<br>"));
        assert!(!svg.contains("& "));
    }

    #[test]
    fn nothing_mounted_serializes_empty() {
        assert_eq!(SvgSurface::new("#scatter").to_svg_string(), "");
    }
}
