// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mark identity and payloads.
//!
//! A [`Mark`] is the retained equivalent of one SVG element: a stable [`MarkId`], a render
//! order hint, a small set of CSS classes, an optional `value` tag, and a concrete geometric
//! [`MarkPayload`].

extern crate alloc;

use alloc::string::String;

use kurbo::{Affine, Point, Rect};
use peniko::Brush;
use smallvec::SmallVec;

/// A group of marks that are replaced together (an axis, the marker set, the label controls).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Layer(pub u32);

/// Stable identity for a mark.
///
/// The upper 32 bits carry the [`Layer`], the lower 32 bits an index within the layer, so a
/// per-row mark keeps its id across frames as long as its row index is unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Creates an id from its raw representation.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Creates an id for the `index`-th mark of `layer`.
    pub const fn new(layer: Layer, index: u32) -> Self {
        Self(((layer.0 as u64) << 32) | index as u64)
    }

    /// Returns the layer this id belongs to.
    pub const fn layer(self) -> Layer {
        #[allow(clippy::cast_possible_truncation, reason = "upper half of a u64")]
        {
            Layer((self.0 >> 32) as u32)
        }
    }

    /// Returns the index within the layer.
    pub const fn index(self) -> u32 {
        #[allow(clippy::cast_possible_truncation, reason = "masked to the lower half")]
        {
            (self.0 & 0xFFFF_FFFF) as u32
        }
    }
}

/// The kind of a mark, independent of its payload values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// A filled circle (`<circle>`).
    Circle,
    /// A single line of text (`<text>`).
    Text,
    /// A stroked line segment (`<line>`).
    Rule,
}

/// Horizontal text anchor, matching SVG `text-anchor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the anchor point.
    Start,
    /// Text is centered on the anchor point.
    Middle,
    /// Text ends at the anchor point.
    End,
}

/// Vertical text baseline, matching SVG `dominant-baseline`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// The anchor point is on the vertical middle of the line.
    Middle,
    /// The anchor point is on the alphabetic baseline.
    Alphabetic,
    /// The anchor point is at the top of the line.
    Hanging,
}

/// A filled circle.
#[derive(Clone, Debug, PartialEq)]
pub struct CirclePayload {
    /// Center in scene coordinates.
    pub center: Point,
    /// Radius in scene coordinates.
    pub radius: f64,
    /// Fill paint.
    pub fill: Brush,
    /// Outline paint.
    pub stroke: Brush,
    /// Outline width; `0` disables the outline.
    pub stroke_width: f64,
}

/// A single line of text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPayload {
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// Text content (unshaped).
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Rotation about `pos`, in degrees.
    pub angle: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
}

/// A stroked line segment.
#[derive(Clone, Debug, PartialEq)]
pub struct RulePayload {
    /// Start point.
    pub p0: Point,
    /// End point.
    pub p1: Point,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width.
    pub stroke_width: f64,
}

/// Concrete geometry and paint for a mark.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// See [`CirclePayload`].
    Circle(CirclePayload),
    /// See [`TextPayload`].
    Text(TextPayload),
    /// See [`RulePayload`].
    Rule(RulePayload),
}

impl MarkPayload {
    /// Returns the payload kind.
    pub fn kind(&self) -> MarkKind {
        match self {
            Self::Circle(_) => MarkKind::Circle,
            Self::Text(_) => MarkKind::Text,
            Self::Rule(_) => MarkKind::Rule,
        }
    }

    /// Returns the primary position: circle center, text anchor, or rule start.
    pub fn position(&self) -> Point {
        match self {
            Self::Circle(c) => c.center,
            Self::Text(t) => t.pos,
            Self::Rule(r) => r.p0,
        }
    }

    /// Returns whether every coordinate of the payload is finite.
    ///
    /// Rows with unparseable values produce non-finite positions; renderers hide such marks.
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Circle(c) => c.center.is_finite() && c.radius.is_finite(),
            Self::Text(t) => t.pos.is_finite(),
            Self::Rule(r) => r.p0.is_finite() && r.p1.is_finite(),
        }
    }

    /// Returns an approximate bounding box, or `None` for non-finite payloads.
    ///
    /// Text bounds use a ~0.6em average glyph width and are rotated about the anchor.
    pub fn bounds(&self) -> Option<Rect> {
        if !self.is_finite() {
            return None;
        }
        Some(match self {
            Self::Circle(c) => Rect::from_center_size(c.center, (2.0 * c.radius, 2.0 * c.radius)),
            Self::Text(t) => text_bounds(t),
            Self::Rule(r) => Rect::from_points(r.p0, r.p1),
        })
    }

    /// Returns whether `pt` hits this payload.
    ///
    /// Rules are never hit targets.
    pub fn contains(&self, pt: Point) -> bool {
        match self {
            Self::Circle(c) => {
                c.center.is_finite() && (pt - c.center).hypot2() <= c.radius * c.radius
            }
            Self::Text(_) => self.bounds().is_some_and(|b| b.contains(pt)),
            Self::Rule(_) => false,
        }
    }

    /// Interpolates geometry from `self` towards `to` at progress `t` in `[0, 1]`.
    ///
    /// Positions, sizes and angles are interpolated; text content and paint snap to `to`. If
    /// the kinds differ the result is `to`.
    pub fn interpolate(&self, to: &Self, t: f64) -> Self {
        match (self, to) {
            (Self::Circle(a), Self::Circle(b)) => Self::Circle(CirclePayload {
                center: a.center.lerp(b.center, t),
                radius: lerp(a.radius, b.radius, t),
                ..b.clone()
            }),
            (Self::Text(a), Self::Text(b)) => Self::Text(TextPayload {
                pos: a.pos.lerp(b.pos, t),
                font_size: lerp(a.font_size, b.font_size, t),
                angle: lerp(a.angle, b.angle, t),
                ..b.clone()
            }),
            (Self::Rule(a), Self::Rule(b)) => Self::Rule(RulePayload {
                p0: a.p0.lerp(b.p0, t),
                p1: a.p1.lerp(b.p1, t),
                stroke_width: lerp(a.stroke_width, b.stroke_width, t),
                ..b.clone()
            }),
            _ => to.clone(),
        }
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn text_bounds(t: &TextPayload) -> Rect {
    let w = 0.6 * t.font_size * t.text.chars().count() as f64;
    let h = t.font_size;
    let (x0, x1) = match t.anchor {
        TextAnchor::Start => (t.pos.x, t.pos.x + w),
        TextAnchor::Middle => (t.pos.x - 0.5 * w, t.pos.x + 0.5 * w),
        TextAnchor::End => (t.pos.x - w, t.pos.x),
    };
    let (y0, y1) = match t.baseline {
        TextBaseline::Middle => (t.pos.y - 0.5 * h, t.pos.y + 0.5 * h),
        TextBaseline::Alphabetic => (t.pos.y - 0.8 * h, t.pos.y + 0.2 * h),
        TextBaseline::Hanging => (t.pos.y, t.pos.y + h),
    };
    let rect = Rect::new(x0, y0, x1, y1);
    if t.angle == 0.0 {
        rect
    } else {
        Affine::rotate_about(t.angle.to_radians(), t.pos).transform_rect_bbox(rect)
    }
}

/// A retained element: identity, styling hooks and payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity.
    pub id: MarkId,
    /// Rendering order hint; renderers sort by `(z_index, id)`.
    pub z_index: i32,
    /// CSS classes applied to the rendered element.
    pub classes: SmallVec<[&'static str; 2]>,
    /// Optional `value` tag (the field a label control selects).
    pub value: Option<&'static str>,
    /// Geometry and paint.
    pub payload: MarkPayload,
}

impl Mark {
    /// Creates a mark with no classes, no value and a z-index of 0.
    pub fn new(id: MarkId, payload: MarkPayload) -> Self {
        Self {
            id,
            z_index: 0,
            classes: SmallVec::new(),
            value: None,
            payload,
        }
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Adds a CSS class (duplicates are ignored).
    pub fn with_class(mut self, class: &'static str) -> Self {
        if !self.has_class(class) {
            self.classes.push(class);
        }
        self
    }

    /// Sets the `value` tag.
    pub fn with_value(mut self, value: &'static str) -> Self {
        self.value = Some(value);
        self
    }

    /// Returns the mark kind.
    pub fn kind(&self) -> MarkKind {
        self.payload.kind()
    }

    /// Returns whether the mark carries `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use peniko::color::palette::css;

    use super::*;

    fn circle(x: f64, y: f64) -> MarkPayload {
        MarkPayload::Circle(CirclePayload {
            center: Point::new(x, y),
            radius: 10.0,
            fill: css::LIGHT_BLUE.into(),
            stroke: Brush::default(),
            stroke_width: 0.0,
        })
    }

    #[test]
    fn mark_id_round_trips_layer_and_index() {
        let id = MarkId::new(Layer(7), 42);
        assert_eq!(id.layer(), Layer(7));
        assert_eq!(id.index(), 42);
    }

    #[test]
    fn circle_interpolation_moves_center_linearly() {
        let a = circle(0.0, 0.0);
        let b = circle(100.0, 50.0);
        let mid = a.interpolate(&b, 0.5);
        assert_eq!(mid.position(), Point::new(50.0, 25.0));
        assert_eq!(a.interpolate(&b, 1.0), b);
    }

    #[test]
    fn non_finite_circle_has_no_bounds_and_no_hits() {
        let p = circle(f64::NAN, 10.0);
        assert!(p.bounds().is_none());
        assert!(!p.contains(Point::new(0.0, 10.0)));
    }

    #[test]
    fn rotated_text_bounds_swap_extent() {
        let t = MarkPayload::Text(TextPayload {
            pos: Point::new(0.0, 0.0),
            text: "abcdefghij".into(),
            font_size: 10.0,
            angle: -90.0,
            anchor: TextAnchor::Middle,
            baseline: TextBaseline::Middle,
            fill: Brush::default(),
        });
        let b = t.bounds().unwrap();
        assert!((b.height() - 60.0).abs() < 1e-9);
        assert!((b.width() - 10.0).abs() < 1e-9);
        assert!(t.contains(Point::new(0.0, 25.0)));
        assert!(!t.contains(Point::new(25.0, 0.0)));
    }

    #[test]
    fn classes_are_deduplicated() {
        let m = Mark::new(MarkId::from_raw(1), circle(0.0, 0.0))
            .with_class("stateCircle")
            .with_class("stateCircle");
        assert_eq!(m.classes.len(), 1);
        assert!(m.has_class("stateCircle"));
    }
}
