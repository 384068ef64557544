// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`Surface`] backed by live SVG DOM elements.

use std::collections::BTreeMap;

use hashbrown::HashMap;
use kurbo::Point;
use statviz::{Size, Surface, TOOLTIP_CLASS, TooltipView};
use statviz_core::{Mark, MarkDiff, MarkId};
use tracing::warn;
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{Document, Element, HtmlElement};

use crate::attrs::{SVG_NS, element_spec};
use crate::mount::{MountHost, remount};

/// Mirrors scene diffs into an `<svg>` under a container element.
///
/// Elements are kept in `(z_index, id)` order so later siblings paint on top. The tooltip is an
/// absolutely positioned `<div class="d3-tip tooltip">` inside the container.
#[derive(Debug)]
pub struct DomSurface {
    document: Document,
    container: Element,
    group: Option<Element>,
    origin: Point,
    elements: HashMap<MarkId, (i32, Element)>,
    order: BTreeMap<(i32, MarkId), Element>,
    tooltip: HtmlElement,
}

impl DomSurface {
    /// Binds to the first element matching `selector`.
    pub fn new(document: Document, selector: &str) -> Result<Self, JsValue> {
        let container = document
            .query_selector(selector)?
            .ok_or_else(|| {
                JsValue::from_str(&format!("statviz_web: no element matches {selector}"))
            })?;
        let tooltip = document.create_element("div")?.dyn_into::<HtmlElement>()?;
        tooltip.set_class_name(&format!("d3-tip {TOOLTIP_CLASS}"));
        let style = tooltip.style();
        style.set_property("position", "absolute")?;
        style.set_property("pointer-events", "none")?;
        style.set_property("display", "none")?;
        container.append_child(&tooltip)?;
        Ok(Self {
            document,
            container,
            group: None,
            origin: Point::ZERO,
            elements: HashMap::new(),
            order: BTreeMap::new(),
            tooltip,
        })
    }

    /// Returns the container element; delegated listeners are attached here.
    pub fn container(&self) -> &Element {
        &self.container
    }

    fn try_reset(&mut self, canvas: Size, origin: Point) -> Result<(), JsValue> {
        self.elements.clear();
        self.order.clear();
        self.group = None;
        self.origin = origin;
        self.tooltip.style().set_property("display", "none")?;
        self.group = Some(remount(&*self, canvas, origin)?);
        Ok(())
    }

    fn enter(&mut self, group: &Element, mark: &Mark) -> Result<(), JsValue> {
        let spec = element_spec(mark);
        let el = self.document.create_element_ns(Some(SVG_NS), spec.tag)?;
        write_attrs(&el, &spec.attrs, spec.text.as_deref())?;
        let key = (mark.z_index, mark.id);
        match self.order.range(key..).next() {
            Some((_, next)) => {
                group.insert_before(&el, Some(next.as_ref()))?;
            }
            None => {
                group.append_child(&el)?;
            }
        }
        self.order.insert(key, el.clone());
        self.elements.insert(mark.id, (mark.z_index, el));
        Ok(())
    }

    fn apply_one(&mut self, group: &Element, diff: &MarkDiff) -> Result<(), JsValue> {
        match diff {
            MarkDiff::Enter { new, .. } => self.enter(group, new),
            MarkDiff::Update { id, new, .. } => match self.elements.get(id) {
                Some((_, el)) => {
                    let spec = element_spec(new);
                    write_attrs(el, &spec.attrs, spec.text.as_deref())
                }
                None => self.enter(group, new),
            },
            MarkDiff::Exit { id, .. } => {
                if let Some((z, el)) = self.elements.remove(id) {
                    self.order.remove(&(z, *id));
                    el.remove();
                }
                Ok(())
            }
        }
    }

    fn try_show_tooltip(&self, view: &TooltipView) -> Result<(), JsValue> {
        let at = view.position();
        self.tooltip.set_inner_html(&view.html);
        let style = self.tooltip.style();
        style.set_property("left", &format!("{}px", at.x + self.origin.x))?;
        style.set_property("top", &format!("{}px", at.y + self.origin.y))?;
        style.set_property("display", "block")?;
        Ok(())
    }
}

fn write_attrs(
    el: &Element,
    attrs: &[(&'static str, String)],
    text: Option<&str>,
) -> Result<(), JsValue> {
    for (name, value) in attrs {
        el.set_attribute(name, value)?;
    }
    if let Some(text) = text {
        el.set_text_content(Some(text));
    }
    Ok(())
}

impl MountHost for DomSurface {
    type Node = Element;
    type Error = JsValue;

    fn mounted(&self) -> Result<Vec<Element>, JsValue> {
        let list = self.container.query_selector_all("svg")?;
        Ok((0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    fn unmount(&self, node: &Element) {
        node.remove();
    }

    fn create(
        &self,
        svg_attrs: &[(&'static str, String)],
        transform: &str,
    ) -> Result<(Element, Element), JsValue> {
        let svg = self.document.create_element_ns(Some(SVG_NS), "svg")?;
        write_attrs(&svg, svg_attrs, None)?;
        let group = self.document.create_element_ns(Some(SVG_NS), "g")?;
        group.set_attribute("transform", transform)?;
        svg.append_child(&group)?;
        Ok((svg, group))
    }

    fn mount(&self, svg: &Element) -> Result<(), JsValue> {
        self.container.append_child(svg)?;
        Ok(())
    }
}

impl Surface for DomSurface {
    fn reset(&mut self, canvas: Size, origin: Point) {
        if let Err(err) = self.try_reset(canvas, origin) {
            warn!(error = ?err, "failed to mount chart");
        }
    }

    fn apply(&mut self, diffs: &[MarkDiff]) {
        let Some(group) = self.group.clone() else {
            return;
        };
        for diff in diffs {
            if let Err(err) = self.apply_one(&group, diff) {
                warn!(error = ?err, id = diff.id().0, "failed to apply diff");
            }
        }
    }

    fn show_tooltip(&mut self, view: &TooltipView) {
        if let Err(err) = self.try_show_tooltip(view) {
            warn!(error = ?err, "failed to show tooltip");
        }
    }

    fn hide_tooltip(&mut self) {
        if let Err(err) = self.tooltip.style().set_property("display", "none") {
            warn!(error = ?err, "failed to hide tooltip");
        }
    }
}
