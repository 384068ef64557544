// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rebuilding the `<svg>` under the container.
//!
//! Kept free of `web-sys` so the rebuild sequence can be tested off the browser.

use kurbo::Point;
use statviz::Size;

/// The container operations a rebuild needs.
pub trait MountHost {
    /// Handle to an element.
    type Node;
    /// Error raised by the host.
    type Error;

    /// Returns every `<svg>` currently under the container.
    fn mounted(&self) -> Result<Vec<Self::Node>, Self::Error>;

    /// Detaches `node` from the container.
    fn unmount(&self, node: &Self::Node);

    /// Creates a detached `<svg>` with the given attributes and a `<g>` child with `transform`,
    /// returning `(svg, g)`.
    fn create(
        &self,
        svg_attrs: &[(&'static str, String)],
        transform: &str,
    ) -> Result<(Self::Node, Self::Node), Self::Error>;

    /// Appends `svg` to the container.
    fn mount(&self, svg: &Self::Node) -> Result<(), Self::Error>;
}

/// Returns the content-group transform for `origin`.
pub fn content_transform(origin: Point) -> String {
    format!("translate({}, {})", origin.x, origin.y)
}

/// Replaces every mounted drawing with one empty drawing and returns its content group.
///
/// On error nothing new is mounted; drawings removed before the failure stay removed.
pub fn remount<H: MountHost>(host: &H, canvas: Size, origin: Point) -> Result<H::Node, H::Error> {
    for stale in host.mounted()? {
        host.unmount(&stale);
    }
    let svg_attrs = [
        ("width", canvas.width.to_string()),
        ("height", canvas.height.to_string()),
    ];
    let (svg, group) = host.create(&svg_attrs, &content_transform(origin))?;
    host.mount(&svg)?;
    Ok(group)
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;

    /// A container holding `(id, tag, attrs)` children.
    #[derive(Default)]
    struct FakeHost {
        children: RefCell<Vec<(u32, &'static str, Vec<(&'static str, String)>)>>,
        next_id: Cell<u32>,
        fail_create: bool,
    }

    impl FakeHost {
        fn with_svgs(n: u32) -> Self {
            let host = Self::default();
            for _ in 0..n {
                let id = host.fresh();
                host.children.borrow_mut().push((id, "svg", Vec::new()));
            }
            host
        }

        fn fresh(&self) -> u32 {
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            id
        }

        fn svgs(&self) -> Vec<(u32, Vec<(&'static str, String)>)> {
            self.children
                .borrow()
                .iter()
                .filter(|(_, tag, _)| *tag == "svg")
                .map(|(id, _, attrs)| (*id, attrs.clone()))
                .collect()
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    struct Node {
        id: u32,
        attrs: Vec<(&'static str, String)>,
    }

    impl MountHost for FakeHost {
        type Node = Node;
        type Error = &'static str;

        fn mounted(&self) -> Result<Vec<Node>, &'static str> {
            Ok(self
                .svgs()
                .into_iter()
                .map(|(id, attrs)| Node { id, attrs })
                .collect())
        }

        fn unmount(&self, node: &Node) {
            self.children.borrow_mut().retain(|(id, _, _)| *id != node.id);
        }

        fn create(
            &self,
            svg_attrs: &[(&'static str, String)],
            transform: &str,
        ) -> Result<(Node, Node), &'static str> {
            if self.fail_create {
                return Err("create failed");
            }
            let svg = Node {
                id: self.fresh(),
                attrs: svg_attrs.to_vec(),
            };
            let group = Node {
                id: self.fresh(),
                attrs: vec![("transform", transform.to_owned())],
            };
            Ok((svg, group))
        }

        fn mount(&self, svg: &Node) -> Result<(), &'static str> {
            self.children
                .borrow_mut()
                .push((svg.id, "svg", svg.attrs.clone()));
            Ok(())
        }
    }

    #[test]
    fn repeated_rebuilds_leave_one_drawing() {
        let host = FakeHost::default();
        host.children.borrow_mut().push((99, "div", Vec::new()));
        for _ in 0..3 {
            remount(&host, Size::new(800.0, 500.0), Point::new(100.0, 20.0)).unwrap();
        }
        let svgs = host.svgs();
        assert_eq!(svgs.len(), 1);
        assert_eq!(
            svgs[0].1,
            vec![("width", "800".to_owned()), ("height", "500".to_owned())]
        );
        // The tooltip overlay is not an svg and survives.
        assert_eq!(host.children.borrow().len(), 2);
    }

    #[test]
    fn every_stale_drawing_is_removed() {
        let host = FakeHost::with_svgs(3);
        let group = remount(&host, Size::new(640.0, 480.0), Point::new(40.0, 10.0)).unwrap();
        assert_eq!(host.svgs().len(), 1);
        assert_eq!(
            group.attrs,
            vec![("transform", "translate(40, 10)".to_owned())]
        );
    }

    #[test]
    fn failed_create_mounts_nothing() {
        let host = FakeHost {
            fail_create: true,
            ..FakeHost::with_svgs(1)
        };
        assert!(remount(&host, Size::new(800.0, 500.0), Point::ZERO).is_err());
        assert!(host.svgs().is_empty());
    }
}
