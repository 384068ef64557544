// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser binding for `statviz`.
//!
//! On `wasm32` targets this crate exports `ScatterApp`, which mounts a [`statviz::ScatterChart`]
//! under the configured container, fetches the dataset, forwards clicks and hovers through a
//! delegated listener on the container, steps transitions from `requestAnimationFrame` and
//! rebuilds the chart on window resize. `DomSurface` mirrors scene diffs into SVG elements.
//!
//! The attribute translation in [`element_spec`] and the rebuild sequence in [`remount`] are
//! target independent.

#![cfg_attr(
    target_arch = "wasm32",
    allow(unsafe_code, reason = "`#[wasm_bindgen]` exports expand to unsafe glue")
)]

#[cfg(target_arch = "wasm32")]
mod app;
mod attrs;
#[cfg(target_arch = "wasm32")]
mod dom;
mod mount;

#[cfg(target_arch = "wasm32")]
pub use app::ScatterApp;
pub use attrs::{ElementSpec, MARK_ATTR, SVG_NS, element_spec, parse_mark_attr};
#[cfg(target_arch = "wasm32")]
pub use dom::DomSurface;
pub use mount::{MountHost, content_transform, remount};
