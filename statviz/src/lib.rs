// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An interactive scatter chart of U.S. state health indicators.
//!
//! The chart plots one circle and one abbreviation per state. Six label controls under and left
//! of the plot pick which [`Field`] is bound to each axis; picking one animates the changed
//! axis, the markers and their labels to the new positions. Hovering a marker shows a tooltip.
//!
//! - [`ScatterChart`] is the controller. It draws into any [`Surface`].
//! - [`SvgSurface`] keeps the drawing in memory and serializes it to SVG.
//! - [`EventLoop`] feeds a chart a FIFO of [`ChartEvent`]s and reloads data through a
//!   [`DataSource`] on resize.
//! - [`ChartConfig`] holds every tunable constant and deserializes from JSON.

mod chart;
mod config;
mod dataset;
mod error;
mod event;
mod labels;
mod selection;
mod surface;
mod svg;
mod telemetry;
mod tooltip;

pub use chart::{
    ChartState, LABELS, LoadTicket, MARKER_CLASS, MARKER_TEXT, MARKER_TEXT_CLASS, MARKERS,
    ScatterChart, X_AXIS, Y_AXIS, compute_scale,
};
pub use config::{ChartConfig, MarginConfig, Sizing};
pub use dataset::{ABBR_COL, DataRow, Dataset, Field, NumericPolicy, STATE_COL, load_data};
pub use error::{ConfigError, DataLoadError, LoadResult};
pub use event::{ChartEvent, DataSource, EventLoop, FsDataSource, InMemoryDataSource};
pub use labels::{
    ACTIVE_CLASS, CONTROLS, INACTIVE_CLASS, LABEL_CLASS, LabelControl, control_for, label_marks,
    marks_for_axis,
};
pub use selection::{Axis, AxisChoice, AxisSelection, XField, YField};
pub use surface::Surface;
pub use svg::{SvgSurface, escape_xml, svg_paint};
pub use telemetry::init_default_tracing;
pub use tooltip::{TOOLTIP_CLASS, TooltipTable, TooltipView};

pub use statviz_charts::{Margins, Size};
