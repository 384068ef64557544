// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Events and the native event loop.

use std::collections::VecDeque;

use statviz_charts::Size;
use statviz_core::MarkId;
use tracing::debug;

use crate::chart::{ChartState, ScatterChart};
use crate::dataset::{Dataset, NumericPolicy, load_data};
use crate::error::LoadResult;
use crate::surface::Surface;

/// Something that happened to a chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChartEvent {
    /// The viewport changed size; the chart is rebuilt.
    Resize {
        /// New viewport size.
        size: Size,
    },
    /// A mark was clicked.
    Click {
        /// Clicked mark.
        target: MarkId,
        /// Clock at the time of the click, in milliseconds.
        now_ms: f64,
    },
    /// The pointer entered a mark.
    PointerOver {
        /// Hovered mark.
        target: MarkId,
    },
    /// The pointer left a mark.
    PointerOut {
        /// Mark that was left.
        target: MarkId,
    },
    /// An animation frame.
    Frame {
        /// Frame clock, in milliseconds.
        now_ms: f64,
    },
}

/// Where a chart's dataset comes from.
pub trait DataSource {
    /// Loads and parses the dataset at `path`.
    fn load(&mut self, path: &str, policy: NumericPolicy) -> LoadResult<Dataset>;
}

/// Reads datasets from the local file system.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsDataSource;

impl DataSource for FsDataSource {
    fn load(&mut self, path: &str, policy: NumericPolicy) -> LoadResult<Dataset> {
        load_data(path, policy)
    }
}

/// Serves the same CSV text for every path.
#[derive(Clone, Debug)]
pub struct InMemoryDataSource {
    text: String,
    loads: usize,
}

impl InMemoryDataSource {
    /// Creates a source serving `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            loads: 0,
        }
    }

    /// Returns how many times the dataset was loaded.
    pub fn loads(&self) -> usize {
        self.loads
    }
}

impl DataSource for InMemoryDataSource {
    fn load(&mut self, _path: &str, policy: NumericPolicy) -> LoadResult<Dataset> {
        self.loads += 1;
        Dataset::parse_csv(&self.text, policy)
    }
}

/// A single-threaded FIFO event loop driving one chart.
///
/// Each event runs to completion before the next. A resize rebuilds the chart and loads the
/// dataset again before any later event is handled.
#[derive(Debug)]
pub struct EventLoop<S, D> {
    chart: ScatterChart<S>,
    source: D,
    queue: VecDeque<ChartEvent>,
}

impl<S: Surface, D: DataSource> EventLoop<S, D> {
    /// Creates a loop around `chart`, loading data from `source`.
    pub fn new(chart: ScatterChart<S>, source: D) -> Self {
        Self {
            chart,
            source,
            queue: VecDeque::new(),
        }
    }

    /// Mounts the chart for `viewport` and loads its dataset.
    pub fn start(&mut self, viewport: Size) {
        self.rebuild(viewport);
    }

    /// Queues an event.
    pub fn push(&mut self, event: ChartEvent) {
        self.queue.push_back(event);
    }

    /// Handles queued events until the queue is empty. Returns how many changed the chart.
    pub fn run(&mut self) -> usize {
        let mut changed = 0;
        while let Some(event) = self.queue.pop_front() {
            if self.dispatch(event) {
                changed += 1;
            }
        }
        changed
    }

    /// Handles one event immediately.
    pub fn dispatch(&mut self, event: ChartEvent) -> bool {
        match event {
            ChartEvent::Resize { size } => {
                self.rebuild(size);
                true
            }
            other => self.chart.handle_event(other),
        }
    }

    /// Returns the number of queued events.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Returns the chart.
    pub fn chart(&self) -> &ScatterChart<S> {
        &self.chart
    }

    /// Returns the chart mutably.
    pub fn chart_mut(&mut self) -> &mut ScatterChart<S> {
        &mut self.chart
    }

    /// Returns the data source.
    pub fn source(&self) -> &D {
        &self.source
    }

    fn rebuild(&mut self, viewport: Size) {
        let ticket = self.chart.initialize(viewport);
        let config = self.chart.config();
        let result = self.source.load(&config.data_path, config.numeric_policy);
        self.chart.on_data_loaded(ticket, result);
        debug!(ready = self.chart.state() == ChartState::Ready, "rebuilt chart");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{LABELS, MARKERS};
    use crate::config::ChartConfig;
    use crate::selection::{AxisSelection, XField};
    use crate::svg::SvgSurface;

    const CSV: &str = "state,abbr,poverty,age,income,healthcare,obesity,smokes\n\
                       Alpha,AA,10,40,40000,5,20,12\n\
                       Beta,BB,20,50,50000,15,25,16\n";

    fn event_loop() -> EventLoop<SvgSurface, InMemoryDataSource> {
        let chart = ScatterChart::new(ChartConfig::default(), SvgSurface::new("#scatter"));
        let mut ev = EventLoop::new(chart, InMemoryDataSource::new(CSV));
        ev.start(Size::new(800.0, 500.0));
        ev
    }

    #[test]
    fn events_run_in_order() {
        let mut ev = event_loop();
        ev.push(ChartEvent::Click { target: MarkId::new(LABELS, 1), now_ms: 0.0 });
        ev.push(ChartEvent::Frame { now_ms: 500.0 });
        ev.push(ChartEvent::Frame { now_ms: 1000.0 });
        assert_eq!(ev.pending(), 3);
        ev.run();
        assert_eq!(ev.pending(), 0);
        assert_eq!(ev.chart().selection().x, XField::Age);
        assert!(!ev.chart().scene().is_animating());
    }

    #[test]
    fn resize_reloads_and_resets_selection() {
        let mut ev = event_loop();
        ev.dispatch(ChartEvent::Click { target: MarkId::new(LABELS, 2), now_ms: 0.0 });
        assert_eq!(ev.chart().selection().x, XField::Income);
        ev.dispatch(ChartEvent::Resize { size: Size::new(1024.0, 768.0) });
        assert_eq!(ev.source().loads(), 2);
        assert_eq!(ev.chart().selection(), AxisSelection::default());
        assert_eq!(ev.chart().surface().svg_count(), 1);
        assert_eq!(ev.chart().scene().ids_in_layer(MARKERS).len(), 2);
    }

    #[test]
    fn failed_load_ignores_later_events() {
        let chart = ScatterChart::new(ChartConfig::default(), SvgSurface::new("#scatter"));
        let mut ev = EventLoop::new(chart, InMemoryDataSource::new("state,abbr\nAlpha,AA\n"));
        ev.start(Size::new(800.0, 500.0));
        assert_eq!(ev.chart().state(), ChartState::Failed);
        ev.push(ChartEvent::Click { target: MarkId::new(LABELS, 1), now_ms: 0.0 });
        assert_eq!(ev.run(), 0);
        assert!(ev.chart().scene().is_empty());
    }
}
