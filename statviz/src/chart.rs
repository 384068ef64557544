// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scatter chart controller.
//!
//! [`ScatterChart`] owns the axis selection, the loaded dataset and a retained [`Scene`]. Every
//! scene change is forwarded to its [`Surface`] as diffs.
//!
//! Lifecycle: [`ScatterChart::initialize`] mounts an empty drawing and waits for data;
//! [`ScatterChart::on_data_loaded`] draws everything once; label clicks call
//! [`ScatterChart::update`], which animates the changed axis, the markers and the marker labels;
//! a resize calls `initialize` again and starts over.

use kurbo::Point;
use peniko::color::palette::css;
use statviz_charts::{
    AxisSpec, ChartLayout, DomainPadding, PointMarkSpec, RowTextMarkSpec, ScaleLinear, Size,
    padded_domain,
};
use statviz_core::{Layer, Mark, MarkDiff, MarkId, Scene};
use tracing::{debug, error, warn};

use crate::config::ChartConfig;
use crate::dataset::{ABBR_COL, Dataset, Field};
use crate::error::LoadResult;
use crate::event::ChartEvent;
use crate::labels::{self, LABEL_CLASS};
use crate::selection::{Axis, AxisChoice, AxisSelection};
use crate::surface::Surface;
use crate::tooltip::{TooltipTable, TooltipView};

/// Layer of the bottom axis.
pub const X_AXIS: Layer = Layer(1);
/// Layer of the left axis.
pub const Y_AXIS: Layer = Layer(2);
/// Layer of the marker circles; the `i`-th row is index `i`.
pub const MARKERS: Layer = Layer(3);
/// Layer of the marker abbreviations; the `i`-th row is index `i`.
pub const MARKER_TEXT: Layer = Layer(4);
/// Layer of the six label controls.
pub const LABELS: Layer = Layer(5);

/// CSS class of marker circles.
pub const MARKER_CLASS: &str = "stateCircle";
/// CSS class of marker abbreviations.
pub const MARKER_TEXT_CLASS: &str = "stateText";

const MARKER_TEXT_SIZE: f64 = 12.0;

/// Where a chart is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChartState {
    /// Nothing is mounted yet.
    #[default]
    Idle,
    /// A drawing is mounted and the dataset is being loaded.
    AwaitingData,
    /// The chart is drawn and interactive.
    Ready,
    /// The dataset failed to load; nothing more is drawn until the next rebuild.
    Failed,
}

/// Identifies one [`ScatterChart::initialize`]. Data delivered with an older ticket is discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Builds the scale for `field` over `dataset`.
///
/// The domain is `[min × lower, max × upper]` over the finite values.
pub fn compute_scale(
    dataset: &Dataset,
    field: Field,
    range: (f64, f64),
    padding: DomainPadding,
) -> ScaleLinear {
    ScaleLinear::new(padded_domain(dataset, field.col(), padding), range)
}

/// An interactive scatter chart drawing into a [`Surface`].
#[derive(Debug)]
pub struct ScatterChart<S> {
    config: ChartConfig,
    surface: S,
    state: ChartState,
    generation: u64,
    layout: ChartLayout,
    selection: AxisSelection,
    dataset: Option<Dataset>,
    x_scale: ScaleLinear,
    y_scale: ScaleLinear,
    scene: Scene,
    tooltips: TooltipTable,
    tooltip: Option<TooltipView>,
}

impl<S: Surface> ScatterChart<S> {
    /// Creates a chart. Nothing is drawn until [`ScatterChart::initialize`].
    pub fn new(config: ChartConfig, surface: S) -> Self {
        let canvas = Size::new(config.width, config.height);
        let layout = ChartLayout::arrange(canvas, config.margins());
        Self {
            x_scale: ScaleLinear::new((0.0, 1.0), layout.x_range()),
            y_scale: ScaleLinear::new((0.0, 1.0), layout.y_range()),
            config,
            surface,
            state: ChartState::Idle,
            generation: 0,
            layout,
            selection: AxisSelection::default(),
            dataset: None,
            scene: Scene::new(),
            tooltips: TooltipTable::new(),
            tooltip: None,
        }
    }

    /// Mounts a fresh, empty drawing sized for `viewport` and waits for data.
    ///
    /// Any previous drawing is removed, the selection is reset to its default and the loaded
    /// dataset is dropped. The returned ticket must accompany the data for this drawing.
    pub fn initialize(&mut self, viewport: Size) -> LoadTicket {
        let canvas = self.config.canvas_size(viewport);
        self.layout = ChartLayout::arrange(canvas, self.config.margins());
        let _ = self.scene.clear();
        self.surface.reset(canvas, self.layout.origin());
        self.selection = AxisSelection::default();
        self.dataset = None;
        self.tooltip = None;
        self.state = ChartState::AwaitingData;
        self.generation += 1;
        debug!(
            selector = %self.config.selector,
            width = canvas.width,
            height = canvas.height,
            generation = self.generation,
            "mounted chart"
        );
        self.ticket()
    }

    /// Returns the ticket of the current drawing.
    pub fn ticket(&self) -> LoadTicket {
        LoadTicket(self.generation)
    }

    /// Receives the result of loading the dataset for the drawing `ticket` was issued for.
    ///
    /// On success the chart is drawn. A failure is logged and leaves the chart empty until the
    /// next [`ScatterChart::initialize`]. Results for an earlier drawing are dropped.
    pub fn on_data_loaded(&mut self, ticket: LoadTicket, result: LoadResult<Dataset>) {
        if ticket != self.ticket() {
            warn!(
                ticket = ticket.0,
                current = self.generation,
                "ignoring dataset loaded for a previous drawing"
            );
            return;
        }
        if self.state != ChartState::AwaitingData {
            warn!(state = ?self.state, "ignoring dataset delivered outside of a load");
            return;
        }
        match result {
            Ok(dataset) => {
                self.dataset = Some(dataset);
                self.state = ChartState::Ready;
                self.render();
            }
            Err(err) => {
                error!(error = %err, path = %self.config.data_path, "failed to load dataset");
                self.state = ChartState::Failed;
            }
        }
    }

    /// Draws axes, markers, marker labels and label controls for the current selection.
    pub fn render(&mut self) {
        let Some(dataset) = &self.dataset else {
            return;
        };
        let padding = self.config.domain_padding();
        let (x, y) = (self.selection.x.field(), self.selection.y.field());
        self.x_scale = compute_scale(dataset, x, self.layout.x_range(), padding);
        self.y_scale = compute_scale(dataset, y, self.layout.y_range(), padding);

        let mut marks = self.axis_marks(Axis::X);
        marks.extend(self.axis_marks(Axis::Y));
        marks.extend(self.marker_marks(dataset));
        marks.extend(self.marker_text_marks(dataset));
        marks.extend(labels::label_marks(LABELS, &self.layout, &self.selection));
        let diffs = self.scene.tick(marks);
        self.surface.apply(&diffs);
        debug!(
            selection = %self.selection,
            rows = dataset.len(),
            marks = self.scene.len(),
            "rendered chart"
        );
    }

    /// Switches to `selection`, animating from the current state starting at `now_ms`.
    ///
    /// Returns `false` (and does nothing) if the chart is not ready or `selection` is already
    /// current.
    pub fn update(&mut self, selection: AxisSelection, now_ms: f64) -> bool {
        if self.state != ChartState::Ready || selection == self.selection {
            return false;
        }
        let Some(dataset) = &self.dataset else {
            return false;
        };
        let previous = self.selection;
        self.selection = selection;
        let transition = self.config.transition();
        let padding = self.config.domain_padding();

        let mut diffs: Vec<MarkDiff> = Vec::new();
        for axis in previous.changed_axes(&selection) {
            let field = selection.field(axis);
            let (layer, range) = match axis {
                Axis::X => (X_AXIS, self.layout.x_range()),
                Axis::Y => (Y_AXIS, self.layout.y_range()),
            };
            let scale = compute_scale(dataset, field, range, padding);
            match axis {
                Axis::X => self.x_scale = scale,
                Axis::Y => self.y_scale = scale,
            }
            let axis_marks = self.axis_marks(axis);
            diffs.extend(self.scene.replace_layer(layer, axis_marks, Some(transition), now_ms));
            diffs.extend(self.scene.patch(labels::marks_for_axis(
                LABELS,
                &self.layout,
                &selection,
                axis,
            )));
            debug!(?axis, %field, domain = ?scale.domain(), "rescaled axis");
        }
        let markers = self.marker_marks(dataset);
        let texts = self.marker_text_marks(dataset);
        diffs.extend(self.scene.animate(markers.into_iter().chain(texts), transition, now_ms));
        self.surface.apply(&diffs);

        if let Some(view) = &mut self.tooltip {
            if let Some(row) = dataset.row(view.row) {
                view.html = self.tooltips.html(row, &selection);
                self.surface.show_tooltip(view);
            }
        }
        debug!(from = %previous, to = %selection, "selection changed");
        true
    }

    /// Applies a label control's choice; see [`ScatterChart::update`].
    pub fn select(&mut self, choice: AxisChoice, now_ms: f64) -> bool {
        self.update(self.selection.with(choice), now_ms)
    }

    /// Steps running transitions to `now_ms`. Returns whether anything is still animating.
    pub fn advance(&mut self, now_ms: f64) -> bool {
        let diffs = self.scene.advance(now_ms);
        if !diffs.is_empty() {
            self.surface.apply(&diffs);
        }
        self.scene.is_animating()
    }

    /// Dispatches one event. Returns whether it changed anything.
    ///
    /// `Resize` rebuilds the drawing and leaves the chart waiting for data; every other event
    /// is ignored until the data has loaded.
    pub fn handle_event(&mut self, event: ChartEvent) -> bool {
        if let ChartEvent::Resize { size } = event {
            let _ = self.initialize(size);
            return true;
        }
        if self.state != ChartState::Ready {
            debug!(?event, state = ?self.state, "ignoring event before data");
            return false;
        }
        match event {
            ChartEvent::Resize { .. } => false,
            ChartEvent::Click { target, now_ms } => match labels::control_for(LABELS, target) {
                Some(choice) => self.select(choice, now_ms),
                None => false,
            },
            ChartEvent::PointerOver { target } => self.show_tooltip(target),
            ChartEvent::PointerOut { target } => self.hide_tooltip(target),
            ChartEvent::Frame { now_ms } => self.advance(now_ms),
        }
    }

    /// Returns the topmost marker or label control under `pt`, in canvas coordinates.
    pub fn hit_test(&self, pt: Point) -> Option<MarkId> {
        let origin = self.layout.origin();
        let local = Point::new(pt.x - origin.x, pt.y - origin.y);
        self.scene.hit_test(local, |m: &Mark| {
            m.has_class(MARKER_CLASS) || m.has_class(LABEL_CLASS)
        })
    }

    fn show_tooltip(&mut self, target: MarkId) -> bool {
        if target.layer() != MARKERS {
            return false;
        }
        let Some(dataset) = &self.dataset else {
            return false;
        };
        let Ok(row) = usize::try_from(target.index()) else {
            return false;
        };
        let (Some(data), Some(shown)) = (dataset.row(row), self.scene.shown(target)) else {
            return false;
        };
        let view = TooltipView {
            row,
            anchor: shown.position(),
            offset: self.config.tooltip_offset,
            html: self.tooltips.html(data, &self.selection),
        };
        self.surface.show_tooltip(&view);
        self.tooltip = Some(view);
        true
    }

    fn hide_tooltip(&mut self, target: MarkId) -> bool {
        if target.layer() != MARKERS || self.tooltip.is_none() {
            return false;
        }
        self.tooltip = None;
        self.surface.hide_tooltip();
        true
    }

    fn axis_marks(&self, axis: Axis) -> Vec<Mark> {
        let plot = self.layout.plot;
        match axis {
            Axis::X => AxisSpec::bottom(X_AXIS, self.x_scale)
                .with_class("x-axis")
                .marks(plot),
            Axis::Y => AxisSpec::left(Y_AXIS, self.y_scale)
                .with_class("y-axis")
                .marks(plot),
        }
    }

    fn marker_marks(&self, dataset: &Dataset) -> Vec<Mark> {
        PointMarkSpec::new(
            MARKERS,
            self.selection.x.field().col(),
            self.selection.y.field().col(),
            self.x_scale,
            self.y_scale,
        )
        .with_radius(self.config.marker_radius)
        .with_fill(css::LIGHT_BLUE)
        .with_class(MARKER_CLASS)
        .marks(dataset)
    }

    fn marker_text_marks(&self, dataset: &Dataset) -> Vec<Mark> {
        RowTextMarkSpec::new(
            MARKER_TEXT,
            ABBR_COL,
            self.selection.x.field().col(),
            self.selection.y.field().col(),
            self.x_scale,
            self.y_scale,
        )
        .with_font_size(MARKER_TEXT_SIZE)
        .with_fill(css::WHITE)
        .with_class(MARKER_TEXT_CLASS)
        .marks(dataset)
    }
}

impl<S> ScatterChart<S> {
    /// Returns the configuration.
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Returns the lifecycle state.
    pub fn state(&self) -> ChartState {
        self.state
    }

    /// Returns the current selection.
    pub fn selection(&self) -> AxisSelection {
        self.selection
    }

    /// Returns the loaded dataset.
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Returns the layout of the mounted drawing.
    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    /// Returns the current X scale.
    pub fn x_scale(&self) -> ScaleLinear {
        self.x_scale
    }

    /// Returns the current Y scale.
    pub fn y_scale(&self) -> ScaleLinear {
        self.y_scale
    }

    /// Returns the retained scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Returns the visible tooltip, if any.
    pub fn tooltip(&self) -> Option<&TooltipView> {
        self.tooltip.as_ref()
    }

    /// Returns the surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use statviz_core::MarkPayload;

    use super::*;
    use crate::dataset::DataRow;
    use crate::error::DataLoadError;
    use crate::selection::{XField, YField};
    use crate::svg::SvgSurface;

    fn dataset() -> Dataset {
        Dataset::from_rows(vec![
            DataRow::new("Alpha", "AA", [10.0, 40.0, 40000.0, 5.0, 20.0, 12.0]),
            DataRow::new("Beta", "BB", [20.0, 50.0, 50000.0, 15.0, 25.0, 16.0]),
            DataRow::new("Gamma", "CC", [30.0, 60.0, 60000.0, 25.0, 30.0, 20.0]),
        ])
    }

    fn ready() -> ScatterChart<SvgSurface> {
        let mut chart = ScatterChart::new(ChartConfig::default(), SvgSurface::new("#scatter"));
        let ticket = chart.initialize(Size::new(800.0, 500.0));
        chart.on_data_loaded(ticket, Ok(dataset()));
        chart
    }

    fn center(chart: &ScatterChart<SvgSurface>, row: u32) -> Point {
        chart
            .scene()
            .shown(MarkId::new(MARKERS, row))
            .map(MarkPayload::position)
            .unwrap()
    }

    #[test]
    fn initialize_waits_for_data() {
        let mut chart = ScatterChart::new(ChartConfig::default(), SvgSurface::new("#scatter"));
        assert_eq!(chart.state(), ChartState::Idle);
        chart.initialize(Size::new(800.0, 500.0));
        assert_eq!(chart.state(), ChartState::AwaitingData);
        assert!(chart.scene().is_empty());
        assert_eq!(chart.surface().svg_count(), 1);
    }

    #[test]
    fn load_failure_is_terminal() {
        let mut chart = ScatterChart::new(ChartConfig::default(), SvgSurface::new("#scatter"));
        let ticket = chart.initialize(Size::new(800.0, 500.0));
        chart.on_data_loaded(ticket, Err(DataLoadError::Empty));
        assert_eq!(chart.state(), ChartState::Failed);
        chart.on_data_loaded(ticket, Ok(dataset()));
        assert_eq!(chart.state(), ChartState::Failed);
        assert!(chart.scene().is_empty());
        assert!(!chart.select(AxisChoice::X(XField::Age), 0.0));
    }

    #[test]
    fn data_for_a_previous_drawing_is_dropped() {
        let mut chart = ScatterChart::new(ChartConfig::default(), SvgSurface::new("#scatter"));
        let stale = chart.initialize(Size::new(800.0, 500.0));
        let current = chart.initialize(Size::new(800.0, 500.0));
        assert_ne!(stale, current);
        assert_eq!(chart.ticket(), current);

        chart.on_data_loaded(stale, Err(DataLoadError::Empty));
        assert_eq!(chart.state(), ChartState::AwaitingData);
        chart.on_data_loaded(stale, Ok(dataset()));
        assert_eq!(chart.state(), ChartState::AwaitingData);
        assert!(chart.scene().is_empty());

        chart.on_data_loaded(current, Ok(dataset()));
        assert_eq!(chart.state(), ChartState::Ready);
        assert_eq!(chart.scene().ids_in_layer(MARKERS).len(), 3);
    }

    #[test]
    fn render_draws_every_layer() {
        let chart = ready();
        assert_eq!(chart.scene().ids_in_layer(MARKERS).len(), 3);
        assert_eq!(chart.scene().ids_in_layer(MARKER_TEXT).len(), 3);
        assert_eq!(chart.scene().ids_in_layer(LABELS).len(), 6);
        assert!(!chart.scene().ids_in_layer(X_AXIS).is_empty());
        assert!(!chart.scene().ids_in_layer(Y_AXIS).is_empty());
        assert_eq!(chart.surface().element_count(), chart.scene().len());
    }

    #[test]
    fn update_only_rescales_the_changed_axis() {
        let mut chart = ready();
        let y_before = chart.y_scale();
        let y_axis_before: Vec<_> = chart
            .scene()
            .ids_in_layer(Y_AXIS)
            .into_iter()
            .map(|id| chart.scene().get(id).cloned())
            .collect();
        assert!(chart.select(AxisChoice::X(XField::Age), 0.0));
        assert_eq!(chart.y_scale(), y_before);
        assert_eq!(chart.x_scale().domain(), (32.0, 72.0));
        let y_axis_after: Vec<_> = chart
            .scene()
            .ids_in_layer(Y_AXIS)
            .into_iter()
            .map(|id| chart.scene().get(id).cloned())
            .collect();
        assert_eq!(y_axis_before, y_axis_after);
    }

    #[test]
    fn markers_transition_over_the_configured_duration() {
        let mut chart = ready();
        let start = center(&chart, 0);
        chart.select(AxisChoice::Y(YField::Obesity), 0.0);
        assert_eq!(center(&chart, 0), start);
        assert!(chart.advance(500.0));
        assert!(!chart.advance(1000.0));
        let end = center(&chart, 0);
        assert_eq!(end.x, start.x);
        assert_eq!(end, chart.scene().get(MarkId::new(MARKERS, 0)).unwrap().payload.position());
    }

    #[test]
    fn clicking_the_active_control_is_a_no_op() {
        let mut chart = ready();
        let poverty = MarkId::new(LABELS, 0);
        assert!(!chart.handle_event(ChartEvent::Click { target: poverty, now_ms: 0.0 }));
        assert!(!chart.scene().is_animating());
        assert_eq!(chart.selection(), AxisSelection::default());
    }

    #[test]
    fn hover_shows_and_hides_tooltip() {
        let mut chart = ready();
        let target = MarkId::new(MARKERS, 1);
        assert!(chart.handle_event(ChartEvent::PointerOver { target }));
        let tip = chart.surface().tooltip().unwrap();
        assert_eq!(tip.html, "Beta<br>Poverty: 20%<br>Healthcare: 15%");
        assert_eq!(tip.anchor, center(&chart, 1));
        assert!(chart.handle_event(ChartEvent::PointerOut { target }));
        assert!(chart.surface().tooltip().is_none());
    }

    #[test]
    fn visible_tooltip_follows_selection() {
        let mut chart = ready();
        chart.handle_event(ChartEvent::PointerOver { target: MarkId::new(MARKERS, 0) });
        chart.select(AxisChoice::X(XField::Income), 0.0);
        assert_eq!(
            chart.tooltip().unwrap().html,
            "Alpha<br>Income: 40000%<br>Healthcare: 5%"
        );
    }

    #[test]
    fn hit_test_finds_markers_in_canvas_coordinates() {
        let chart = ready();
        let c = center(&chart, 2);
        let origin = chart.layout().origin();
        let hit = chart.hit_test(Point::new(c.x + origin.x, c.y + origin.y));
        assert_eq!(hit, Some(MarkId::new(MARKERS, 2)));
        assert_eq!(chart.hit_test(Point::new(-500.0, -500.0)), None);
    }

    #[test]
    fn events_before_data_are_ignored() {
        let mut chart = ScatterChart::new(ChartConfig::default(), SvgSurface::new("#scatter"));
        chart.initialize(Size::new(800.0, 500.0));
        assert!(!chart.handle_event(ChartEvent::Click {
            target: MarkId::new(LABELS, 1),
            now_ms: 0.0,
        }));
        assert!(!chart.handle_event(ChartEvent::Frame { now_ms: 16.0 }));
        assert_eq!(chart.state(), ChartState::AwaitingData);
    }
}
