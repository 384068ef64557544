// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser entry point: mounting, data fetch, event delegation and the frame loop.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_net::http::Request;
use statviz::{
    ChartConfig, ChartEvent, DataLoadError, Dataset, LoadResult, NumericPolicy, ScatterChart, Size,
};
use tracing::info;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, MouseEvent, Window};

use crate::attrs::{MARK_ATTR, parse_mark_attr};
use crate::dom::DomSurface;

type Chart = Rc<RefCell<ScatterChart<DomSurface>>>;

/// A chart mounted in the page.
#[wasm_bindgen]
#[derive(Debug)]
pub struct ScatterApp {
    chart: Chart,
}

#[wasm_bindgen]
impl ScatterApp {
    /// Mounts the chart described by `config_json` (or the defaults) and starts loading data.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<Self, JsValue> {
        let config = match config_json {
            Some(json) => ChartConfig::from_json_str(&json)
                .map_err(|err| JsValue::from_str(&err.to_string()))?,
            None => ChartConfig::default(),
        };
        let window = browser_window()?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("statviz_web: missing document"))?;
        let surface = DomSurface::new(document, &config.selector)?;
        let chart: Chart = Rc::new(RefCell::new(ScatterChart::new(config, surface)));

        listen_pointer(&chart, "click")?;
        listen_pointer(&chart, "mouseover")?;
        listen_pointer(&chart, "mouseout")?;
        listen_resize(&window, &chart)?;
        start_frame_loop(&window, &chart)?;
        rebuild(&window, &chart);

        Ok(Self { chart })
    }

    /// Rebuilds the chart from scratch, as a window resize does.
    pub fn rebuild(&self) -> Result<(), JsValue> {
        let window = browser_window()?;
        rebuild(&window, &self.chart);
        Ok(())
    }
}

fn browser_window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("statviz_web: missing window"))
}

fn viewport(window: &Window) -> Size {
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Size::new(width, height)
}

fn now_ms(window: &Window) -> f64 {
    window.performance().map_or(0.0, |p| p.now())
}

fn rebuild(window: &Window, chart: &Chart) {
    let (ticket, path, policy) = {
        let mut chart = chart.borrow_mut();
        let ticket = chart.initialize(viewport(window));
        let config = chart.config();
        (ticket, config.data_path.clone(), config.numeric_policy)
    };
    let chart = Rc::clone(chart);
    spawn_local(async move {
        let result = fetch_dataset(&path, policy).await;
        chart.borrow_mut().on_data_loaded(ticket, result);
    });
}

async fn fetch_dataset(path: &str, policy: NumericPolicy) -> LoadResult<Dataset> {
    let fetch_err = |message: String| DataLoadError::Fetch {
        path: path.to_owned(),
        message,
    };
    let response = Request::get(path)
        .send()
        .await
        .map_err(|err| fetch_err(err.to_string()))?;
    if !response.ok() {
        return Err(fetch_err(format!("HTTP {}", response.status())));
    }
    let text = response.text().await.map_err(|err| fetch_err(err.to_string()))?;
    let dataset = Dataset::parse_csv(&text, policy)?;
    info!(path, rows = dataset.len(), "fetched dataset");
    Ok(dataset)
}

fn listen_pointer(chart: &Chart, kind: &'static str) -> Result<(), JsValue> {
    let container = chart.borrow().surface().container().clone();
    let handler_chart = Rc::clone(chart);
    let closure = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |event: MouseEvent| {
        let Some(target) = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.get_attribute(MARK_ATTR))
            .and_then(|raw| parse_mark_attr(&raw))
        else {
            return;
        };
        let chart_event = match kind {
            "click" => {
                let now = web_sys::window().map_or(0.0, |w| now_ms(&w));
                ChartEvent::Click { target, now_ms: now }
            }
            "mouseover" => ChartEvent::PointerOver { target },
            _ => ChartEvent::PointerOut { target },
        };
        handler_chart.borrow_mut().handle_event(chart_event);
    }));
    container.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn listen_resize(window: &Window, chart: &Chart) -> Result<(), JsValue> {
    let handler_chart = Rc::clone(chart);
    let closure = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        if let Some(window) = web_sys::window() {
            rebuild(&window, &handler_chart);
        }
    }));
    window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn start_frame_loop(window: &Window, chart: &Chart) -> Result<(), JsValue> {
    let slot = Rc::new(RefCell::new(None::<Closure<dyn FnMut(f64)>>));
    let next = Rc::clone(&slot);
    let frame_chart = Rc::clone(chart);
    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        frame_chart
            .borrow_mut()
            .handle_event(ChartEvent::Frame { now_ms: now });
        if let (Some(window), Some(cb)) = (web_sys::window(), next.borrow().as_ref()) {
            let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(cb) = slot.borrow().as_ref() {
        window.request_animation_frame(cb.as_ref().unchecked_ref())?;
    }
    Ok(())
}
