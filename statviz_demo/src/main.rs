// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted `statviz` session written to `statviz_demo.html`.

mod html;

use std::process::ExitCode;

use statviz::{
    AxisChoice, ChartConfig, ChartEvent, ConfigError, EventLoop, FsDataSource, LABELS, MARKERS,
    ScatterChart, Size, SvgSurface, XField, YField,
};
use statviz_core::MarkId;
use thiserror::Error;
use tracing::{error, info};

use crate::html::{Section, render_report};

const OUTPUT: &str = "statviz_demo.html";

#[derive(Debug, Error)]
enum DemoError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to write `{path}`: {source}")]
    Write {
        path: &'static str,
        #[source]
        source: std::io::Error,
    },
}

fn control(choice: AxisChoice) -> MarkId {
    let index = statviz::CONTROLS
        .iter()
        .position(|c| c.choice == choice)
        .unwrap_or_default();
    #[allow(clippy::cast_possible_truncation, reason = "there are six controls")]
    {
        MarkId::new(LABELS, index as u32)
    }
}

struct Session {
    events: EventLoop<SvgSurface, FsDataSource>,
    sections: Vec<Section>,
}

impl Session {
    fn snapshot(&mut self, title: &str, note: &str) {
        let chart = self.events.chart();
        self.sections.push(Section {
            title: title.to_owned(),
            note: format!("{note} Selection: {}.", chart.selection()),
            svg: chart.surface().to_svg_string(),
        });
    }

    fn send(&mut self, events: impl IntoIterator<Item = ChartEvent>) {
        for event in events {
            self.events.push(event);
        }
        self.events.run();
    }
}

fn run() -> Result<(), DemoError> {
    let config = match std::env::args().nth(1) {
        Some(path) => ChartConfig::from_path(path)?,
        None => ChartConfig::default(),
    };
    let viewport = Size::new(config.width, config.height);
    let chart = ScatterChart::new(config, SvgSurface::new("#scatter"));
    let mut session = Session {
        events: EventLoop::new(chart, FsDataSource),
        sections: Vec::new(),
    };

    session.events.start(viewport);
    session.snapshot("Initial draw", "Poverty against lack of healthcare.");

    session.send([
        ChartEvent::Click { target: control(AxisChoice::X(XField::Age)), now_ms: 0.0 },
        ChartEvent::Frame { now_ms: 500.0 },
    ]);
    session.snapshot("Mid-transition", "Half way through the move to median age.");

    session.send([ChartEvent::Frame { now_ms: 1000.0 }]);
    session.snapshot("Age selected", "The X axis and every marker settled.");

    session.send([
        ChartEvent::Click { target: control(AxisChoice::Y(YField::Smokes)), now_ms: 2000.0 },
        ChartEvent::Frame { now_ms: 3000.0 },
    ]);
    session.snapshot("Smokes selected", "Only the Y axis was rescaled.");

    session.send([ChartEvent::PointerOver { target: MarkId::new(MARKERS, 0) }]);
    session.snapshot("Tooltip", "Hovering the first marker.");

    session.send([
        ChartEvent::PointerOut { target: MarkId::new(MARKERS, 0) },
        ChartEvent::Resize { size: viewport },
    ]);
    session.snapshot("Rebuilt", "A resize starts over from the default selection.");

    let html = render_report("statviz demo", &session.sections);
    std::fs::write(OUTPUT, html).map_err(|source| DemoError::Write {
        path: OUTPUT,
        source,
    })?;
    info!(path = OUTPUT, sections = session.sections.len(), "wrote report");
    println!("wrote {OUTPUT}");
    Ok(())
}

fn main() -> ExitCode {
    let _ = statviz::init_default_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "demo failed");
            eprintln!("statviz_demo: {err}");
            ExitCode::FAILURE
        }
    }
}
