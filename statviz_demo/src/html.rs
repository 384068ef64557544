// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! HTML report assembly.

use statviz::escape_xml;

const STYLE: &str = include_str!("../../assets/css/d3Style.css");

/// One step of the scripted session.
#[derive(Debug)]
pub(crate) struct Section {
    pub(crate) title: String,
    pub(crate) note: String,
    pub(crate) svg: String,
}

/// Renders all sections into a standalone page.
pub(crate) fn render_report(title: &str, sections: &[Section]) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_xml(title)));
    out.push_str("<style>\nbody { font-family: sans-serif; margin: 24px; }\n");
    out.push_str("section { margin-bottom: 32px; }\n.snapshot { position: relative; }\n");
    out.push_str(STYLE);
    out.push_str("</style>\n</head>\n<body>\n");
    out.push_str(&format!("<h1>{}</h1>\n", escape_xml(title)));
    for (i, section) in sections.iter().enumerate() {
        out.push_str("<section>\n");
        out.push_str(&format!(
            "<h2>{}. {}</h2>\n<p>{}</p>\n",
            i + 1,
            escape_xml(&section.title),
            escape_xml(&section.note)
        ));
        out.push_str("<div class=\"snapshot\">\n");
        out.push_str(&section.svg);
        out.push_str("</div>\n</section>\n");
    }
    out.push_str("</body>\n</html>\n");
    out
}
