//! HTML report exporter.
//!
//! Produces a self-contained, printable HTML file with all CSS inlined.
//! Printing it from a browser yields the downloadable report.

use anyhow::Result;

use mirror_core::report::ReportPayload;
use mirror_core::traits::ReportExporter;

use crate::content::{
    body_blocks, prepared_for, Block, ATTRIBUTION, COPYRIGHT, SITE_LABEL, SITE_URL, TITLE,
};

/// Escape a string for safe HTML insertion.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate the HTML document for a payload.
pub fn generate_html(payload: &ReportPayload) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>{} \u{2014} {}</title>\n",
        TITLE,
        html_escape(&payload.primary_archetype.mask_name)
    ));
    html.push_str("<meta name=\"author\" content=\"Metro Munk\">\n");
    html.push_str(
        "<meta name=\"keywords\" content=\"Archetype, ELA, Somatic Psych, Shadow Work\">\n",
    );
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n<main>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{TITLE}</h1>\n"));
    html.push_str(&format!(
        "<p class=\"attribution\">{}</p>\n",
        html_escape(ATTRIBUTION)
    ));
    if let Some(line) = prepared_for(payload) {
        html.push_str(&format!("<p class=\"meta\">{}</p>\n", html_escape(&line)));
    }
    html.push_str(&format!(
        "<p class=\"meta\">Date: {}</p>\n",
        payload.date_label()
    ));
    html.push_str("</header>\n");

    let mut in_section = false;
    for block in body_blocks(payload) {
        match block {
            Block::Section(title) => {
                if in_section {
                    html.push_str("</section>\n");
                }
                html.push_str(&format!("<section>\n<h2>{}</h2>\n", html_escape(title)));
                in_section = true;
            }
            Block::Paragraph(text) => {
                html.push_str(&format!("<p>{}</p>\n", html_escape(&text)));
            }
            Block::Label(text) => {
                html.push_str(&format!("<p class=\"label\">{}</p>\n", html_escape(&text)));
            }
            Block::Important(text) => {
                html.push_str(&format!(
                    "<p class=\"important\">{}</p>\n",
                    html_escape(&text)
                ));
            }
            Block::Term(text) => {
                html.push_str(&format!("<p class=\"term\">{}</p>\n", html_escape(text)));
            }
            Block::List(items) => html.push_str(&list(&items)),
            Block::Chakras(chakras) => {
                html.push_str("<ul class=\"chakras\">\n");
                for chakra in chakras {
                    html.push_str(&format!(
                        "<li><span class=\"swatch\" style=\"background:{}\"></span>{}</li>\n",
                        chakra.colour(),
                        chakra.label()
                    ));
                }
                html.push_str("</ul>\n");
            }
            Block::Markdown(text) => {
                html.push_str("<div class=\"insight\">\n");
                for paragraph in text.split("\n\n").filter(|p| !p.trim().is_empty()) {
                    html.push_str(&format!("<p>{}</p>\n", html_escape(paragraph.trim())));
                }
                html.push_str("</div>\n");
            }
        }
    }
    if in_section {
        html.push_str("</section>\n");
    }

    // Footer
    html.push_str(&format!(
        "<footer>{} <a href=\"{SITE_URL}\">{SITE_LABEL}</a>.</footer>\n",
        html_escape(COPYRIGHT)
    ));

    html.push_str("</main>\n</body>\n</html>");
    html
}

fn list(items: &[String]) -> String {
    let mut out = String::from("<ul>\n");
    for item in items {
        out.push_str(&format!("<li>{}</li>\n", html_escape(item)));
    }
    out.push_str("</ul>\n");
    out
}

/// Self-contained printable HTML exporter.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlExporter;

impl ReportExporter for HtmlExporter {
    fn name(&self) -> &str {
        "html"
    }

    fn extension(&self) -> &str {
        "html"
    }

    fn render(&self, payload: &ReportPayload) -> Result<String> {
        Ok(generate_html(payload))
    }
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #333333; --muted: #666; --border: #e5e7eb; --accent: #6d28d9; }
body { font-family: Roboto, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); line-height: 1.45; }
main { max-width: 46rem; margin: 0 auto; }
h1 { font-size: 1.8rem; margin-bottom: 0.3rem; }
h2 { font-size: 1.2rem; margin-top: 2rem; color: #333333; border-bottom: 1px solid var(--border); padding-bottom: 0.3rem; }
.attribution { font-size: 0.75rem; font-style: italic; color: var(--muted); }
.meta { color: var(--muted); }
.label { font-size: 1rem; margin: 0.3rem 0; }
.important { font-size: 1.15rem; font-weight: bold; color: #000; margin: 0.4rem 0 1rem; }
.term { font-weight: bold; margin: 0.8rem 0 0.2rem; }
.chakras { list-style: none; padding-left: 0; }
.swatch { display: inline-block; width: 0.8rem; height: 0.8rem; border-radius: 50%; margin-right: 0.5rem; vertical-align: middle; }
.insight { border-left: 3px solid var(--accent); padding-left: 1rem; white-space: pre-line; }
footer { margin-top: 2.5rem; font-size: 0.7rem; font-style: italic; color: #999; text-align: center; }
footer a { color: blue; text-decoration: underline; }
@media print {
  body { padding: 0; }
  section { break-inside: avoid-page; }
}
"#;
