// SPDX-License-Identifier: Apache-2.0

use mindscan_api::{ResultsView, ViewEnvelope, ViewKind};
use mindscan_model::question_keys;
use std::fmt::Write as _;

pub(crate) fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{title}</title></head><body>{body}</body></html>"
    )
}

fn input_page(error: Option<&str>) -> String {
    let mut body = String::from("<h1>Wellbeing quiz</h1>");
    if let Some(message) = error {
        let _ = write!(body, "<p class=\"error\" role=\"alert\">{}</p>", escape_html(message));
    }
    body.push_str("<form method=\"post\" action=\"/predict\"><ol>");
    for key in question_keys() {
        let _ = write!(
            body,
            "<li><label for=\"{key}\">{key}</label> <input id=\"{key}\" name=\"{key}\" type=\"number\" required></li>"
        );
    }
    body.push_str("</ol><button type=\"submit\">Submit</button></form>");
    page("Wellbeing quiz", &body)
}

fn results_page(data: &ResultsView) -> String {
    let mut body = String::from("<h1>Your results</h1><dl>");
    for (title, label, advice) in [
        ("Depression", &data.depression, &data.recommendation.dep),
        ("Satisfaction", &data.satisfaction, &data.recommendation.sat),
        ("Personality", &data.personality, &data.recommendation.big),
    ] {
        let _ = write!(
            body,
            "<dt>{title}: {}</dt><dd>{}</dd>",
            escape_html(label),
            escape_html(advice)
        );
    }
    body.push_str("</dl><p><a href=\"/\">Take the quiz again</a></p>");
    page("Your results", &body)
}

#[must_use]
pub(crate) fn render(envelope: &ViewEnvelope) -> String {
    match (envelope.view, envelope.data.as_ref()) {
        (ViewKind::Results, Some(data)) => results_page(data),
        _ => input_page(envelope.error.as_ref().map(|e| e.message.as_str())),
    }
}
