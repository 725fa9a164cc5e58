// SPDX-License-Identifier: Apache-2.0

use crate::http::views;
use crate::AppState;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use mindscan_api::ViewEnvelope;

/// True when `Accept` ranks `text/html` strictly above `application/json`.
pub(crate) fn wants_html(headers: &HeaderMap) -> bool {
    let Some(accept) = headers.get(header::ACCEPT).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let html = media_quality(accept, "text", "html");
    html > 0.0 && html > media_quality(accept, "application", "json")
}

/// Quality `accept` assigns to `kind/subtype`, taken from the most specific
/// matching media range. Unlisted types get 0.
fn media_quality(accept: &str, kind: &str, subtype: &str) -> f32 {
    let mut best: Option<(u8, f32)> = None;
    for range in accept.split(',') {
        let mut parts = range.split(';');
        let Some((range_kind, range_sub)) = parts.next().and_then(|m| m.split_once('/')) else {
            continue;
        };
        let specificity = match (range_kind.trim(), range_sub.trim()) {
            (k, s) if k.eq_ignore_ascii_case(kind) && s.eq_ignore_ascii_case(subtype) => 2,
            (k, "*") if k.eq_ignore_ascii_case(kind) => 1,
            ("*", "*") => 0,
            _ => continue,
        };
        let quality = parts
            .filter_map(|param| param.split_once('='))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("q"))
            .and_then(|(_, value)| value.trim().parse::<f32>().ok())
            .unwrap_or(1.0)
            .clamp(0.0, 1.0);
        if best.is_none_or(|(seen, _)| specificity > seen) {
            best = Some((specificity, quality));
        }
    }
    best.map_or(0.0, |(_, quality)| quality)
}

/// Renders a view. Views are always `200 OK`: both error kinds are shown to
/// the user on the input view rather than surfaced as HTTP failures.
#[must_use]
pub(crate) fn view_response(headers: &HeaderMap, state: &AppState, envelope: &ViewEnvelope) -> Response {
    if state.api.enable_html_views && wants_html(headers) {
        (StatusCode::OK, Html(views::render(envelope))).into_response()
    } else {
        (StatusCode::OK, Json(envelope)).into_response()
    }
}

#[must_use]
pub(crate) fn with_request_id(mut response: Response, request_id: &str) -> Response {
    if let Ok(value) = HeaderValue::from_str(request_id) {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}
