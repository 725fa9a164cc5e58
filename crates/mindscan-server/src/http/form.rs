// SPDX-License-Identifier: Apache-2.0

use axum::extract::{FromRequest, Multipart, Request};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Form;
use std::collections::BTreeMap;

/// Body encodings `/predict` reads as a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormEncoding {
    UrlEncoded,
    Multipart,
    /// Anything else, including no `Content-Type`. Read as an empty form.
    Other,
}

pub(crate) fn form_encoding(headers: &HeaderMap) -> FormEncoding {
    let essence = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.trim().to_ascii_lowercase());
    match essence.as_deref() {
        Some("application/x-www-form-urlencoded") => FormEncoding::UrlEncoded,
        Some("multipart/form-data") => FormEncoding::Multipart,
        _ => FormEncoding::Other,
    }
}

pub(crate) enum FormFailure {
    /// Rejections answered with their own status (over-limit body).
    PassThrough(Response),
    /// Body claimed a form encoding but could not be decoded.
    Unreadable(String),
}

fn classify(status: StatusCode, reason: String, rejection: impl IntoResponse) -> FormFailure {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        FormFailure::PassThrough(rejection.into_response())
    } else {
        FormFailure::Unreadable(reason)
    }
}

/// Collects the submitted fields. Repeated names keep their last value for
/// both encodings.
pub(crate) async fn read_form_fields<S>(
    request: Request,
    state: &S,
) -> Result<BTreeMap<String, String>, FormFailure>
where
    S: Send + Sync,
{
    match form_encoding(request.headers()) {
        FormEncoding::UrlEncoded => {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(request, state)
                .await
                .map_err(|r| classify(r.status(), r.body_text(), r))?;
            Ok(pairs.into_iter().collect())
        }
        FormEncoding::Multipart => {
            let mut multipart = Multipart::from_request(request, state)
                .await
                .map_err(|r| classify(r.status(), r.body_text(), r))?;
            let mut fields = BTreeMap::new();
            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| classify(e.status(), e.body_text(), e))?
            {
                let Some(name) = field.name().map(str::to_owned) else {
                    continue;
                };
                let value = field
                    .text()
                    .await
                    .map_err(|e| classify(e.status(), e.body_text(), e))?;
                fields.insert(name, value);
            }
            Ok(fields)
        }
        FormEncoding::Other => Ok(BTreeMap::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn content_type(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn encoding_follows_content_type_essence() {
        assert_eq!(
            form_encoding(&content_type("application/x-www-form-urlencoded")),
            FormEncoding::UrlEncoded
        );
        assert_eq!(
            form_encoding(&content_type("Multipart/Form-Data; boundary=xyz")),
            FormEncoding::Multipart
        );
        assert_eq!(
            form_encoding(&content_type("application/json")),
            FormEncoding::Other
        );
        assert_eq!(form_encoding(&HeaderMap::new()), FormEncoding::Other);
    }
}
