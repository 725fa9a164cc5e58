// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

use mindscan_inference::{ConstantClassifier, InferenceAdapter};
use mindscan_model::{question_keys, ExpectedColumns};
use mindscan_server::{build_router, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub struct RawResponse {
    pub status: u16,
    pub head: String,
    pub body: String,
}

impl RawResponse {
    pub fn header(&self, name: &str) -> Option<String> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then(|| value.trim().to_string())
        })
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("json body")
    }
}

pub fn constant_adapter(dep: i64, sat: i64, big: i64) -> InferenceAdapter {
    InferenceAdapter::new(
        ExpectedColumns::canonical(),
        Arc::new(ConstantClassifier::new(dep)),
        Arc::new(ConstantClassifier::new(sat)),
        Arc::new(ConstantClassifier::new(big)),
    )
    .expect("constant adapter")
}

pub async fn spawn_server(state: AppState) -> SocketAddr {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

pub async fn send_raw(
    addr: SocketAddr,
    method: &str,
    path: &str,
    headers: &[(&str, &str)],
    body: &str,
) -> RawResponse {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let mut req = format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
    for (name, value) in headers {
        req.push_str(&format!("{name}: {value}\r\n"));
    }
    req.push_str(&format!("Content-Length: {}\r\n\r\n{body}", body.len()));
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("status");
    RawResponse {
        status,
        head: head.to_string(),
        body: body.to_string(),
    }
}

pub async fn post_form(addr: SocketAddr, body: &str, accept: &str) -> RawResponse {
    send_raw(
        addr,
        "POST",
        "/predict",
        &[
            ("Content-Type", "application/x-www-form-urlencoded"),
            ("Accept", accept),
        ],
        body,
    )
    .await
}

/// `q1=v&q2=v&...&q40=v`, skipping keys listed in `omit`.
pub fn form_body(value: &str, omit: &[&str]) -> String {
    question_keys()
        .into_iter()
        .filter(|k| !omit.contains(&k.as_str()))
        .map(|k| format!("{k}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

pub const MULTIPART_BOUNDARY: &str = "mindscan-boundary-7MA4YWxk";

pub fn multipart_part(name: &str, value: &str) -> String {
    format!(
        "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
    )
}

/// `leading` parts first, then `q1..q40` set to `value`, then the closing
/// delimiter.
pub fn multipart_body(leading: &[(&str, &str)], value: &str) -> String {
    let mut body: String = leading
        .iter()
        .map(|(name, v)| multipart_part(name, v))
        .collect();
    for key in question_keys() {
        body.push_str(&multipart_part(&key, value));
    }
    body.push_str(&format!("--{MULTIPART_BOUNDARY}--\r\n"));
    body
}

pub async fn post_multipart(addr: SocketAddr, body: &str) -> RawResponse {
    let content_type = format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}");
    send_raw(
        addr,
        "POST",
        "/predict",
        &[
            ("Content-Type", content_type.as_str()),
            ("Accept", "application/json"),
        ],
        body,
    )
    .await
}
