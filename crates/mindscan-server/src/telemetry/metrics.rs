// SPDX-License-Identifier: Apache-2.0

use axum::http::StatusCode;
use mindscan_api::ApiError;
use mindscan_model::{DecodedResult, Domain};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::Duration;
use tokio::sync::Mutex;

const METRIC_PREFIX: &str = "mindscan";
const OUTCOME_SUCCEEDED: &str = "succeeded";

#[derive(Debug, Default, Clone, Copy)]
struct LatencySummary {
    count: u64,
    sum_ns: u128,
}

#[derive(Default)]
pub(crate) struct RequestMetrics {
    counts: Mutex<BTreeMap<(String, u16), u64>>,
    latency: Mutex<BTreeMap<String, LatencySummary>>,
    outcomes: Mutex<BTreeMap<&'static str, u64>>,
    labels: Mutex<BTreeMap<(Domain, &'static str), u64>>,
}

impl RequestMetrics {
    pub(crate) async fn observe_request(&self, route: &str, status: StatusCode, latency: Duration) {
        let mut counts = self.counts.lock().await;
        *counts
            .entry((route.to_string(), status.as_u16()))
            .or_insert(0) += 1;
        drop(counts);
        let mut latency_map = self.latency.lock().await;
        let summary = latency_map.entry(route.to_string()).or_default();
        summary.count += 1;
        summary.sum_ns += latency.as_nanos();
    }

    pub(crate) async fn observe_prediction(&self, outcome: Result<&DecodedResult, &ApiError>) {
        let key = match outcome {
            Ok(_) => OUTCOME_SUCCEEDED,
            Err(err) => err.code.as_str(),
        };
        *self.outcomes.lock().await.entry(key).or_insert(0) += 1;
        if let Ok(decoded) = outcome {
            let mut labels = self.labels.lock().await;
            for domain in Domain::ALL {
                *labels.entry((domain, decoded.label(domain))).or_insert(0) += 1;
            }
        }
    }

    /// Prometheus text exposition of everything observed so far.
    pub(crate) async fn render(&self) -> String {
        let mut body = String::new();
        let version = env!("CARGO_PKG_VERSION");
        let _ = writeln!(
            body,
            "{METRIC_PREFIX}_build_info{{version=\"{version}\"}} 1"
        );
        for ((route, status), count) in self.counts.lock().await.iter() {
            let _ = writeln!(
                body,
                "{METRIC_PREFIX}_http_requests_total{{route=\"{route}\",status=\"{status}\"}} {count}"
            );
        }
        for (route, summary) in self.latency.lock().await.iter() {
            let seconds = summary.sum_ns as f64 / 1e9;
            let _ = writeln!(
                body,
                "{METRIC_PREFIX}_http_request_duration_seconds_sum{{route=\"{route}\"}} {seconds:.6}"
            );
            let _ = writeln!(
                body,
                "{METRIC_PREFIX}_http_request_duration_seconds_count{{route=\"{route}\"}} {}",
                summary.count
            );
        }
        for (outcome, count) in self.outcomes.lock().await.iter() {
            let _ = writeln!(
                body,
                "{METRIC_PREFIX}_predictions_total{{outcome=\"{outcome}\"}} {count}"
            );
        }
        for ((domain, label), count) in self.labels.lock().await.iter() {
            let _ = writeln!(
                body,
                "{METRIC_PREFIX}_prediction_labels_total{{domain=\"{domain}\",label=\"{label}\"}} {count}"
            );
        }
        body
    }
}
