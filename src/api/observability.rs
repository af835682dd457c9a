use crate::api::AppState;
use axum::{extract::State, response::IntoResponse};
use std::sync::Arc;

pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{Instrument, Span, field, info, info_span};
use uuid::Uuid;

/// Voting identifiers a handler attaches to its response so the request
/// span and log line carry them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VotingContext {
    pub comparison_id: i32,
    pub winner_set_id: Option<i32>,
}

/// Coarse grouping of routes, used as a metrics label.
#[must_use]
pub fn surface_of(route: &str) -> &'static str {
    match route.trim_start_matches("/api/v1") {
        "/comparison" | "/votes" => "voting",
        "/leaderboard" => "leaderboard",
        r if r.starts_with("/movies") || r.starts_with("/top4-sets") => "catalog",
        _ => "system",
    }
}

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().to_string();
    let uri = req.uri().path().to_string();

    let matched_path = req
        .extensions()
        .get::<axum::extract::MatchedPath>()
        .map(|mp| mp.as_str().to_string());

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %uri,
        route = matched_path.clone(),
        comparison_id = field::Empty,
        winner_set_id = field::Empty,
    );

    async move {
        let response = next.run(req).await;

        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let status = response.status().as_u16();

        let outcome = if status >= 500 {
            "error"
        } else if status >= 400 {
            "client_error"
        } else {
            "success"
        };

        // Matched route keeps label cardinality bounded
        let metrics_path = matched_path.as_deref().unwrap_or(&uri);

        if let Some(ctx) = response.extensions().get::<VotingContext>() {
            let span = Span::current();
            span.record("comparison_id", ctx.comparison_id);
            if let Some(winner) = ctx.winner_set_id {
                span.record("winner_set_id", winner);
            }
        }

        let labels = [
            ("method", method.clone()),
            ("path", metrics_path.to_string()),
            ("surface", surface_of(metrics_path).to_string()),
            ("status", status.to_string()),
        ];

        metrics::counter!("http_requests_total", &labels).increment(1);
        metrics::histogram!("http_request_duration_seconds", &labels)
            .record(start.elapsed().as_secs_f64());

        info!(
            event = "http_request_finished",
            duration_ms,
            status_code = status,
            outcome,
            "Request finished"
        );

        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_of() {
        assert_eq!(surface_of("/api/v1/votes"), "voting");
        assert_eq!(surface_of("/api/v1/comparison"), "voting");
        assert_eq!(surface_of("/api/v1/leaderboard"), "leaderboard");
        assert_eq!(surface_of("/api/v1/movies/{id}"), "catalog");
        assert_eq!(surface_of("/api/v1/top4-sets"), "catalog");
        assert_eq!(surface_of("/api/v1/health"), "system");
    }
}
