//! Request logging middleware.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::event_log::{ERROR_LOG, REQUEST_LOG};

use super::response::ServerFailure;
use super::state::AppState;

/// Records every request in the request log, and server failures in the
/// error log, tagging both with a correlation id.
pub async fn log_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let correlation_id = Uuid::new_v4();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
        .to_string();

    state
        .event_log()
        .record(&format!("{method}\t{origin}\t{uri}"), REQUEST_LOG)
        .await;

    let started = Instant::now();
    let response = next.run(request).await;
    let status = response.status();
    let failure = response.extensions().get::<ServerFailure>().cloned();

    if let Some(ServerFailure(message)) = failure {
        warn!(
            correlation_id = %correlation_id,
            method = %method,
            uri = %uri,
            error = %message,
            "Request failed"
        );
        state
            .event_log()
            .record(&format!("ERROR: {method} {uri} - {message}"), ERROR_LOG)
            .await;
    }

    info!(
        correlation_id = %correlation_id,
        method = %method,
        uri = %uri,
        status = status.as_u16(),
        duration_us = started.elapsed().as_micros() as u64,
        "Request handled"
    );
    response
}
