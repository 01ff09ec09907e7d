use axum::{
    body::Body,
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{debug, info, info_span, warn, Instrument, Level};
use uuid::Uuid;

pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Characters of a response body kept in the debug log, ellipsis included
const BODY_EXCERPT_CHARS: usize = 80;

/// Logs one line per `/api` request with status and latency, and tags the response
/// with a request id (reusing the caller's if it sent a valid UUID).
///
/// With debug logging enabled the response body is buffered and an excerpt is logged.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    if !path.starts_with("/api") {
        return next.run(req).await;
    }

    let start = Instant::now();
    let request_id = req
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);
    let method = req.method().clone();

    let span = info_span!("http_request", request_id = %request_id);

    async move {
        let mut response = next.run(req).await;
        let latency_ms = start.elapsed().as_millis();

        info!(
            status = response.status().as_u16(),
            latency_ms = latency_ms as u64,
            "{} {} {} in {}ms",
            method,
            path,
            response.status().as_u16(),
            latency_ms
        );

        if tracing::enabled!(Level::DEBUG) {
            response = log_body_excerpt(response).await;
        }

        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
            response.headers_mut().insert(X_REQUEST_ID.clone(), value);
        }
        response
    }
    .instrument(span)
    .await
}

async fn log_body_excerpt(response: Response) -> Response {
    let (parts, body) = response.into_parts();
    match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => {
            if !bytes.is_empty() {
                debug!(body = %excerpt(&String::from_utf8_lossy(&bytes)), "response body");
            }
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            warn!(error = %e, "failed to buffer response body");
            Response::from_parts(parts, Body::empty())
        }
    }
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= BODY_EXCERPT_CHARS {
        return text.to_string();
    }
    let mut short: String = text.chars().take(BODY_EXCERPT_CHARS - 1).collect();
    short.push('…');
    short
}
