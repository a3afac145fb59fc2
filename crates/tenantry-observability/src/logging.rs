use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use tracing::{Instrument, error, field::Empty, info, info_span, warn};
use uuid::Uuid;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize console logging.
///
/// # Configuration
///
/// - **Filter**: `RUST_LOG` when set, otherwise `LOG_LEVEL` (default: "info")
///   with noisy HTTP dependencies held at warn
/// - **Format**: Compact format with ANSI colors and module paths
/// - **Output**: stderr, so stdout stays free for command output
pub fn init_console_logging() {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{log_level},tower_http=warn,hyper=warn")));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .compact()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(true)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(console_layer).init();
}

/// Response header carrying the id of the request span.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Wraps each request in a `request` span and logs one completion event.
///
/// The span declares `role` and `allowed` as empty fields. Handlers that
/// reach an access decision record them on [`tracing::Span::current`], so the
/// completion event carries the decision next to the status and latency.
/// Clients get the span's id back in [`REQUEST_ID_HEADER`].
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let matched_path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let request_id = Uuid::new_v4().to_string();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        path = %matched_path,
        role = Empty,
        allowed = Empty,
    );

    let mut response = next.run(req).instrument(span.clone()).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    let status = response.status();
    let latency_ms = start.elapsed().as_millis() as u64;

    span.in_scope(|| {
        let code = status.as_u16();
        if status.is_server_error() {
            error!(status = code, latency_ms, "Request failed");
        } else if status.is_client_error() {
            warn!(status = code, latency_ms, "Request rejected");
        } else {
            info!(status = code, latency_ms, "Request completed");
        }
    });

    response
}
