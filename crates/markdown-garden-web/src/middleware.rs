use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;

/// Logs each request with its status and duration
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    log::info!(
        "{method} {uri} -> {} ({}ms)",
        response.status().as_u16(),
        start.elapsed().as_millis()
    );

    response
}
