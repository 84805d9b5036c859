use axum::http::StatusCode;

/// Handler for `GET /healthz` — liveness check.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz` — readiness check. Returns OK once the process
/// is serving; services with external dependencies can mount their own.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
