//! Fileregex Observability
//!
//! - Tracing to the console, rolling log files and OpenTelemetry
//! - Prometheus metrics for HTTP traffic and validation outcomes
//! - HTTP request/response logging
//!
//! The `observability` feature (default) compiles everything in. Without it,
//! or with `OBSERVABILITY_ENABLED=false`, the service logs to the console only
//! and every metric helper is a no-op.
//!
//! ```no_run
//! use fileregex_observability::{init_tracing, shutdown_tracer};
//!
//! #[tokio::main]
//! async fn main() {
//!     init_tracing();
//!     // ... application code ...
//!     shutdown_tracer().await;
//! }
//! ```

pub mod basic_logging;
pub mod tracing_utils;

#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

#[cfg(feature = "observability")]
pub use metrics_exporter_prometheus::PrometheusHandle;

#[cfg(feature = "observability")]
pub use self::logging::{init_tracing, is_observability_enabled, logging_middleware, shutdown_tracer};
#[cfg(feature = "observability")]
pub use self::metrics::{
    init_metrics, metrics_app, metrics_middleware, track_file_deleted, track_mimetypes_updated,
    track_settings_saved, track_submission_validated,
};

#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{extract::Request, middleware::Next, response::Response};

    pub fn is_observability_enabled() -> bool {
        false
    }

    pub async fn logging_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub fn init_tracing() {
        crate::basic_logging::init_basic_console_logging();
    }

    pub async fn shutdown_tracer() {}

    pub fn init_metrics() -> Option<()> {
        None
    }

    pub fn metrics_app(_handle: ()) -> axum::Router {
        axum::Router::new()
    }

    pub fn track_submission_validated(_accepted: bool, _reason: &str) {}
    pub fn track_file_deleted() {}
    pub fn track_settings_saved(_content_rules: usize) {}
    pub fn track_mimetypes_updated() {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
