use dotenvy::dotenv;
use fileregex::router::init_router;
use fileregex::state::init_app_state;
use fileregex_observability::{init_metrics, init_tracing, metrics_app, shutdown_tracer};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let state = init_app_state().await;
    let app = init_router(state);

    if let Some(handle) = init_metrics() {
        let metrics_port = std::env::var("METRICS_PORT").unwrap_or_else(|_| "9090".to_string());
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", metrics_port)).await?;
        info!("Metrics available at http://localhost:{}/metrics", metrics_port);
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                error!(error = %e, "Metrics server stopped");
            }
        });
    }

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("🚀 Server running on http://localhost:{}", port);
    info!("📚 Swagger UI available at http://localhost:{}/swagger-ui", port);
    info!("📖 Scalar UI available at http://localhost:{}/scalar", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    shutdown_tracer().await;
    Ok(())
}
