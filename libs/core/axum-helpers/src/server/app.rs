use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::{cors_layer_from_env, security_headers};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable as RedocServable};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

/// Wrap the domain routes with docs and cross-cutting middleware.
///
/// - `apis` is nested under `/api`
/// - Swagger UI at `/swagger-ui` (document at `/api-docs/openapi.json`), plus
///   `/redoc`, `/rapidoc` and `/scalar`
/// - JSON 404 fallback, request tracing, security headers, CORS, compression
///
/// `apis` must already have its state applied. Health routes are merged by the
/// caller. Fails when `CORS_ALLOWED_ORIGIN` is missing or invalid.
pub async fn create_router<T>(apis: Router) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let cors_layer = cors_layer_from_env()?;

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .nest("/api", apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer)
        .layer(CompressionLayer::new());

    Ok(router)
}

/// Serve `router` until SIGINT/SIGTERM, then run `cleanup` within `shutdown_timeout`.
///
/// Cleanup starts only after every in-flight request has drained, and is
/// abandoned when it overruns the timeout.
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let coordinator = ShutdownCoordinator::new();

    let listener = TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let signal_coordinator = coordinator.clone();
    let signal_handle = tokio::spawn(async move { signal_coordinator.wait_for_signal().await });

    let result = serve_with_cleanup(
        listener,
        router,
        async move { coordinator.wait().await },
        shutdown_timeout,
        cleanup,
    )
    .await;

    signal_handle.abort();
    result
}

/// Serve on `listener` until `shutdown` resolves and the drain completes,
/// then run `cleanup` within `cleanup_timeout`.
///
/// Cleanup also runs when `serve` itself fails; the serve result is returned.
pub async fn serve_with_cleanup<S, F>(
    listener: TcpListener,
    router: Router,
    shutdown: S,
    cleanup_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    S: Future<Output = ()> + Send + 'static,
    F: Future<Output = ()> + Send,
{
    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .inspect_err(|e| tracing::error!("Server encountered an error: {:?}", e));

    info!(timeout = ?cleanup_timeout, "Connections drained, running cleanup");
    match tokio::time::timeout(cleanup_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed"),
        Err(_) => warn!(timeout = ?cleanup_timeout, "Cleanup exceeded timeout, forcing shutdown"),
    }

    serve_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::routing::get;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::Notify;

    #[derive(Clone)]
    struct SlowState {
        started: Arc<Notify>,
        cleaned: Arc<AtomicBool>,
    }

    // Reports whether cleanup had already run when the response was built
    async fn slow(State(state): State<SlowState>) -> String {
        state.started.notify_one();
        tokio::time::sleep(Duration::from_millis(200)).await;
        state.cleaned.load(Ordering::SeqCst).to_string()
    }

    #[tokio::test]
    async fn test_cleanup_waits_for_in_flight_requests() {
        let state = SlowState {
            started: Arc::new(Notify::new()),
            cleaned: Arc::new(AtomicBool::new(false)),
        };
        let router = Router::new().route("/slow", get(slow)).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let coordinator = ShutdownCoordinator::new();

        let waiter = coordinator.clone();
        let cleaned = state.cleaned.clone();
        let server = tokio::spawn(serve_with_cleanup(
            listener,
            router,
            async move { waiter.wait().await },
            Duration::from_secs(1),
            async move { cleaned.store(true, Ordering::SeqCst) },
        ));

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /slow HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();

        state.started.notified().await;
        coordinator.shutdown();

        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200 OK"));
        assert!(response.ends_with("false"));

        tokio::time::timeout(Duration::from_secs(2), server)
            .await
            .expect("server did not stop after draining")
            .unwrap()
            .unwrap();
        assert!(state.cleaned.load(Ordering::SeqCst));
    }
}
