//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request ID, limits, timeouts, headers, CORS)
//! - Serve on a bound listener until the shutdown signal fires

use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer, trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::{handlers, info, request, response};
use crate::observability::metrics;
use crate::storage::CommentStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: CommentStore,
}

/// HTTP server for the comments API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server around an already opened store.
    pub fn new(config: ServiceConfig, store: CommentStore) -> Self {
        let router = build_router(&config, AppState { store });
        Self { router }
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Returns once `shutdown` fires and in-flight requests have drained.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for in-process use.
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &ServiceConfig, state: AppState) -> Router {
    let mut router = Router::new()
        .route(
            "/api/comments",
            get(handlers::list_comments)
                .post(handlers::create_comment)
                .fallback(info::route_not_found),
        )
        .route(
            "/api/comments/",
            get(handlers::missing_comment_id)
                .delete(handlers::missing_comment_id)
                .fallback(info::route_not_found),
        )
        .route(
            "/api/comments/{id}",
            get(handlers::get_comment)
                .delete(handlers::delete_comment)
                .fallback(info::route_not_found),
        )
        .route("/health", get(info::health).fallback(info::route_not_found))
        .route("/api/docs", get(info::docs).fallback(info::route_not_found))
        .route("/", get(info::home).fallback(info::route_not_found))
        .fallback(info::route_not_found)
        .with_state(state)
        .layer(middleware::from_fn(metrics::track_metrics))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(middleware::map_response(response::envelope_layer_rejections));

    if config.security.enable_headers {
        router = router
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static("DENY"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::REFERRER_POLICY,
                HeaderValue::from_static("no-referrer"),
            ));
    }

    let cors = if config.security.cors_permissive {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    router
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request::make_request_span::<axum::body::Body>),
        )
        .layer(request::propagate_request_id_layer())
        .layer(request::set_request_id_layer())
}
