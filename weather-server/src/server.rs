//! HTTP surface: `/`, `/health` and `/weather`.

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{ConnectInfo, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Instrument, Level};
use weather_core::{Config, LookupError, WeatherLookupService, WeatherSummary, provider_from_config};

const INDEX_HTML: &str = include_str!("../static/index.html");

#[derive(Debug, Clone)]
pub struct AppState {
    pub lookup: Arc<WeatherLookupService>,
}

/// `/weather` query parameters. A repeated key keeps its first value.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct WeatherQuery {
    pub city: Option<String>,
    pub units: Option<String>,
}

impl WeatherQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "city" => &mut query.city,
                "units" => &mut query.units,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}

/// A lookup failure rendered as an HTTP status plus `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError(LookupError);

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Upstream statuses outside 4xx/5xx would read as success to the caller.
        let status = StatusCode::from_u16(self.0.status_code())
            .ok()
            .filter(|s| s.is_client_error() || s.is_server_error())
            .unwrap_or(StatusCode::BAD_GATEWAY);

        (status, Json(serde_json::json!({ "error": self.0.user_message() }))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/weather", get(weather))
        .layer(middleware::from_fn(log_request))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Log every inbound request with the caller's address and headers.
async fn log_request(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    tracing::info!(
        client = %addr,
        method = %request.method(),
        uri = %request.uri(),
        headers = ?request.headers(),
        "Request received"
    );
    next.run(request).await
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn weather(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<WeatherSummary>, ApiError> {
    let query = WeatherQuery::from_pairs(pairs);
    let span = tracing::info_span!("weather", client = %addr);

    let summary = state
        .lookup
        .fetch(query.city.as_deref(), query.units.as_deref())
        .instrument(span)
        .await?;

    Ok(Json(summary))
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: &Config) -> Result<()> {
    let provider = provider_from_config(config)?;
    let state = AppState { lookup: Arc::new(WeatherLookupService::new(provider)) };

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind))?;

    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state).into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
