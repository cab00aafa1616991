//! HTTP endpoints.
//!
//! `POST /analyze` answers with the demo report, `POST /fetch-html` fetches a
//! page directly with browser headers. Both reject other methods with 405.

mod error;

pub use error::{ApiError, ApiResult};

use crate::fetch::HtmlFetcher;
use crate::mock::mock_analysis;
use crate::models::ComprehensiveAnalysis;
use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<HtmlFetcher>,
}

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    url: Option<String>,
    html: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FetchHtmlRequest {
    url: Option<String>,
}

/// Builds the router with request logging.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze).fallback(method_not_allowed))
        .route("/fetch-html", post(fetch_html).fallback(method_not_allowed))
        .route("/health", get(health))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Binds `addr` and serves until the process is stopped.
pub async fn serve(addr: &str, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    let local = listener.local_addr().context("Failed to read bound address")?;
    info!("Listening on http://{}", local);

    axum::serve(listener, router(state))
        .await
        .context("HTTP server stopped unexpectedly")
}

async fn log_request(request: Request, next: Next) -> Response {
    info!("{} {}", request.method(), request.uri().path());
    next.run(request).await
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

async fn analyze(body: Bytes) -> ApiResult<Json<ComprehensiveAnalysis>> {
    let request: AnalyzeRequest = parse_body(&body).map_err(|e| {
        error!("Analysis error: {}", e);
        ApiError::Internal {
            message: "Failed to analyze website",
            details: e.to_string(),
        }
    })?;

    let (Some(url), Some(_html)) = (non_empty(request.url), non_empty(request.html)) else {
        return Err(ApiError::BadRequest("URL and HTML content are required"));
    };

    Ok(Json(mock_analysis(&url)))
}

async fn fetch_html(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<Value>> {
    let request: FetchHtmlRequest = parse_body(&body).map_err(|e| ApiError::Internal {
        message: "Failed to fetch HTML content",
        details: e.to_string(),
    })?;

    let Some(url) = non_empty(request.url) else {
        return Err(ApiError::BadRequest("URL is required"));
    };

    match state.fetcher.fetch_direct(&url).await {
        Ok(html) => Ok(Json(json!({ "html": html }))),
        Err(e) => {
            warn!("Error fetching HTML: {}", e);
            Err(ApiError::Internal {
                message: "Failed to fetch HTML content",
                details: e.to_string(),
            })
        }
    }
}

/// Parses a JSON body; an empty body reads as `{}`.
fn parse_body<T: serde::de::DeserializeOwned>(body: &[u8]) -> serde_json::Result<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_slice(b"{}");
    }
    serde_json::from_slice(body)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
