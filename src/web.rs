use crate::{
    HomeFeed, LexicalEntry, ListItem, NormalizationError, Span, detail_document, highlight,
    normalize_detail, normalize_home_feed, normalize_search_response, raw::RawHomeResponse,
    raw::RawSearchResponse,
};
use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct WebConfig {
    pub addr: SocketAddr,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
        }
    }
}

#[derive(Debug)]
pub enum WebError {
    Io(std::io::Error),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebError::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for WebError {}

impl From<std::io::Error> for WebError {
    fn from(value: std::io::Error) -> Self {
        WebError::Io(value)
    }
}

pub async fn serve(config: WebConfig) -> Result<(), WebError> {
    let router = build_router();
    info!(%config.addr, "Binding HTTP listener");
    let listener = TcpListener::bind(config.addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server exited");
    Ok(())
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl From<NormalizationError> for ApiError {
    fn from(err: NormalizationError) -> Self {
        debug!(error = %err, "detail normalization failed");
        match err {
            NormalizationError::MissingCore => ApiError::not_found(err.user_message()),
            NormalizationError::NotAnObject | NormalizationError::Json(_) => {
                ApiError::bad_request(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let payload = json!({ "error": self.message });
        (self.status, Json(payload)).into_response()
    }
}

fn build_router() -> Router {
    Router::new()
        .route("/healthz", get(health))
        .route("/api/detail", post(api_detail))
        .route("/api/home", post(api_home))
        .route("/api/search", post(api_search))
        .route("/api/highlight", post(api_highlight))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(CompressionLayer::new())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            let _ = stream.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "service": "lughat-web" }))
}

async fn api_detail(Json(body): Json<Value>) -> Result<Json<LexicalEntry>, ApiError> {
    let document = detail_document(body)?;
    Ok(Json(normalize_detail(&document)?))
}

async fn api_home(Json(body): Json<Value>) -> Result<Json<HomeFeed>, ApiError> {
    let raw: RawHomeResponse = serde_json::from_value(body)
        .map_err(|err| ApiError::bad_request(format!("malformed home feed: {err}")))?;
    Ok(Json(normalize_home_feed(&raw)))
}

async fn api_search(Json(body): Json<Value>) -> Result<Json<Vec<ListItem>>, ApiError> {
    let raw: RawSearchResponse = serde_json::from_value(body)
        .map_err(|err| ApiError::bad_request(format!("malformed search response: {err}")))?;
    Ok(Json(normalize_search_response(&raw)))
}

#[derive(Debug, Deserialize)]
struct HighlightParams {
    text: String,
    reference: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct HighlightPayload {
    spans: Vec<Span>,
}

async fn api_highlight(Json(params): Json<HighlightParams>) -> Json<HighlightPayload> {
    Json(HighlightPayload {
        spans: highlight(&params.text, params.reference.as_deref()),
    })
}
