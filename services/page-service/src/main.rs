mod config;
mod domain;
mod submit;

use axum::{
    Json, Router,
    http::{HeaderValue, StatusCode},
    routing::{get, post},
};
use dc_ledger::{InMemoryLedger, Ledger, LedgerError, RocksDbLedger};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::config::ServiceConfig;

#[derive(Debug, Serialize)]
struct HealthResponse {
    service: &'static str,
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct VersionResponse {
    service: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ErrorResponse {
    error: String,
}

pub(crate) type ApiError = (StatusCode, Json<ErrorResponse>);
pub(crate) type ApiResult<T> = Result<Json<T>, ApiError>;

pub(crate) struct AppState {
    pub(crate) ledger: Arc<dyn Ledger>,
    pub(crate) explorer_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ServiceConfig::from_env()?;

    let ledger: Arc<dyn Ledger> = match config.ledger_path.as_deref() {
        Some(path) => {
            info!("using RocksDB ledger at {}", path);
            Arc::new(RocksDbLedger::open_default(path)?)
        }
        None => {
            warn!("PAGE_LEDGER_PATH not set; ledger state is kept in memory only");
            Arc::new(InMemoryLedger::default())
        }
    };

    let state = Arc::new(AppState {
        ledger,
        explorer_url: config.explorer_url.clone(),
    });

    let app = build_router(state).layer(cors_layer(config.allowed_origin.as_deref())?);

    info!("page-service listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

pub(crate) fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
        .route("/widget/parse", post(domain::widget_parse))
        .route("/domain/{name}", get(domain::domain_record))
        .route("/domain/{name}/widgets", get(domain::domain_widgets))
        .route("/domain/{name}/tx", get(domain::domain_tx))
        .route("/explorer/tx/{hash}", get(domain::explorer_link))
        .route("/ledger/submit", post(submit::ledger_submit))
        .with_state(state)
}

fn cors_layer(allowed_origin: Option<&str>) -> anyhow::Result<CorsLayer> {
    let layer = match allowed_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>()?)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::permissive(),
    };
    Ok(layer)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        service: "page-service",
        status: "ok",
    })
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        service: "page-service",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub(crate) fn bad_request(message: &str) -> ApiError {
    error_response(StatusCode::BAD_REQUEST, message)
}

pub(crate) fn forbidden(message: &str) -> ApiError {
    error_response(StatusCode::FORBIDDEN, message)
}

pub(crate) fn not_found(message: &str) -> ApiError {
    error_response(StatusCode::NOT_FOUND, message)
}

pub(crate) fn internal_error(err: impl std::fmt::Display) -> ApiError {
    error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
}

fn error_response(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.to_owned(),
        }),
    )
}

pub(crate) fn ledger_error(err: LedgerError) -> ApiError {
    let message = err.to_string();
    match err {
        LedgerError::DomainNotFound(_) | LedgerError::WidgetNotFound { .. } => not_found(&message),
        LedgerError::NotOwner { .. } => forbidden(&message),
        LedgerError::InvalidName(_) | LedgerError::AlreadyRegistered(_) => bad_request(&message),
        LedgerError::Storage(_) => {
            warn!("ledger storage failure: {}", message);
            internal_error(message)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{app, call};
    use super::*;

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, body) = call(&app(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "page-service");
    }

    #[tokio::test]
    async fn rocksdb_ledger_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_str().unwrap();

        let router = |ledger: RocksDbLedger| {
            build_router(Arc::new(AppState {
                ledger: Arc::new(ledger),
                explorer_url: "https://explorer.test".to_owned(),
            }))
        };

        let first = router(RocksDbLedger::open_default(path).unwrap());
        let (status, _) = call(
            &first,
            "POST",
            "/ledger/submit",
            Some(serde_json::json!({
                "from": "0xa11ce",
                "call": { "kind": "register", "domain": "alice", "url": "https://twitter.com/a/status/1" }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        drop(first);

        let second = router(RocksDbLedger::open_default(path).unwrap());
        let (status, body) = call(&second, "GET", "/domain/alice", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["url"], "https://twitter.com/a/status/1");
    }

    #[test]
    fn ledger_errors_map_to_statuses() {
        assert_eq!(ledger_error(LedgerError::DomainNotFound("x".into())).0, StatusCode::NOT_FOUND);
        assert_eq!(ledger_error(LedgerError::InvalidName("-".into())).0, StatusCode::BAD_REQUEST);
        assert_eq!(ledger_error(LedgerError::Storage("disk".into())).0, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn cors_rejects_malformed_origin() {
        assert!(cors_layer(Some("bad\norigin")).is_err());
        assert!(cors_layer(None).is_ok());
    }
}
