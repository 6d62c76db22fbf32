//! Axum-based HTTP gateway exposing the tool catalog.
//!
//! Three routes: `GET /health` for liveness, `GET /tools` for catalog
//! discovery, `POST /tools/{name}` for invocation. Every invocation answers
//! HTTP 200 with a [`ToolResult`] envelope; failures live in the envelope,
//! not in the status code, so remote callers handle one shape.
//!
//! hyper handles HTTP/1.1 compliance; tower-http layers add a request body
//! size cap and a request timeout.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::{Path, State},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use tokio_util::sync::CancellationToken;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

use crate::config::GatewayConfig;
use crate::device::DeviceSession;
use crate::tools::{ToolRegistry, ToolResult};

/// Maximum request body size (64KB); arguments are small JSON objects.
pub const MAX_BODY_SIZE: usize = 65_536;
/// Request timeout. Generous because a full 360-degree turn at a low angular
/// speed legitimately takes minutes of held connection.
pub const REQUEST_TIMEOUT_SECS: u64 = 600;

#[derive(Clone)]
pub struct AppState {
    registry: Arc<ToolRegistry>,
    session: Arc<DeviceSession>,
    started: Instant,
}

pub fn router(registry: Arc<ToolRegistry>, session: Arc<DeviceSession>) -> Router {
    let state = AppState {
        registry,
        session,
        started: Instant::now(),
    };
    Router::new()
        .route("/health", get(handle_health))
        .route("/tools", get(handle_tools))
        .route("/tools/{name}", post(handle_invoke))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .with_state(state)
}

/// GET /health: liveness plus session phase.
async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "session": state.session.phase().as_str(),
        "uptime_seconds": state.started.elapsed().as_secs(),
        "tools": state.registry.len(),
    }))
}

/// GET /tools: the discovery catalog, in name order.
async fn handle_tools(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({ "tools": state.registry.catalog() }))
}

/// POST /tools/{name}: invoke one tool with a JSON object of arguments.
/// An empty body means "no arguments".
async fn handle_invoke(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> impl IntoResponse {
    let args = if body.is_empty() {
        serde_json::Value::Object(serde_json::Map::new())
    } else {
        match serde_json::from_slice(&body) {
            Ok(value) => value,
            Err(e) => {
                return Json(ToolResult::failure(format!("invalid JSON body: {e}")));
            }
        }
    };

    tracing::info!(tool = %name, "invocation received");
    Json(state.registry.invoke(&name, args).await)
}

/// Binds and serves until the shutdown token fires.
pub async fn serve(
    config: &GatewayConfig,
    registry: Arc<ToolRegistry>,
    session: Arc<DeviceSession>,
    shutdown: CancellationToken,
) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind gateway on {addr}"))?;
    tracing::info!(%addr, "gateway listening");

    let app = router(registry, session);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .context("gateway server error")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::device::sim::{SimulatedDiscovery, SimulatedDriver};
    use crate::tools::build_registry;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;

    fn test_router() -> Router {
        let driver = Arc::new(SimulatedDriver::new());
        let session = Arc::new(DeviceSession::new(
            Arc::new(SimulatedDiscovery::new(driver)),
            Duration::from_secs(5),
            CancellationToken::new(),
        ));
        let registry = Arc::new(build_registry(session.clone(), &Config::default()).unwrap());
        router(registry, session)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), MAX_BODY_SIZE)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_session_phase() {
        let app = test_router();
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["session"], "disconnected");
    }

    #[tokio::test]
    async fn tools_route_lists_the_catalog() {
        let app = test_router();
        let response = app
            .oneshot(Request::get("/tools").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let tools = json["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 15);
        assert!(tools.iter().any(|t| t["name"] == "turn"));
    }

    #[tokio::test]
    async fn invoking_unknown_tool_yields_failure_envelope() {
        let app = test_router();
        let response = app
            .oneshot(
                Request::post("/tools/warp_drive")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "failure");
        assert!(json["message"].as_str().unwrap().contains("unknown tool"));
    }

    #[tokio::test]
    async fn empty_body_means_no_arguments() {
        let app = test_router();
        let response = app
            .oneshot(
                Request::post("/tools/list_sounds")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["status"], "success");
        assert_eq!(json["payload"]["kind"], "lines");
    }

    #[tokio::test]
    async fn malformed_json_body_is_rejected_in_envelope() {
        let app = test_router();
        let response = app
            .oneshot(
                Request::post("/tools/drive")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["status"], "failure");
        assert!(json["message"].as_str().unwrap().contains("invalid JSON body"));
    }

    #[tokio::test]
    async fn device_tool_flows_through_the_session() {
        let app = test_router();
        let response = app
            .clone()
            .oneshot(Request::post("/tools/connect").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["status"], "success");

        let response = app
            .oneshot(
                Request::post("/tools/drive")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"speed": 150}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["status"], "success");
    }
}
