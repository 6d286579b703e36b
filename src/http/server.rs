//! HTTP server setup and the store pipeline.
//!
//! # Responsibilities
//! - Create the Axum Router with the store handler and middleware
//! - Hold the immutable per-process state (target, gate, client, limits)
//! - Run the per-request pipeline and turn failures into responses
//! - Serve with peer addresses and graceful shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderValue, Request},
    response::Response,
    Router,
};
use bytes::Bytes;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::error::ProxyError;
use crate::http::body::{check_declared_length, read_bounded};
use crate::http::request::{request_id, MakeRequestUuid};
use crate::http::response::error_response;
use crate::http::rewrite::rewrite;
use crate::lifecycle::shutdown;
use crate::net::extract_ip;
use crate::observability::metrics;
use crate::payload::inject_ip;
use crate::routing::{Admission, RequestGate};
use crate::upstream::{UpstreamClient, UpstreamTarget};

/// Read-only state shared by every request.
pub struct AppState {
    pub target: UpstreamTarget,
    pub gate: RequestGate,
    pub client: UpstreamClient,
    pub max_body_size: usize,
    pub read_timeout: Duration,
    pub error_allow_origin: Option<HeaderValue>,
}

impl AppState {
    /// Build the state from configuration.
    ///
    /// Fails only when the upstream origin is unusable.
    pub fn from_config(config: &ProxyConfig) -> Result<Self, ProxyError> {
        let target = UpstreamTarget::resolve(&config.upstream.url)?;

        let error_allow_origin = config.cors.error_allow_origin.as_deref().and_then(|origin| {
            HeaderValue::from_str(origin)
                .inspect_err(|e| tracing::warn!(origin, error = %e, "Ignoring invalid CORS origin"))
                .ok()
        });

        Ok(Self {
            target,
            gate: RequestGate::new(),
            client: UpstreamClient::new(&config.timeouts),
            max_body_size: config.limits.max_body_size,
            read_timeout: config.timeouts.read(),
            error_allow_origin,
        })
    }
}

/// HTTP server for the store proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
    target: UpstreamTarget,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ProxyError> {
        let state = Arc::new(AppState::from_config(&config)?);
        let target = state.target.clone();
        let router = Self::build_router(state);
        Ok(Self {
            router,
            config,
            target,
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: Arc<AppState>) -> Router {
        Router::new()
            .fallback(store_handler)
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %req.method(),
                    path = %req.uri().path(),
                    request_id = %request_id(req.headers()),
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The router, for driving the pipeline without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// The resolved upstream every request is forwarded to.
    pub fn target(&self) -> &UpstreamTarget {
        &self.target
    }
}

/// Entry point for every inbound request.
async fn store_handler(State(state): State<Arc<AppState>>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request_id(request.headers()).to_string();

    match handle_store(&state, request).await {
        Ok(response) => {
            metrics::record_request("forwarded", response.status().as_u16(), start);
            tracing::debug!(
                request_id = %request_id,
                status = %response.status(),
                "Relaying upstream response"
            );
            response
        }
        Err(err) => {
            metrics::record_request(err.outcome(), err.status().as_u16(), start);
            if err.status().is_server_error() {
                tracing::error!(request_id = %request_id, error = %err, "Store request failed");
            } else {
                tracing::warn!(request_id = %request_id, error = %err, "Store request rejected");
            }
            error_response(err, state.error_allow_origin.as_ref())
        }
    }
}

/// Gate → bounded read → peer IP → inject → rewrite → forward.
pub async fn handle_store(state: &AppState, request: Request<Body>) -> Result<Response, ProxyError> {
    let admission = state.gate.admit(request.method(), request.uri().path());
    if let Admission::Rejected { reason, status } = &admission {
        tracing::debug!(
            method = %request.method(),
            path = %request.uri().path(),
            reason,
            status = status.as_u16(),
            "Gate rejected request"
        );
    }
    admission.into_result()?;

    let (parts, body) = request.into_parts();
    check_declared_length(&parts.headers, state.max_body_size)?;

    let raw = tokio::time::timeout(state.read_timeout, read_bounded(body, state.max_body_size))
        .await
        .map_err(|_| {
            ProxyError::BodyReadFailure(format!("timed out after {:?}", state.read_timeout))
        })??;

    let peer = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_default();
    let client_ip = extract_ip(&peer)?;

    let payload = inject_ip(&raw, &client_ip)?;
    metrics::record_ingested_bytes(payload.len());

    let outbound = rewrite(parts, &state.target, Bytes::from(payload))?;
    state.client.forward(outbound, &client_ip).await
}
