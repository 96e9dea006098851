//! Supply Chain Negotiator HTTP server.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use http::{HeaderName, HeaderValue, Method};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use supply_chain_negotiator::adapters::events::{JsonLinesEventPublisher, TracingEventPublisher};
use supply_chain_negotiator::adapters::http::{api_router, NegotiationAppState};
use supply_chain_negotiator::application::NegotiateStrategiesHandler;
use supply_chain_negotiator::config::{AppConfig, AuditConfig, AuditSink, ServerConfig};
use supply_chain_negotiator::domain::negotiation::NegotiationEngine;
use supply_chain_negotiator::ports::EventPublisher;

const REQUEST_ID: &str = "x-request-id";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let publisher = audit_publisher(&config.audit);
    let engine = NegotiationEngine::new(config.negotiation.tuning());
    let handler = Arc::new(NegotiateStrategiesHandler::new(engine, publisher));
    let app = with_middleware(api_router(NegotiationAppState::new(handler)), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, sink = ?config.audit.sink, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_new(&server.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if server.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn audit_publisher(audit: &AuditConfig) -> Arc<dyn EventPublisher> {
    match (audit.sink, audit.file_path.as_deref()) {
        (AuditSink::File, Some(path)) => Arc::new(JsonLinesEventPublisher::new(path)),
        _ => Arc::new(TracingEventPublisher::new()),
    }
}

fn with_middleware(router: Router, server: &ServerConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID);

    router
        .layer(cors_layer(server))
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout_secs,
        )))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutting down");
}
