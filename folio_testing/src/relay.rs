use std::{
    net::IpAddr,
    sync::{Arc, Mutex, PoisonError},
};

use anyhow::Context;
use axum::{extract::State, http::StatusCode, routing, Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::info;

pub const SEND_ROUTE: &str = "/api/v1.0/email/send";

#[derive(Debug, Clone)]
pub struct RelayTestConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

/// Shared state of the testing relay: its credentials and every message it
/// accepted.
#[derive(Debug, Clone)]
pub struct RelayState {
    config: Arc<RelayTestConfig>,
    inbox: Arc<Mutex<Vec<ReceivedMessage>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReceivedMessage {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
    pub to_name: String,
}

impl RelayState {
    pub fn new(config: RelayTestConfig) -> Self {
        Self {
            config: config.into(),
            inbox: Default::default(),
        }
    }

    /// Messages accepted so far, oldest first.
    pub fn inbox(&self) -> Vec<ReceivedMessage> {
        self.inbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

pub fn router(state: RelayState) -> Router {
    Router::new()
        .route(SEND_ROUTE, routing::post(send))
        .with_state(state)
}

pub async fn start_server(host: IpAddr, port: u16, config: RelayTestConfig) -> anyhow::Result<()> {
    info!("Starting email relay testing server on {host}:{port}");
    info!("Email relay send endpoint: http://{host}:{port}{SEND_ROUTE}");
    info!("Service id: {:?}", config.service_id);
    info!("Template id: {:?}", config.template_id);
    info!("Public key: {:?}", config.public_key);

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    serve(listener, RelayState::new(config)).await
}

/// Serve the testing relay on an already bound listener.
pub async fn serve(listener: TcpListener, state: RelayState) -> anyhow::Result<()> {
    axum::serve(listener, router(state))
        .await
        .context("Failed to start HTTP server")
}

#[derive(Deserialize)]
struct SendRequest {
    service_id: String,
    template_id: String,
    user_id: String,
    template_params: ReceivedMessage,
}

async fn send(
    State(state): State<RelayState>,
    Json(request): Json<SendRequest>,
) -> (StatusCode, &'static str) {
    let config = &state.config;

    if request.user_id != config.public_key {
        return (StatusCode::BAD_REQUEST, "The Public Key is invalid");
    }
    if request.service_id != config.service_id {
        return (StatusCode::BAD_REQUEST, "The service ID is invalid");
    }
    if request.template_id != config.template_id {
        return (StatusCode::BAD_REQUEST, "The template ID is invalid");
    }

    info!(from = %request.template_params.from_name, "Message accepted");
    state
        .inbox
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(request.template_params);

    (StatusCode::OK, "OK")
}
