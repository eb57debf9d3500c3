//! Liveness check reporting the environment name and the host address.

use std::net::IpAddr;

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tokio::net::UdpSocket;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub status: String,
    /// `unknown` when no route could be selected.
    pub server_ip: String,
}

/// GET /api/v1/ping
pub async fn ping(State(state): State<AppState>) -> Json<PingResponse> {
    Json(PingResponse {
        status: state.config.app_env.clone(),
        server_ip: outbound_ip().await.map_or_else(|| "unknown".to_string(), |ip| ip.to_string()),
    })
}

/// Address of the interface used for outbound traffic. Connecting a UDP
/// socket sends no packets; it only selects a route.
async fn outbound_ip() -> Option<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").await.ok()?;
    socket.connect("1.1.1.1:80").await.ok()?;
    socket.local_addr().ok().map(|addr| addr.ip())
}
