//! Status API Server (Cold Path)
//!
//! Consumers report their latest best bid/ask per symbol id; the server keeps
//! the last `STATUS_CAPACITY` reports in memory and serves the newest
//! `STATUS_RECENT` of them. Nothing survives a restart.

use axum::{extract::State, routing::get, Json, Router};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use super::ring_buffer::RingBuffer;
use crate::log_api;

/// Reports retained; older ones are dropped
pub const STATUS_CAPACITY: usize = 50;

/// Reports returned by `GET /status`
pub const STATUS_RECENT: usize = 20;

/// One consumer status report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub id: i64,
    pub bid_price: f64,
    pub ask_price: f64,
    pub timestamp_ns: i64,
    pub consumer_id: String,
}

/// Acknowledgement for `POST /status`
#[derive(Debug, Serialize, Deserialize)]
pub struct AckDto {
    pub ok: bool,
}

/// Bounded status store, owned by the serving component
#[derive(Default)]
pub struct StatusService {
    buffer: Mutex<RingBuffer<StatusRecord, STATUS_CAPACITY>>,
}

impl StatusService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a report, dropping the oldest at capacity
    pub fn ingest(&self, record: StatusRecord) {
        let mut buffer = self.buffer.lock();
        if let Some(evicted) = buffer.push(record) {
            tracing::trace!("Evicted status from {}", evicted.consumer_id);
        }
    }

    /// Newest `STATUS_RECENT` reports, oldest first
    pub fn recent(&self) -> Vec<StatusRecord> {
        self.buffer.lock().recent(STATUS_RECENT).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }
}

/// Build the status router
pub fn router(service: Arc<StatusService>) -> Router {
    Router::new()
        .route("/status", get(get_status).post(post_status))
        .layer(CorsLayer::permissive())
        .with_state(service)
}

/// Start the API server
pub async fn start_server(service: Arc<StatusService>, port: u16) -> std::io::Result<()> {
    let app = router(service);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    log_api!(tracing::Level::INFO, "API Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

/// Handler for POST /status
async fn post_status(
    State(service): State<Arc<StatusService>>,
    Json(record): Json<StatusRecord>,
) -> Json<AckDto> {
    log_api!(
        tracing::Level::DEBUG,
        "Received from {}: id={} bid={} ask={}",
        record.consumer_id,
        record.id,
        record.bid_price,
        record.ask_price
    );
    service.ingest(record);
    Json(AckDto { ok: true })
}

/// Handler for GET /status
async fn get_status(State(service): State<Arc<StatusService>>) -> Json<Vec<StatusRecord>> {
    Json(service.recent())
}
