//! HTTP remote control
//!
//! Lets a facilitator press Start and Stop from another machine and read the
//! current label. Every route forwards to the same referee the window drives.

pub mod handlers;
pub mod responses;

use std::time::Instant;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::referee::RefereeHandle;
use handlers::*;

/// Shared state of the HTTP routes
#[derive(Debug, Clone)]
pub struct ApiState {
    pub referee: RefereeHandle,
    pub start_time: Instant,
}

impl ApiState {
    pub fn new(referee: RefereeHandle) -> Self {
        Self {
            referee,
            start_time: Instant::now(),
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

/// Create the HTTP router with all endpoints
pub fn create_router(referee: RefereeHandle) -> Router {
    Router::new()
        .route("/start", post(start_handler))
        .route("/stop", post(stop_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(ApiState::new(referee))
}
