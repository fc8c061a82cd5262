//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::DisplayState;

/// API response structure for Start and Stop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub display: DisplayState,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, display: DisplayState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            display,
        }
    }

    /// Command handed to the referee
    pub fn accepted(message: String, display: DisplayState) -> Self {
        Self::new("accepted".to_string(), message, display)
    }
}

/// Status response with the label as the window currently shows it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub display: DisplayState,
    pub uptime: String,
    pub timestamp: DateTime<Utc>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
