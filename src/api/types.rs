use serde::{Deserialize, Serialize};

use crate::charts::ActiveChart;
use crate::page::Notification;
use crate::render::ViewRender;
use crate::state::AppliedCycles;

// ============================================================
// Request bodies
// ============================================================

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub term: String,
}

#[derive(Debug, Deserialize)]
pub struct SettingsRequest {
    pub auto_refresh: Option<bool>,
    pub dark_theme: Option<bool>,
}

// ============================================================
// Response types
// ============================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub snapshot_size: usize,
    pub applied_cycles: AppliedCycles,
    pub auto_refresh: bool,
    pub charts_destroyed: u64,
}

#[derive(Debug, Serialize)]
pub struct ChartsResponse {
    pub charts: Vec<ActiveChart>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub term: String,
    pub view: ViewRender,
}

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub auto_refresh: bool,
    pub dark_theme: bool,
}

#[derive(Debug, Serialize)]
pub struct SimulateResponse {
    pub added: u64,
}

#[derive(Debug, Serialize)]
pub struct NotificationsResponse {
    pub notifications: Vec<Notification>,
}
