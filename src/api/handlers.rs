use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use std::sync::Arc;

use crate::page;

use super::types::*;
use super::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

fn api_error(status: StatusCode, msg: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: msg.into(),
        }),
    )
}

// ============================================================
// Page
// ============================================================

pub async fn document(State(state): State<Arc<AppState>>) -> Html<String> {
    let dashboard = state.poller.dashboard().lock().await;
    Html(dashboard.page().render_document())
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let dashboard = state.poller.dashboard().lock().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        snapshot_size: dashboard.snapshot().len(),
        applied_cycles: dashboard.applied(),
        auto_refresh: dashboard.page().auto_refresh_enabled(),
        charts_destroyed: dashboard.charts().destroyed_count(),
    })
}

pub async fn charts(State(state): State<Arc<AppState>>) -> Json<ChartsResponse> {
    let dashboard = state.poller.dashboard().lock().await;
    Json(ChartsResponse {
        charts: dashboard.charts().active(),
    })
}

// ============================================================
// User input
// ============================================================

pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SearchRequest>,
) -> ApiResult<SearchResponse> {
    let mut dashboard = state.poller.dashboard().lock().await;
    if !dashboard.page().has(page::TX_SEARCH) {
        return Err(api_error(StatusCode::NOT_FOUND, "search input is not mounted"));
    }
    let view = dashboard.search(&body.term);
    Ok(Json(SearchResponse {
        term: body.term,
        view,
    }))
}

pub async fn settings(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SettingsRequest>,
) -> Json<SettingsResponse> {
    let mut dashboard = state.poller.dashboard().lock().await;
    let ui = dashboard.page_mut();
    if let Some(enabled) = body.auto_refresh {
        ui.set_checkbox(page::SETTING_REFRESH, enabled);
        tracing::info!(enabled, "Auto-refresh toggled");
    }
    if let Some(dark) = body.dark_theme {
        ui.set_checkbox(page::SETTING_THEME, dark);
    }
    Json(SettingsResponse {
        auto_refresh: ui.auto_refresh_enabled(),
        dark_theme: ui.checkbox(page::SETTING_THEME).unwrap_or(false),
    })
}

pub async fn simulate(State(state): State<Arc<AppState>>) -> ApiResult<SimulateResponse> {
    state
        .poller
        .simulate()
        .await
        .map(|outcome| {
            Json(SimulateResponse {
                added: outcome.added,
            })
        })
        .map_err(|e| api_error(StatusCode::BAD_GATEWAY, e.to_string()))
}

pub async fn notifications(State(state): State<Arc<AppState>>) -> Json<NotificationsResponse> {
    let mut dashboard = state.poller.dashboard().lock().await;
    Json(NotificationsResponse {
        notifications: dashboard.page_mut().drain_notifications(),
    })
}
