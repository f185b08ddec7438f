pub mod handlers;
pub mod types;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::scheduler::Poller;

#[derive(Clone)]
pub struct AppState {
    pub poller: Poller,
}

pub fn router(poller: Poller) -> Router {
    let state = Arc::new(AppState { poller });

    Router::new()
        .route("/", get(handlers::document))
        .route("/console/health", get(handlers::health))
        .route("/console/charts", get(handlers::charts))
        .route("/console/search", put(handlers::search))
        .route("/console/settings", put(handlers::settings))
        .route("/console/simulate", post(handlers::simulate))
        .route("/console/notifications", get(handlers::notifications))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn serve(poller: Poller, host: &str, port: u16) -> eyre::Result<()> {
    let app = router(poller);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Console listening");
    axum::serve(listener, app).await?;
    Ok(())
}
