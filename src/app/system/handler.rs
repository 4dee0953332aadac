//! 系统处理器

use axum::{extract::State, response::Json};

use super::{
    model::{HealthStatus, WelcomeMessage},
    service,
};
use crate::app::AppState;

/// GET /api
pub async fn welcome() -> Json<WelcomeMessage> {
    Json(service::welcome())
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(service::health(&state.clock))
}
