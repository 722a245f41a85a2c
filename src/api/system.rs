use axum::{Json, extract::State};
use std::sync::Arc;
use tracing::warn;

use super::{ApiError, ApiResponse, AppState, HealthDto};

pub async fn health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<HealthDto>>, ApiError> {
    let database = match state.store().ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Health check database ping failed: {}", e);
            false
        }
    };

    let status = if database { "ok" } else { "degraded" };

    Ok(Json(ApiResponse::success(HealthDto {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        database,
        countries_cached: state.shared.catalog.is_cached(),
    })))
}
