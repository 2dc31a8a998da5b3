use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use stockwatch_core::rate_limits::{RateLimitInfo, RateLimitResetResult, RateLimitUpdate};

use crate::{auth::RequireAdmin, error::ApiResult, main_lib::AppState};

async fn get_user_rate_limit(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
    RequireAdmin(cap): RequireAdmin,
) -> ApiResult<Json<RateLimitInfo>> {
    let info = state
        .rate_limit_admin_service
        .get_info(&cap, &user_id)
        .await?;
    Ok(Json(info))
}

async fn update_user_rate_limit(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
    RequireAdmin(cap): RequireAdmin,
    Json(update): Json<RateLimitUpdate>,
) -> ApiResult<Json<RateLimitInfo>> {
    let info = state
        .rate_limit_admin_service
        .update_limit(&cap, &user_id, update.search_limit)
        .await?;
    Ok(Json(info))
}

async fn reset_user_rate_limit(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
    RequireAdmin(cap): RequireAdmin,
) -> ApiResult<Json<RateLimitResetResult>> {
    let result = state.rate_limit_admin_service.reset(&cap, &user_id).await?;
    Ok(Json(result))
}

async fn reset_all_rate_limits(
    State(state): State<Arc<AppState>>,
    RequireAdmin(cap): RequireAdmin,
) -> ApiResult<Json<RateLimitResetResult>> {
    let result = state.rate_limit_admin_service.reset_all(&cap).await?;
    Ok(Json(result))
}

async fn set_universal_rate_limit(
    State(state): State<Arc<AppState>>,
    RequireAdmin(cap): RequireAdmin,
    Json(update): Json<RateLimitUpdate>,
) -> ApiResult<Json<RateLimitResetResult>> {
    let result = state
        .rate_limit_admin_service
        .set_universal_limit(&cap, update.search_limit)
        .await?;
    Ok(Json(result))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/rate-limits/reset-all", post(reset_all_rate_limits))
        .route(
            "/admin/rate-limits/universal-limit",
            put(set_universal_rate_limit),
        )
        .route(
            "/admin/rate-limits/{user_id}",
            get(get_user_rate_limit).put(update_user_rate_limit),
        )
        .route(
            "/admin/rate-limits/{user_id}/reset",
            post(reset_user_rate_limit),
        )
}
