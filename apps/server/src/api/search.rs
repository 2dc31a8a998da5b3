use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use stockwatch_core::search::{StockSearchResult, TickerValidationResponse};

use crate::{auth::CurrentIdentity, error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
struct TickerValidationRequest {
    ticker: String,
}

/// Free external validation; available to every authenticated identity.
async fn validate_ticker(
    State(state): State<Arc<AppState>>,
    CurrentIdentity(identity): CurrentIdentity,
    Json(body): Json<TickerValidationRequest>,
) -> ApiResult<Json<TickerValidationResponse>> {
    let response = state
        .search_service
        .validate_ticker(&identity, &body.ticker)
        .await?;
    Ok(Json(response))
}

/// Rate-limited search.
async fn search_stock(
    Path(ticker): Path<String>,
    State(state): State<Arc<AppState>>,
    CurrentIdentity(identity): CurrentIdentity,
) -> ApiResult<Json<StockSearchResult>> {
    let result = state.search_service.search(&identity, &ticker).await?;
    Ok(Json(result))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stocks/validate", post(validate_ticker))
        .route("/stocks/search/{ticker}", get(search_stock))
}
