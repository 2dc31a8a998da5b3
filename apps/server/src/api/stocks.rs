use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use stockwatch_core::stocks::{NewStock, Stock, StockListing, StockUpdate};

use crate::{
    auth::RequireAdmin,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

fn stock_not_found(ticker: &str) -> ApiError {
    ApiError::NotFound(format!(
        "Stock with ticker {} not found",
        ticker.trim().to_uppercase()
    ))
}

async fn create_stock(
    State(state): State<Arc<AppState>>,
    RequireAdmin(cap): RequireAdmin,
    Json(payload): Json<NewStock>,
) -> ApiResult<(StatusCode, Json<Stock>)> {
    let stock = state.stock_service.create_stock(&cap, payload).await?;
    tracing::info!("Stock {} registered by {}", stock.ticker, cap.actor_id());
    Ok((StatusCode::CREATED, Json(stock)))
}

async fn list_stocks(
    State(state): State<Arc<AppState>>,
    RequireAdmin(cap): RequireAdmin,
) -> ApiResult<Json<StockListing>> {
    Ok(Json(state.stock_service.list_stocks(&cap)?))
}

async fn get_stock(
    Path(ticker): Path<String>,
    State(state): State<Arc<AppState>>,
    RequireAdmin(cap): RequireAdmin,
) -> ApiResult<Json<Stock>> {
    state
        .stock_service
        .get_stock(&cap, &ticker)?
        .map(Json)
        .ok_or_else(|| stock_not_found(&ticker))
}

async fn update_stock(
    Path(ticker): Path<String>,
    State(state): State<Arc<AppState>>,
    RequireAdmin(cap): RequireAdmin,
    Json(payload): Json<StockUpdate>,
) -> ApiResult<Json<Stock>> {
    state
        .stock_service
        .update_stock(&cap, &ticker, payload)
        .await?
        .map(Json)
        .ok_or_else(|| stock_not_found(&ticker))
}

async fn delete_stock(
    Path(ticker): Path<String>,
    State(state): State<Arc<AppState>>,
    RequireAdmin(cap): RequireAdmin,
) -> ApiResult<StatusCode> {
    if state.stock_service.delete_stock(&cap, &ticker).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(stock_not_found(&ticker))
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stocks", get(list_stocks).post(create_stock))
        .route(
            "/stocks/{ticker}",
            get(get_stock).put(update_stock).delete(delete_stock),
        )
}
