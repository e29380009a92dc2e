use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::stock::{StockCheckQuery, StockCheckResponse},
    error::AppResult,
    response::ApiResponse,
    services::stock_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(check_stock))
}

#[utoipa::path(
    get,
    path = "/api/stock",
    params(StockCheckQuery),
    responses(
        (status = 200, description = "Live availability for a variant or size/color", body = ApiResponse<StockCheckResponse>),
        (status = 400, description = "No selector given"),
        (status = 404, description = "Nothing resolves for the selector"),
    ),
    tag = "Stock"
)]
pub async fn check_stock(
    State(state): State<AppState>,
    Query(query): Query<StockCheckQuery>,
) -> AppResult<Json<ApiResponse<StockCheckResponse>>> {
    let resp = stock_service::check_stock(&state, query).await?;
    Ok(Json(resp))
}
