use crate::{
    dto::stock::{StockCheckQuery, StockCheckResponse, VariantRef},
    error::AppResult,
    inventory::{self, StockRequest},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn check_stock(
    state: &AppState,
    query: StockCheckQuery,
) -> AppResult<ApiResponse<StockCheckResponse>> {
    let request = StockRequest::from(query);
    let resolved = inventory::resolve(&state.orm, &request).await?;
    let availability = inventory::availability_of(&state.orm, &resolved, None).await?;

    tracing::debug!(
        key = ?resolved.key,
        base = availability.base_stock,
        reserved = availability.cart_quantity,
        available = availability.available_stock,
        "stock checked"
    );

    let data = StockCheckResponse {
        base_stock: availability.base_stock,
        cart_quantity: availability.cart_quantity,
        available_stock: availability.available_stock,
        variant: resolved.variant.map(|v| VariantRef {
            id: v.id,
            size: v.size,
            color: v.color,
        }),
    };

    Ok(ApiResponse::success("Stock", data, Some(Meta::empty())))
}
