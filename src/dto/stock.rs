use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::inventory::StockRequest;

/// Any one of `variantId`, `productId` + `size`/`color`, or `size` + `color`.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StockCheckQuery {
    pub variant_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl From<StockCheckQuery> for StockRequest {
    fn from(query: StockCheckQuery) -> Self {
        StockRequest {
            variant_id: query.variant_id,
            product_id: query.product_id,
            size: query.size,
            color: query.color,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VariantRef {
    pub id: Uuid,
    pub size: String,
    pub color: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockCheckResponse {
    pub base_stock: i64,
    pub cart_quantity: i64,
    pub available_stock: i64,
    pub variant: Option<VariantRef>,
}
