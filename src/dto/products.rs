use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Product;

/// Stock figures for one purchasable size/color of a product.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptionAvailability {
    pub variant_id: Option<Uuid>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub price: i64,
    pub base_stock: i64,
    pub cart_quantity: i64,
    pub available_stock: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetail {
    pub product: Product,
    pub options: Vec<OptionAvailability>,
}
