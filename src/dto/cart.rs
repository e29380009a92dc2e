use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    inventory::StockRequest,
    models::{Product, ProductVariant},
};

/// Either `variantId`, or `productId` with the chosen `size`/`color`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: Option<Uuid>,
    pub variant_id: Option<Uuid>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub quantity: i32,
}

impl AddToCartRequest {
    pub fn stock_request(&self) -> StockRequest {
        StockRequest {
            variant_id: self.variant_id,
            product_id: self.product_id,
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartItemRequest {
    pub item_id: Uuid,
    pub quantity: i32,
}

/// A cart line with the product and variant as they are right now.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: Uuid,
    pub quantity: i32,
    pub size: Option<String>,
    pub color: Option<String>,
    pub product: Product,
    pub variant: Option<ProductVariant>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartList {
    pub items: Vec<CartLine>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RemovedCartItem {
    pub id: Uuid,
}
