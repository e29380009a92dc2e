use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::LockType;
use sea_orm::{ActiveModelTrait, EntityTrait, QuerySelect, TransactionTrait};
use uuid::Uuid;

use crate::{
    audit,
    dto::admin::{AvailabilityRequest, InventoryAdjustRequest},
    entity::{
        ProductVariants, Products, product_variants::ActiveModel as VariantActive,
        products::ActiveModel as ProductActive,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Product, ProductVariant},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn adjust_variant_inventory(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: InventoryAdjustRequest,
) -> AppResult<ApiResponse<ProductVariant>> {
    ensure_admin(user)?;
    ensure_delta(payload.delta)?;

    let txn = state.orm.begin().await?;
    let variant = ProductVariants::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let variant = match variant {
        Some(v) => v,
        None => return Err(AppError::NotFound),
    };

    let new_stock = apply_delta(variant.stock, payload.delta)?;

    let mut active: VariantActive = variant.into();
    active.stock = Set(new_stock);
    let updated = active.update(&txn).await?;

    txn.commit().await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "inventory_adjust",
        "product_variants",
        serde_json::json!({ "variant_id": updated.id, "delta": payload.delta }),
    )
    .await;

    Ok(ApiResponse::success(
        "Inventory updated",
        ProductVariant::from(updated),
        Some(Meta::empty()),
    ))
}

pub async fn adjust_product_inventory(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: InventoryAdjustRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    ensure_delta(payload.delta)?;

    let txn = state.orm.begin().await?;
    let product = Products::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let product = match product {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let new_stock = apply_delta(product.stock, payload.delta)?;

    let mut active: ProductActive = product.into();
    active.stock = Set(new_stock);
    let updated = active.update(&txn).await?;

    txn.commit().await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "inventory_adjust",
        "products",
        serde_json::json!({ "product_id": updated.id, "delta": payload.delta }),
    )
    .await;

    Ok(ApiResponse::success(
        "Inventory updated",
        Product::from(updated),
        Some(Meta::empty()),
    ))
}

/// Operator switch that forces a product unavailable whatever its counters say.
pub async fn set_product_availability(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: AvailabilityRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;

    let product = Products::find_by_id(id).one(&state.orm).await?;
    let product = match product {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let mut active: ProductActive = product.into();
    active.in_stock = Set(payload.in_stock);
    let updated = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "availability_update",
        "products",
        serde_json::json!({ "product_id": updated.id, "in_stock": updated.in_stock }),
    )
    .await;

    Ok(ApiResponse::success(
        "Availability updated",
        Product::from(updated),
        Some(Meta::empty()),
    ))
}

fn ensure_delta(delta: i32) -> AppResult<()> {
    if delta == 0 {
        return Err(AppError::BadRequest("delta must not be 0".into()));
    }
    Ok(())
}

fn apply_delta(stock: i32, delta: i32) -> AppResult<i32> {
    match stock.checked_add(delta) {
        Some(new_stock) if new_stock >= 0 => Ok(new_stock),
        Some(_) => Err(AppError::BadRequest("stock cannot be negative".into())),
        None => Err(AppError::BadRequest("stock adjustment out of range".into())),
    }
}
