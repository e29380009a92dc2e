use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::cart::{AddToCartRequest, CartLine, CartList, RemovedCartItem, UpdateCartItemRequest},
    entity::{
        CartItems, Carts, ProductVariants, Products,
        cart_items::{ActiveModel as CartItemActive, Column as CartCol, Model as CartItemModel},
        carts::{ActiveModel as CartActive, Column as CartsCol, Model as CartModel},
        product_variants::Column as VariantCol,
    },
    error::{AppError, AppResult},
    inventory::{self, ResolvedStock, StockKey, StockRequest},
    middleware::auth::AuthUser,
    models::{CartItem, Product, ProductVariant},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

pub async fn list_cart(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<CartList>> {
    let (page, limit, offset) = pagination.normalize();

    let Some(cart) = find_cart(&state.orm, user.user_id).await? else {
        let meta = Meta::new(page, limit, 0);
        return Ok(ApiResponse::success("OK", CartList { items: Vec::new() }, Some(meta)));
    };

    let finder = CartItems::find()
        .filter(CartCol::CartId.eq(cart.id))
        .order_by_desc(CartCol::CreatedAt)
        .order_by_asc(CartCol::Id);
    let total = finder.clone().count(&state.orm).await? as i64;

    let rows = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .find_also_related(Products)
        .all(&state.orm)
        .await?;

    let variant_ids: Vec<Uuid> = rows.iter().filter_map(|(item, _)| item.variant_id).collect();
    let mut variants: HashMap<Uuid, ProductVariant> = if variant_ids.is_empty() {
        HashMap::new()
    } else {
        ProductVariants::find()
            .filter(VariantCol::Id.is_in(variant_ids))
            .all(&state.orm)
            .await?
            .into_iter()
            .map(|v| (v.id, ProductVariant::from(v)))
            .collect()
    };

    let items = rows
        .into_iter()
        .filter_map(|(item, product)| {
            let product = product?;
            let variant = item.variant_id.and_then(|id| variants.remove(&id));
            Some(CartLine {
                id: item.id,
                quantity: item.quantity,
                size: item.size,
                color: item.color,
                product: Product::from(product),
                variant,
            })
        })
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("OK", CartList { items }, Some(meta)))
}

/// Add units to the caller's cart, bounded by what no cart holds yet.
pub async fn add_to_cart(
    state: &AppState,
    user: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartItem>> {
    if payload.quantity <= 0 {
        return Err(AppError::BadRequest(
            "quantity must be greater than 0".to_string(),
        ));
    }

    let resolved = inventory::resolve(&state.orm, &payload.stock_request()).await?;
    let availability = inventory::availability_of(&state.orm, &resolved, None).await?;
    if i64::from(payload.quantity) > availability.available_stock {
        return Err(AppError::insufficient(
            None,
            resolved.label(),
            availability.available_stock,
        ));
    }

    let cart = find_or_create_cart(&state.orm, user.user_id).await?;

    let existing = CartItems::find()
        .filter(CartCol::CartId.eq(cart.id))
        .filter(own_line_condition(&resolved))
        .one(&state.orm)
        .await?;

    let cart_item = match existing {
        Some(item) => {
            let quantity = item.quantity.saturating_add(payload.quantity);
            let mut active: CartItemActive = item.into();
            active.quantity = Set(quantity);
            active.update(&state.orm).await?
        }
        None => {
            CartItemActive {
                id: Set(Uuid::new_v4()),
                cart_id: Set(cart.id),
                product_id: Set(resolved.product.id),
                variant_id: Set(resolved.variant.as_ref().map(|v| v.id)),
                size: Set(resolved.size.clone()),
                color: Set(resolved.color.clone()),
                quantity: Set(payload.quantity),
                created_at: Set(Utc::now().into()),
            }
            .insert(&state.orm)
            .await?
        }
    };

    audit::record(
        &state.orm,
        Some(user.user_id),
        "cart_add",
        "cart_items",
        serde_json::json!({
            "item_id": cart_item.id,
            "product_id": cart_item.product_id,
            "variant_id": cart_item.variant_id,
            "quantity": cart_item.quantity,
        }),
    )
    .await;

    Ok(ApiResponse::success("OK", CartItem::from(cart_item), None))
}

/// Set a line's quantity. The line's own units do not count against it.
pub async fn update_cart_item(
    state: &AppState,
    user: &AuthUser,
    payload: UpdateCartItemRequest,
) -> AppResult<ApiResponse<CartLine>> {
    let item = load_owned_item(&state.orm, user, payload.item_id).await?;

    if payload.quantity < 1 {
        return Err(AppError::BadRequest(
            "quantity must be at least 1, remove the item instead".to_string(),
        ));
    }

    let resolved = inventory::resolve(&state.orm, &line_request(&item)).await?;
    let availability = inventory::availability_of(&state.orm, &resolved, Some(item.id)).await?;
    if i64::from(payload.quantity) > availability.available_stock {
        return Err(AppError::insufficient(
            Some(item.id),
            resolved.label(),
            availability.available_stock,
        ));
    }

    let mut active: CartItemActive = item.into();
    active.quantity = Set(payload.quantity);
    let item = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "cart_update",
        "cart_items",
        serde_json::json!({ "item_id": item.id, "quantity": item.quantity }),
    )
    .await;

    let line = CartLine {
        id: item.id,
        quantity: item.quantity,
        size: item.size,
        color: item.color,
        product: Product::from(resolved.product),
        variant: resolved.variant.map(ProductVariant::from),
    };
    Ok(ApiResponse::success("Cart updated", line, Some(Meta::empty())))
}

pub async fn remove_cart_item(
    state: &AppState,
    user: &AuthUser,
    item_id: Uuid,
) -> AppResult<ApiResponse<RemovedCartItem>> {
    let item = load_owned_item(&state.orm, user, item_id).await?;
    item.delete(&state.orm).await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "cart_remove",
        "cart_items",
        serde_json::json!({ "item_id": item_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Removed from cart",
        RemovedCartItem { id: item_id },
        Some(Meta::empty()),
    ))
}

/// The stock request a stored cart line stands for.
pub fn line_request(item: &CartItemModel) -> StockRequest {
    StockRequest {
        variant_id: item.variant_id,
        product_id: Some(item.product_id),
        size: item.size.clone(),
        color: item.color.clone(),
    }
}

/// Look up a line, refusing lines in somebody else's cart.
pub async fn load_owned_item<C>(conn: &C, user: &AuthUser, item_id: Uuid) -> AppResult<CartItemModel>
where
    C: ConnectionTrait,
{
    let (item, cart) = CartItems::find_by_id(item_id)
        .find_also_related(Carts)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound)?;
    let cart = cart.ok_or(AppError::NotFound)?;
    if cart.user_id != user.user_id {
        return Err(AppError::Forbidden);
    }
    Ok(item)
}

pub async fn find_cart<C>(conn: &C, user_id: Uuid) -> AppResult<Option<CartModel>>
where
    C: ConnectionTrait,
{
    let cart = Carts::find()
        .filter(CartsCol::UserId.eq(user_id))
        .one(conn)
        .await?;
    Ok(cart)
}

async fn find_or_create_cart<C>(conn: &C, user_id: Uuid) -> AppResult<CartModel>
where
    C: ConnectionTrait,
{
    if let Some(cart) = find_cart(conn, user_id).await? {
        return Ok(cart);
    }

    let inserted = CartActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        created_at: Set(Utc::now().into()),
    }
    .insert(conn)
    .await;

    match inserted {
        Ok(cart) => Ok(cart),
        // Lost a race with a concurrent first add for the same user.
        Err(err) => find_cart(conn, user_id).await?.ok_or(AppError::OrmError(err)),
    }
}

/// The caller's existing line for the same pool and option, if any.
fn own_line_condition(resolved: &ResolvedStock) -> Condition {
    match &resolved.key {
        StockKey::Variant(variant_id) => Condition::all().add(CartCol::VariantId.eq(*variant_id)),
        StockKey::SizeColor { .. } | StockKey::Product(_) => {
            let mut condition = Condition::all()
                .add(CartCol::ProductId.eq(resolved.product.id))
                .add(CartCol::VariantId.is_null());
            condition = match &resolved.size {
                Some(size) => condition.add(CartCol::Size.eq(size.as_str())),
                None => condition.add(CartCol::Size.is_null()),
            };
            match &resolved.color {
                Some(color) => condition.add(CartCol::Color.eq(color.as_str())),
                None => condition.add(CartCol::Color.is_null()),
            }
        }
    }
}
