use std::collections::BTreeSet;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::orders::{CheckoutRequest, OrderList, OrderWithItems},
    entity::{
        CartItems, OrderItems, Orders,
        cart_items::Column as CartCol,
        order_items::{ActiveModel as OrderItemActive, Column as OrderItemCol},
        orders::{ActiveModel as OrderActive, Column as OrderCol},
    },
    error::{AppError, AppResult},
    inventory::commit::{CommitLine, LockedStock, decrement_stock, validate_lines},
    middleware::auth::AuthUser,
    models::{Order, OrderItem},
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    services::{cart_service, coupon_service},
    state::AppState,
};

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, limit, offset) = query.pagination.normalize();
    let mut condition = Condition::all().add(OrderCol::UserId.eq(user.user_id));
    if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(OrderCol::Status.eq(status.clone()));
    }

    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);

    let mut finder = Orders::find().filter(condition);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(OrderCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(OrderCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let orders = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Order::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Ok",
        OrderList { items: orders },
        Some(meta),
    ))
}

/// Turn cart lines into an order and permanently take their stock.
///
/// Everything happens in one transaction: stock rows are locked, every line
/// is re-resolved and re-validated, stock is decremented, the order is
/// written and the committed lines leave the cart. Any failure rolls the
/// whole unit back.
pub async fn checkout(
    state: &AppState,
    user: &AuthUser,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let address = payload.address.trim();
    if address.is_empty() {
        return Err(AppError::BadRequest("address is required".into()));
    }

    let txn = state.orm.begin().await?;

    let cart = cart_service::find_cart(&txn, user.user_id)
        .await?
        .ok_or_else(|| AppError::BadRequest("Cart is empty".into()))?;

    let mut finder = CartItems::find()
        .filter(CartCol::CartId.eq(cart.id))
        .order_by_asc(CartCol::CreatedAt)
        .order_by_asc(CartCol::Id);
    if let Some(ids) = payload.item_ids.as_ref() {
        finder = finder.filter(CartCol::Id.is_in(ids.iter().copied()));
    }
    let items = finder.all(&txn).await?;

    if items.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".into()));
    }
    if let Some(ids) = payload.item_ids.as_ref() {
        let requested: BTreeSet<Uuid> = ids.iter().copied().collect();
        if requested.len() != items.len() {
            return Err(AppError::BadRequest(
                "Some items are not in your cart".into(),
            ));
        }
    }

    let locked = LockedStock::acquire(&txn, items.iter().map(|item| item.product_id)).await?;
    let lines = items
        .into_iter()
        .map(|item| {
            let resolved = locked.resolve_item(&item)?;
            Ok(CommitLine { item, resolved })
        })
        .collect::<AppResult<Vec<_>>>()?;

    if let Err(shortages) = validate_lines(&lines) {
        tracing::info!(
            user_id = %user.user_id,
            failed = shortages.len(),
            "checkout rejected, stock changed since items were added"
        );
        return Err(AppError::InsufficientStock(shortages));
    }

    decrement_stock(&txn, &locked, &lines).await?;

    let subtotal_amount: i64 = lines
        .iter()
        .map(|line| line.resolved.unit_price() * i64::from(line.item.quantity))
        .sum();
    let coupon_code = payload
        .coupon_code
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());
    let discount_amount = match coupon_code {
        Some(code) => coupon_service::discount_for(&txn, code, subtotal_amount).await?,
        None => 0,
    };
    let total_amount = (subtotal_amount - discount_amount).max(0);

    let now = Utc::now();
    let order_id = Uuid::new_v4();
    let order = OrderActive {
        id: Set(order_id),
        user_id: Set(user.user_id),
        address: Set(address.to_string()),
        coupon_code: Set(coupon_code.map(str::to_string)),
        subtotal_amount: Set(subtotal_amount),
        discount_amount: Set(discount_amount),
        total_amount: Set(total_amount),
        status: Set("pending".into()),
        payment_status: Set("unpaid".into()),
        invoice_number: Set(build_invoice_number(order_id)),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&txn)
    .await?;

    let mut order_items: Vec<OrderItem> = Vec::with_capacity(lines.len());
    for line in &lines {
        let unit_price = line.resolved.unit_price();
        let item = OrderItemActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            product_id: Set(line.resolved.product.id),
            variant_id: Set(line.resolved.variant.as_ref().map(|v| v.id)),
            size: Set(line.resolved.size.clone()),
            color: Set(line.resolved.color.clone()),
            quantity: Set(line.item.quantity),
            unit_price: Set(unit_price),
            subtotal: Set(unit_price * i64::from(line.item.quantity)),
            created_at: Set(now.into()),
        }
        .insert(&txn)
        .await?;

        order_items.push(OrderItem::from(item));
    }

    // clear committed lines
    CartItems::delete_many()
        .filter(CartCol::Id.is_in(lines.iter().map(|line| line.item.id)))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    tracing::info!(
        order_id = %order.id,
        user_id = %user.user_id,
        lines = order_items.len(),
        total = order.total_amount,
        "order committed"
    );

    audit::record(
        &state.orm,
        Some(user.user_id),
        "checkout",
        "orders",
        serde_json::json!({ "order_id": order.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Checkout success",
        OrderWithItems {
            order: Order::from(order),
            items: order_items,
        },
        Some(Meta::empty()),
    ))
}

pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let order = Orders::find()
        .filter(
            Condition::all()
                .add(OrderCol::UserId.eq(user.user_id))
                .add(OrderCol::Id.eq(id)),
        )
        .one(&state.orm)
        .await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order.id))
        .order_by_asc(OrderItemCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(OrderItem::from)
        .collect();

    Ok(ApiResponse::success(
        "OK",
        OrderWithItems {
            order: Order::from(order),
            items,
        },
        Some(Meta::empty()),
    ))
}

fn build_invoice_number(order_id: Uuid) -> String {
    let date = Utc::now().format("%Y%m%d");
    let suffix = order_id.to_string();
    let short = &suffix[..8];
    format!("INV-{}-{}", date, short)
}
