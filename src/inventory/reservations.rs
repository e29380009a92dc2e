use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect,
    sea_query::Expr,
};
use uuid::Uuid;

use crate::{
    entity::{CartItems, cart_items::Column as CartCol},
    inventory::resolver::StockKey,
};

/// Cart lines, across every user's cart, that draw from `key`.
pub fn key_condition(key: &StockKey) -> Condition {
    match key {
        StockKey::Variant(variant_id) => Condition::all().add(CartCol::VariantId.eq(*variant_id)),
        StockKey::SizeColor {
            product_id,
            size,
            color,
        } => {
            let mut condition = Condition::all()
                .add(CartCol::ProductId.eq(*product_id))
                .add(CartCol::VariantId.is_null())
                .add(CartCol::Size.eq(size.as_str()));
            if let Some(color) = color {
                condition = condition.add(CartCol::Color.eq(color.as_str()));
            }
            condition
        }
        StockKey::Product(product_id) => Condition::all()
            .add(CartCol::ProductId.eq(*product_id))
            .add(CartCol::VariantId.is_null()),
    }
}

/// Units currently held in carts for `key`, optionally ignoring one line.
///
/// Always a live aggregate; callers rely on it never being stale.
pub async fn reserved_quantity<C>(
    conn: &C,
    key: &StockKey,
    exclude_item: Option<Uuid>,
) -> Result<i64, DbErr>
where
    C: ConnectionTrait,
{
    let mut condition = key_condition(key);
    if let Some(item_id) = exclude_item {
        condition = condition.add(CartCol::Id.ne(item_id));
    }

    let reserved = CartItems::find()
        .select_only()
        .column_as(Expr::col(CartCol::Quantity).sum(), "reserved")
        .filter(condition)
        .into_tuple::<Option<i64>>()
        .one(conn)
        .await?
        .flatten()
        .unwrap_or(0);

    Ok(reserved)
}
