use sea_orm::{ConnectionTrait, DbErr};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::inventory::{reservations::reserved_quantity, resolver::ResolvedStock};

/// Units still offerable: base stock minus soft reservations, never negative.
pub fn available_stock(base_stock: i64, reserved: i64) -> i64 {
    base_stock.saturating_sub(reserved).max(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub base_stock: i64,
    pub cart_quantity: i64,
    pub available_stock: i64,
}

impl Availability {
    /// An operator can switch a product off regardless of its counters.
    pub fn compute(resolved: &ResolvedStock, reserved: i64) -> Self {
        let available_stock = if resolved.product.in_stock {
            available_stock(resolved.base_stock, reserved)
        } else {
            0
        };
        Self {
            base_stock: resolved.base_stock,
            cart_quantity: reserved,
            available_stock,
        }
    }
}

pub async fn availability_of<C>(
    conn: &C,
    resolved: &ResolvedStock,
    exclude_item: Option<Uuid>,
) -> Result<Availability, DbErr>
where
    C: ConnectionTrait,
{
    let reserved = reserved_quantity(conn, &resolved.key, exclude_item).await?;
    Ok(Availability::compute(resolved, reserved))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_negative() {
        assert_eq!(available_stock(5, 6), 0);
        assert_eq!(available_stock(0, 0), 0);
        assert_eq!(available_stock(-3, 0), 0);
        assert_eq!(available_stock(i64::MIN, i64::MAX), 0);
    }

    #[test]
    fn subtracts_reservations() {
        assert_eq!(available_stock(5, 2), 3);
        assert_eq!(available_stock(5, 0), 5);
    }
}
