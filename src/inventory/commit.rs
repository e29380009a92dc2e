use std::collections::{BTreeMap, HashMap};

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, sea_query::Expr, sea_query::LockType,
};
use uuid::Uuid;

use crate::{
    entity::{
        ProductVariants, Products, cart_items,
        product_variants::{self, Column as VariantCol},
        products::{self, ActiveModel as ProductActive, Column as ProdCol},
    },
    error::{AppError, AppResult, StockShortage},
    inventory::{
        resolver::{ResolvedStock, StockKey, resolve_variant, resolve_within},
        size_stock::SizeStock,
    },
};

/// A cart line re-resolved against locked stock rows.
#[derive(Debug, Clone)]
pub struct CommitLine {
    pub item: cart_items::Model,
    pub resolved: ResolvedStock,
}

/// Product and variant rows held under `FOR UPDATE` for the rest of the
/// enclosing transaction.
#[derive(Debug, Default)]
pub struct LockedStock {
    products: HashMap<Uuid, products::Model>,
    variants: HashMap<Uuid, Vec<product_variants::Model>>,
}

impl LockedStock {
    /// Rows are locked in ascending id order so concurrent checkouts over
    /// overlapping products queue instead of deadlocking.
    pub async fn acquire<C>(conn: &C, product_ids: impl IntoIterator<Item = Uuid>) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut ids: Vec<Uuid> = product_ids.into_iter().collect();
        ids.sort();
        ids.dedup();
        if ids.is_empty() {
            return Ok(Self::default());
        }

        let products = Products::find()
            .filter(ProdCol::Id.is_in(ids.clone()))
            .order_by_asc(ProdCol::Id)
            .lock(LockType::Update)
            .all(conn)
            .await?;

        let variant_rows = ProductVariants::find()
            .filter(VariantCol::ProductId.is_in(ids))
            .order_by_asc(VariantCol::Id)
            .lock(LockType::Update)
            .all(conn)
            .await?;

        let mut variants: HashMap<Uuid, Vec<product_variants::Model>> = HashMap::new();
        for variant in variant_rows {
            variants.entry(variant.product_id).or_default().push(variant);
        }

        Ok(Self {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
            variants,
        })
    }

    pub fn resolve_item(&self, item: &cart_items::Model) -> AppResult<ResolvedStock> {
        let product = self
            .products
            .get(&item.product_id)
            .ok_or(AppError::NotFound)?;
        let variants = self
            .variants
            .get(&item.product_id)
            .map(Vec::as_slice)
            .unwrap_or_default();

        match item.variant_id {
            Some(variant_id) => variants
                .iter()
                .find(|v| v.id == variant_id)
                .map(|variant| resolve_variant(product, variant))
                .ok_or(AppError::NotFound),
            None => resolve_within(
                product,
                variants,
                item.size.as_deref(),
                item.color.as_deref(),
            ),
        }
    }
}

/// Check every line against the stock it draws from right now.
///
/// Lines sharing a pool are summed. Other users' carts are not subtracted
/// here: at commit time the first order to reach the locked row wins.
pub fn validate_lines(lines: &[CommitLine]) -> Result<(), Vec<StockShortage>> {
    let mut demand: HashMap<&StockKey, i64> = HashMap::new();
    for line in lines {
        *demand.entry(&line.resolved.key).or_default() += i64::from(line.item.quantity);
    }

    let shortages: Vec<StockShortage> = lines
        .iter()
        .filter_map(|line| {
            let wanted = demand.get(&line.resolved.key).copied().unwrap_or(0);
            let available = if line.resolved.product.in_stock {
                line.resolved.base_stock.max(0)
            } else {
                0
            };
            (wanted > available).then(|| StockShortage {
                item_id: Some(line.item.id),
                label: line.resolved.label(),
                available,
            })
        })
        .collect();

    if shortages.is_empty() {
        Ok(())
    } else {
        Err(shortages)
    }
}

/// Write the permanent decrement for every pool the lines draw from.
pub async fn decrement_stock<C>(conn: &C, locked: &LockedStock, lines: &[CommitLine]) -> AppResult<()>
where
    C: ConnectionTrait,
{
    let mut demand: BTreeMap<&StockKey, (i64, String)> = BTreeMap::new();
    for line in lines {
        let entry = demand
            .entry(&line.resolved.key)
            .or_insert_with(|| (0, line.resolved.label()));
        entry.0 += i64::from(line.item.quantity);
    }

    let mut legacy: BTreeMap<Uuid, Vec<(&str, Option<&str>, i64, &str)>> = BTreeMap::new();

    for (key, (quantity, label)) in &demand {
        match key {
            StockKey::Variant(variant_id) => {
                let quantity = as_stock_delta(*quantity, label)?;
                let result = ProductVariants::update_many()
                    .col_expr(VariantCol::Stock, Expr::col(VariantCol::Stock).sub(quantity))
                    .filter(VariantCol::Id.eq(*variant_id))
                    .filter(VariantCol::Stock.gte(quantity))
                    .exec(conn)
                    .await?;
                if result.rows_affected != 1 {
                    return Err(AppError::insufficient(None, label.clone(), 0));
                }
            }
            StockKey::Product(product_id) => {
                let quantity = as_stock_delta(*quantity, label)?;
                let result = Products::update_many()
                    .col_expr(ProdCol::Stock, Expr::col(ProdCol::Stock).sub(quantity))
                    .filter(ProdCol::Id.eq(*product_id))
                    .filter(ProdCol::Stock.gte(quantity))
                    .exec(conn)
                    .await?;
                if result.rows_affected != 1 {
                    return Err(AppError::insufficient(None, label.clone(), 0));
                }
            }
            StockKey::SizeColor {
                product_id,
                size,
                color,
            } => {
                legacy.entry(*product_id).or_default().push((
                    size.as_str(),
                    color.as_deref(),
                    *quantity,
                    label.as_str(),
                ));
            }
        }
    }

    for (product_id, slots) in legacy {
        let product = locked.products.get(&product_id).ok_or(AppError::NotFound)?;
        let mut size_stock = SizeStock::parse(product.size_stock.as_deref());
        for (size, color, quantity, label) in slots {
            if !size_stock.decrement(size, color, quantity) {
                let left = size_stock
                    .slot(size, color)
                    .map(|slot| slot.quantity.max(0))
                    .unwrap_or(0);
                return Err(AppError::insufficient(None, label, left));
            }
        }

        let mut active: ProductActive = product.clone().into();
        active.size_stock = Set(size_stock.to_json());
        active.update(conn).await?;
    }

    Ok(())
}

fn as_stock_delta(quantity: i64, label: &str) -> AppResult<i32> {
    i32::try_from(quantity).map_err(|_| AppError::insufficient(None, label, i64::from(i32::MAX)))
}
