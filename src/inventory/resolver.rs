use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    entity::{
        ProductVariants, Products,
        product_variants::{self, Column as VariantCol},
        products,
    },
    error::{AppError, AppResult},
    inventory::size_stock::SizeStock,
};

/// What a caller asks about: a variant id, a product with size/color, or a
/// bare size/color pair searched across every product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockRequest {
    pub variant_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl StockRequest {
    pub fn product(product_id: Uuid, size: Option<&str>, color: Option<&str>) -> Self {
        Self {
            variant_id: None,
            product_id: Some(product_id),
            size: size.map(str::to_owned),
            color: color.map(str::to_owned),
        }
    }
}

/// The pool of units a cart line draws from. Cart lines sharing a key
/// compete for the same base stock.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StockKey {
    Variant(Uuid),
    /// Legacy `size_stock` slot. `color` is `None` when the map is flat.
    SizeColor {
        product_id: Uuid,
        size: String,
        color: Option<String>,
    },
    /// The flat `products.stock` counter.
    Product(Uuid),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStock {
    pub product: products::Model,
    pub variant: Option<product_variants::Model>,
    pub base_stock: i64,
    pub key: StockKey,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl ResolvedStock {
    pub fn label(&self) -> String {
        describe_option(self.size.as_deref(), self.color.as_deref())
    }

    /// Variant price overrides the product price.
    pub fn unit_price(&self) -> i64 {
        self.variant
            .as_ref()
            .and_then(|v| v.price)
            .unwrap_or(self.product.price)
    }
}

pub fn describe_option(size: Option<&str>, color: Option<&str>) -> String {
    match (size, color) {
        (Some(size), Some(color)) => format!("size {size} color {color}"),
        (Some(size), None) => format!("size {size}"),
        (None, Some(color)) => format!("color {color}"),
        (None, None) => "this product".to_string(),
    }
}

pub fn resolve_variant(product: &products::Model, variant: &product_variants::Model) -> ResolvedStock {
    ResolvedStock {
        product: product.clone(),
        variant: Some(variant.clone()),
        base_stock: i64::from(variant.stock),
        key: StockKey::Variant(variant.id),
        size: Some(variant.size.clone()),
        color: Some(variant.color.clone()),
    }
}

/// Resolve a size/color within an already loaded product.
///
/// A product with variants only sells those variants; any other option is
/// `NotFound`. Products without variants use the legacy `size_stock` slot,
/// otherwise the flat product counter. Malformed legacy data reads as absent.
pub fn resolve_within(
    product: &products::Model,
    variants: &[product_variants::Model],
    size: Option<&str>,
    color: Option<&str>,
) -> AppResult<ResolvedStock> {
    let own: Vec<&product_variants::Model> =
        variants.iter().filter(|v| v.product_id == product.id).collect();
    if !own.is_empty() {
        return own
            .into_iter()
            .find(|v| size == Some(v.size.as_str()) && color == Some(v.color.as_str()))
            .map(|variant| resolve_variant(product, variant))
            .ok_or(AppError::NotFound);
    }

    let legacy = size.and_then(|size| {
        SizeStock::parse(product.size_stock.as_deref())
            .slot(size, color)
            .map(|slot| (size, slot))
    });

    let resolved = match legacy {
        Some((size, slot)) => ResolvedStock {
            product: product.clone(),
            variant: None,
            base_stock: slot.quantity,
            key: StockKey::SizeColor {
                product_id: product.id,
                size: size.to_owned(),
                color: slot.color,
            },
            size: Some(size.to_owned()),
            color: color.map(str::to_owned),
        },
        None => ResolvedStock {
            product: product.clone(),
            variant: None,
            base_stock: i64::from(product.stock),
            key: StockKey::Product(product.id),
            size: size.map(str::to_owned),
            color: color.map(str::to_owned),
        },
    };
    Ok(resolved)
}

/// Resolve a request against the store.
pub async fn resolve<C>(conn: &C, request: &StockRequest) -> AppResult<ResolvedStock>
where
    C: ConnectionTrait,
{
    let size = request.size.as_deref().filter(|s| !s.is_empty());
    let color = request.color.as_deref().filter(|c| !c.is_empty());

    if let Some(variant_id) = request.variant_id {
        let variant = ProductVariants::find_by_id(variant_id)
            .one(conn)
            .await?
            .ok_or(AppError::NotFound)?;
        let product = load_product(conn, variant.product_id).await?;
        return Ok(resolve_variant(&product, &variant));
    }

    if let Some(product_id) = request.product_id {
        let product = load_product(conn, product_id).await?;
        let variants = ProductVariants::find()
            .filter(VariantCol::ProductId.eq(product.id))
            .all(conn)
            .await?;
        return resolve_within(&product, &variants, size, color);
    }

    let (Some(size), Some(color)) = (size, color) else {
        return Err(AppError::BadRequest(
            "variantId, productId or both size and color are required".into(),
        ));
    };

    let variant = ProductVariants::find()
        .filter(VariantCol::Size.eq(size))
        .filter(VariantCol::Color.eq(color))
        .order_by_asc(VariantCol::CreatedAt)
        .order_by_asc(VariantCol::Id)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound)?;
    let product = load_product(conn, variant.product_id).await?;
    Ok(resolve_variant(&product, &variant))
}

async fn load_product<C>(conn: &C, product_id: Uuid) -> AppResult<products::Model>
where
    C: ConnectionTrait,
{
    Products::find_by_id(product_id)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound)
}
