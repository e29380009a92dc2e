use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    dto::products::{OptionAvailability, ProductDetail},
    entity::{
        ProductVariants, Products,
        product_variants::Column as VariantCol,
    },
    error::{AppError, AppResult},
    inventory::{self, ResolvedStock},
    models::{Product, labels_from_json},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Product page: every purchasable option with its live availability.
pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<ProductDetail>> {
    let product = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .filter(|p| p.is_visible)
        .ok_or(AppError::NotFound)?;

    let variants = ProductVariants::find()
        .filter(VariantCol::ProductId.eq(product.id))
        .order_by_asc(VariantCol::Size)
        .order_by_asc(VariantCol::Color)
        .all(&state.orm)
        .await?;

    let resolved: Vec<ResolvedStock> = if !variants.is_empty() {
        variants
            .iter()
            .map(|variant| inventory::resolver::resolve_variant(&product, variant))
            .collect()
    } else {
        let sizes = labels_from_json(&product.sizes);
        let colors = labels_from_json(&product.colors);
        match (sizes.is_empty(), colors.is_empty()) {
            (true, true) => vec![inventory::resolve_within(&product, &[], None, None)?],
            (false, true) => sizes
                .iter()
                .map(|size| inventory::resolve_within(&product, &[], Some(size), None))
                .collect::<AppResult<_>>()?,
            (true, false) => colors
                .iter()
                .map(|color| inventory::resolve_within(&product, &[], None, Some(color)))
                .collect::<AppResult<_>>()?,
            (false, false) => sizes
                .iter()
                .flat_map(|size| {
                    colors.iter().map(|color| {
                        inventory::resolve_within(&product, &[], Some(size), Some(color))
                    })
                })
                .collect::<AppResult<_>>()?,
        }
    };

    let mut options = Vec::with_capacity(resolved.len());
    for stock in resolved {
        let availability = inventory::availability_of(&state.orm, &stock, None).await?;
        options.push(OptionAvailability {
            variant_id: stock.variant.as_ref().map(|v| v.id),
            price: stock.unit_price(),
            size: stock.size,
            color: stock.color,
            base_stock: availability.base_stock,
            cart_quantity: availability.cart_quantity,
            available_stock: availability.available_stock,
        });
    }

    let data = ProductDetail {
        product: Product::from(product),
        options,
    };
    Ok(ApiResponse::success("Product found", data, Some(Meta::empty())))
}
