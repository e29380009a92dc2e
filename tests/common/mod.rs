#![allow(dead_code)]

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, EntityTrait, Set};
use serde_json::json;
use uuid::Uuid;

use storefront_inventory_api::{
    db::run_migrations,
    entity::{
        ProductVariants, Products, coupons::ActiveModel as CouponActive, product_variants,
        product_variants::ActiveModel as VariantActive, products,
        products::ActiveModel as ProductActive,
    },
    middleware::auth::AuthUser,
    state::AppState,
};

pub const TEST_JWT_SECRET: &str = "test-secret";

/// Fresh in-memory database per test. One connection keeps the database
/// alive and serialises transactions the way row locks would.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let orm = Database::connect(options).await?;
    run_migrations(&orm).await?;
    Ok(AppState::new(orm, TEST_JWT_SECRET))
}

pub fn shopper() -> AuthUser {
    AuthUser {
        user_id: Uuid::new_v4(),
        role: "user".into(),
    }
}

pub fn admin() -> AuthUser {
    AuthUser {
        user_id: Uuid::new_v4(),
        role: "admin".into(),
    }
}

pub async fn create_product(
    state: &AppState,
    stock: i32,
    size_stock: Option<&str>,
) -> anyhow::Result<products::Model> {
    let product = ProductActive {
        id: Set(Uuid::new_v4()),
        name: Set(format!("Product {}", Uuid::new_v4())),
        description: Set(None),
        price: Set(1000),
        stock: Set(stock),
        size_stock: Set(size_stock.map(str::to_owned)),
        sizes: Set(json!(["S", "M"])),
        colors: Set(json!(["Red", "Blue"])),
        in_stock: Set(true),
        is_visible: Set(true),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;
    Ok(product)
}

pub async fn create_variant(
    state: &AppState,
    product: &products::Model,
    size: &str,
    color: &str,
    stock: i32,
    price: Option<i64>,
) -> anyhow::Result<product_variants::Model> {
    let variant = VariantActive {
        id: Set(Uuid::new_v4()),
        product_id: Set(product.id),
        size: Set(size.into()),
        color: Set(color.into()),
        stock: Set(stock),
        price: Set(price),
        image: Set(None),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;
    Ok(variant)
}

pub async fn create_coupon(
    state: &AppState,
    code: &str,
    discount_type: &str,
    value: i64,
) -> anyhow::Result<()> {
    CouponActive {
        id: Set(Uuid::new_v4()),
        code: Set(code.into()),
        discount_type: Set(discount_type.into()),
        value: Set(value),
        is_active: Set(true),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;
    Ok(())
}

pub async fn variant_stock(state: &AppState, id: Uuid) -> anyhow::Result<i32> {
    let variant = ProductVariants::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| anyhow::anyhow!("variant {id} missing"))?;
    Ok(variant.stock)
}

pub async fn reload_product(state: &AppState, id: Uuid) -> anyhow::Result<products::Model> {
    Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| anyhow::anyhow!("product {id} missing"))
}
