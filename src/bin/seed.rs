use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde_json::json;
use uuid::Uuid;

use storefront_inventory_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::{
        Coupons, Products, coupons::ActiveModel as CouponActive,
        coupons::Column as CouponCol, product_variants::ActiveModel as VariantActive,
        products::ActiveModel as ProductActive, products::Column as ProdCol,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    seed_variant_product(&orm).await?;
    seed_legacy_product(
        &orm,
        "Classic Tee",
        json!(["S", "M"]),
        json!(["Red", "Blue"]),
        Some(r#"{"S": {"Red": 5, "Blue": 2}, "M": {"Red": 0, "Blue": 4}}"#),
        0,
    )
    .await?;
    seed_legacy_product(
        &orm,
        "Canvas Tote",
        json!(["One Size"]),
        json!(["Natural", "Black"]),
        Some(r#"{"One Size": 12}"#),
        12,
    )
    .await?;
    seed_legacy_product(&orm, "Ferris Sticker Pack", json!([]), json!([]), None, 200).await?;
    seed_coupon(&orm, "WELCOME10", "percent", 10).await?;

    println!("Seed completed");
    Ok(())
}

async fn product_exists(orm: &DatabaseConnection, name: &str) -> anyhow::Result<bool> {
    let existing = Products::find()
        .filter(ProdCol::Name.eq(name))
        .one(orm)
        .await?;
    Ok(existing.is_some())
}

async fn seed_variant_product(orm: &DatabaseConnection) -> anyhow::Result<()> {
    let name = "Axum Hoodie";
    if product_exists(orm, name).await? {
        println!("Skipping {name}, already seeded");
        return Ok(());
    }

    let product = ProductActive {
        id: Set(Uuid::new_v4()),
        name: Set(name.into()),
        description: Set(Some("Warm hoodie for Rustaceans".into())),
        price: Set(550000),
        stock: Set(0),
        size_stock: Set(None),
        sizes: Set(json!(["S", "M", "L"])),
        colors: Set(json!(["Red", "Black"])),
        in_stock: Set(true),
        is_visible: Set(true),
        created_at: Set(Utc::now().into()),
    }
    .insert(orm)
    .await?;

    for (size, color, stock) in [
        ("S", "Red", 5),
        ("S", "Black", 3),
        ("M", "Red", 8),
        ("M", "Black", 0),
        ("L", "Red", 2),
        ("L", "Black", 6),
    ] {
        VariantActive {
            id: Set(Uuid::new_v4()),
            product_id: Set(product.id),
            size: Set(size.into()),
            color: Set(color.into()),
            stock: Set(stock),
            price: Set((size == "L").then_some(575000)),
            image: Set(None),
            created_at: Set(Utc::now().into()),
        }
        .insert(orm)
        .await?;
    }

    println!("Seeded {name} with variants");
    Ok(())
}

async fn seed_legacy_product(
    orm: &DatabaseConnection,
    name: &str,
    sizes: serde_json::Value,
    colors: serde_json::Value,
    size_stock: Option<&str>,
    stock: i32,
) -> anyhow::Result<()> {
    if product_exists(orm, name).await? {
        println!("Skipping {name}, already seeded");
        return Ok(());
    }

    ProductActive {
        id: Set(Uuid::new_v4()),
        name: Set(name.into()),
        description: Set(None),
        price: Set(120000),
        stock: Set(stock),
        size_stock: Set(size_stock.map(str::to_owned)),
        sizes: Set(sizes),
        colors: Set(colors),
        in_stock: Set(true),
        is_visible: Set(true),
        created_at: Set(Utc::now().into()),
    }
    .insert(orm)
    .await?;

    println!("Seeded {name}");
    Ok(())
}

async fn seed_coupon(
    orm: &DatabaseConnection,
    code: &str,
    discount_type: &str,
    value: i64,
) -> anyhow::Result<()> {
    let existing = Coupons::find()
        .filter(CouponCol::Code.eq(code))
        .one(orm)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    CouponActive {
        id: Set(Uuid::new_v4()),
        code: Set(code.into()),
        discount_type: Set(discount_type.into()),
        value: Set(value),
        is_active: Set(true),
        created_at: Set(Utc::now().into()),
    }
    .insert(orm)
    .await?;

    println!("Seeded coupon {code}");
    Ok(())
}
