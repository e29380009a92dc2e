mod common;

use storefront_inventory_api::{
    dto::{
        admin::{AvailabilityRequest, InventoryAdjustRequest},
        cart::AddToCartRequest,
        stock::StockCheckQuery,
    },
    error::AppError,
    inventory::{self, StockRequest},
    services::{admin_service, cart_service, product_service, stock_service},
};
use uuid::Uuid;

use common::{admin, create_product, create_variant, setup_state, shopper};

fn add_variant(variant_id: Uuid, quantity: i32) -> AddToCartRequest {
    AddToCartRequest {
        variant_id: Some(variant_id),
        quantity,
        ..AddToCartRequest::default()
    }
}

fn add_option(product_id: Uuid, size: &str, color: &str, quantity: i32) -> AddToCartRequest {
    AddToCartRequest {
        product_id: Some(product_id),
        size: Some(size.into()),
        color: Some(color.into()),
        quantity,
        ..AddToCartRequest::default()
    }
}

// Two shoppers holding 3 each of a variant that now has 5 units leaves nothing.
#[tokio::test]
async fn reservations_from_every_cart_reduce_availability() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let product = create_product(&state, 0, None).await?;
    let red = create_variant(&state, &product, "S", "Red", 10, None).await?;

    cart_service::add_to_cart(&state, &shopper(), add_variant(red.id, 3)).await?;
    cart_service::add_to_cart(&state, &shopper(), add_variant(red.id, 3)).await?;

    admin_service::adjust_variant_inventory(
        &state,
        &admin(),
        red.id,
        InventoryAdjustRequest { delta: -5 },
    )
    .await?;

    let resp = stock_service::check_stock(
        &state,
        StockCheckQuery {
            variant_id: Some(red.id),
            ..StockCheckQuery::default()
        },
    )
    .await?;
    let data = resp.data.expect("stock data");
    assert_eq!(data.base_stock, 5);
    assert_eq!(data.cart_quantity, 6);
    assert_eq!(data.available_stock, 0);
    let variant = data.variant.expect("variant ref");
    assert_eq!(variant.id, red.id);
    assert_eq!((variant.size.as_str(), variant.color.as_str()), ("S", "Red"));

    Ok(())
}

#[tokio::test]
async fn legacy_nested_size_stock_is_resolved() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let product = create_product(&state, 99, Some(r#"{"M": {"Blue": 4}}"#)).await?;

    let resp = stock_service::check_stock(
        &state,
        StockCheckQuery {
            product_id: Some(product.id),
            size: Some("M".into()),
            color: Some("Blue".into()),
            ..StockCheckQuery::default()
        },
    )
    .await?;
    let data = resp.data.expect("stock data");
    assert_eq!(data.base_stock, 4);
    assert_eq!(data.cart_quantity, 0);
    assert_eq!(data.available_stock, 4);
    assert!(data.variant.is_none());

    Ok(())
}

#[tokio::test]
async fn malformed_size_stock_falls_back_to_product_stock() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let product = create_product(&state, 7, Some("{\"M\": ")).await?;

    let resp = stock_service::check_stock(
        &state,
        StockCheckQuery {
            product_id: Some(product.id),
            size: Some("M".into()),
            color: Some("Blue".into()),
            ..StockCheckQuery::default()
        },
    )
    .await?;
    assert_eq!(resp.data.expect("stock data").base_stock, 7);

    Ok(())
}

#[tokio::test]
async fn size_and_color_without_product_searches_variants() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let product = create_product(&state, 0, None).await?;
    let blue = create_variant(&state, &product, "M", "Blue", 6, None).await?;
    create_variant(&state, &product, "M", "Red", 1, None).await?;

    let resp = stock_service::check_stock(
        &state,
        StockCheckQuery {
            size: Some("M".into()),
            color: Some("Blue".into()),
            ..StockCheckQuery::default()
        },
    )
    .await?;
    let data = resp.data.expect("stock data");
    assert_eq!(data.base_stock, 6);
    assert_eq!(data.variant.map(|v| v.id), Some(blue.id));

    let missing = stock_service::check_stock(
        &state,
        StockCheckQuery {
            size: Some("XL".into()),
            color: Some("Blue".into()),
            ..StockCheckQuery::default()
        },
    )
    .await;
    assert!(matches!(missing, Err(AppError::NotFound)));

    Ok(())
}

#[tokio::test]
async fn unknown_ids_and_empty_queries_are_rejected() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let unknown_variant = stock_service::check_stock(
        &state,
        StockCheckQuery {
            variant_id: Some(Uuid::new_v4()),
            ..StockCheckQuery::default()
        },
    )
    .await;
    assert!(matches!(unknown_variant, Err(AppError::NotFound)));

    let unknown_product = stock_service::check_stock(
        &state,
        StockCheckQuery {
            product_id: Some(Uuid::new_v4()),
            size: Some("S".into()),
            ..StockCheckQuery::default()
        },
    )
    .await;
    assert!(matches!(unknown_product, Err(AppError::NotFound)));

    let empty = stock_service::check_stock(&state, StockCheckQuery::default()).await;
    assert!(matches!(empty, Err(AppError::BadRequest(_))));

    Ok(())
}

#[tokio::test]
async fn legacy_and_variant_products_agree() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let modern = create_product(&state, 0, None).await?;
    create_variant(&state, &modern, "S", "Red", 5, None).await?;
    let legacy = create_product(&state, 0, Some(r#"{"S": {"Red": 5}}"#)).await?;

    for product in [&modern, &legacy] {
        cart_service::add_to_cart(&state, &shopper(), add_option(product.id, "S", "Red", 2))
            .await?;
        cart_service::add_to_cart(&state, &shopper(), add_option(product.id, "S", "Red", 1))
            .await?;
    }

    let mut figures = Vec::new();
    for product in [&modern, &legacy] {
        let data = stock_service::check_stock(
            &state,
            StockCheckQuery {
                product_id: Some(product.id),
                size: Some("S".into()),
                color: Some("Red".into()),
                ..StockCheckQuery::default()
            },
        )
        .await?
        .data
        .expect("stock data");
        figures.push((data.base_stock, data.cart_quantity, data.available_stock));
    }

    assert_eq!(figures[0], (5, 3, 2));
    assert_eq!(figures[0], figures[1]);

    Ok(())
}

#[tokio::test]
async fn operator_flag_forces_zero() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let product = create_product(&state, 0, None).await?;
    let red = create_variant(&state, &product, "S", "Red", 5, None).await?;

    admin_service::set_product_availability(
        &state,
        &admin(),
        product.id,
        AvailabilityRequest { in_stock: false },
    )
    .await?;

    let data = stock_service::check_stock(
        &state,
        StockCheckQuery {
            variant_id: Some(red.id),
            ..StockCheckQuery::default()
        },
    )
    .await?
    .data
    .expect("stock data");
    assert_eq!(data.base_stock, 5);
    assert_eq!(data.available_stock, 0);

    let add = cart_service::add_to_cart(&state, &shopper(), add_variant(red.id, 1)).await;
    assert!(matches!(add, Err(AppError::InsufficientStock(_))));

    Ok(())
}

#[tokio::test]
async fn resolving_twice_gives_the_same_pool() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let product = create_product(&state, 3, Some(r#"{"S": 2}"#)).await?;
    let request = StockRequest::product(product.id, Some("S"), Some("Red"));

    let first = inventory::resolve(&state.orm, &request).await?;
    let second = inventory::resolve(&state.orm, &request).await?;
    assert_eq!(first.base_stock, 2);
    assert_eq!(first.base_stock, second.base_stock);
    assert_eq!(first.key, second.key);

    Ok(())
}

#[tokio::test]
async fn product_page_lists_every_option() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let legacy = create_product(&state, 0, Some(r#"{"S": {"Red": 2}, "M": {"Blue": 4}}"#)).await?;
    cart_service::add_to_cart(&state, &shopper(), add_option(legacy.id, "M", "Blue", 1)).await?;

    let detail = product_service::get_product(&state, legacy.id)
        .await?
        .data
        .expect("product detail");
    assert_eq!(detail.options.len(), 4);
    let blue = detail
        .options
        .iter()
        .find(|o| o.size.as_deref() == Some("M") && o.color.as_deref() == Some("Blue"))
        .expect("M/Blue option");
    assert_eq!((blue.base_stock, blue.cart_quantity, blue.available_stock), (4, 1, 3));
    let missing = detail
        .options
        .iter()
        .find(|o| o.size.as_deref() == Some("M") && o.color.as_deref() == Some("Red"))
        .expect("M/Red option");
    assert_eq!(missing.available_stock, 0);

    let modern = create_product(&state, 0, None).await?;
    let red = create_variant(&state, &modern, "S", "Red", 3, Some(1200)).await?;
    let detail = product_service::get_product(&state, modern.id)
        .await?
        .data
        .expect("product detail");
    assert_eq!(detail.options.len(), 1);
    assert_eq!(detail.options[0].variant_id, Some(red.id));
    assert_eq!(detail.options[0].price, 1200);

    let unknown = product_service::get_product(&state, Uuid::new_v4()).await;
    assert!(matches!(unknown, Err(AppError::NotFound)));

    Ok(())
}

#[tokio::test]
async fn variant_product_does_not_sell_unlisted_options() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = shopper();
    let product = create_product(&state, 50, None).await?;
    create_variant(&state, &product, "S", "Red", 5, None).await?;

    let check = stock_service::check_stock(
        &state,
        StockCheckQuery {
            product_id: Some(product.id),
            size: Some("XL".into()),
            color: Some("Green".into()),
            ..StockCheckQuery::default()
        },
    )
    .await;
    assert!(matches!(check, Err(AppError::NotFound)));

    let add =
        cart_service::add_to_cart(&state, &user, add_option(product.id, "XL", "Green", 10)).await;
    assert!(matches!(add, Err(AppError::NotFound)));

    let bare = cart_service::add_to_cart(
        &state,
        &user,
        AddToCartRequest {
            product_id: Some(product.id),
            quantity: 1,
            ..AddToCartRequest::default()
        },
    )
    .await;
    assert!(matches!(bare, Err(AppError::NotFound)));

    assert_eq!(common::reload_product(&state, product.id).await?.stock, 50);

    Ok(())
}
