mod common;

use storefront_inventory_api::{
    dto::cart::{AddToCartRequest, UpdateCartItemRequest},
    error::AppError,
    routes::params::Pagination,
    services::cart_service,
};
use uuid::Uuid;

use common::{create_product, create_variant, setup_state, shopper};

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

#[tokio::test]
async fn update_excludes_the_line_being_edited() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = shopper();
    let product = create_product(&state, 0, None).await?;
    let red = create_variant(&state, &product, "S", "Red", 5, None).await?;

    let added = cart_service::add_to_cart(&state, &user, add_variant(red.id, 2))
        .await?
        .data
        .expect("cart item");

    let updated = cart_service::update_cart_item(
        &state,
        &user,
        UpdateCartItemRequest {
            item_id: added.id,
            quantity: 5,
        },
    )
    .await?
    .data
    .expect("cart line");
    assert_eq!(updated.quantity, 5);
    assert_eq!(updated.variant.map(|v| v.id), Some(red.id));

    let err = cart_service::update_cart_item(
        &state,
        &user,
        UpdateCartItemRequest {
            item_id: added.id,
            quantity: 6,
        },
    )
    .await
    .expect_err("six units exceed stock");
    match err {
        AppError::InsufficientStock(shortages) => {
            assert_eq!(shortages.len(), 1);
            assert_eq!(shortages[0].label, "size S color Red");
            assert_eq!(shortages[0].available, 5);
            assert_eq!(shortages[0].item_id, Some(added.id));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    Ok(())
}

#[tokio::test]
async fn rejected_add_leaves_the_cart_untouched() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = shopper();
    let product = create_product(&state, 0, None).await?;
    let red = create_variant(&state, &product, "S", "Red", 2, None).await?;

    let err = cart_service::add_to_cart(&state, &user, add_variant(red.id, 3)).await;
    assert!(matches!(err, Err(AppError::InsufficientStock(_))));

    let cart = cart_service::list_cart(&state, &user, Pagination::default())
        .await?
        .data
        .expect("cart");
    assert!(cart.items.is_empty());

    Ok(())
}

#[tokio::test]
async fn repeated_adds_grow_the_same_line() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = shopper();
    let product = create_product(&state, 0, None).await?;
    let red = create_variant(&state, &product, "S", "Red", 5, None).await?;

    let first = cart_service::add_to_cart(&state, &user, add_variant(red.id, 1))
        .await?
        .data
        .expect("cart item");
    let second = cart_service::add_to_cart(&state, &user, add_variant(red.id, 2))
        .await?
        .data
        .expect("cart item");
    assert_eq!(first.id, second.id);
    assert_eq!(second.quantity, 3);

    let cart = cart_service::list_cart(&state, &user, Pagination::default())
        .await?
        .data
        .expect("cart");
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 3);

    Ok(())
}

#[tokio::test]
async fn other_carts_count_against_availability() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let product = create_product(&state, 0, None).await?;
    let red = create_variant(&state, &product, "S", "Red", 4, None).await?;

    cart_service::add_to_cart(&state, &shopper(), add_variant(red.id, 3)).await?;

    let err = cart_service::add_to_cart(&state, &shopper(), add_variant(red.id, 2)).await;
    match err {
        Err(AppError::InsufficientStock(shortages)) => assert_eq!(shortages[0].available, 1),
        other => panic!("unexpected result: {other:?}"),
    }

    cart_service::add_to_cart(&state, &shopper(), add_variant(red.id, 1)).await?;

    Ok(())
}

#[tokio::test]
async fn flat_size_stock_is_shared_across_colors() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let product = create_product(&state, 50, Some(r#"{"M": 3}"#)).await?;

    cart_service::add_to_cart(&state, &shopper(), add_option(product.id, "M", "Red", 2)).await?;

    let err =
        cart_service::add_to_cart(&state, &shopper(), add_option(product.id, "M", "Blue", 2)).await;
    match err {
        Err(AppError::InsufficientStock(shortages)) => {
            assert_eq!(shortages[0].label, "size M color Blue");
            assert_eq!(shortages[0].available, 1);
        }
        other => panic!("unexpected result: {other:?}"),
    }

    cart_service::add_to_cart(&state, &shopper(), add_option(product.id, "M", "Blue", 1)).await?;

    Ok(())
}

#[tokio::test]
async fn quantities_below_one_are_rejected() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = shopper();
    let product = create_product(&state, 0, None).await?;
    let red = create_variant(&state, &product, "S", "Red", 5, None).await?;

    let zero = cart_service::add_to_cart(&state, &user, add_variant(red.id, 0)).await;
    assert!(matches!(zero, Err(AppError::BadRequest(_))));

    let added = cart_service::add_to_cart(&state, &user, add_variant(red.id, 1))
        .await?
        .data
        .expect("cart item");
    let update = cart_service::update_cart_item(
        &state,
        &user,
        UpdateCartItemRequest {
            item_id: added.id,
            quantity: 0,
        },
    )
    .await;
    assert!(matches!(update, Err(AppError::BadRequest(_))));

    Ok(())
}

#[tokio::test]
async fn lines_belong_to_their_owner() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let owner = shopper();
    let intruder = shopper();
    let product = create_product(&state, 0, None).await?;
    let red = create_variant(&state, &product, "S", "Red", 5, None).await?;

    let added = cart_service::add_to_cart(&state, &owner, add_variant(red.id, 1))
        .await?
        .data
        .expect("cart item");

    let update = cart_service::update_cart_item(
        &state,
        &intruder,
        UpdateCartItemRequest {
            item_id: added.id,
            quantity: 2,
        },
    )
    .await;
    assert!(matches!(update, Err(AppError::Forbidden)));

    let remove = cart_service::remove_cart_item(&state, &intruder, added.id).await;
    assert!(matches!(remove, Err(AppError::Forbidden)));

    let missing = cart_service::remove_cart_item(&state, &owner, Uuid::new_v4()).await;
    assert!(matches!(missing, Err(AppError::NotFound)));

    let removed = cart_service::remove_cart_item(&state, &owner, added.id)
        .await?
        .data
        .expect("removed item");
    assert_eq!(removed.id, added.id);

    Ok(())
}
