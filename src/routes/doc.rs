use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        admin::{AvailabilityRequest, InventoryAdjustRequest},
        cart::{AddToCartRequest, CartLine, CartList, RemovedCartItem, UpdateCartItemRequest},
        orders::{CheckoutRequest, OrderList, OrderWithItems},
        products::{OptionAvailability, ProductDetail},
        stock::{StockCheckResponse, VariantRef},
    },
    error::StockShortage,
    models::{CartItem, Order, OrderItem, Product, ProductVariant},
    response::Meta,
    routes::{admin, cart, health, orders, params, products, stock},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        stock::check_stock,
        products::get_product,
        cart::cart_list,
        cart::add_to_cart,
        cart::update_cart_item,
        cart::remove_cart_item,
        orders::list_orders,
        orders::checkout,
        orders::get_order,
        admin::adjust_variant_inventory,
        admin::adjust_product_inventory,
        admin::set_product_availability
    ),
    components(
        schemas(
            Product,
            ProductVariant,
            CartItem,
            Order,
            OrderItem,
            StockCheckResponse,
            VariantRef,
            StockShortage,
            ProductDetail,
            OptionAvailability,
            AddToCartRequest,
            UpdateCartItemRequest,
            CartLine,
            CartList,
            RemovedCartItem,
            CheckoutRequest,
            OrderList,
            OrderWithItems,
            InventoryAdjustRequest,
            AvailabilityRequest,
            params::Pagination,
            params::OrderListQuery,
            Meta
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Stock", description = "Live stock availability"),
        (name = "Products", description = "Product endpoints"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Orders", description = "Order endpoints"),
        (name = "Admin", description = "Admin endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
