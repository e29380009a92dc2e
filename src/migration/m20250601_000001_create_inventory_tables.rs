use sea_orm::{EntityTrait, Schema};
use sea_orm_migration::prelude::*;

use crate::entity::{
    AuditLogs, CartItems, Carts, Coupons, OrderItems, Orders, ProductVariants, Products,
    cart_items, product_variants,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Parents before children so foreign keys resolve.
        create_from_entity(manager, Products).await?;
        create_from_entity(manager, ProductVariants).await?;
        create_from_entity(manager, Carts).await?;
        create_from_entity(manager, CartItems).await?;
        create_from_entity(manager, Coupons).await?;
        create_from_entity(manager, Orders).await?;
        create_from_entity(manager, OrderItems).await?;
        create_from_entity(manager, AuditLogs).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_product_variants_product_color_size")
                    .table(ProductVariants)
                    .col(product_variants::Column::ProductId)
                    .col(product_variants::Column::Color)
                    .col(product_variants::Column::Size)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // The reservation aggregate filters on these on every stock check.
        manager
            .create_index(
                Index::create()
                    .name("idx_cart_items_variant")
                    .table(CartItems)
                    .col(cart_items::Column::VariantId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_cart_items_product_size_color")
                    .table(CartItems)
                    .col(cart_items::Column::ProductId)
                    .col(cart_items::Column::Size)
                    .col(cart_items::Column::Color)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuditLogs).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OrderItems).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Coupons).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CartItems).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Carts).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProductVariants).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

async fn create_from_entity<E>(manager: &SchemaManager<'_>, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    let schema = Schema::new(manager.get_database_backend());
    manager
        .create_table(schema.create_table_from_entity(entity).if_not_exists().to_owned())
        .await
}
