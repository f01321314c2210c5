//! Product reference resolution for imported line items.

use sqlx::PgPool;

use fidly_core::money::optional_minor_to_major;
use fidly_core::sync::SOURCE_SQUARE;
use fidly_core::types::DbId;
use fidly_db::models::product::{CreateProduct, Product};
use fidly_db::repositories::ProductRepo;
use fidly_square::models::OrderLineItem;

/// Find or create the internal product for an external line item.
///
/// Resolution order, first match wins:
/// 1. external-id linkage: `(store_id, catalog_object_id, "square")`;
/// 2. exact display-name match within the store;
/// 3. creation from the line item's name and unit price.
///
/// This is best-effort linkage. A line item sold outside the catalog
/// can create a duplicate of a same-named product with a different
/// external id, and the name fallback can link two same-named products
/// that were distinct on the platform. Both are accepted behaviour.
pub async fn resolve_product(
    pool: &PgPool,
    store_id: DbId,
    line_item: &OrderLineItem,
) -> Result<Product, sqlx::Error> {
    if let Some(catalog_object_id) = &line_item.catalog_object_id {
        if let Some(product) =
            ProductRepo::find_by_external_id(pool, store_id, catalog_object_id, SOURCE_SQUARE)
                .await?
        {
            return Ok(product);
        }
    }

    if let Some(product) = ProductRepo::find_by_name(pool, store_id, &line_item.name).await? {
        return Ok(product);
    }

    let price_minor = line_item
        .base_price_money
        .as_ref()
        .and_then(|money| money.amount);

    let body = CreateProduct {
        store_id,
        name: line_item.name.clone(),
        description: None,
        price: optional_minor_to_major(price_minor),
        external_id: line_item.catalog_object_id.clone(),
        external_source: line_item
            .catalog_object_id
            .as_ref()
            .map(|_| SOURCE_SQUARE.to_string()),
        external_parent_id: None,
        is_available: true,
    };

    ProductRepo::create(pool, &body).await
}
