//! Catalog import: external items and variations into internal products.

use serde::Serialize;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use fidly_core::money::optional_minor_to_major;
use fidly_core::sync::{
    variant_display_name, SyncStatus, DEFAULT_VARIATION_NAME, SOURCE_SQUARE, SYNC_TYPE_CATALOG,
};
use fidly_core::types::DbId;
use fidly_db::models::product::{CreateProduct, UpdateProductFromExternal};
use fidly_db::repositories::ProductRepo;
use fidly_square::models::{CatalogObject, CATALOG_TYPE_ITEM};
use fidly_square::Platform;

use crate::error::SyncError;
use crate::recorder::record_sync;

/// Result of one catalog import run.
#[derive(Debug, Default, Serialize)]
pub struct CatalogImportReport {
    /// Products created on this run.
    pub imported: u32,
    /// Products refreshed in place on this run.
    pub updated: u32,
    /// One entry per failed product, keyed by product name.
    pub errors: Vec<String>,
}

/// One internal product derived from the external catalog, not yet
/// written to the database.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    /// External id used as the idempotency key (variation id, or the
    /// item id for variation-less items).
    pub external_id: String,
    /// Owning catalog item, set only for variant products.
    pub external_parent_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

/// Expand catalog items into one draft per sellable unit.
///
/// An item without variations is itself the sellable unit; it carries
/// no price at that level, so it imports at 0. An item with variations
/// yields one draft per variation, priced and named per variation.
pub fn plan_catalog_products(items: &[CatalogObject]) -> Vec<ProductDraft> {
    let mut drafts = Vec::new();

    for item in items {
        if item.object_type != CATALOG_TYPE_ITEM {
            continue;
        }
        let Some(data) = &item.item_data else {
            continue;
        };

        if data.variations.is_empty() {
            drafts.push(ProductDraft {
                external_id: item.id.clone(),
                external_parent_id: None,
                name: data.name.clone(),
                description: data.description.clone(),
                price: 0.0,
            });
            continue;
        }

        for variation in &data.variations {
            let variation_data = variation.item_variation_data.as_ref();
            let variation_name = variation_data
                .and_then(|v| v.name.as_deref())
                .unwrap_or(DEFAULT_VARIATION_NAME);
            let price_minor = variation_data
                .and_then(|v| v.price_money.as_ref())
                .and_then(|m| m.amount);

            drafts.push(ProductDraft {
                external_id: variation.id.clone(),
                external_parent_id: Some(item.id.clone()),
                name: variant_display_name(&data.name, variation_name),
                description: data.description.clone(),
                price: optional_minor_to_major(price_minor),
            });
        }
    }

    drafts
}

/// Outcome of a single draft upsert.
enum Upserted {
    Created,
    Updated,
}

/// Upsert one draft by its external idempotency key.
async fn upsert_product(
    pool: &PgPool,
    store_id: DbId,
    draft: &ProductDraft,
) -> Result<Upserted, sqlx::Error> {
    let existing =
        ProductRepo::find_by_external_id(pool, store_id, &draft.external_id, SOURCE_SQUARE).await?;

    match existing {
        Some(product) => {
            let body = UpdateProductFromExternal {
                name: draft.name.clone(),
                description: draft.description.clone(),
                price: draft.price,
                is_available: true,
            };
            ProductRepo::update_from_external(pool, product.id, &body).await?;
            Ok(Upserted::Updated)
        }
        None => {
            let body = CreateProduct {
                store_id,
                name: draft.name.clone(),
                description: draft.description.clone(),
                price: draft.price,
                external_id: Some(draft.external_id.clone()),
                external_source: Some(SOURCE_SQUARE.to_string()),
                external_parent_id: draft.external_parent_id.clone(),
                is_available: true,
            };
            ProductRepo::create(pool, &body).await?;
            Ok(Upserted::Created)
        }
    }
}

/// Run one catalog import for a store.
///
/// Walks the external catalog and upserts one product per sellable
/// unit. Per-product failures are recorded and do not abort the
/// remaining iteration. One sync log row is appended at the end of
/// every run, including aborted ones.
pub async fn import_catalog<P: Platform>(
    pool: &PgPool,
    platform: &P,
    store_id: DbId,
    cancel: &CancellationToken,
) -> Result<CatalogImportReport, SyncError> {
    let items = match platform.list_catalog_items().await {
        Ok(items) => items,
        Err(err) => {
            tracing::error!(store_id, error = %err, "Catalog listing failed");
            record_sync(
                pool,
                store_id,
                SYNC_TYPE_CATALOG,
                SyncStatus::Failure,
                0,
                &[],
            )
            .await;
            return Err(err.into());
        }
    };

    let drafts = plan_catalog_products(&items);
    tracing::info!(store_id, count = drafts.len(), "Planned catalog products");

    let mut report = CatalogImportReport::default();

    for draft in &drafts {
        if cancel.is_cancelled() {
            tracing::info!(store_id, "Catalog import cancelled, writing partial log");
            break;
        }

        match upsert_product(pool, store_id, draft).await {
            Ok(Upserted::Created) => report.imported += 1,
            Ok(Upserted::Updated) => report.updated += 1,
            Err(err) => {
                tracing::warn!(store_id, product = %draft.name, error = %err, "Product upsert failed");
                report.errors.push(format!("{}: {}", draft.name, err));
            }
        }
    }

    let status = SyncStatus::from_error_count(report.errors.len());
    record_sync(
        pool,
        store_id,
        SYNC_TYPE_CATALOG,
        status,
        report.imported + report.updated,
        &report.errors,
    )
    .await;

    tracing::info!(
        store_id,
        imported = report.imported,
        updated = report.updated,
        errors = report.errors.len(),
        "Catalog import finished"
    );

    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use fidly_square::models::{CatalogItemData, CatalogVariation, ItemVariationData, Money};

    fn item(id: &str, name: &str, variations: Vec<CatalogVariation>) -> CatalogObject {
        CatalogObject {
            id: id.to_string(),
            object_type: CATALOG_TYPE_ITEM.to_string(),
            item_data: Some(CatalogItemData {
                name: name.to_string(),
                description: None,
                variations,
            }),
        }
    }

    fn variation(id: &str, name: &str, price_minor: Option<i64>) -> CatalogVariation {
        CatalogVariation {
            id: id.to_string(),
            item_variation_data: Some(ItemVariationData {
                name: Some(name.to_string()),
                price_money: price_minor.map(|amount| Money {
                    amount: Some(amount),
                    currency: Some("EUR".to_string()),
                }),
            }),
        }
    }

    #[test]
    fn item_without_variations_yields_single_zero_priced_draft() {
        let drafts = plan_catalog_products(&[item("ITEM_1", "Gift card", vec![])]);

        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].external_id, "ITEM_1");
        assert_eq!(drafts[0].external_parent_id, None);
        assert_eq!(drafts[0].name, "Gift card");
        assert_eq!(drafts[0].price, 0.0);
    }

    #[test]
    fn variations_expand_to_one_draft_each() {
        let drafts = plan_catalog_products(&[item(
            "ITEM_1",
            "Espresso",
            vec![
                variation("VAR_R", "Regular", Some(250)),
                variation("VAR_L", "Large", Some(450)),
            ],
        )]);

        assert_eq!(drafts.len(), 2);

        assert_eq!(drafts[0].external_id, "VAR_R");
        assert_eq!(drafts[0].external_parent_id.as_deref(), Some("ITEM_1"));
        assert_eq!(drafts[0].name, "Espresso");
        assert_eq!(drafts[0].price, 2.50);

        assert_eq!(drafts[1].name, "Espresso - Large");
        assert_eq!(drafts[1].price, 4.50);
    }

    #[test]
    fn variation_named_like_item_collapses() {
        let drafts = plan_catalog_products(&[item(
            "ITEM_1",
            "Espresso",
            vec![variation("VAR_1", "Espresso", Some(250))],
        )]);

        assert_eq!(drafts[0].name, "Espresso");
    }

    #[test]
    fn unpriced_variation_imports_at_zero() {
        let drafts = plan_catalog_products(&[item(
            "ITEM_1",
            "Espresso",
            vec![variation("VAR_1", "Large", None)],
        )]);

        assert_eq!(drafts[0].price, 0.0);
    }

    #[test]
    fn non_item_objects_are_skipped() {
        let tax = CatalogObject {
            id: "TAX_1".to_string(),
            object_type: "TAX".to_string(),
            item_data: None,
        };

        assert!(plan_catalog_products(&[tax]).is_empty());
    }

    #[test]
    fn item_without_item_data_is_skipped() {
        let bare = CatalogObject {
            id: "ITEM_X".to_string(),
            object_type: CATALOG_TYPE_ITEM.to_string(),
            item_data: None,
        };

        assert!(plan_catalog_products(&[bare]).is_empty());
    }
}
