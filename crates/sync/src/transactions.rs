//! Transaction sync: completed external payments into internal
//! transactions and line items.

use std::collections::HashMap;

use chrono::DateTime;
use serde::Serialize;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use fidly_core::money::minor_to_major;
use fidly_core::sync::{
    parse_quantity, SyncStatus, PAYMENT_METHOD_CARD, PROVIDER_SQUARE, SOURCE_SQUARE,
    SYNC_TYPE_TRANSACTIONS, TRANSACTION_TYPE_SALE,
};
use fidly_core::types::DbId;
use fidly_db::models::transaction::CreateTransaction;
use fidly_db::models::transaction_product::CreateTransactionProduct;
use fidly_db::repositories::{IntegrationRepo, TransactionProductRepo, TransactionRepo};
use fidly_square::models::{Order, Payment, PAYMENT_STATUS_COMPLETED};
use fidly_square::Platform;

use crate::error::SyncError;
use crate::recorder::record_sync;
use crate::resolver::resolve_product;

/// Time window for a payment listing, RFC 3339 bounds.
#[derive(Debug, Clone)]
pub struct DateRange {
    pub begin_time: String,
    pub end_time: String,
}

/// Result of one transaction sync run.
#[derive(Debug, Default, Serialize)]
pub struct TransactionSyncReport {
    /// Transactions created on this run.
    pub synced: u32,
    /// One entry per skipped payment or line item.
    pub errors: Vec<String>,
}

/// Keep only payments eligible for import.
pub fn completed_payments(payments: Vec<Payment>) -> Vec<Payment> {
    payments
        .into_iter()
        .filter(|p| p.status == PAYMENT_STATUS_COMPLETED)
        .collect()
}

/// Distinct order ids referenced by the given payments, in first-seen order.
pub fn distinct_order_ids(payments: &[Payment]) -> Vec<String> {
    let mut seen = Vec::new();
    for payment in payments {
        if let Some(order_id) = &payment.order_id {
            if !seen.contains(order_id) {
                seen.push(order_id.clone());
            }
        }
    }
    seen
}

/// Import one payment as a transaction row.
async fn insert_transaction(
    pool: &PgPool,
    store_id: DbId,
    payment: &Payment,
) -> Result<DbId, String> {
    let occurred_at = DateTime::parse_from_rfc3339(&payment.created_at)
        .map_err(|err| format!("payment {}: bad timestamp: {err}", payment.id))?
        .with_timezone(&chrono::Utc);

    let amount_minor = payment.amount_money.amount.unwrap_or(0);

    let body = CreateTransaction {
        store_id,
        occurred_at,
        total_amount: minor_to_major(amount_minor),
        payment_method: PAYMENT_METHOD_CARD.to_string(),
        transaction_type: TRANSACTION_TYPE_SALE,
        customer_id: None,
        external_id: Some(payment.id.clone()),
        external_source: Some(SOURCE_SQUARE.to_string()),
    };

    TransactionRepo::create(pool, &body)
        .await
        .map(|t| t.id)
        .map_err(|err| format!("payment {}: {err}", payment.id))
}

/// Import the line items of the order backing a transaction.
///
/// Each line resolves its product, then inserts one line-item row.
/// Failures are collected per line and do not stop the remaining lines.
async fn insert_line_items(
    pool: &PgPool,
    store_id: DbId,
    transaction_id: DbId,
    order: &Order,
    errors: &mut Vec<String>,
) {
    for line in &order.line_items {
        let product = match resolve_product(pool, store_id, line).await {
            Ok(product) => product,
            Err(err) => {
                tracing::warn!(store_id, line = %line.name, error = %err, "Product resolution failed");
                errors.push(format!("{}: {err}", line.name));
                continue;
            }
        };

        let quantity = match parse_quantity(&line.quantity) {
            Ok(quantity) => quantity,
            Err(err) => {
                tracing::warn!(store_id, line = %line.name, error = %err, "Bad line quantity");
                errors.push(format!("{}: {err}", line.name));
                continue;
            }
        };

        let unit_price_minor = line.base_price_money.as_ref().and_then(|m| m.amount);

        let body = CreateTransactionProduct {
            transaction_id,
            product_id: product.id,
            quantity,
            unit_price: minor_to_major(unit_price_minor.unwrap_or(0)),
        };

        if let Err(err) = TransactionProductRepo::create(pool, &body).await {
            tracing::warn!(store_id, line = %line.name, error = %err, "Line item insert failed");
            errors.push(format!("{}: {err}", line.name));
        }
    }
}

/// Run one transaction sync for a store location.
///
/// Creates one transaction per completed payment in the window, plus
/// one line-item row per order line when the backing order could be
/// retrieved. Order batch-retrieval failure degrades to transactions
/// without line items instead of aborting. One sync log row is appended
/// at the end of every run, including aborted ones.
pub async fn sync_transactions<P: Platform>(
    pool: &PgPool,
    platform: &P,
    store_id: DbId,
    location_id: &str,
    range: &DateRange,
    cancel: &CancellationToken,
) -> Result<TransactionSyncReport, SyncError> {
    let payments = match platform
        .list_payments(location_id, &range.begin_time, &range.end_time)
        .await
    {
        Ok(payments) => payments,
        Err(err) => {
            tracing::error!(store_id, location_id, error = %err, "Payment listing failed");
            record_sync(
                pool,
                store_id,
                SYNC_TYPE_TRANSACTIONS,
                SyncStatus::Failure,
                0,
                &[],
            )
            .await;
            return Err(err.into());
        }
    };

    let payments = completed_payments(payments);
    tracing::info!(store_id, count = payments.len(), "Completed payments to import");

    let order_ids = distinct_order_ids(&payments);
    let orders: HashMap<String, Order> = if order_ids.is_empty() {
        HashMap::new()
    } else {
        match platform.batch_retrieve_orders(&order_ids).await {
            Ok(orders) => orders.into_iter().map(|o| (o.id.clone(), o)).collect(),
            Err(err) => {
                // Degraded: payments still import without their
                // order-derived line items.
                tracing::warn!(store_id, error = %err, "Order batch-retrieve failed, importing without line items");
                HashMap::new()
            }
        }
    };

    let mut report = TransactionSyncReport::default();

    for payment in &payments {
        if cancel.is_cancelled() {
            tracing::info!(store_id, "Transaction sync cancelled, writing partial log");
            break;
        }

        let transaction_id = match insert_transaction(pool, store_id, payment).await {
            Ok(id) => id,
            Err(err) => {
                // No line items are attempted for a payment whose
                // transaction failed to insert.
                tracing::warn!(store_id, payment = %payment.id, error = %err, "Transaction insert failed");
                report.errors.push(err);
                continue;
            }
        };
        report.synced += 1;

        if let Some(order) = payment.order_id.as_ref().and_then(|id| orders.get(id)) {
            insert_line_items(pool, store_id, transaction_id, order, &mut report.errors).await;
        }
    }

    // Run bookkeeping on the integration row, best-effort.
    match IntegrationRepo::find_by_store_and_provider(pool, store_id, PROVIDER_SQUARE).await {
        Ok(Some(integration)) => {
            if let Err(err) = IntegrationRepo::record_sync_run(pool, integration.id).await {
                tracing::warn!(store_id, error = %err, "Failed to update integration sync counter");
            }
        }
        Ok(None) => {
            tracing::warn!(store_id, "No integration row for store, skipping sync counter");
        }
        Err(err) => {
            tracing::warn!(store_id, error = %err, "Integration lookup failed, skipping sync counter");
        }
    }

    let status = SyncStatus::from_error_count(report.errors.len());
    record_sync(
        pool,
        store_id,
        SYNC_TYPE_TRANSACTIONS,
        status,
        report.synced,
        &report.errors,
    )
    .await;

    tracing::info!(
        store_id,
        synced = report.synced,
        errors = report.errors.len(),
        "Transaction sync finished"
    );

    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use fidly_square::models::Money;

    fn payment(id: &str, status: &str, amount: i64, order_id: Option<&str>) -> Payment {
        Payment {
            id: id.to_string(),
            created_at: "2024-03-02T12:30:00Z".to_string(),
            amount_money: Money {
                amount: Some(amount),
                currency: Some("EUR".to_string()),
            },
            status: status.to_string(),
            order_id: order_id.map(|s| s.to_string()),
        }
    }

    #[test]
    fn only_completed_payments_kept() {
        let kept = completed_payments(vec![
            payment("P1", "COMPLETED", 2000, None),
            payment("P2", "FAILED", 500, None),
            payment("P3", "COMPLETED", 2000, None),
        ]);

        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|p| p.status == "COMPLETED"));
    }

    #[test]
    fn order_ids_are_deduplicated_in_order() {
        let payments = vec![
            payment("P1", "COMPLETED", 100, Some("O1")),
            payment("P2", "COMPLETED", 100, Some("O2")),
            payment("P3", "COMPLETED", 100, Some("O1")),
            payment("P4", "COMPLETED", 100, None),
        ];

        assert_eq!(distinct_order_ids(&payments), vec!["O1", "O2"]);
    }

    #[test]
    fn no_orders_referenced_yields_empty() {
        let payments = vec![payment("P1", "COMPLETED", 100, None)];
        assert!(distinct_order_ids(&payments).is_empty());
    }
}
