//! External-sync constants and pure helpers.
//!
//! This module lives in `core` (zero internal deps) so the database
//! layer, the sync engine, and the API layer all agree on source tags,
//! naming rules, and run-status derivation.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Source and provider tags
// ---------------------------------------------------------------------------

/// External-source tag stamped on every record imported from Square.
pub const SOURCE_SQUARE: &str = "square";

/// Provider name stored on the `integrations` row for Square.
pub const PROVIDER_SQUARE: &str = "square";

// ---------------------------------------------------------------------------
// Transaction constants
// ---------------------------------------------------------------------------

/// Payment method recorded for imported Square payments. The platform
/// only reports card-present/card-on-file payments to us.
pub const PAYMENT_METHOD_CARD: &str = "card";

/// Transaction-type code for a sale.
pub const TRANSACTION_TYPE_SALE: i16 = 1;

// ---------------------------------------------------------------------------
// Sync run types
// ---------------------------------------------------------------------------

/// `sync_type` value for catalog import runs.
pub const SYNC_TYPE_CATALOG: &str = "catalog_import";

/// `sync_type` value for transaction sync runs.
pub const SYNC_TYPE_TRANSACTIONS: &str = "transaction_sync";

// ---------------------------------------------------------------------------
// Run status
// ---------------------------------------------------------------------------

/// Outcome of a single sync run, persisted on the sync log row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Success,
    Partial,
    Failure,
}

impl SyncStatus {
    /// Derive the run status from the number of per-record errors.
    ///
    /// A run that processed everything is a success; a run with at least
    /// one skipped record is partial. [`SyncStatus::Failure`] is reserved
    /// for runs aborted before any records were processed.
    pub fn from_error_count(error_count: usize) -> Self {
        if error_count == 0 {
            SyncStatus::Success
        } else {
            SyncStatus::Partial
        }
    }

    /// String form stored in the `integration_sync_logs.status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Success => "success",
            SyncStatus::Partial => "partial",
            SyncStatus::Failure => "failure",
        }
    }
}

/// Join per-record errors into the aggregated text stored on the log row.
///
/// Returns `None` for a clean run so the column stays NULL.
pub fn join_errors(errors: &[String]) -> Option<String> {
    if errors.is_empty() {
        None
    } else {
        Some(errors.join("; "))
    }
}

// ---------------------------------------------------------------------------
// Variant naming
// ---------------------------------------------------------------------------

/// Variation name Square assigns to a single-variation item by default.
pub const DEFAULT_VARIATION_NAME: &str = "Regular";

/// Compose the display name for a product imported from an item variation.
///
/// The default variation name ("Regular") and a variation that merely
/// repeats the item name both collapse to the item name alone; anything
/// else produces `"{item} - {variation}"`.
pub fn variant_display_name(item_name: &str, variation_name: &str) -> String {
    if variation_name == DEFAULT_VARIATION_NAME || variation_name == item_name {
        item_name.to_string()
    } else {
        format!("{item_name} - {variation_name}")
    }
}

// ---------------------------------------------------------------------------
// Quantity parsing
// ---------------------------------------------------------------------------

/// Parse a line-item quantity, which the platform transmits as a string.
///
/// Square supports fractional quantities for weighed goods; our line
/// items are whole units, so anything that does not parse as a positive
/// integer is rejected and handled as a per-record error by the caller.
pub fn parse_quantity(raw: &str) -> Result<i32, String> {
    match raw.trim().parse::<i32>() {
        Ok(qty) if qty > 0 => Ok(qty),
        Ok(qty) => Err(format!("quantity must be positive, got {qty}")),
        Err(_) => Err(format!("invalid quantity '{raw}'")),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- variant_display_name ------------------------------------------------

    #[test]
    fn regular_variation_collapses_to_item_name() {
        assert_eq!(variant_display_name("Espresso", "Regular"), "Espresso");
    }

    #[test]
    fn variation_equal_to_item_name_collapses() {
        assert_eq!(variant_display_name("Espresso", "Espresso"), "Espresso");
    }

    #[test]
    fn distinct_variation_is_composed() {
        assert_eq!(
            variant_display_name("Espresso", "Large"),
            "Espresso - Large"
        );
    }

    // -- SyncStatus ----------------------------------------------------------

    #[test]
    fn clean_run_is_success() {
        assert_eq!(SyncStatus::from_error_count(0), SyncStatus::Success);
    }

    #[test]
    fn run_with_errors_is_partial() {
        assert_eq!(SyncStatus::from_error_count(3), SyncStatus::Partial);
    }

    #[test]
    fn status_strings_match_log_column_values() {
        assert_eq!(SyncStatus::Success.as_str(), "success");
        assert_eq!(SyncStatus::Partial.as_str(), "partial");
        assert_eq!(SyncStatus::Failure.as_str(), "failure");
    }

    // -- join_errors ---------------------------------------------------------

    #[test]
    fn no_errors_joins_to_none() {
        assert_eq!(join_errors(&[]), None);
    }

    #[test]
    fn errors_joined_with_semicolons() {
        let errors = vec!["Latte: boom".to_string(), "Mocha: bang".to_string()];
        assert_eq!(
            join_errors(&errors),
            Some("Latte: boom; Mocha: bang".to_string())
        );
    }

    // -- parse_quantity ------------------------------------------------------

    #[test]
    fn whole_quantity_parses() {
        assert_eq!(parse_quantity("2"), Ok(2));
    }

    #[test]
    fn quantity_with_whitespace_parses() {
        assert_eq!(parse_quantity(" 5 "), Ok(5));
    }

    #[test]
    fn non_numeric_quantity_rejected() {
        assert!(parse_quantity("abc").is_err());
    }

    #[test]
    fn fractional_quantity_rejected() {
        assert!(parse_quantity("1.5").is_err());
    }

    #[test]
    fn zero_quantity_rejected() {
        assert!(parse_quantity("0").is_err());
    }
}
