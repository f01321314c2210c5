//! Serde models for the Square Connect API payloads we consume.
//!
//! Shapes are modelled explicitly rather than as loose JSON maps so a
//! malformed upstream payload fails deserialization visibly instead of
//! propagating half-parsed data into the importers. Only the fields the
//! sync engine reads are declared; everything else is ignored.

use serde::Deserialize;

/// Catalog object type tag for sellable items.
pub const CATALOG_TYPE_ITEM: &str = "ITEM";

/// Payment status for payments eligible for import.
pub const PAYMENT_STATUS_COMPLETED: &str = "COMPLETED";

// ---------------------------------------------------------------------------
// Money
// ---------------------------------------------------------------------------

/// A monetary amount in minor currency units (cents).
#[derive(Debug, Clone, Deserialize)]
pub struct Money {
    pub amount: Option<i64>,
    pub currency: Option<String>,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// A top-level catalog object from `GET /v2/catalog/list`.
///
/// The listing is requested with `types=ITEM`, but the type tag is kept
/// so the importer can re-check rather than trust the filter.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogObject {
    pub id: String,
    #[serde(rename = "type")]
    pub object_type: String,
    pub item_data: Option<CatalogItemData>,
}

/// Item-level data nested under a `CatalogObject` of type `ITEM`.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogItemData {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub variations: Vec<CatalogVariation>,
}

/// A variation object nested under an item's `variations` array.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogVariation {
    pub id: String,
    pub item_variation_data: Option<ItemVariationData>,
}

/// Variation-level data: the sellable unit's name and price.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemVariationData {
    pub name: Option<String>,
    pub price_money: Option<Money>,
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

/// A seller location from `GET /v2/locations`.
#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

/// A payment from `GET /v2/payments`.
#[derive(Debug, Clone, Deserialize)]
pub struct Payment {
    pub id: String,
    /// RFC 3339 creation timestamp as transmitted by the platform.
    pub created_at: String,
    pub amount_money: Money,
    pub status: String,
    pub order_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// An order from `POST /v2/orders/batch-retrieve`.
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub line_items: Vec<OrderLineItem>,
}

/// A single line on an order.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderLineItem {
    pub name: String,
    /// Quantity as a numeric string (Square supports fractional
    /// quantities for weighed goods).
    pub quantity: String,
    pub base_price_money: Option<Money>,
    /// Reference to the catalog variation this line was rung up from,
    /// when the sale went through the catalog.
    pub catalog_object_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Response envelopes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ListCatalogResponse {
    #[serde(default)]
    pub objects: Vec<CatalogObject>,
    pub cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListLocationsResponse {
    #[serde(default)]
    pub locations: Vec<Location>,
}

#[derive(Debug, Deserialize)]
pub struct ListPaymentsResponse {
    #[serde(default)]
    pub payments: Vec<Payment>,
    pub cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BatchRetrieveOrdersResponse {
    #[serde(default)]
    pub orders: Vec<Order>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_item_with_variations_deserializes() {
        let json = r#"{
            "objects": [{
                "id": "ITEM_1",
                "type": "ITEM",
                "updated_at": "2024-03-01T10:00:00Z",
                "item_data": {
                    "name": "Espresso",
                    "description": "Double shot",
                    "variations": [{
                        "id": "VAR_1",
                        "type": "ITEM_VARIATION",
                        "item_variation_data": {
                            "name": "Large",
                            "price_money": { "amount": 450, "currency": "EUR" }
                        }
                    }]
                }
            }],
            "cursor": null
        }"#;

        let parsed: ListCatalogResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.objects.len(), 1);

        let item = &parsed.objects[0];
        assert_eq!(item.object_type, CATALOG_TYPE_ITEM);

        let data = item.item_data.as_ref().unwrap();
        assert_eq!(data.name, "Espresso");
        assert_eq!(data.variations.len(), 1);

        let variation = data.variations[0].item_variation_data.as_ref().unwrap();
        assert_eq!(variation.name.as_deref(), Some("Large"));
        assert_eq!(variation.price_money.as_ref().unwrap().amount, Some(450));
    }

    #[test]
    fn item_without_variations_gets_empty_vec() {
        let json = r#"{
            "id": "ITEM_2",
            "type": "ITEM",
            "item_data": { "name": "Gift card" }
        }"#;

        let item: CatalogObject = serde_json::from_str(json).unwrap();
        assert!(item.item_data.unwrap().variations.is_empty());
    }

    #[test]
    fn item_missing_name_is_rejected() {
        let json = r#"{
            "id": "ITEM_3",
            "type": "ITEM",
            "item_data": { "description": "nameless" }
        }"#;

        assert!(serde_json::from_str::<CatalogObject>(json).is_err());
    }

    #[test]
    fn payment_deserializes() {
        let json = r#"{
            "payments": [{
                "id": "PAY_1",
                "created_at": "2024-03-02T12:30:00Z",
                "amount_money": { "amount": 2000, "currency": "EUR" },
                "status": "COMPLETED",
                "order_id": "ORDER_1",
                "receipt_number": "R123"
            }]
        }"#;

        let parsed: ListPaymentsResponse = serde_json::from_str(json).unwrap();
        let payment = &parsed.payments[0];
        assert_eq!(payment.status, PAYMENT_STATUS_COMPLETED);
        assert_eq!(payment.amount_money.amount, Some(2000));
        assert_eq!(payment.order_id.as_deref(), Some("ORDER_1"));
    }

    #[test]
    fn order_line_items_deserialize() {
        let json = r#"{
            "orders": [{
                "id": "ORDER_1",
                "line_items": [{
                    "name": "Espresso - Large",
                    "quantity": "2",
                    "catalog_object_id": "VAR_1",
                    "base_price_money": { "amount": 450, "currency": "EUR" }
                }]
            }]
        }"#;

        let parsed: BatchRetrieveOrdersResponse = serde_json::from_str(json).unwrap();
        let line = &parsed.orders[0].line_items[0];
        assert_eq!(line.quantity, "2");
        assert_eq!(line.catalog_object_id.as_deref(), Some("VAR_1"));
    }

    #[test]
    fn empty_listing_yields_empty_vecs() {
        let parsed: ListPaymentsResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.payments.is_empty());
    }
}
