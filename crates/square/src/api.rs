//! REST client for the Square Connect API.
//!
//! Wraps the read-only endpoints the sync engine needs (catalog listing,
//! location listing, payment listing, order batch-retrieval) using
//! [`reqwest`]. All calls are reads; order batch-retrieval uses POST but
//! does not mutate platform state, so callers may safely retry any call.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::models::{
    BatchRetrieveOrdersResponse, CatalogObject, ListCatalogResponse, ListLocationsResponse,
    ListPaymentsResponse, Location, Order, Payment, CATALOG_TYPE_ITEM,
};

/// Production API base URL.
pub const PRODUCTION_BASE_URL: &str = "https://connect.squareup.com";

/// Sandbox API base URL.
pub const SANDBOX_BASE_URL: &str = "https://connect.squareupsandbox.com";

/// Sandbox access tokens begin with this literal prefix.
///
/// This is a naming convention observed in practice, not a contractual
/// guarantee from Square; it only decides which base URL to call.
pub const SANDBOX_TOKEN_PREFIX: &str = "EAAAE";

/// API version header value sent with every request.
pub const SQUARE_API_VERSION: &str = "2024-01-18";

/// Timeout applied to every request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Pick the API base URL for an access token.
///
/// Tokens with the sandbox prefix route to the sandbox environment;
/// everything else is treated as production.
pub fn base_url_for_token(access_token: &str) -> &'static str {
    if access_token.starts_with(SANDBOX_TOKEN_PREFIX) {
        SANDBOX_BASE_URL
    } else {
        PRODUCTION_BASE_URL
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors from the Square REST layer.
#[derive(Debug, thiserror::Error)]
pub enum SquareApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Square returned a non-2xx status code.
    #[error("Square API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for diagnostics.
        body: String,
    },
}

// ---------------------------------------------------------------------------
// Platform trait
// ---------------------------------------------------------------------------

/// The read operations the sync engine needs from the external platform.
///
/// [`SquareApi`] is the production implementation; tests substitute an
/// in-memory fake so importer behaviour can be exercised without the
/// network.
#[async_trait]
pub trait Platform: Send + Sync {
    /// List catalog objects of type `ITEM` (first page only).
    async fn list_catalog_items(&self) -> Result<Vec<CatalogObject>, SquareApiError>;

    /// List the seller's locations.
    async fn list_locations(&self) -> Result<Vec<Location>, SquareApiError>;

    /// List payments for a location within a time window (first page only).
    async fn list_payments(
        &self,
        location_id: &str,
        begin_time: &str,
        end_time: &str,
    ) -> Result<Vec<Payment>, SquareApiError>;

    /// Retrieve a batch of orders by id.
    async fn batch_retrieve_orders(
        &self,
        order_ids: &[String],
    ) -> Result<Vec<Order>, SquareApiError>;
}

// ---------------------------------------------------------------------------
// SquareApi
// ---------------------------------------------------------------------------

/// HTTP client bound to one access token and its matching environment.
pub struct SquareApi {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl SquareApi {
    /// Create a client for the given access token, selecting sandbox or
    /// production via [`base_url_for_token`].
    pub fn from_access_token(access_token: impl Into<String>) -> Self {
        let access_token = access_token.into();
        let base_url = base_url_for_token(&access_token).to_string();
        Self::with_base_url(access_token, base_url)
    }

    /// Create a client against an explicit base URL (used by tests).
    pub fn with_base_url(access_token: impl Into<String>, base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            base_url: base_url.into(),
            access_token: access_token.into(),
        }
    }

    /// Build a request with the fixed version header and bearer auth.
    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .header("Square-Version", SQUARE_API_VERSION)
            .bearer_auth(&self.access_token)
    }

    /// Ensure a success status and deserialize the JSON body.
    ///
    /// Non-2xx responses are surfaced as [`SquareApiError::Api`] with the
    /// raw body preserved for diagnostics.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, SquareApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(SquareApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl Platform for SquareApi {
    /// `GET /v2/catalog/list?types=ITEM`.
    ///
    /// Only the first response page is fetched; the pagination cursor is
    /// intentionally ignored to match the behaviour the store relies on.
    async fn list_catalog_items(&self) -> Result<Vec<CatalogObject>, SquareApiError> {
        let response = self
            .request(reqwest::Method::GET, "/v2/catalog/list")
            .query(&[("types", CATALOG_TYPE_ITEM)])
            .send()
            .await?;

        let parsed: ListCatalogResponse = Self::parse_response(response).await?;
        Ok(parsed.objects)
    }

    /// `GET /v2/locations`.
    async fn list_locations(&self) -> Result<Vec<Location>, SquareApiError> {
        let response = self
            .request(reqwest::Method::GET, "/v2/locations")
            .send()
            .await?;

        let parsed: ListLocationsResponse = Self::parse_response(response).await?;
        Ok(parsed.locations)
    }

    /// `GET /v2/payments?location_id=&begin_time=&end_time=`.
    ///
    /// First page only, like the catalog listing.
    async fn list_payments(
        &self,
        location_id: &str,
        begin_time: &str,
        end_time: &str,
    ) -> Result<Vec<Payment>, SquareApiError> {
        let response = self
            .request(reqwest::Method::GET, "/v2/payments")
            .query(&[
                ("location_id", location_id),
                ("begin_time", begin_time),
                ("end_time", end_time),
            ])
            .send()
            .await?;

        let parsed: ListPaymentsResponse = Self::parse_response(response).await?;
        Ok(parsed.payments)
    }

    /// `POST /v2/orders/batch-retrieve` with the given order ids.
    async fn batch_retrieve_orders(
        &self,
        order_ids: &[String],
    ) -> Result<Vec<Order>, SquareApiError> {
        let body = serde_json::json!({ "order_ids": order_ids });

        let response = self
            .request(reqwest::Method::POST, "/v2/orders/batch-retrieve")
            .json(&body)
            .send()
            .await?;

        let parsed: BatchRetrieveOrdersResponse = Self::parse_response(response).await?;
        Ok(parsed.orders)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sandbox_prefix_routes_to_sandbox() {
        assert_eq!(base_url_for_token("EAAAEabc123"), SANDBOX_BASE_URL);
    }

    #[test]
    fn other_tokens_route_to_production() {
        assert_eq!(base_url_for_token("EAAAl9xyz"), PRODUCTION_BASE_URL);
        assert_eq!(base_url_for_token(""), PRODUCTION_BASE_URL);
    }

    #[test]
    fn client_uses_heuristic_base_url() {
        let api = SquareApi::from_access_token("EAAAEsandboxtoken");
        assert_eq!(api.base_url, SANDBOX_BASE_URL);

        let api = SquareApi::from_access_token("EQACproductiontoken");
        assert_eq!(api.base_url, PRODUCTION_BASE_URL);
    }
}
