use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::api::rest::error::Result;

/// Query parameters attached to a page request.
///
/// An ordered map keeps the encoded query deterministic and gives collisions
/// a single well-defined outcome: the last insert wins.
pub type RequestParams = BTreeMap<String, String>;

/// Transport used by a [`PageCollection`](super::PageCollection) to fetch
/// pages.
///
/// [`RestClient`](crate::RestClient) implements this trait for the Barlink
/// REST API. Custom implementations (for tests, caching layers or other
/// backends) only need to answer GET requests with a raw JSON document.
///
/// Returns `Ok(None)` when the request succeeded but carried no payload;
/// collections treat an absent payload as a malformed response.
#[async_trait]
pub trait PageTransport: Send + Sync {
    async fn get(&self, path: &str, params: &RequestParams) -> Result<Option<Value>>;
}
