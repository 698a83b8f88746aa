use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{
    Client, Url,
    header::{HeaderName, HeaderValue},
};
use serde_json::Value;

use super::{
    config::RestClientConfig,
    page::{PageTransport, RequestParams},
};

pub(crate) mod error;
mod path;

pub use path::ApiPath;

use error::{RestApiError, Result};

const SESSION_TOKEN_HEADER: &str = "barlink-session-token";

/// HTTP transport for the Barlink REST API.
///
/// One client owns a connection pool and can back any number of
/// [`PageCollection`](crate::PageCollection)s. Public listings work without
/// a session; endpoints serving personal data require a client created with
/// [`RestClient::with_session`].
pub struct RestClient {
    domain: String,
    session_token: Option<HeaderValue>,
    client: Client,
}

impl RestClient {
    fn build_client(config: &RestClientConfig) -> Result<Client> {
        Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(RestApiError::HttpClient)
    }

    /// Creates a client for public endpoints.
    ///
    /// For endpoints serving personal data, use [`RestClient::with_session`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// use barlink_sdk::{RestClient, RestClientConfig};
    ///
    /// let client = RestClient::new(RestClientConfig::default(), "api.barlink.app")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: impl Into<RestClientConfig>, domain: impl ToString) -> Result<Arc<Self>> {
        let client = Self::build_client(&config.into())?;

        Ok(Arc::new(Self {
            domain: domain.to_string(),
            session_token: None,
            client,
        }))
    }

    /// Creates a client that authenticates every request with the given
    /// session token.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// use std::env;
    /// use barlink_sdk::{RestClient, RestClientConfig};
    ///
    /// let token = env::var("BARLINK_SESSION_TOKEN")?;
    ///
    /// let client = RestClient::with_session(RestClientConfig::default(), "api.barlink.app", token)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_session(
        config: impl Into<RestClientConfig>,
        domain: impl ToString,
        session_token: impl ToString,
    ) -> Result<Arc<Self>> {
        let session_token = HeaderValue::from_str(&session_token.to_string())?;
        let client = Self::build_client(&config.into())?;

        Ok(Arc::new(Self {
            domain: domain.to_string(),
            session_token: Some(session_token),
            client,
        }))
    }

    /// Indicates whether a session token was provided during client
    /// initialization.
    pub fn has_session(&self) -> bool {
        self.session_token.is_some()
    }

    fn get_url(&self, path: &str) -> Result<Url> {
        let url_str = format!("https://{}{}", self.domain, path);

        Url::parse(&url_str).map_err(|e| RestApiError::UrlParse(e.to_string()))
    }
}

#[async_trait]
impl PageTransport for RestClient {
    async fn get(&self, path: &str, params: &RequestParams) -> Result<Option<Value>> {
        let url = self.get_url(path)?;

        let mut request = self.client.get(url).query(params);
        if let Some(token) = &self.session_token {
            request = request.header(HeaderName::from_static(SESSION_TOKEN_HEADER), token.clone());
        }

        let response = request.send().await.map_err(RestApiError::SendFailed)?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(RestApiError::ResponseDecoding)?;

            return Err(RestApiError::ErrorResponse { status, text });
        }

        let raw_response = response
            .text()
            .await
            .map_err(RestApiError::ResponseDecoding)?;

        if raw_response.trim().is_empty() {
            return Ok(None);
        }

        let document = serde_json::from_str(&raw_response)
            .map_err(|e| RestApiError::ResponseJsonDeserializeFailed { raw_response, e })?;

        Ok(Some(document))
    }
}
