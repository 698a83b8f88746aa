use std::sync::Arc;

use super::{
    collections::{DrinkCollection, EventCollection, PlaceCollection, UserCollection},
    config::ApiClientConfig,
    rest::{RestClient, error::Result},
};

/// Client for interacting with the [Barlink API] via REST.
///
/// `ApiClient` owns the shared HTTP transport and hands out pre-wired
/// paginated collections over the Barlink listings.
///
/// [Barlink API]: https://api.barlink.app/v1
pub struct ApiClient {
    /// Shared REST transport backing every collection created by this
    /// client.
    pub rest: Arc<RestClient>,
}

impl ApiClient {
    fn new_inner(rest: Arc<RestClient>) -> Arc<Self> {
        Arc::new(Self { rest })
    }

    /// Creates a new unauthenticated API client.
    ///
    /// For endpoints serving personal data, use [`ApiClient::with_session`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// use barlink_sdk::{ApiClient, ApiClientConfig};
    ///
    /// let api = ApiClient::new(ApiClientConfig::default(), "api.barlink.app")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: ApiClientConfig, domain: impl ToString) -> Result<Arc<Self>> {
        let rest = RestClient::new(&config, domain)?;

        Ok(Self::new_inner(rest))
    }

    /// Creates a new API client authenticated with a session token.
    ///
    /// If not accessing personal endpoints, consider using
    /// [`ApiClient::new`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// use std::env;
    /// use barlink_sdk::{ApiClient, ApiClientConfig};
    ///
    /// let token = env::var("BARLINK_SESSION_TOKEN")?;
    ///
    /// let api = ApiClient::with_session(ApiClientConfig::default(), "api.barlink.app", token)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_session(
        config: ApiClientConfig,
        domain: impl ToString,
        session_token: impl ToString,
    ) -> Result<Arc<Self>> {
        let rest = RestClient::with_session(&config, domain, session_token)?;

        Ok(Self::new_inner(rest))
    }

    /// Collection over the places listing.
    pub fn places(&self) -> PlaceCollection {
        PlaceCollection::places(self.rest.clone())
    }

    /// Collection over the events listing. Scope it to a single place with
    /// [`set_scope_id`](crate::PageCollection::set_scope_id).
    pub fn events(&self) -> EventCollection {
        EventCollection::events(self.rest.clone())
    }

    /// Collection over the drinks listing. Scope it to a single place with
    /// [`set_scope_id`](crate::PageCollection::set_scope_id).
    pub fn drinks(&self) -> DrinkCollection {
        DrinkCollection::drinks(self.rest.clone())
    }

    /// Collection over the friends of `user_id`.
    pub fn friends_of(&self, user_id: u64) -> UserCollection {
        UserCollection::friends_of(user_id, self.rest.clone())
    }

    /// Collection over the user directory.
    pub fn user_search(&self) -> UserCollection {
        UserCollection::user_search(self.rest.clone())
    }
}
