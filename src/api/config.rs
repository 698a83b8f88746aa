use std::time::Duration;

/// Configuration for Barlink's [`ApiClient`](super::ApiClient).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use barlink_sdk::ApiClientConfig;
///
/// // Use default configuration
/// let config = ApiClientConfig::default();
///
/// // Customize configuration
/// let config = ApiClientConfig::default().with_rest_timeout(Duration::from_secs(10));
/// ```
#[derive(Clone, Debug)]
pub struct ApiClientConfig {
    rest_timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            rest_timeout: Duration::from_secs(20),
        }
    }
}

impl ApiClientConfig {
    /// Returns the configured timeout for REST API requests.
    pub fn rest_timeout(&self) -> Duration {
        self.rest_timeout
    }

    /// Sets the REST API request timeout. The default is 20 seconds.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use barlink_sdk::ApiClientConfig;
    ///
    /// let config = ApiClientConfig::default().with_rest_timeout(Duration::from_secs(10));
    /// ```
    pub fn with_rest_timeout(mut self, timeout: Duration) -> Self {
        self.rest_timeout = timeout;
        self
    }
}

#[derive(Clone, Debug)]
pub struct RestClientConfig {
    timeout: Duration,
}

impl RestClientConfig {
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<&ApiClientConfig> for RestClientConfig {
    fn from(value: &ApiClientConfig) -> Self {
        Self {
            timeout: value.rest_timeout(),
        }
    }
}

impl Default for RestClientConfig {
    fn default() -> Self {
        (&ApiClientConfig::default()).into()
    }
}
