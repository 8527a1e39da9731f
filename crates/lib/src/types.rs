use crate::errors::AnalyticsError;
use crate::transport::{FormTransport, ReqwestTransport, TransportResponse};
use std::fmt;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_SENTIMENT_ENDPOINT: &str =
    "https://api.idolondemand.com/1/api/sync/analyzesentiment/v1";
pub const DEFAULT_INDEX_ENDPOINT: &str =
    "https://api.idolondemand.com/1/api/sync/addtotextindex/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the text-analytics service.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_key: String,
    pub index_name: String,
    pub sentiment_endpoint: String,
    pub index_endpoint: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            index_name: String::new(),
            sentiment_endpoint: DEFAULT_SENTIMENT_ENDPOINT.to_string(),
            index_endpoint: DEFAULT_INDEX_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

// The API key stays out of logs and panic messages.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("index_name", &self.index_name)
            .field("sentiment_endpoint", &self.sentiment_endpoint)
            .field("index_endpoint", &self.index_endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// A client for the sentiment and text-index endpoints.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone)]
pub struct TextAnalyticsClient {
    pub(crate) transport: Box<dyn FormTransport>,
    pub(crate) config: ClientConfig,
}

impl fmt::Debug for TextAnalyticsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextAnalyticsClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TextAnalyticsClient {
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends a form body and maps any non-2xx status to `AnalyticsError::Service`.
    pub(crate) async fn post(&self, url: &str, body: String) -> Result<String, AnalyticsError> {
        let response = self.transport.post_form(url, body).await?;
        if !response.is_success() {
            warn!(
                status = response.status,
                url = %url,
                "Text analytics API returned an error status"
            );
            let TransportResponse { status, body } = response;
            return Err(AnalyticsError::Service { status, body });
        }
        Ok(response.body)
    }
}

/// A builder for creating `TextAnalyticsClient` instances.
#[derive(Default)]
pub struct TextAnalyticsClientBuilder {
    config: ClientConfig,
    transport: Option<Box<dyn FormTransport>>,
}

impl TextAnalyticsClientBuilder {
    /// Creates a new builder populated with the default endpoints and timeout.
    ///
    /// # Examples
    ///
    /// ```
    /// use crmtext::TextAnalyticsClientBuilder;
    ///
    /// let client = TextAnalyticsClientBuilder::new()
    ///     .api_key("secret".to_string())
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(client.config().api_key, "secret");
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an already assembled configuration.
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            transport: None,
        }
    }

    pub fn api_key(mut self, api_key: String) -> Self {
        self.config.api_key = api_key;
        self
    }

    pub fn index_name(mut self, index_name: String) -> Self {
        self.config.index_name = index_name;
        self
    }

    pub fn sentiment_endpoint(mut self, url: String) -> Self {
        self.config.sentiment_endpoint = url;
        self
    }

    pub fn index_endpoint(mut self, url: String) -> Self {
        self.config.index_endpoint = url;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Replaces the default `reqwest` transport, e.g. with a test double.
    pub fn transport(mut self, transport: Box<dyn FormTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the `TextAnalyticsClient`.
    ///
    /// Fails with `MissingApiKey` when no key was configured. The index name
    /// is only checked when a document is indexed.
    pub fn build(self) -> Result<TextAnalyticsClient, AnalyticsError> {
        if self.config.api_key.is_empty() {
            return Err(AnalyticsError::MissingApiKey);
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => Box::new(ReqwestTransport::new(self.config.timeout)?),
        };

        Ok(TextAnalyticsClient {
            transport,
            config: self.config,
        })
    }
}
