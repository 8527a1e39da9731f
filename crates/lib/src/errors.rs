use thiserror::Error;

/// Errors raised while talking to the text-analytics service.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Failed to build Reqwest client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("API key is missing")]
    MissingApiKey,
    #[error("Index name is missing")]
    MissingIndexName,
    #[error("Failed to form-encode request body: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),
    #[error("Failed to serialize index document: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("{}", transport_message(*timeout, message))]
    Transport { timeout: bool, message: String },
    #[error("Text analytics API returned status {status}: {body}")]
    Service { status: u16, body: String },
    #[error("Failed to deserialize text analytics response: {source}")]
    Decode {
        raw: String,
        #[source]
        source: serde_json::Error,
    },
}

fn transport_message(timeout: bool, message: &str) -> String {
    if timeout {
        format!("The timeout elapsed while attempting to issue the request: {message}")
    } else {
        format!("A transport error occurred while attempting to issue the request: {message}")
    }
}

impl AnalyticsError {
    /// True only for transport failures caused by the request timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, AnalyticsError::Transport { timeout: true, .. })
    }
}

impl From<reqwest::Error> for AnalyticsError {
    fn from(err: reqwest::Error) -> Self {
        AnalyticsError::Transport {
            timeout: err.is_timeout(),
            message: err.to_string(),
        }
    }
}
