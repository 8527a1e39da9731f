use crate::{
    errors::AnalyticsError,
    form::FORM_CONTENT_TYPE,
    transport::{FormTransport, TransportResponse},
};
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client as ReqwestClient};
use std::time::Duration;
use tracing::debug;

/// A transport backed by a pooled `reqwest::Client`.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: ReqwestClient,
}

impl ReqwestTransport {
    /// Creates a new `ReqwestTransport` whose requests fail after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, AnalyticsError> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(AnalyticsError::ClientBuild)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FormTransport for ReqwestTransport {
    async fn post_form(
        &self,
        url: &str,
        body: String,
    ) -> Result<TransportResponse, AnalyticsError> {
        debug!(url = %url, bytes = body.len(), "--> POST form body");

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        // A timeout can also fire while the body is still streaming in.
        let body = response.text().await?;

        debug!(status, bytes = body.len(), "<-- response");
        Ok(TransportResponse { status, body })
    }
}
