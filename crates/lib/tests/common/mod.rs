#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Shared helpers for the integration tests: tracing setup, clients pointed
//! at a `wiremock` server, and in-process transports for failure cases.

use async_trait::async_trait;
use crmtext::{
    AnalyticsError, FormTransport, TextAnalyticsClient, TextAnalyticsClientBuilder,
    TransportResponse,
};
use dotenvy::dotenv;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_INDEX: &str = "crm_emails";
pub const SENTIMENT_PATH: &str = "/1/api/sync/analyzesentiment/v1";
pub const INDEX_PATH: &str = "/1/api/sync/addtotextindex/v1";

static INIT: Once = Once::new();

/// Initializes the tracing subscriber and loads .env for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        dotenv().ok();
        tracing_subscriber::fmt::init();
    });
}

/// Builds a client whose endpoints point at the given mock server.
pub fn client_for(server: &MockServer) -> TextAnalyticsClient {
    client_with_timeout(server, Duration::from_secs(5))
}

pub fn client_with_timeout(server: &MockServer, timeout: Duration) -> TextAnalyticsClient {
    TextAnalyticsClientBuilder::new()
        .api_key(TEST_API_KEY.to_string())
        .index_name(TEST_INDEX.to_string())
        .sentiment_endpoint(format!("{}{SENTIMENT_PATH}", server.uri()))
        .index_endpoint(format!("{}{INDEX_PATH}", server.uri()))
        .timeout(timeout)
        .build()
        .expect("client should build")
}

/// Builds a client around an in-process transport.
pub fn client_with_transport(transport: Box<dyn FormTransport>) -> TextAnalyticsClient {
    TextAnalyticsClientBuilder::new()
        .api_key(TEST_API_KEY.to_string())
        .index_name(TEST_INDEX.to_string())
        .transport(transport)
        .build()
        .expect("client should build")
}

/// Decodes a captured form body into its fields.
pub fn form_fields(body: &[u8]) -> HashMap<String, String> {
    serde_urlencoded::from_bytes::<Vec<(String, String)>>(body)
        .expect("body should be form-encoded")
        .into_iter()
        .collect()
}

// --- In-process transports ---

/// A transport that fails every request as a timeout.
#[derive(Clone, Debug, Default)]
pub struct TimeoutTransport;

#[async_trait]
impl FormTransport for TimeoutTransport {
    async fn post_form(
        &self,
        _url: &str,
        _body: String,
    ) -> Result<TransportResponse, AnalyticsError> {
        Err(AnalyticsError::Transport {
            timeout: true,
            message: "operation timed out".to_string(),
        })
    }
}

/// A transport that records each call and replies with a canned response.
#[derive(Clone, Debug)]
pub struct RecordingTransport {
    pub calls: Arc<Mutex<Vec<(String, String)>>>,
    response: TransportResponse,
}

impl RecordingTransport {
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            response: TransportResponse {
                status,
                body: body.to_string(),
            },
        }
    }

    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FormTransport for RecordingTransport {
    async fn post_form(
        &self,
        url: &str,
        body: String,
    ) -> Result<TransportResponse, AnalyticsError> {
        self.calls.lock().unwrap().push((url.to_string(), body));
        Ok(self.response.clone())
    }
}
