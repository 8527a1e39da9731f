pub mod http;

use crate::errors::AnalyticsError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

pub use http::ReqwestTransport;

/// The raw outcome of a form POST, before any status interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A trait for sending form-encoded bodies to the analytics service.
///
/// Implementations report connection, DNS and timeout failures as
/// `AnalyticsError::Transport`. Any HTTP status, including errors, is
/// returned as a `TransportResponse` and classified by the caller.
#[async_trait]
pub trait FormTransport: Send + Sync + Debug + DynClone {
    async fn post_form(&self, url: &str, body: String)
        -> Result<TransportResponse, AnalyticsError>;
}

dyn_clone::clone_trait_object!(FormTransport);
