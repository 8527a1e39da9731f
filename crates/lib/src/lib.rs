//! # Text Analytics Bridge
//!
//! This crate lets CRM workflow steps call a hosted text-analytics API. It
//! strips markup from the input, posts a form-encoded request to the
//! sentiment or text-index endpoint, and decodes the JSON reply into typed
//! records.

pub mod activity;
pub mod errors;
pub mod form;
pub mod index;
pub mod sentiment;
pub mod transport;
pub mod types;

pub use activity::{
    ActivityContext, ActivityError, AnalyzeSentimentActivity, IndexEmailActivity,
    IndexEmailInputs, IndexEmailOutputs, SentimentInputs, SentimentOutputs,
};
pub use errors::AnalyticsError;
pub use index::{DocumentWrapper, IndexDocument, IndexReference, IndexResponse};
pub use sentiment::{SentimentDetail, SentimentResponse, SentimentResult};
pub use transport::{FormTransport, ReqwestTransport, TransportResponse};
pub use types::{ClientConfig, TextAnalyticsClient, TextAnalyticsClientBuilder};
