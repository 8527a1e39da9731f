//! # Text Indexing
//!
//! Adds a document to a named text index through the `addtotextindex`
//! endpoint. The document is sent as JSON inside the `json` form field,
//! wrapped as `{"document": [...]}`.

use crate::{errors::AnalyticsError, form::encode_form, types::TextAnalyticsClient};
use crmtext_html::non_blank_text;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A single document as accepted by the text index.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct IndexDocument {
    pub title: String,
    pub reference: String,
    pub subject: String,
    pub content: String,
}

impl IndexDocument {
    /// Builds the document for an email-like record: the subject doubles as
    /// the title and `reference` is the host's record identifier.
    pub fn new(content: String, subject: String, reference: String) -> Self {
        Self {
            title: subject.clone(),
            reference,
            subject,
            content,
        }
    }
}

/// The container the index endpoint expects in its `json` field.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DocumentWrapper {
    pub document: Vec<IndexDocument>,
}

/// Confirmation that one document reference was stored.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct IndexReference {
    pub reference: String,
    pub id: i64,
}

/// The response body of the index endpoint.
///
/// `references` is required so that an error object is not mistaken for an
/// empty confirmation.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexResponse {
    #[serde(default)]
    pub index: String,
    pub references: Vec<IndexReference>,
}

impl TextAnalyticsClient {
    /// Adds `content` to the configured index under `reference_id`.
    ///
    /// Markup is stripped from `content` first. If nothing is left, no request
    /// is sent and `Ok(None)` is returned.
    pub async fn index_document(
        &self,
        content: &str,
        subject: &str,
        reference_id: &str,
    ) -> Result<Option<IndexResponse>, AnalyticsError> {
        let Some(content) = non_blank_text(content) else {
            debug!("[index_document] empty content after stripping markup, skipping request");
            return Ok(None);
        };
        if self.config.index_name.is_empty() {
            return Err(AnalyticsError::MissingIndexName);
        }

        let wrapper = DocumentWrapper {
            document: vec![IndexDocument::new(
                content,
                subject.to_string(),
                reference_id.to_string(),
            )],
        };
        let json = serde_json::to_string(&wrapper).map_err(AnalyticsError::Serialize)?;

        let body = encode_form(&[
            ("apikey", self.config.api_key.as_str()),
            ("json", json.as_str()),
            ("index", self.config.index_name.as_str()),
        ])?;

        info!(
            "[index_document] indexing reference '{}' into '{}'",
            reference_id, self.config.index_name
        );
        let raw = self.post(&self.config.index_endpoint, body).await?;

        let response = parse_index_response(raw)?;
        debug!(
            index = %response.index,
            references = response.references.len(),
            "<-- index confirmation"
        );
        Ok(Some(response))
    }
}

/// Decodes an index response body, keeping the raw text on failure.
pub fn parse_index_response(raw: String) -> Result<IndexResponse, AnalyticsError> {
    match serde_json::from_str(&raw) {
        Ok(response) => Ok(response),
        Err(source) => Err(AnalyticsError::Decode { raw, source }),
    }
}
