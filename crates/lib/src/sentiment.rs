//! # Sentiment Analysis
//!
//! Scores free text with the `analyzesentiment` endpoint. The service returns
//! per-topic breakdowns for positive and negative phrases plus one aggregate
//! label and score for the whole text.

use crate::{errors::AnalyticsError, form::encode_form, types::TextAnalyticsClient};
use crmtext_html::non_blank_text;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// The aggregate sentiment of a whole text.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SentimentResult {
    pub sentiment: String,
    pub score: Decimal,
}

/// One positive or negative phrase detected in the text.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SentimentDetail {
    pub sentiment: String,
    pub topic: String,
    pub score: Decimal,
    pub original_text: String,
    pub normalized_text: String,
    pub original_length: i64,
    pub normalized_length: i64,
}

/// The full response body of the sentiment endpoint.
///
/// `aggregate` is required: a 2xx body without it (e.g. the service's own
/// error object) is a decode failure, not a zero score.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SentimentResponse {
    #[serde(default)]
    pub positive: Vec<SentimentDetail>,
    #[serde(default)]
    pub negative: Vec<SentimentDetail>,
    pub aggregate: SentimentResult,
}

impl TextAnalyticsClient {
    /// Returns the aggregate sentiment of `text`.
    ///
    /// Markup is stripped first. If nothing is left, no request is sent and
    /// `Ok(None)` is returned.
    pub async fn analyze_sentiment(
        &self,
        text: &str,
    ) -> Result<Option<SentimentResult>, AnalyticsError> {
        Ok(self
            .analyze_sentiment_detailed(text)
            .await?
            .map(|response| response.aggregate))
    }

    /// Like `analyze_sentiment`, but keeps the positive and negative breakdowns.
    pub async fn analyze_sentiment_detailed(
        &self,
        text: &str,
    ) -> Result<Option<SentimentResponse>, AnalyticsError> {
        let Some(text) = non_blank_text(text) else {
            debug!("[analyze_sentiment] empty input after stripping markup, skipping request");
            return Ok(None);
        };

        let body = encode_form(&[
            ("apikey", self.config.api_key.as_str()),
            ("text", text.as_str()),
        ])?;
        info!(
            "[analyze_sentiment] sending {} characters to {}",
            text.chars().count(),
            self.config.sentiment_endpoint
        );
        let raw = self.post(&self.config.sentiment_endpoint, body).await?;

        let response = parse_sentiment_response(raw)?;
        debug!(
            sentiment = %response.aggregate.sentiment,
            score = %response.aggregate.score,
            "<-- aggregate sentiment"
        );
        Ok(Some(response))
    }
}

/// Decodes a sentiment response body, keeping the raw text on failure.
pub fn parse_sentiment_response(raw: String) -> Result<SentimentResponse, AnalyticsError> {
    match serde_json::from_str(&raw) {
        Ok(response) => Ok(response),
        Err(source) => Err(AnalyticsError::Decode { raw, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_full_response() {
        let raw = r#"{
            "positive": [{
                "sentiment": "excellent",
                "topic": "service",
                "score": 0.7520381771329,
                "original_text": "excellent service",
                "original_length": 17,
                "normalized_text": "excellent service",
                "normalized_length": 17
            }],
            "negative": [],
            "aggregate": {"sentiment": "positive", "score": 0.7520381771329}
        }"#;

        let response = parse_sentiment_response(raw.to_string()).unwrap();

        assert_eq!(response.positive.len(), 1);
        assert!(response.negative.is_empty());
        let detail = &response.positive[0];
        assert_eq!(detail.topic, "service");
        assert_eq!(detail.original_length, 17);
        assert_eq!(
            detail.score,
            Decimal::from_str("0.7520381771329").unwrap()
        );
        assert_eq!(response.aggregate.sentiment, "positive");
    }

    #[test]
    fn test_parse_missing_fields_default_to_empty() {
        let response =
            parse_sentiment_response(r#"{"aggregate":{"score":0}}"#.to_string()).unwrap();
        assert_eq!(response.aggregate.sentiment, "");
        assert_eq!(response.aggregate.score, Decimal::ZERO);
        assert!(response.positive.is_empty());

        let detail: SentimentDetail = serde_json::from_str(r#"{"score":-0.5}"#).unwrap();
        assert_eq!(detail.topic, "");
        assert_eq!(detail.original_text, "");
        assert_eq!(detail.normalized_length, 0);
    }

    #[test]
    fn test_parse_without_aggregate_is_decode_error() {
        let raw = r#"{"positive":[],"negative":[]}"#;
        let err = parse_sentiment_response(raw.to_string()).unwrap_err();
        assert!(matches!(err, AnalyticsError::Decode { .. }));
    }

    #[test]
    fn test_parse_malformed_keeps_raw_body() {
        let err = parse_sentiment_response("<html>gateway</html>".to_string()).unwrap_err();
        match err {
            AnalyticsError::Decode { raw, .. } => assert_eq!(raw, "<html>gateway</html>"),
            other => panic!("Expected Decode error, but got {other:?}"),
        }
    }
}
