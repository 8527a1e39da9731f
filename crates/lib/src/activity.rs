//! # Workflow Activities
//!
//! Adapters shaped like the CRM workflow steps that call the analytics
//! service. The host supplies plain strings through `ActivityContext` and the
//! input structs, and reads the output structs back. Output fields stay
//! `None` when the step had nothing to send.

use crate::{
    errors::AnalyticsError, index::IndexResponse, sentiment::SentimentResult,
    types::TextAnalyticsClient,
};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{error, info, info_span, Instrument};

/// Identifiers the host attaches to one execution of a workflow step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityContext {
    pub activity_instance_id: String,
    pub workflow_instance_id: String,
    pub correlation_id: String,
    pub initiating_user_id: String,
}

/// A failed activity, tagged with the step name and correlation id.
#[derive(Error, Debug)]
#[error("{activity} failed (correlation id {correlation_id}): {source}")]
pub struct ActivityError {
    pub activity: &'static str,
    pub correlation_id: String,
    #[source]
    pub source: AnalyticsError,
}

#[derive(Debug, Clone, Default)]
pub struct SentimentInputs {
    pub text_input: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentimentOutputs {
    pub sentiment: Option<String>,
    pub score: Option<Decimal>,
}

impl From<SentimentResult> for SentimentOutputs {
    fn from(result: SentimentResult) -> Self {
        Self {
            sentiment: Some(result.sentiment),
            score: Some(result.score),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IndexEmailInputs {
    pub content: String,
    pub subject: String,
    /// The email record id, in its string form.
    pub email_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexEmailOutputs {
    pub response: Option<IndexResponse>,
}

/// Scores the sentiment of a text input.
#[derive(Debug, Clone)]
pub struct AnalyzeSentimentActivity {
    client: TextAnalyticsClient,
}

impl AnalyzeSentimentActivity {
    pub const NAME: &'static str = "AnalyzeSentiment";

    pub fn new(client: TextAnalyticsClient) -> Self {
        Self { client }
    }

    pub async fn execute(
        &self,
        ctx: &ActivityContext,
        inputs: SentimentInputs,
    ) -> Result<SentimentOutputs, ActivityError> {
        let span = activity_span(Self::NAME, ctx);
        async {
            log_entry(Self::NAME, ctx);
            let outcome = self.client.analyze_sentiment(&inputs.text_input).await;
            finish(Self::NAME, ctx, outcome)
                .map(|result| result.map(SentimentOutputs::from).unwrap_or_default())
        }
        .instrument(span)
        .await
    }
}

/// Adds an email body to the configured text index.
#[derive(Debug, Clone)]
pub struct IndexEmailActivity {
    client: TextAnalyticsClient,
}

impl IndexEmailActivity {
    pub const NAME: &'static str = "IndexEmail";

    pub fn new(client: TextAnalyticsClient) -> Self {
        Self { client }
    }

    pub async fn execute(
        &self,
        ctx: &ActivityContext,
        inputs: IndexEmailInputs,
    ) -> Result<IndexEmailOutputs, ActivityError> {
        let span = activity_span(Self::NAME, ctx);
        async {
            log_entry(Self::NAME, ctx);
            let outcome = self
                .client
                .index_document(&inputs.content, &inputs.subject, &inputs.email_id)
                .await;
            finish(Self::NAME, ctx, outcome).map(|response| IndexEmailOutputs { response })
        }
        .instrument(span)
        .await
    }
}

fn activity_span(activity: &'static str, ctx: &ActivityContext) -> tracing::Span {
    info_span!("activity", activity = activity, correlation_id = %ctx.correlation_id)
}

fn log_entry(activity: &str, ctx: &ActivityContext) {
    info!(
        "Entered {activity}.execute(), Activity Instance Id: {}, Workflow Instance Id: {}, Initiating User: {}",
        ctx.activity_instance_id, ctx.workflow_instance_id, ctx.initiating_user_id
    );
}

fn finish<T>(
    activity: &'static str,
    ctx: &ActivityContext,
    outcome: Result<T, AnalyticsError>,
) -> Result<T, ActivityError> {
    match outcome {
        Ok(value) => {
            info!("Exiting {activity}.execute(), Correlation Id: {}", ctx.correlation_id);
            Ok(value)
        }
        Err(source) => {
            error!("{activity} failed: {source}");
            Err(ActivityError {
                activity,
                correlation_id: ctx.correlation_id.clone(),
                source,
            })
        }
    }
}
