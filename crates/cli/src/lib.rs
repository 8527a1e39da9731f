//! # `crmtext` CLI Library Crate
//!
//! Runs the workflow activities from the command line, standing in for the
//! CRM host. Results are returned as JSON so they can be piped into other
//! tools.

pub mod config;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use crmtext::{
    ActivityContext, AnalyzeSentimentActivity, IndexEmailActivity, IndexEmailInputs,
    SentimentInputs, TextAnalyticsClient, TextAnalyticsClientBuilder,
};
use serde_json::{json, Value};
use std::io::Read;
use tracing::info;

use self::config::AppConfig;

// --- CLI Argument Structs ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a YAML config file. Defaults to `crmtext.yml` if present.
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Correlation id attached to logs and errors.
    #[arg(long, global = true, default_value = "cli")]
    pub correlation_id: String,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score the sentiment of a text
    Sentiment(SentimentArgs),
    /// Add a document to the text index
    Index(IndexArgs),
}

#[derive(Args, Debug)]
pub struct SentimentArgs {
    /// The text to analyze. Read from stdin when omitted.
    #[arg(long)]
    pub text: Option<String>,
    /// Print the positive and negative breakdowns as well.
    #[arg(long)]
    pub detailed: bool,
}

#[derive(Args, Debug)]
pub struct IndexArgs {
    /// The document body. Read from stdin when omitted.
    #[arg(long)]
    pub content: Option<String>,
    #[arg(long)]
    pub subject: String,
    /// The record id the document belongs to.
    #[arg(long)]
    pub reference: String,
    /// Overrides the configured index name.
    #[arg(long)]
    pub index: Option<String>,
}

// --- Public Entrypoint ---

/// Executes the parsed command and returns its JSON result.
pub async fn run(cli: Cli, config: AppConfig) -> Result<Value> {
    let ctx = ActivityContext {
        correlation_id: cli.correlation_id,
        initiating_user_id: "cli".to_string(),
        ..Default::default()
    };

    match cli.command {
        Commands::Sentiment(args) => handle_sentiment(&ctx, args, &config).await,
        Commands::Index(args) => handle_index(&ctx, args, &config).await,
    }
}

// --- Command Handlers ---

async fn handle_sentiment(
    ctx: &ActivityContext,
    args: SentimentArgs,
    config: &AppConfig,
) -> Result<Value> {
    let text = text_or_stdin(args.text)?;
    let client = build_client(config)?;

    if args.detailed {
        info!("Requesting detailed sentiment");
        let response = client.analyze_sentiment_detailed(&text).await?;
        return Ok(serde_json::to_value(response)?);
    }

    let outputs = AnalyzeSentimentActivity::new(client)
        .execute(ctx, SentimentInputs { text_input: text })
        .await?;

    // Same number rendering as the detailed output's `aggregate.score`.
    let score = serde_json::to_value(outputs.score)?;
    Ok(json!({
        "sentiment": outputs.sentiment,
        "score": score,
    }))
}

async fn handle_index(ctx: &ActivityContext, args: IndexArgs, config: &AppConfig) -> Result<Value> {
    let content = text_or_stdin(args.content)?;
    let mut config = config.clone();
    if let Some(index) = args.index {
        config.index_name = index;
    }
    let client = build_client(&config)?;

    let outputs = IndexEmailActivity::new(client)
        .execute(
            ctx,
            IndexEmailInputs {
                content,
                subject: args.subject,
                email_id: args.reference,
            },
        )
        .await?;

    Ok(serde_json::to_value(outputs.response)?)
}

// --- Helpers ---

fn build_client(config: &AppConfig) -> Result<TextAnalyticsClient> {
    TextAnalyticsClientBuilder::from_config(config.client_config())
        .build()
        .context("Failed to build text analytics client")
}

fn text_or_stdin(text: Option<String>) -> Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read input from stdin")?;
            Ok(buffer)
        }
    }
}
