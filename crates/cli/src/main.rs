//! # crmtext: Text Analytics from the Command Line
//!
//! A thin entrypoint; all logic lives in the `crmtext_cli` library crate.

use anyhow::Result;
use clap::Parser;
use crmtext_cli::{config::get_config, run, Cli};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout carries only the JSON result.
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive("crmtext=info".parse()?))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let config = get_config(cli.config.as_deref())?;

    match run(cli, config).await {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("[crmtext error] {e:?}");
            std::process::exit(1);
        }
    }
}
