// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Jaqpot CLI
//!
//! Submit rows to a Jaqpot model, wait for datasets and issue API keys from the
//! command line. Credentials come from `jaqpot.*` or `JAQPOT_*` variables.

mod input;
mod shutdown;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jaqpot_http::JaqpotConfig;
use jaqpot_types::{ApiKeyExpiration, CreateApiKeyRequest, DatasetId, ModelId};
use prediction::{
    CancellationToken, DEFAULT_INTERVAL_MS, DEFAULT_MAX_ATTEMPTS, JaqpotClient, PollPolicy,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Jaqpot prediction CLI
#[derive(Debug, Parser)]
#[command(name = "jaqpot")]
#[command(author, version, about = "CLI for the Jaqpot prediction service", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./jaqpot.* when present)
    #[arg(long, short, env = "JAQPOT_CONFIG")]
    config: Option<PathBuf>,

    /// Maximum number of dataset fetches while waiting
    #[arg(long, env = "JAQPOT_MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Wait between dataset fetches in milliseconds
    #[arg(long, env = "JAQPOT_POLL_INTERVAL_MS", default_value_t = DEFAULT_INTERVAL_MS)]
    interval_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Submit rows and wait for the prediction result
    Predict {
        /// Model to run
        #[arg(long)]
        model_id: ModelId,

        /// JSON file with one object or an array of objects, `-` for stdin
        #[arg(long, short, default_value = "-")]
        input: String,
    },

    /// Submit rows and print the created dataset id without waiting
    Submit {
        /// Model to run
        #[arg(long)]
        model_id: ModelId,

        /// JSON file with one object or an array of objects, `-` for stdin
        #[arg(long, short, default_value = "-")]
        input: String,
    },

    /// Wait for a previously submitted dataset
    Wait {
        /// Dataset to wait for
        dataset_id: DatasetId,
    },

    /// Issue a new API key for the current credentials
    CreateApiKey {
        /// Note stored with the key
        #[arg(long)]
        note: Option<String>,

        /// Validity period (three-months, six-months)
        #[arg(long, default_value = "three-months")]
        expiration: ApiKeyExpiration,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = JaqpotConfig::load_with_file(cli.config.as_deref())
        .context("failed to load Jaqpot configuration")?;
    let policy = PollPolicy::default()
        .with_max_attempts(cli.max_attempts)
        .with_interval(Duration::from_millis(cli.interval_ms));
    let client = JaqpotClient::with_config_and_policy(config, policy)?;

    let cancel = CancellationToken::new();
    tokio::spawn(shutdown::cancel_on_signal(cancel.clone()));

    match cli.command {
        Commands::Predict { model_id, input } => {
            let rows = input::read_rows(&input)?;
            info!(model_id = %model_id, rows = rows.len(), "running prediction");

            let dataset = client
                .predict_with_cancellation(model_id, rows, &cancel)
                .await?;
            println!("{}", serde_json::to_string_pretty(&dataset)?);
        }
        Commands::Submit { model_id, input } => {
            let rows = input::read_rows(&input)?;
            let dataset_id = client.submit(model_id, rows).await?;
            info!(dataset_id = %dataset_id, "prediction submitted");
            println!("{dataset_id}");
        }
        Commands::Wait { dataset_id } => {
            let dataset = client
                .await_dataset_with_cancellation(dataset_id, &cancel)
                .await?;
            println!("{}", serde_json::to_string_pretty(&dataset)?);
        }
        Commands::CreateApiKey { note, expiration } => {
            let mut request = CreateApiKeyRequest::new().with_expiration(expiration);
            if let Some(note) = note {
                request = request.with_note(note);
            }
            let issued = client.create_api_key(&request).await?;
            info!(expiration = %expiration, "API key issued");
            println!("{}", serde_json::to_string_pretty(&issued)?);
        }
    }

    Ok(())
}
