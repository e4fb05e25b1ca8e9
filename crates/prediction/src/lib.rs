// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! # Prediction
//!
//! Submit rows to a Jaqpot model and wait for the computed dataset.
//!
//! The service computes predictions asynchronously: a submission creates a
//! dataset and answers with its `Location`, and the dataset has to be fetched
//! until it reaches SUCCESS or FAILURE. [`PredictionOrchestrator`] runs that
//! sequence with a bounded number of attempts and reports every failure as one
//! [`PredictionError`] kind.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use jaqpot_http::{Credentials, JaqpotConfig};
//! use jaqpot_types::Row;
//! use prediction::JaqpotClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = JaqpotConfig::new(Credentials::new("jq_key", "jq_secret")?);
//! let client = JaqpotClient::from_config(config)?;
//!
//! let rows = vec![Row::new().with("X1", "1").with("X2", "2")];
//! let dataset = client.predict(1908, rows).await?;
//!
//! println!("{:?}", dataset.payload());
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! The orchestrator is generic over the [`resource_client::SubmitPrediction`]
//! and [`resource_client::FetchDataset`] capabilities and over the [`Pacer`]
//! used between attempts, so the whole protocol can run against in-memory fakes
//! without waiting in real time.

pub mod client;
pub mod error;
pub mod orchestrator;
pub mod pacer;
pub mod policy;

pub use client::JaqpotClient;
pub use error::{
    ErrorBody, FailureContext, PredictionError, PredictionResult, classify, parse_dataset_location,
};
pub use orchestrator::PredictionOrchestrator;
pub use pacer::{Pacer, TokioPacer};
pub use policy::{DEFAULT_INTERVAL_MS, DEFAULT_MAX_ATTEMPTS, PollPolicy};
pub use tokio_util::sync::CancellationToken;
