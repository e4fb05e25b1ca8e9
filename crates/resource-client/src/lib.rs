// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Capability traits for the Jaqpot remote resources
//!
//! The prediction workflow only needs two things from the remote service: a way
//! to submit rows to a model, and a way to fetch a dataset by id. This crate
//! describes both as narrow traits so the orchestration logic can run against
//! the HTTP implementation in production and against in-memory fakes in tests.
//!
//! # Core Abstractions
//!
//! - **`SubmitPrediction`**: submits a [`PredictionRequest`] and reports the raw outcome
//! - **`FetchDataset`**: fetches a [`Dataset`] by id, `None` when the service has no body for it
//! - **`ClientError`**: transport-level failures shared by all implementations

use jaqpot_types::{Dataset, DatasetId, PredictionRequest};
use thiserror::Error;

pub mod submission;

pub use submission::SubmissionResponse;

/// Submits prediction requests to the remote service
pub trait SubmitPrediction: Send + Sync {
    /// Submit rows for prediction
    ///
    /// A non-success HTTP status is not an error at this level: it is reported in
    /// the returned [`SubmissionResponse`] so the caller can classify it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be sent or the response could
    /// not be read
    fn submit(
        &self,
        request: &PredictionRequest,
    ) -> impl Future<Output = Result<SubmissionResponse, ClientError>> + Send;
}

/// Fetches datasets from the remote service
pub trait FetchDataset: Send + Sync {
    /// Fetch a dataset by id
    ///
    /// # Returns
    ///
    /// * `Ok(Some(dataset))` if the service returned the dataset
    /// * `Ok(None)` if the service returned no body for it
    /// * `Err(error)` if the request failed
    ///
    /// # Errors
    ///
    /// Returns an error on network failures, undecodable bodies or unexpected
    /// response statuses
    fn fetch_dataset(
        &self,
        id: DatasetId,
    ) -> impl Future<Output = Result<Option<Dataset>, ClientError>> + Send;
}

/// Transport-level errors raised by resource clients
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {message}")]
    Http { message: String },

    /// Authentication failed
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Invalid response format
    #[error("Invalid response format: {message}")]
    InvalidResponse { message: String },

    /// The service answered with a status the client does not handle
    #[error("Unexpected response status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Network timeout
    #[error("Request timeout after {timeout_seconds} seconds")]
    Timeout { timeout_seconds: u64 },
}

impl ClientError {
    /// Create an HTTP error
    pub fn http<T: ToString>(message: T) -> Self {
        Self::Http {
            message: message.to_string(),
        }
    }

    /// Create an authentication error
    pub fn authentication<T: ToString>(message: T) -> Self {
        Self::Authentication {
            message: message.to_string(),
        }
    }

    /// Create an invalid response error
    pub fn invalid_response<T: ToString>(message: T) -> Self {
        Self::InvalidResponse {
            message: message.to_string(),
        }
    }

    /// Create a configuration error
    pub fn config<T: ToString>(message: T) -> Self {
        Self::Configuration {
            message: message.to_string(),
        }
    }

    /// HTTP status carried by this error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether retrying the same request could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Http { .. } | ClientError::Timeout { .. } => true,
            ClientError::UnexpectedStatus { status, .. } => {
                matches!(status, 408 | 429 | 500..=599)
            }
            _ => false,
        }
    }
}
