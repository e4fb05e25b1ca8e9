// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for prediction operations
//!
//! Every failure of a prediction call is reported as one [`PredictionError`] kind.
//! Remote rejections are mapped to a kind by [`classify`], a pure function over
//! the response status and body that can be exercised without a network.

use std::fmt;

use jaqpot_types::{DatasetId, ModelId};
use resource_client::ClientError;
use thiserror::Error;

/// Result type alias for prediction operations
pub type PredictionResult<T> = Result<T, PredictionError>;

/// Raw error body returned by the remote service
///
/// Kept as bytes so nothing is lost when the service answers with something
/// other than UTF-8 text. Displayed lossily.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorBody(Vec<u8>);

impl ErrorBody {
    /// Raw bytes of the body
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Whether the service sent no body at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Body decoded as UTF-8, replacing invalid sequences
    pub fn to_text(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }
}

impl From<&[u8]> for ErrorBody {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

impl From<Option<&[u8]>> for ErrorBody {
    fn from(value: Option<&[u8]>) -> Self {
        value.map(Self::from).unwrap_or_default()
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("<empty body>")
        } else {
            f.write_str(&String::from_utf8_lossy(&self.0))
        }
    }
}

/// Comprehensive error types for prediction operations
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum PredictionError {
    /// Submission rejected with 401, the credentials were not accepted
    #[error("Unauthenticated: {body}")]
    Unauthenticated { body: ErrorBody },

    /// Submission rejected with 403, the credentials lack access to the model
    #[error("Unauthorized: {body}")]
    Unauthorized { body: ErrorBody },

    /// Submission rejected with 404
    #[error("Model not found: {model_id}: {body}")]
    ModelNotFound { model_id: ModelId, body: ErrorBody },

    /// Submission rejected with any other status
    #[error("Prediction failed: {}", submission_detail(*.status, .body))]
    SubmissionFailed { status: Option<u16>, body: ErrorBody },

    /// The service broke its contract, for example by omitting the `Location` header
    #[error("Protocol violation: {message}")]
    ProtocolViolation { message: String },

    /// A dataset fetch returned no body
    #[error("Dataset not found: {dataset_id}")]
    DatasetNotFound { dataset_id: DatasetId },

    /// Every poll attempt observed a non-terminal status
    #[error("Maximum amount of retries reached: dataset {dataset_id} still running after {attempts} attempts")]
    RetriesExhausted { dataset_id: DatasetId, attempts: u32 },

    /// The dataset finished with status FAILURE
    #[error("Prediction failed: {}", .reason.as_deref().unwrap_or("no failure reason given"))]
    PredictionFailed {
        dataset_id: DatasetId,
        reason: Option<String>,
    },

    /// The caller cancelled the call before it resolved
    #[error("Prediction cancelled{}", .dataset_id.map(|id| format!(" while waiting for dataset {id}")).unwrap_or_default())]
    Cancelled { dataset_id: Option<DatasetId> },

    /// Invalid poll policy
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Request could not be sent or its response could not be read
    #[error(transparent)]
    Transport(#[from] ClientError),
}

fn submission_detail(status: Option<u16>, body: &ErrorBody) -> String {
    match status {
        Some(status) => format!("{body} (status {status})"),
        None => body.to_string(),
    }
}

/// What the caller was doing when the remote service answered unexpectedly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureContext {
    /// Submitting rows to a model
    Submission {
        /// Model the rows were submitted to
        model_id: ModelId,
    },
    /// Locating the dataset created by an accepted submission
    Location,
}

/// Map a remote answer to an error kind
///
/// Never fails: statuses without a dedicated kind fall back to
/// [`PredictionError::SubmissionFailed`] or [`PredictionError::ProtocolViolation`]
/// with the raw body attached.
pub fn classify(
    status: Option<u16>,
    body: Option<&[u8]>,
    context: FailureContext,
) -> PredictionError {
    let body = ErrorBody::from(body);
    match context {
        FailureContext::Submission { model_id } => match status {
            Some(401) => PredictionError::Unauthenticated { body },
            Some(403) => PredictionError::Unauthorized { body },
            Some(404) => PredictionError::ModelNotFound { model_id, body },
            status => PredictionError::SubmissionFailed { status, body },
        },
        FailureContext::Location => {
            let status = status.map_or_else(|| "unknown".to_string(), |s| s.to_string());
            PredictionError::ProtocolViolation {
                message: format!(
                    "submission accepted with status {status} but no Location header was returned: {body}"
                ),
            }
        }
    }
}

/// Extract the dataset id from the trailing path segment of a `Location` value
///
/// Accepts relative paths (`/datasets/42`) and absolute URLs; a query string,
/// fragment or single trailing slash is ignored.
///
/// # Errors
///
/// Returns [`PredictionError::ProtocolViolation`] if the segment is not a number
pub fn parse_dataset_location(location: &str) -> PredictionResult<DatasetId> {
    let path = location
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();
    let path = path.strip_suffix('/').unwrap_or(path);
    let segment = path.rsplit('/').next().unwrap_or_default();

    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PredictionError::protocol(format!(
            "Location '{location}' does not end with a numeric dataset id"
        )));
    }

    segment.parse::<i64>().map(DatasetId::new).map_err(|e| {
        PredictionError::protocol(format!("Location '{location}' has an invalid dataset id: {e}"))
    })
}

impl PredictionError {
    /// Create a protocol violation error
    pub fn protocol<T: ToString>(message: T) -> Self {
        Self::ProtocolViolation {
            message: message.to_string(),
        }
    }

    /// Create a configuration error
    pub fn config<T: ToString>(message: T) -> Self {
        Self::Configuration {
            message: message.to_string(),
        }
    }

    /// Create a cancellation error
    pub fn cancelled(dataset_id: Option<DatasetId>) -> Self {
        Self::Cancelled { dataset_id }
    }

    /// HTTP status behind this error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            PredictionError::Unauthenticated { .. } => Some(401),
            PredictionError::Unauthorized { .. } => Some(403),
            PredictionError::ModelNotFound { .. } => Some(404),
            PredictionError::SubmissionFailed { status, .. } => *status,
            PredictionError::Transport(error) => error.status_code(),
            _ => None,
        }
    }

    /// Dataset the failed call was working on, if it got that far
    pub fn dataset_id(&self) -> Option<DatasetId> {
        match self {
            PredictionError::DatasetNotFound { dataset_id }
            | PredictionError::RetriesExhausted { dataset_id, .. }
            | PredictionError::PredictionFailed { dataset_id, .. } => Some(*dataset_id),
            PredictionError::Cancelled { dataset_id } => *dataset_id,
            _ => None,
        }
    }

    /// Raw error body sent by the service, for rejected submissions
    pub fn body(&self) -> Option<&ErrorBody> {
        match self {
            PredictionError::Unauthenticated { body }
            | PredictionError::Unauthorized { body }
            | PredictionError::ModelNotFound { body, .. }
            | PredictionError::SubmissionFailed { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Check if this error indicates an authentication problem
    pub fn is_auth_error(&self) -> bool {
        match self {
            PredictionError::Unauthenticated { .. } | PredictionError::Unauthorized { .. } => true,
            PredictionError::Transport(error) => {
                matches!(error, ClientError::Authentication { .. })
            }
            _ => false,
        }
    }

    /// Check if this error was raised before the service accepted the submission
    pub fn is_submission_error(&self) -> bool {
        matches!(
            self,
            PredictionError::Unauthenticated { .. }
                | PredictionError::Unauthorized { .. }
                | PredictionError::ModelNotFound { .. }
                | PredictionError::SubmissionFailed { .. }
        )
    }

    /// Check if issuing the whole call again could succeed
    ///
    /// Only transport hiccups and exhausted polls qualify. The call itself never
    /// retries across kinds.
    pub fn is_retryable(&self) -> bool {
        match self {
            PredictionError::Transport(error) => error.is_retryable(),
            PredictionError::RetriesExhausted { .. } => true,
            _ => false,
        }
    }
}
