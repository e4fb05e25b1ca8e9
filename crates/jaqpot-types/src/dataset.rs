// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Dataset records and identifiers
//!
//! A dataset is the remote service's record of one prediction job. It is created
//! server-side when a submission is accepted, moves through non-terminal statuses
//! while the model executes, and settles on exactly one terminal status.

use std::{fmt, num::ParseIntError, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a dataset on the prediction service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetId(i64);

impl DatasetId {
    /// Wrap a raw dataset identifier
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw identifier value
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for DatasetId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for DatasetId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a model hosted on the prediction service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(i64);

impl ModelId {
    /// Wrap a raw model identifier
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw identifier value
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for ModelId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for ModelId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DatasetStatus {
    /// Accepted by the service, not yet picked up
    Created,
    /// The model is running
    Executing,
    /// Finished with a result
    Success,
    /// Finished without a result
    Failure,
    /// A status this SDK does not know about, treated as still in progress
    #[serde(other)]
    Unknown,
}

impl DatasetStatus {
    /// Whether no further transitions can happen from this status
    pub fn is_terminal(self) -> bool {
        matches!(self, DatasetStatus::Success | DatasetStatus::Failure)
    }

    /// Wire name of the status
    pub fn as_str(self) -> &'static str {
        match self {
            DatasetStatus::Created => "CREATED",
            DatasetStatus::Executing => "EXECUTING",
            DatasetStatus::Success => "SUCCESS",
            DatasetStatus::Failure => "FAILURE",
            DatasetStatus::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for DatasetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DatasetType {
    /// Input rows submitted for prediction
    Prediction,
    /// Any other dataset kind
    #[serde(other)]
    Other,
}

/// Layout of the dataset entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    /// Entries are an ordered array of rows
    Array,
    /// Any other entry layout
    #[serde(other)]
    Other,
}

/// Remote record of one prediction job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Dataset identifier
    pub id: DatasetId,
    /// Current lifecycle status
    pub status: DatasetStatus,
    /// Kind of dataset
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub dataset_type: Option<DatasetType>,
    /// Layout of the entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<EntryType>,
    /// Model the dataset was submitted to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<ModelId>,
    /// Rows that were submitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Vec<serde_json::Value>>,
    /// Prediction output, opaque to the SDK
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    /// Why the prediction failed, when it did
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    /// When the dataset was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// When execution started
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executed_at: Option<DateTime<Utc>>,
    /// When execution finished
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_finished_at: Option<DateTime<Utc>>,
}

impl Dataset {
    /// Create a dataset record with only an id and a status
    pub fn new(id: DatasetId, status: DatasetStatus) -> Self {
        Self {
            id,
            status,
            dataset_type: None,
            entry_type: None,
            model_id: None,
            input: None,
            result: None,
            failure_reason: None,
            created_at: None,
            executed_at: None,
            execution_finished_at: None,
        }
    }

    /// Attach a prediction output
    #[must_use]
    pub fn with_result(mut self, result: serde_json::Value) -> Self {
        self.result = Some(result);
        self
    }

    /// Attach a failure reason
    #[must_use]
    pub fn with_failure_reason(mut self, reason: impl Into<String>) -> Self {
        self.failure_reason = Some(reason.into());
        self
    }

    /// Whether the dataset reached a terminal status
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Whether the prediction completed successfully
    pub fn is_success(&self) -> bool {
        self.status == DatasetStatus::Success
    }

    /// Whether the prediction failed
    pub fn is_failure(&self) -> bool {
        self.status == DatasetStatus::Failure
    }

    /// Prediction output, if any
    pub fn payload(&self) -> Option<&serde_json::Value> {
        self.result.as_ref()
    }
}
