// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Prediction requests
//!
//! A request pairs a model with an ordered sequence of rows. Each row is a flat
//! map from feature name to a scalar value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dataset::{DatasetType, EntryType, ModelId};

/// A single scalar feature value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    /// Boolean value
    Bool(bool),
    /// Numeric value
    Number(serde_json::Number),
    /// Text value
    Text(String),
}

impl FeatureValue {
    /// Create a numeric value from a float, `None` for NaN or infinities
    pub fn float(value: f64) -> Option<Self> {
        serde_json::Number::from_f64(value).map(Self::Number)
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FeatureValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FeatureValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<i32> for FeatureValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u32> for FeatureValue {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

/// One input row: feature name to value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(BTreeMap<String, FeatureValue>);

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a feature, builder style
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FeatureValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a feature, returning the previous value
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<FeatureValue>,
    ) -> Option<FeatureValue> {
        self.0.insert(name.into(), value.into())
    }

    /// Look up a feature
    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.0.get(name)
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the row has no features
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate features in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FeatureValue)> {
        self.0.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<FeatureValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Rows to run through a model
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    model_id: ModelId,
    rows: Vec<Row>,
}

impl PredictionRequest {
    /// Create a request for the given model
    pub fn new(model_id: impl Into<ModelId>, rows: Vec<Row>) -> Self {
        Self {
            model_id: model_id.into(),
            rows,
        }
    }

    /// Target model
    pub fn model_id(&self) -> ModelId {
        self.model_id
    }

    /// Input rows, in submission order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Dataset kind this request creates
    pub fn dataset_type(&self) -> DatasetType {
        DatasetType::Prediction
    }

    /// Entry layout of the submitted dataset
    pub fn entry_type(&self) -> EntryType {
        EntryType::Array
    }

    /// Wire body for the submission endpoint
    pub fn body(&self) -> PredictionBody<'_> {
        PredictionBody {
            dataset_type: self.dataset_type(),
            entry_type: self.entry_type(),
            input: &self.rows,
        }
    }
}

/// Serialized form of a prediction submission
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionBody<'a> {
    /// Dataset kind
    #[serde(rename = "type")]
    pub dataset_type: DatasetType,
    /// Entry layout
    pub entry_type: EntryType,
    /// Input rows
    pub input: &'a [Row],
}
