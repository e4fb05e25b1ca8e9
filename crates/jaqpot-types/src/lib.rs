// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared types for the Jaqpot prediction SDK
//!
//! This crate provides the domain types that are shared across the SDK crates:
//! prediction requests and their rows, the remote dataset record that a
//! prediction resolves to, and the API key issuance payloads.

pub mod api_key;
pub mod dataset;
pub mod request;

pub use api_key::{ApiKeyExpiration, CreateApiKeyRequest, IssuedApiKey, ParseExpirationError};
pub use dataset::{Dataset, DatasetId, DatasetStatus, DatasetType, EntryType, ModelId};
pub use request::{FeatureValue, PredictionBody, PredictionRequest, Row};
