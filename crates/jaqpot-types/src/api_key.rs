// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! API key issuance payloads

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How long a newly issued API key stays valid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiKeyExpiration {
    /// Three months from issuance
    #[default]
    ThreeMonths,
    /// Six months from issuance
    SixMonths,
}

impl ApiKeyExpiration {
    /// Wire name of the expiration
    pub fn as_str(self) -> &'static str {
        match self {
            ApiKeyExpiration::ThreeMonths => "THREE_MONTHS",
            ApiKeyExpiration::SixMonths => "SIX_MONTHS",
        }
    }
}

impl fmt::Display for ApiKeyExpiration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an expiration name is not recognized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown API key expiration '{0}', expected three-months or six-months")]
pub struct ParseExpirationError(String);

impl FromStr for ApiKeyExpiration {
    type Err = ParseExpirationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "three-months" | "3m" => Ok(Self::ThreeMonths),
            "six-months" | "6m" => Ok(Self::SixMonths),
            _ => Err(ParseExpirationError(s.to_string())),
        }
    }
}

/// Request body for issuing a new API key
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApiKeyRequest {
    /// Free-form note stored with the key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Validity period
    pub expiration_time: ApiKeyExpiration,
}

impl CreateApiKeyRequest {
    /// Request a key with the default three month validity
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a note
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Choose the validity period
    #[must_use]
    pub fn with_expiration(mut self, expiration: ApiKeyExpiration) -> Self {
        self.expiration_time = expiration;
        self
    }
}

/// Credentials returned by the service for a newly issued key
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedApiKey {
    /// Public key part
    pub client_key: Option<String>,
    /// Secret part, only ever returned once
    pub client_secret: Option<String>,
}

impl fmt::Debug for IssuedApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedApiKey")
            .field("client_key", &self.client_key)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
