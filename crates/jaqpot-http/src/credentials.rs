// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! API key pair used to sign requests

use std::fmt;

use reqwest::header::{HeaderMap, HeaderValue};
use resource_client::ClientError;

/// Header carrying the public key part
pub const API_KEY_HEADER: &str = "X-Api-Key";
/// Header carrying the secret key part
pub const API_SECRET_HEADER: &str = "X-Api-Secret";

/// API key and secret sent with every request
///
/// Both parts are guaranteed to contain at least one non-whitespace character.
/// The secret never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: Box<str>,
    api_secret: Box<str>,
}

impl Credentials {
    /// Create a credential pair
    ///
    /// # Errors
    ///
    /// Returns a configuration error if either part is empty or whitespace-only
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Result<Self, ClientError> {
        let api_key = non_blank(api_key.into(), "API key")?;
        let api_secret = non_blank(api_secret.into(), "API secret")?;
        Ok(Self {
            api_key,
            api_secret,
        })
    }

    /// The public key part
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The secret key part
    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }

    /// Headers that sign a request with this pair
    pub(crate) fn signing_headers(&self) -> Result<HeaderMap, ClientError> {
        let mut key = HeaderValue::from_str(&self.api_key)
            .map_err(|e| ClientError::config(format!("Invalid API key format: {e}")))?;
        key.set_sensitive(true);

        let mut secret = HeaderValue::from_str(&self.api_secret)
            .map_err(|e| ClientError::config(format!("Invalid API secret format: {e}")))?;
        secret.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);
        headers.insert(API_SECRET_HEADER, secret);
        Ok(headers)
    }
}

fn non_blank(value: String, what: &str) -> Result<Box<str>, ClientError> {
    if value.trim().is_empty() {
        return Err(ClientError::config(format!(
            "{what} cannot be empty or whitespace-only"
        )));
    }
    Ok(value.into_boxed_str())
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}
