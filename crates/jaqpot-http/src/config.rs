// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Client configuration
//!
//! The configuration is an explicit value handed to the client at construction,
//! so several clients with different targets can coexist in one process.

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use resource_client::ClientError;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::credentials::Credentials;

/// Public Jaqpot API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.jaqpot.org";

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const MAX_TIMEOUT_SECONDS: u64 = 300;
const CONFIG_FILE_STEM: &str = "jaqpot";
const ENV_PREFIX: &str = "JAQPOT";

/// Configuration for the Jaqpot HTTP client
#[derive(Debug, Clone)]
pub struct JaqpotConfig {
    /// Base URL of the service
    pub base_url: Url,
    /// API key pair used to sign requests
    pub credentials: Credentials,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

/// Configuration as read from files and the environment, before validation
#[derive(Debug, Deserialize)]
struct RawConfig {
    host: String,
    api_key: Option<String>,
    api_secret: Option<String>,
    timeout_seconds: u64,
}

impl JaqpotConfig {
    /// Create a configuration targeting the public service
    pub fn new(credentials: Credentials) -> Self {
        Self {
            base_url: default_base_url(),
            credentials,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    /// Target a different deployment
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL is not an http(s) URL or the
    /// timeout is outside 1-300 seconds
    pub fn validate(&self) -> Result<(), ClientError> {
        if !matches!(self.base_url.scheme(), "http" | "https") {
            return Err(ClientError::config(format!(
                "Base URL must use http or https, got '{}'",
                self.base_url
            )));
        }

        if self.base_url.cannot_be_a_base() {
            return Err(ClientError::config(format!(
                "Base URL cannot be used as a base: '{}'",
                self.base_url
            )));
        }

        if self.timeout_seconds == 0 || self.timeout_seconds > MAX_TIMEOUT_SECONDS {
            return Err(ClientError::config(format!(
                "Invalid timeout: {} seconds (must be 1-{MAX_TIMEOUT_SECONDS})",
                self.timeout_seconds
            )));
        }

        Ok(())
    }

    /// Load configuration from `jaqpot.*` in the working directory and the environment
    ///
    /// Sources, later ones overriding earlier ones:
    /// 1. Default values (public host, 30 second timeout)
    /// 2. Optional `jaqpot.{toml,json,yaml,...}` file
    /// 3. `JAQPOT_HOST`, `JAQPOT_API_KEY`, `JAQPOT_API_SECRET`, `JAQPOT_TIMEOUT_SECONDS`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a source cannot be read, the credentials
    /// are missing or the resulting configuration is invalid
    pub fn load() -> Result<Self, ClientError> {
        Self::load_with_file(None)
    }

    /// Load configuration, reading an explicit file instead of `jaqpot.*`
    ///
    /// When `file` is given it must exist.
    ///
    /// # Errors
    ///
    /// Same as [`JaqpotConfig::load`]
    pub fn load_with_file(file: Option<&Path>) -> Result<Self, ClientError> {
        let raw = read_sources(file)
            .map_err(|e| ClientError::config(format!("failed to load configuration: {e}")))?;
        Self::try_from(raw)
    }
}

fn read_sources(file: Option<&Path>) -> Result<RawConfig, ConfigError> {
    let file_source = match file {
        Some(path) => {
            debug!(path = %path.display(), "reading Jaqpot configuration file");
            File::from(path).required(true)
        }
        None => File::with_name(CONFIG_FILE_STEM).required(false),
    };

    Config::builder()
        .set_default("host", DEFAULT_BASE_URL)?
        .set_default("timeout_seconds", DEFAULT_TIMEOUT_SECONDS)?
        .add_source(file_source)
        .add_source(Environment::with_prefix(ENV_PREFIX))
        .build()?
        .try_deserialize()
}

impl TryFrom<RawConfig> for JaqpotConfig {
    type Error = ClientError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let base_url = Url::parse(&raw.host)
            .map_err(|e| ClientError::config(format!("Invalid host '{}': {e}", raw.host)))?;

        let api_key = raw
            .api_key
            .ok_or_else(|| ClientError::config("API key is not configured (JAQPOT_API_KEY)"))?;
        let api_secret = raw.api_secret.ok_or_else(|| {
            ClientError::config("API secret is not configured (JAQPOT_API_SECRET)")
        })?;

        let config = Self {
            base_url,
            credentials: Credentials::new(api_key, api_secret)?,
            timeout_seconds: raw.timeout_seconds,
        };
        config.validate()?;
        Ok(config)
    }
}

fn default_base_url() -> Url {
    // Static URL is safe - a compile-time constant that always parses
    Url::parse(DEFAULT_BASE_URL).expect("default Jaqpot URL is valid")
}
