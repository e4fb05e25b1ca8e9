// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Ready-made orchestrator over the Jaqpot HTTP API

use jaqpot_http::{JaqpotConfig, JaqpotHttpClient};
use jaqpot_types::{CreateApiKeyRequest, IssuedApiKey};

use crate::{
    error::PredictionResult, orchestrator::PredictionOrchestrator, pacer::TokioPacer,
    policy::PollPolicy,
};

/// Orchestrator talking to the Jaqpot REST API
pub type JaqpotClient = PredictionOrchestrator<JaqpotHttpClient, JaqpotHttpClient, TokioPacer>;

impl JaqpotClient {
    /// Build a client from an explicit configuration with the default poll policy
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn from_config(config: JaqpotConfig) -> PredictionResult<Self> {
        let http = JaqpotHttpClient::new(config)?;
        Ok(Self::new(http.clone(), http))
    }

    /// Build a client from `jaqpot.*` and `JAQPOT_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if no valid configuration can be assembled
    pub fn from_env() -> PredictionResult<Self> {
        Self::from_config(JaqpotConfig::load()?)
    }

    /// Build a client with a custom poll policy
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or the policy is invalid
    pub fn with_config_and_policy(
        config: JaqpotConfig,
        policy: PollPolicy,
    ) -> PredictionResult<Self> {
        Self::from_config(config)?.with_policy(policy)
    }

    /// Issue a new API key for the authenticated user
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected or the request fails
    pub async fn create_api_key(
        &self,
        request: &CreateApiKeyRequest,
    ) -> PredictionResult<IssuedApiKey> {
        Ok(self.submitter().create_api_key(request).await?)
    }
}

#[cfg(test)]
mod tests {
    use jaqpot_http::Credentials;

    use super::*;

    #[test]
    fn builds_from_explicit_config() {
        let config = JaqpotConfig::new(Credentials::new("key", "secret").unwrap());
        let client = JaqpotClient::from_config(config).unwrap();

        assert_eq!(client.policy(), &PollPolicy::default());
        assert_eq!(
            client.submitter().config().base_url.as_str(),
            "https://api.jaqpot.org/"
        );
    }

    #[test]
    fn rejects_invalid_policy() {
        let config = JaqpotConfig::new(Credentials::new("key", "secret").unwrap());
        let result =
            JaqpotClient::with_config_and_policy(config, PollPolicy::default().with_max_attempts(0));
        assert!(result.is_err());
    }
}
