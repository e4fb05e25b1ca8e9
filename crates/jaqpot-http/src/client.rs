// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Jaqpot API client
//!
//! This module implements the submission and dataset capabilities against the
//! Jaqpot REST API, plus API key issuance. Requests are signed with the
//! configured key pair through default headers.

use std::time::Duration;

use jaqpot_types::{CreateApiKeyRequest, Dataset, DatasetId, IssuedApiKey, PredictionRequest};
use reqwest::{
    Client, RequestBuilder, Response, StatusCode,
    header::{ACCEPT, HeaderValue, LOCATION},
};
use resource_client::{ClientError, FetchDataset, SubmissionResponse, SubmitPrediction};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::JaqpotConfig;

const USER_AGENT: &str = concat!("jaqpot-sdk/", env!("CARGO_PKG_VERSION"));

/// Jaqpot API client
#[derive(Debug, Clone)]
pub struct JaqpotHttpClient {
    client: Client,
    config: JaqpotConfig,
}

/// Errors specific to the Jaqpot HTTP client
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum JaqpotHttpError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error response
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Credentials were rejected
    #[error("Authentication failed: {status} - {message}")]
    Unauthorized { status: u16, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Timeout error
    #[error("Request timeout")]
    Timeout { seconds: u64 },
}

impl From<JaqpotHttpError> for ClientError {
    fn from(value: JaqpotHttpError) -> Self {
        match value {
            JaqpotHttpError::Http(error) => ClientError::Http {
                message: error.to_string(),
            },
            JaqpotHttpError::Json(error) => ClientError::InvalidResponse {
                message: error.to_string(),
            },
            JaqpotHttpError::ApiError { status, message } => ClientError::UnexpectedStatus {
                status,
                body: message,
            },
            JaqpotHttpError::Unauthorized { status, message } => ClientError::Authentication {
                message: format!("{status}: {message}"),
            },
            JaqpotHttpError::Config(message) => ClientError::Configuration { message },
            JaqpotHttpError::Timeout { seconds } => ClientError::Timeout {
                timeout_seconds: seconds,
            },
        }
    }
}

impl JaqpotHttpClient {
    /// Create a new Jaqpot API client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client cannot
    /// be created
    pub fn new(config: JaqpotConfig) -> Result<Self, ClientError> {
        config.validate()?;

        let mut headers = config.credentials.signing_headers()?;
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ClientError::http(format!("Failed to create HTTP client: {e}")))?;

        info!(
            base_url = %config.base_url,
            timeout_seconds = config.timeout_seconds,
            "created Jaqpot client"
        );

        Ok(Self { client, config })
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &JaqpotConfig {
        &self.config
    }

    /// Issue a new API key for the authenticated user
    ///
    /// # Errors
    ///
    /// Returns an authentication error if the current credentials are rejected,
    /// or a transport error if the request fails
    #[instrument(skip(self, request), fields(expiration = %request.expiration_time))]
    pub async fn create_api_key(
        &self,
        request: &CreateApiKeyRequest,
    ) -> Result<IssuedApiKey, ClientError> {
        Ok(self.issue_api_key(request).await?)
    }

    async fn issue_api_key(
        &self,
        request: &CreateApiKeyRequest,
    ) -> Result<IssuedApiKey, JaqpotHttpError> {
        let url = self.endpoint("v1/user/api-keys")?;
        debug!(url = %url, "requesting new API key");

        let response = self.send(self.client.post(url).json(request)).await?;
        let status = response.status();

        if status.is_success() {
            let bytes = response.bytes().await?;
            let issued: IssuedApiKey = serde_json::from_slice(&bytes)?;
            info!(
                client_key = issued.client_key.as_deref().unwrap_or("<none>"),
                "issued new API key"
            );
            return Ok(issued);
        }

        Err(Self::status_error(status, response).await)
    }

    async fn post_prediction(
        &self,
        request: &PredictionRequest,
    ) -> Result<SubmissionResponse, JaqpotHttpError> {
        let url = self.endpoint(&format!("v1/models/{}/predict", request.model_id()))?;
        debug!(url = %url, rows = request.rows().len(), "submitting prediction");

        let response = self
            .send(self.client.post(url).json(&request.body()))
            .await?;
        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?;

        if status.is_success() {
            debug!(
                status = status.as_u16(),
                location = location.as_deref(),
                "prediction accepted"
            );
        } else {
            warn!(status = status.as_u16(), "prediction submission rejected");
        }

        Ok(SubmissionResponse::new(
            status.as_u16(),
            location,
            Some(body.to_vec()),
        ))
    }

    async fn get_dataset(&self, id: DatasetId) -> Result<Option<Dataset>, JaqpotHttpError> {
        let url = self.endpoint(&format!("v1/datasets/{id}"))?;

        let response = self.send(self.client.get(url)).await?;
        let status = response.status();

        match status {
            StatusCode::NOT_FOUND | StatusCode::NO_CONTENT => {
                debug!(dataset_id = %id, status = status.as_u16(), "no dataset body");
                Ok(None)
            }
            status if status.is_success() => {
                let bytes = response.bytes().await?;
                if bytes.iter().all(u8::is_ascii_whitespace) {
                    debug!(dataset_id = %id, "empty dataset body");
                    return Ok(None);
                }
                let dataset: Option<Dataset> = serde_json::from_slice(&bytes)?;
                Ok(dataset)
            }
            status => Err(Self::status_error(status, response).await),
        }
    }

    /// Send a request, mapping client-side timeouts to a dedicated error
    async fn send(&self, request: RequestBuilder) -> Result<Response, JaqpotHttpError> {
        request.send().await.map_err(|e| {
            if e.is_timeout() {
                JaqpotHttpError::Timeout {
                    seconds: self.config.timeout_seconds,
                }
            } else {
                JaqpotHttpError::Http(e)
            }
        })
    }

    async fn status_error(status: StatusCode, response: Response) -> JaqpotHttpError {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                warn!(status = status.as_u16(), "Jaqpot rejected the credentials");
                JaqpotHttpError::Unauthorized {
                    status: status.as_u16(),
                    message,
                }
            }
            status => {
                warn!("Jaqpot API error: {} - {}", status.as_u16(), message);
                JaqpotHttpError::ApiError {
                    status: status.as_u16(),
                    message,
                }
            }
        }
    }

    /// Resolve an API path against the configured base URL
    fn endpoint(&self, path: &str) -> Result<Url, JaqpotHttpError> {
        // Ensure base URL ends with slash so joining keeps any base path
        let mut base_url = self.config.base_url.clone();
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }
        base_url
            .join(path)
            .map_err(|e| JaqpotHttpError::Config(format!("Invalid base URL: {e}")))
    }
}

impl SubmitPrediction for JaqpotHttpClient {
    #[instrument(skip(self, request), fields(model_id = %request.model_id()))]
    async fn submit(&self, request: &PredictionRequest) -> Result<SubmissionResponse, ClientError> {
        Ok(self.post_prediction(request).await?)
    }
}

impl FetchDataset for JaqpotHttpClient {
    #[instrument(skip(self), fields(dataset_id = %id))]
    async fn fetch_dataset(&self, id: DatasetId) -> Result<Option<Dataset>, ClientError> {
        Ok(self.get_dataset(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use crate::credentials::Credentials;

    use super::*;

    fn client_for(base_url: &str) -> JaqpotHttpClient {
        let config = JaqpotConfig::new(Credentials::new("key", "secret").unwrap())
            .with_base_url(Url::parse(base_url).unwrap());
        JaqpotHttpClient::new(config).unwrap()
    }

    #[test]
    fn client_creation_invalid_config() {
        let config = JaqpotConfig::new(Credentials::new("key", "secret").unwrap()).with_timeout(0);

        let result = JaqpotHttpClient::new(config);
        assert!(matches!(result, Err(ClientError::Configuration { .. })));
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let client = client_for("http://localhost:8080/api");
        assert_eq!(
            client.endpoint("v1/datasets/7").unwrap().as_str(),
            "http://localhost:8080/api/v1/datasets/7"
        );

        let client = client_for("https://api.jaqpot.org");
        assert_eq!(
            client.endpoint("v1/models/1908/predict").unwrap().as_str(),
            "https://api.jaqpot.org/v1/models/1908/predict"
        );
    }

    #[test]
    fn error_conversion() {
        let error: ClientError = JaqpotHttpError::ApiError {
            status: 500,
            message: "boom".to_string(),
        }
        .into();
        assert!(matches!(
            error,
            ClientError::UnexpectedStatus { status: 500, .. }
        ));

        let error: ClientError = JaqpotHttpError::Unauthorized {
            status: 403,
            message: "forbidden".to_string(),
        }
        .into();
        assert!(matches!(error, ClientError::Authentication { .. }));

        let error: ClientError = JaqpotHttpError::Timeout { seconds: 30 }.into();
        assert!(matches!(
            error,
            ClientError::Timeout {
                timeout_seconds: 30
            }
        ));
    }
}
