// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Main prediction orchestrator
//!
//! This module provides [`PredictionOrchestrator`], which drives one prediction
//! from submission to a terminal dataset: submit the rows, locate the created
//! dataset, poll it at a fixed interval and resolve the final status.

use std::time::Duration;

use jaqpot_types::{Dataset, DatasetId, DatasetStatus, ModelId, PredictionRequest, Row};
use resource_client::{FetchDataset, SubmitPrediction};
use tokio_util::sync::CancellationToken;
use tracing::{Span, debug, field, info, instrument, warn};
use uuid::Uuid;

use crate::{
    error::{FailureContext, PredictionError, PredictionResult, classify, parse_dataset_location},
    pacer::{Pacer, TokioPacer},
    policy::PollPolicy,
};

/// Prediction orchestrator
///
/// Holds the two remote capabilities and the poll policy. Calls share no mutable
/// state, so one orchestrator can serve concurrent predictions.
#[derive(Debug, Clone)]
pub struct PredictionOrchestrator<S, F, P = TokioPacer> {
    submitter: S,
    fetcher: F,
    pacer: P,
    policy: PollPolicy,
}

/// Progress of polling one dataset
#[derive(Debug)]
struct PollState<D> {
    dataset_id: DatasetId,
    attempts_made: u32,
    max_attempts: u32,
    delays: D,
}

impl<D: Iterator<Item = Duration>> PollState<D> {
    fn new(dataset_id: DatasetId, max_attempts: u32, delays: D) -> Self {
        Self {
            dataset_id,
            attempts_made: 0,
            max_attempts,
            delays,
        }
    }

    fn begin_attempt(&mut self) -> u32 {
        self.attempts_made += 1;
        self.attempts_made
    }

    /// Wait after the current non-terminal attempt
    fn next_delay(&mut self) -> Option<Duration> {
        self.delays.next()
    }

    fn budget_spent(&self) -> bool {
        self.attempts_made >= self.max_attempts
    }

    fn exhausted(&self) -> PredictionError {
        PredictionError::RetriesExhausted {
            dataset_id: self.dataset_id,
            attempts: self.attempts_made,
        }
    }
}

impl<S, F> PredictionOrchestrator<S, F, TokioPacer>
where
    S: SubmitPrediction,
    F: FetchDataset,
{
    /// Create an orchestrator with the default poll policy and tokio timer
    pub fn new(submitter: S, fetcher: F) -> Self {
        Self {
            submitter,
            fetcher,
            pacer: TokioPacer,
            policy: PollPolicy::default(),
        }
    }
}

impl<S, F, P> PredictionOrchestrator<S, F, P>
where
    S: SubmitPrediction,
    F: FetchDataset,
    P: Pacer,
{
    /// Replace the poll policy
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the policy is invalid
    pub fn with_policy(mut self, policy: PollPolicy) -> PredictionResult<Self> {
        policy.validate()?;
        self.policy = policy;
        Ok(self)
    }

    /// Replace the pacer used between poll attempts
    pub fn with_pacer<Q: Pacer>(self, pacer: Q) -> PredictionOrchestrator<S, F, Q> {
        PredictionOrchestrator {
            submitter: self.submitter,
            fetcher: self.fetcher,
            pacer,
            policy: self.policy,
        }
    }

    /// Current poll policy
    pub fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    /// Submission capability
    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    /// Dataset capability
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Pacer used between attempts
    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    /// Submit rows to a model and wait for the resulting dataset
    ///
    /// # Errors
    ///
    /// Returns the [`PredictionError`] kind matching the first failure: a rejected
    /// submission, a missing or malformed `Location`, a fetch without body, an
    /// exhausted attempt budget or a dataset that finished with FAILURE
    pub async fn predict(
        &self,
        model_id: impl Into<ModelId>,
        rows: Vec<Row>,
    ) -> PredictionResult<Dataset> {
        self.predict_with_cancellation(model_id, rows, &CancellationToken::new())
            .await
    }

    /// Same as [`predict`](Self::predict), aborting with
    /// [`PredictionError::Cancelled`] once `cancel` fires
    ///
    /// # Errors
    ///
    /// See [`predict`](Self::predict)
    pub async fn predict_with_cancellation(
        &self,
        model_id: impl Into<ModelId>,
        rows: Vec<Row>,
        cancel: &CancellationToken,
    ) -> PredictionResult<Dataset> {
        let request = PredictionRequest::new(model_id, rows);
        self.run(&request, cancel).await
    }

    /// Submit rows without waiting for the result
    ///
    /// # Errors
    ///
    /// Returns an error if the submission is rejected or its `Location` cannot be
    /// turned into a dataset id
    #[instrument(skip_all, fields(model_id, rows = rows.len(), request_id))]
    pub async fn submit(
        &self,
        model_id: impl Into<ModelId>,
        rows: Vec<Row>,
    ) -> PredictionResult<DatasetId> {
        let request = PredictionRequest::new(model_id, rows);

        let span = Span::current();
        span.record("model_id", field::display(request.model_id()));
        span.record("request_id", Uuid::new_v4().to_string());

        self.submit_request(&request, &CancellationToken::new())
            .await
    }

    /// Poll a previously submitted dataset until it settles
    ///
    /// # Errors
    ///
    /// Returns an error if a fetch has no body, the attempt budget runs out or the
    /// dataset finished with FAILURE
    pub async fn await_dataset(&self, dataset_id: DatasetId) -> PredictionResult<Dataset> {
        self.await_dataset_with_cancellation(dataset_id, &CancellationToken::new())
            .await
    }

    /// Same as [`await_dataset`](Self::await_dataset), aborting once `cancel` fires
    ///
    /// # Errors
    ///
    /// See [`await_dataset`](Self::await_dataset)
    #[instrument(skip(self, cancel), fields(dataset_id = %dataset_id, request_id))]
    pub async fn await_dataset_with_cancellation(
        &self,
        dataset_id: DatasetId,
        cancel: &CancellationToken,
    ) -> PredictionResult<Dataset> {
        Span::current().record("request_id", Uuid::new_v4().to_string());
        self.poll(dataset_id, cancel).await
    }

    #[instrument(skip(self, request, cancel), fields(
        model_id = %request.model_id(),
        rows = request.rows().len(),
        request_id
    ))]
    async fn run(
        &self,
        request: &PredictionRequest,
        cancel: &CancellationToken,
    ) -> PredictionResult<Dataset> {
        Span::current().record("request_id", Uuid::new_v4().to_string());

        let dataset_id = self.submit_request(request, cancel).await?;
        let dataset = self.poll(dataset_id, cancel).await?;

        info!(dataset_id = %dataset.id, "prediction completed");
        Ok(dataset)
    }

    async fn submit_request(
        &self,
        request: &PredictionRequest,
        cancel: &CancellationToken,
    ) -> PredictionResult<DatasetId> {
        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(PredictionError::cancelled(None)),
            response = self.submitter.submit(request) => response?,
        };

        if !response.is_success() {
            let error = classify(
                Some(response.status()),
                response.body(),
                FailureContext::Submission {
                    model_id: request.model_id(),
                },
            );
            warn!(status = response.status(), error = %error, "submission rejected");
            return Err(error);
        }

        let Some(location) = response.location() else {
            return Err(classify(
                Some(response.status()),
                response.body(),
                FailureContext::Location,
            ));
        };

        let dataset_id = parse_dataset_location(location)?;
        debug!(dataset_id = %dataset_id, location, "prediction submitted");
        Ok(dataset_id)
    }

    async fn poll(
        &self,
        dataset_id: DatasetId,
        cancel: &CancellationToken,
    ) -> PredictionResult<Dataset> {
        let mut state = PollState::new(dataset_id, self.policy.max_attempts, self.policy.delays());

        loop {
            let attempt = state.begin_attempt();

            let fetched = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(PredictionError::cancelled(Some(dataset_id))),
                fetched = self.fetcher.fetch_dataset(dataset_id) => fetched?,
            };

            let Some(dataset) = fetched else {
                warn!(dataset_id = %dataset_id, attempt, "dataset fetch returned no body");
                return Err(PredictionError::DatasetNotFound { dataset_id });
            };

            if dataset.is_terminal() {
                return resolve(dataset_id, dataset);
            }

            if let Some(delay) = state.next_delay() {
                debug!(
                    dataset_id = %dataset_id,
                    attempt,
                    status = %dataset.status,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    "dataset not ready"
                );

                tokio::select! {
                    biased;
                    () = cancel.cancelled() => return Err(PredictionError::cancelled(Some(dataset_id))),
                    () = self.pacer.pause(delay) => {}
                }
            }

            if state.budget_spent() {
                warn!(
                    dataset_id = %dataset_id,
                    attempts = state.attempts_made,
                    status = %dataset.status,
                    "dataset did not settle"
                );
                return Err(state.exhausted());
            }
        }
    }
}

fn resolve(dataset_id: DatasetId, dataset: Dataset) -> PredictionResult<Dataset> {
    match dataset.status {
        DatasetStatus::Failure => {
            warn!(
                dataset_id = %dataset_id,
                reason = dataset.failure_reason.as_deref(),
                "prediction failed"
            );
            Err(PredictionError::PredictionFailed {
                dataset_id,
                reason: dataset.failure_reason,
            })
        }
        _ => Ok(dataset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_state_counts_attempts_and_delays() {
        let policy = PollPolicy::default().with_max_attempts(3);
        let mut state = PollState::new(DatasetId::new(9), policy.max_attempts, policy.delays());

        assert_eq!(state.begin_attempt(), 1);
        assert!(state.next_delay().is_some());
        assert!(!state.budget_spent());
        assert_eq!(state.begin_attempt(), 2);
        assert!(state.next_delay().is_some());
        assert!(!state.budget_spent());
        assert_eq!(state.begin_attempt(), 3);
        assert!(state.next_delay().is_some());
        assert!(state.budget_spent());
        assert!(state.next_delay().is_none());

        match state.exhausted() {
            PredictionError::RetriesExhausted {
                dataset_id,
                attempts,
            } => {
                assert_eq!(dataset_id, DatasetId::new(9));
                assert_eq!(attempts, 3);
            }
            other => panic!("Expected RetriesExhausted, got {other:?}"),
        }
    }

    #[test]
    fn resolve_terminal_statuses() {
        let id = DatasetId::new(4);

        let ok = resolve(id, Dataset::new(id, DatasetStatus::Success)).unwrap();
        assert!(ok.is_success());

        let failed = Dataset::new(id, DatasetStatus::Failure).with_failure_reason("X");
        match resolve(id, failed).unwrap_err() {
            PredictionError::PredictionFailed { dataset_id, reason } => {
                assert_eq!(dataset_id, id);
                assert_eq!(reason.as_deref(), Some("X"));
            }
            other => panic!("Expected PredictionFailed, got {other:?}"),
        }
    }
}
