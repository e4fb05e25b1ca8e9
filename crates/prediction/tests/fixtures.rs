// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0
#![allow(missing_docs, dead_code)]

//! Prediction test fixtures
//!
//! Scripted in-memory implementations of the remote capabilities and a pacer that
//! records the waits it was asked for instead of sleeping.

use std::{
    collections::VecDeque,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use jaqpot_types::{Dataset, DatasetId, DatasetStatus, PredictionRequest, Row};
use prediction::{Pacer, PredictionOrchestrator};
use resource_client::{ClientError, FetchDataset, SubmissionResponse, SubmitPrediction};
use serde_json::{Value, json};

pub const MODEL_ID: i64 = 1908;

pub fn sample_rows() -> Vec<Row> {
    vec![
        Row::new().with("X1", "1").with("X2", "2"),
        Row::new().with("X1", 3_i64).with("X2", true),
    ]
}

pub fn payload() -> Value {
    json!([{"Y": 0.87}, {"Y": 0.12}])
}

pub fn executing(id: i64) -> Dataset {
    Dataset::new(DatasetId::new(id), DatasetStatus::Executing)
}

pub fn success(id: i64) -> Dataset {
    Dataset::new(DatasetId::new(id), DatasetStatus::Success).with_result(payload())
}

pub fn failure(id: i64, reason: &str) -> Dataset {
    Dataset::new(DatasetId::new(id), DatasetStatus::Failure).with_failure_reason(reason)
}

/// Submitter answering every call with the same canned response
#[derive(Debug)]
pub struct ScriptedSubmitter {
    response: Result<SubmissionResponse, String>,
    requests: Mutex<Vec<PredictionRequest>>,
}

impl ScriptedSubmitter {
    pub fn accepted(location: &str) -> Self {
        Self::responding(SubmissionResponse::accepted(201, location))
    }

    pub fn rejected(status: u16, body: &str) -> Self {
        Self::responding(SubmissionResponse::rejected(status, body))
    }

    pub fn responding(response: SubmissionResponse) -> Self {
        Self {
            response: Ok(response),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<PredictionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl SubmitPrediction for ScriptedSubmitter {
    async fn submit(&self, request: &PredictionRequest) -> Result<SubmissionResponse, ClientError> {
        self.requests.lock().unwrap().push(request.clone());
        self.response.clone().map_err(ClientError::http)
    }
}

/// One scripted answer of the dataset capability
#[derive(Debug, Clone)]
pub enum FetchStep {
    Found(Dataset),
    Empty,
    Fails(u16),
}

/// Fetcher replaying a script, repeating the last step once the script runs out
#[derive(Debug)]
pub struct ScriptedFetcher {
    steps: Mutex<VecDeque<FetchStep>>,
    last: Mutex<Option<FetchStep>>,
    calls: AtomicUsize,
    requested: Mutex<Vec<DatasetId>>,
}

impl ScriptedFetcher {
    pub fn new(steps: impl IntoIterator<Item = FetchStep>) -> Self {
        Self {
            steps: Mutex::new(steps.into_iter().collect()),
            last: Mutex::new(None),
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Answer every fetch with the same dataset
    pub fn always(dataset: Dataset) -> Self {
        Self::new([FetchStep::Found(dataset)])
    }

    /// `k - 1` non-terminal answers followed by `last`
    pub fn after_executing(id: i64, k: usize, last: FetchStep) -> Self {
        let mut steps: Vec<_> = (1..k).map(|_| FetchStep::Found(executing(id))).collect();
        steps.push(last);
        Self::new(steps)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<DatasetId> {
        self.requested.lock().unwrap().clone()
    }
}

impl FetchDataset for ScriptedFetcher {
    async fn fetch_dataset(&self, id: DatasetId) -> Result<Option<Dataset>, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(id);

        let step = {
            let mut last = self.last.lock().unwrap();
            match self.steps.lock().unwrap().pop_front() {
                Some(step) => {
                    *last = Some(step.clone());
                    step
                }
                None => last.clone().unwrap_or(FetchStep::Empty),
            }
        };

        match step {
            FetchStep::Found(dataset) => Ok(Some(dataset)),
            FetchStep::Empty => Ok(None),
            FetchStep::Fails(status) => Err(ClientError::UnexpectedStatus {
                status,
                body: "scripted failure".to_string(),
            }),
        }
    }
}

/// Pacer that records requested waits and returns immediately
#[derive(Debug, Default)]
pub struct RecordingPacer {
    waits: Mutex<Vec<Duration>>,
}

impl RecordingPacer {
    pub fn waits(&self) -> Vec<Duration> {
        self.waits.lock().unwrap().clone()
    }
}

impl Pacer for RecordingPacer {
    async fn pause(&self, duration: Duration) {
        self.waits.lock().unwrap().push(duration);
    }
}

pub type TestOrchestrator = PredictionOrchestrator<ScriptedSubmitter, ScriptedFetcher, RecordingPacer>;

pub fn orchestrator(submitter: ScriptedSubmitter, fetcher: ScriptedFetcher) -> TestOrchestrator {
    PredictionOrchestrator::new(submitter, fetcher).with_pacer(RecordingPacer::default())
}
