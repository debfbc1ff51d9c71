//! In-memory doubles for the transport and diagnostic seams, shared by the
//! downstream crates' tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde_json::Value;

use crate::diag::DiagnosticSink;
use crate::error::HeraldError;
use crate::transport::Transport;

/// One outbound request as seen by the [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub body: Option<Value>,
}

/// Scripted transport double.
///
/// GET responses are consumed front-to-back from a queue; a GET with nothing
/// queued fails. POST outcomes are likewise consumed from their own queue,
/// but an empty queue means "succeed" so tests only script the failures they
/// care about. Every request is recorded in arrival order.
#[derive(Default)]
pub struct MockTransport {
    get_responses: Mutex<VecDeque<Result<Value, HeraldError>>>,
    post_outcomes: Mutex<VecDeque<Result<(), HeraldError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_get(&self, response: Result<Value, HeraldError>) {
        self.get_responses.lock().unwrap().push_back(response);
    }

    pub fn queue_post(&self, outcome: Result<(), HeraldError>) {
        self.post_outcomes.lock().unwrap().push_back(outcome);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Recorded POST requests against URLs containing `fragment`.
    pub fn posts_to(&self, fragment: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == "POST" && r.url.contains(fragment))
            .collect()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn get_json(&self, url: &str) -> Result<Value, HeraldError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: "GET",
            url: url.to_string(),
            body: None,
        });
        self.get_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(HeraldError::Transport("no GET response scripted".to_string())))
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<(), HeraldError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: "POST",
            url: url.to_string(),
            body: Some(body.clone()),
        });
        self.post_outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }
}

/// Diagnostic sink double collecting records in memory.
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<String> {
        self.records.lock().unwrap().clone()
    }

    /// Number of records containing `fragment`.
    pub fn count_containing(&self, fragment: &str) -> usize {
        self.records()
            .iter()
            .filter(|r| r.contains(fragment))
            .count()
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&self, message: &str) {
        self.records.lock().unwrap().push(message.to_string());
    }
}
