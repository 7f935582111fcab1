//! Background job facade
//!
//! Asynchronous submit/poll surface over the generation pipeline. Each job
//! is an explicit state machine (pending -> running -> done) in a keyed map
//! owned by the store; worker tasks mutate records only through the single
//! `set_state` path. Nothing is persisted and jobs are never cancelled.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::config::Config;
use crate::llm::LlmClient;
use crate::pipeline::{self, GenerateRequest};

/// Job lifecycle states
#[derive(Debug, Clone)]
pub enum JobState {
    Pending,
    Running,
    Done(JobOutcome),
}

impl JobState {
    pub fn is_done(&self) -> bool {
        matches!(self, JobState::Done(_))
    }

    /// Short status label for display
    pub fn label(&self) -> &'static str {
        match self {
            JobState::Pending => "pending",
            JobState::Running => "running",
            JobState::Done(_) => "done",
        }
    }
}

/// Terminal result of a job: document bytes or an error string
#[derive(Debug, Clone)]
pub enum JobOutcome {
    Success(Vec<u8>),
    Failed(String),
}

/// One job record with its transition timestamps
#[derive(Debug, Clone)]
pub struct JobRecord {
    pub state: JobState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Concurrency-safe keyed map of generation jobs
///
/// The store exclusively owns the records; clones share the same map.
#[derive(Clone, Default)]
pub struct JobStore {
    jobs: Arc<Mutex<HashMap<String, JobRecord>>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit a generation request; returns the job id immediately
    ///
    /// A worker task runs the pipeline and records the outcome. A pipeline
    /// error is captured into the terminal state here - this is the one
    /// boundary where errors are converted instead of propagated.
    pub fn submit(&self, config: Config, llm: Arc<dyn LlmClient>, request: GenerateRequest) -> String {
        let id = generate_job_id();
        debug!(job_id = %id, "JobStore::submit: called");

        let now = Utc::now();
        self.jobs.lock().expect("job map lock").insert(
            id.clone(),
            JobRecord {
                state: JobState::Pending,
                created_at: now,
                updated_at: now,
            },
        );

        let store = self.clone();
        let job_id = id.clone();
        tokio::spawn(async move {
            store.set_state(&job_id, JobState::Running);
            match pipeline::generate_document(&config, llm, &request).await {
                Ok(bytes) => {
                    debug!(job_id = %job_id, bytes = bytes.len(), "job finished");
                    store.set_state(&job_id, JobState::Done(JobOutcome::Success(bytes)));
                }
                Err(e) => {
                    warn!(job_id = %job_id, error = %e, "job failed");
                    store.set_state(&job_id, JobState::Done(JobOutcome::Failed(e.to_string())));
                }
            }
        });

        id
    }

    /// Snapshot a job's current record
    pub fn poll(&self, id: &str) -> Option<JobRecord> {
        self.jobs.lock().expect("job map lock").get(id).cloned()
    }

    /// Number of known jobs
    pub fn len(&self) -> usize {
        self.jobs.lock().expect("job map lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The single designated update path for job records
    fn set_state(&self, id: &str, state: JobState) {
        let mut jobs = self.jobs.lock().expect("job map lock");
        if let Some(record) = jobs.get_mut(id) {
            record.state = state;
            record.updated_at = Utc::now();
        }
    }
}

/// Opaque job identifier: 16 hex chars derived from a UUIDv7
fn generate_job_id() -> String {
    uuid::Uuid::now_v7().simple().to_string()[..16].to_string()
}
