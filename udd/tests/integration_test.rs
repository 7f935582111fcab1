//! Integration tests for uddgen
//!
//! These tests exercise the full pipeline against a scripted completion
//! client and the job facade built on top of it.

use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::NamedTempFile;

use uddgen::config::Config;
use uddgen::jobs::{JobOutcome, JobState, JobStore};
use uddgen::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, TokenUsage};
use uddgen::pipeline::{GenerateRequest, generate_document};

/// Scripted completion client: returns canned responses in order
struct ScriptedClient {
    responses: Vec<String>,
    calls: AtomicUsize,
}

impl ScriptedClient {
    fn new(responses: Vec<&str>) -> Self {
        Self {
            responses: responses.into_iter().map(String::from).collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let idx = self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .get(idx)
            .cloned()
            .map(|content| CompletionResponse {
                content,
                usage: TokenUsage::default(),
            })
            .ok_or_else(|| LlmError::InvalidResponse("script exhausted".to_string()))
    }
}

const FSD_TEXT: &str = "SECTION 3: Purpose\nThe program posts invoices.\nSECTION 4: Scope\nCovers FI postings.\nSECTION 6.5: Selection Screen\nCompany code and fiscal year.\n";

fn sections_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create sections file");
    write!(
        file,
        "#Overview\ntype: text\ndescription: High level summary.\nprompt: Summarize the solution.\n\
         #Selection Screen\ntype: table\nfields: [Field, Description]\nprompt: List selection fields.\n\
         #Risks\ntype: text\nprompt: Describe risks.\n"
    )
    .expect("write sections file");
    file
}

fn mapping_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create mapping file");
    write!(file, r#"{{"Overview": ["3", "4"], "Selection Screen": ["6.5"]}}"#).expect("write mapping file");
    file
}

// =============================================================================
// Pipeline Tests
// =============================================================================

#[tokio::test]
async fn test_pipeline_produces_docx_bytes() {
    let sections = sections_file();
    let mapping = mapping_file();

    let llm: Arc<dyn LlmClient> = Arc::new(ScriptedClient::new(vec![
        "The solution posts invoices into FI.",
        "| Field | Description |\n|---|---|\n| BUKRS | Company code |\n| GJAHR | Fiscal year |",
        "No major risks identified.\n\nMitigations are [To Be Filled].",
    ]));

    let mut request = GenerateRequest::new(FSD_TEXT);
    request.sections_path = Some(sections.path().to_path_buf());
    request.mapping_path = Some(mapping.path().to_path_buf());
    request.title = Some("Invoice Posting UDD".to_string());

    let bytes = generate_document(&Config::default(), llm, &request)
        .await
        .expect("pipeline should succeed");

    // A .docx is a ZIP container
    assert!(bytes.len() > 1000, "document should have real content");
    assert_eq!(&bytes[..4], b"PK\x03\x04");
}

#[tokio::test]
async fn test_pipeline_fails_fast_on_missing_inputs() {
    let llm: Arc<dyn LlmClient> = Arc::new(ScriptedClient::new(vec!["never used"]));

    let mut request = GenerateRequest::new(FSD_TEXT);
    request.sections_path = Some("/nonexistent/sections.txt".into());
    request.mapping_path = Some("/nonexistent/mapping.json".into());

    let result = generate_document(&Config::default(), llm, &request).await;
    let err = result.expect_err("missing files must fail");
    assert!(err.to_string().contains("not found"));
}

#[tokio::test]
async fn test_pipeline_propagates_completion_failure() {
    let sections = sections_file();
    let mapping = mapping_file();

    // only one response for three sections
    let llm: Arc<dyn LlmClient> = Arc::new(ScriptedClient::new(vec!["only draft"]));

    let mut request = GenerateRequest::new(FSD_TEXT);
    request.sections_path = Some(sections.path().to_path_buf());
    request.mapping_path = Some(mapping.path().to_path_buf());

    let result = generate_document(&Config::default(), llm, &request).await;
    assert!(result.is_err(), "completion failure must propagate");
}

// =============================================================================
// Job Facade Tests
// =============================================================================

async fn wait_done(store: &JobStore, id: &str) -> JobState {
    for _ in 0..200 {
        let record = store.poll(id).expect("job should exist");
        if record.state.is_done() {
            return record.state;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("job did not reach done state");
}

#[tokio::test]
async fn test_job_lifecycle_success() {
    let sections = sections_file();
    let mapping = mapping_file();

    let llm: Arc<dyn LlmClient> = Arc::new(ScriptedClient::new(vec!["a", "b", "c"]));
    let mut request = GenerateRequest::new(FSD_TEXT);
    request.sections_path = Some(sections.path().to_path_buf());
    request.mapping_path = Some(mapping.path().to_path_buf());

    let store = JobStore::new();
    let id = store.submit(Config::default(), llm, request);

    let record = store.poll(&id).expect("job should exist immediately");
    let state = &record.state;
    assert!(matches!(state, JobState::Pending | JobState::Running) || state.is_done());

    match wait_done(&store, &id).await {
        JobState::Done(JobOutcome::Success(bytes)) => assert_eq!(&bytes[..4], b"PK\x03\x04"),
        other => panic!("expected success, got {}", other.label()),
    }
}

#[tokio::test]
async fn test_job_lifecycle_failure_carries_error_string() {
    let llm: Arc<dyn LlmClient> = Arc::new(ScriptedClient::new(vec![]));
    let mut request = GenerateRequest::new(FSD_TEXT);
    request.sections_path = Some("/nonexistent/sections.txt".into());
    request.mapping_path = Some("/nonexistent/mapping.json".into());

    let store = JobStore::new();
    let id = store.submit(Config::default(), llm, request);

    match wait_done(&store, &id).await {
        JobState::Done(JobOutcome::Failed(message)) => assert!(message.contains("not found")),
        other => panic!("expected failure, got {}", other.label()),
    }
}

// =============================================================================
// CLI Smoke Tests
// =============================================================================

#[test]
fn test_cli_segment_json() {
    let mut fsd = NamedTempFile::new().expect("create fsd file");
    write!(fsd, "{}", FSD_TEXT).expect("write fsd file");

    let mut cmd = assert_cmd::Command::cargo_bin("udd").expect("binary exists");
    cmd.arg("segment")
        .arg(fsd.path())
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicates::str::contains("\"3\""))
        .stdout(predicates::str::contains("The program posts invoices."));
}

#[test]
fn test_cli_sections_lists_definitions() {
    let sections = sections_file();

    let mut cmd = assert_cmd::Command::cargo_bin("udd").expect("binary exists");
    cmd.arg("sections")
        .arg("--sections")
        .arg(sections.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("Overview"))
        .stdout(predicates::str::contains("Selection Screen"));
}
