use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Default timeout for embedding requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors that can occur while computing an embedding.
///
/// All failures are values; nothing is raised past the provider boundary.
#[derive(Error, Debug)]
pub enum EmbedError {
    /// Network or transport error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Non-success HTTP status from the service
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// An opaque embedding capability: text in, fixed-length vector out.
///
/// Any concrete provider satisfying this contract is interchangeable.
pub trait EmbeddingProvider {
    fn embed(&self, text: &str) -> Result<Vec<f64>, EmbedError>;
}

/// Request body for the Gemini embedContent API
#[derive(Serialize)]
struct EmbedContentRequest<'a> {
    model: String,
    content: RequestContent<'a>,
    #[serde(rename = "taskType")]
    task_type: &'static str,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// Response from the Gemini embedContent API
#[derive(Deserialize)]
struct EmbedContentResponse {
    embedding: EmbeddingValues,
}

#[derive(Deserialize)]
struct EmbeddingValues {
    values: Vec<f64>,
}

/// Gemini embedding API client.
///
/// Blocking by design: the pipeline processes rows strictly in order, so
/// there is never more than one request in flight.
pub struct GeminiClient {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl GeminiClient {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
            client,
        })
    }
}

impl EmbeddingProvider for GeminiClient {
    /// Single attempt, no internal retry. Retry policy belongs to the
    /// caller, which also owns the pacing between calls.
    fn embed(&self, text: &str) -> Result<Vec<f64>, EmbedError> {
        let url = format!(
            "{}/v1beta/models/{}:embedContent?key={}",
            self.endpoint, self.model, self.api_key
        );

        let request_body = EmbedContentRequest {
            model: format!("models/{}", self.model),
            content: RequestContent {
                parts: vec![RequestPart { text }],
            },
            task_type: "RETRIEVAL_DOCUMENT",
        };

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .map_err(|e| EmbedError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(EmbedError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: EmbedContentResponse = response
            .json()
            .map_err(|e| EmbedError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        if parsed.embedding.values.is_empty() {
            return Err(EmbedError::InvalidResponse(
                "Empty embedding vector".to_string(),
            ));
        }

        Ok(parsed.embedding.values)
    }
}

/// Wraps a provider with a hard pacing contract: consecutive calls are at
/// least `min_interval` apart, failures included.
pub struct Paced<P> {
    inner: P,
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl<P> Paced<P> {
    pub fn new(inner: P, min_interval: Duration) -> Self {
        Self {
            inner,
            min_interval,
            last_call: Mutex::new(None),
        }
    }
}

impl<P: EmbeddingProvider> EmbeddingProvider for Paced<P> {
    fn embed(&self, text: &str) -> Result<Vec<f64>, EmbedError> {
        {
            let mut last_call = self
                .last_call
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());

            if let Some(previous) = *last_call {
                let elapsed = previous.elapsed();
                if elapsed < self.min_interval {
                    std::thread::sleep(self.min_interval - elapsed);
                }
            }

            // Stamped at call start so the interval also covers failed calls.
            *last_call = Some(Instant::now());
        }

        self.inner.embed(text)
    }
}

/// Deterministic provider for tests: returns a fixed vector, counts calls,
/// and can be switched to fail every call.
#[derive(Debug)]
pub struct MockProvider {
    vector: Vec<f64>,
    fail: bool,
    call_count: Mutex<usize>,
}

impl MockProvider {
    pub fn new(vector: Vec<f64>) -> Self {
        Self {
            vector,
            fail: false,
            call_count: Mutex::new(0),
        }
    }

    /// A provider that fails every call with a communication error.
    pub fn failing() -> Self {
        Self {
            vector: Vec::new(),
            fail: true,
            call_count: Mutex::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        *self
            .call_count
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl EmbeddingProvider for MockProvider {
    fn embed(&self, _text: &str) -> Result<Vec<f64>, EmbedError> {
        *self
            .call_count
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) += 1;

        if self.fail {
            return Err(EmbedError::Communication("Mock failure".to_string()));
        }
        Ok(self.vector.clone())
    }
}
