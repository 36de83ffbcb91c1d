use crate::core::retry::{with_retry, GenerationError};
use crate::core::Sleeper;
use crate::domain::model::RetryPolicy;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash-exp:generateContent";

/// Longest slice of an error body kept in logs.
const ERROR_BODY_LIMIT: usize = 200;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl GenerateResponse {
    /// `candidates[0].content.parts[0].text`
    pub fn into_text(self) -> Result<String, GenerationError> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| malformed("response has no candidates"))?;
        let content = candidate
            .content
            .ok_or_else(|| malformed("candidate has no content"))?;
        let part = content
            .parts
            .into_iter()
            .next()
            .ok_or_else(|| malformed("content has no parts"))?;
        part.text.ok_or_else(|| malformed("first part has no text"))
    }
}

fn malformed(reason: &str) -> GenerationError {
    GenerationError::MalformedResponse {
        reason: reason.to_string(),
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(ERROR_BODY_LIMIT).collect()
}

/// Client for the `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    policy: RetryPolicy,
}

impl GeminiClient {
    pub fn new(
        endpoint: &str,
        api_key: &str,
        timeout: Duration,
        policy: RetryPolicy,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
            policy,
        })
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Sends `prompt` and returns the generated text, retrying transient
    /// failures according to the client's policy.
    pub async fn generate<S: Sleeper>(
        &self,
        prompt: &str,
        sleeper: &S,
    ) -> Result<String, GenerationError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };
        let request = &request;

        with_retry(&self.policy, sleeper, move |attempt| {
            self.send_once(request, attempt)
        })
        .await
    }

    async fn send_once(
        &self,
        request: &GenerateRequest<'_>,
        attempt: u32,
    ) -> Result<String, GenerationError> {
        tracing::debug!(attempt, "Sending generateContent request");

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::SERVICE_UNAVAILABLE {
            return Err(GenerationError::Unavailable {
                status: status.as_u16(),
                body: truncate(&body),
            });
        }

        if !status.is_success() {
            return Err(GenerationError::Http {
                status: status.as_u16(),
                body: truncate(&body),
            });
        }

        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| GenerationError::MalformedResponse {
                reason: format!("invalid JSON: {}", e),
            })?;
        parsed.into_text()
    }
}
