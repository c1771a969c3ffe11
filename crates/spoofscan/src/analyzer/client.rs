//! HTTP client for the hosted analysis backend (Gemini `generateContent`).

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::AnalyzerError;
use super::prompt::{response_schema, RESPONSE_MIME_TYPE, SYSTEM_INSTRUCTION};
use super::verdict::{parse_verdict, Verdict};
use super::DocumentAnalyzer;
use crate::config::AnalyzerConfig;
use crate::error::SpoofscanError;
use crate::sanitize;
use crate::secrets::resolve_secret;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

pub struct GeminiClient {
    client: Client,
    endpoint: String,
    api_key: SecretString,
    temperature: f32,
    request_timeout: Duration,
}

impl GeminiClient {
    pub fn new(config: &AnalyzerConfig, api_key: SecretString) -> Result<Self, AnalyzerError> {
        let request_timeout = Duration::from_secs(config.request_timeout_secs);
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(request_timeout)
            .build()
            .map_err(|e| AnalyzerError::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: generate_content_url(&config.base_url, &config.model),
            api_key,
            temperature: config.temperature,
            request_timeout,
        })
    }

    /// Builds a client, resolving the API key from the configured sources.
    pub fn from_config(config: &AnalyzerConfig) -> Result<Self, SpoofscanError> {
        let api_key = resolve_secret(
            config.api_key.as_deref(),
            config.api_key_file.as_deref(),
            config.api_key_env_var.as_deref(),
        )?;

        Ok(Self::new(config, api_key)?)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_request<'a>(&self, text: &'a str) -> GenerateContentRequest<'a> {
        GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: SYSTEM_INSTRUCTION,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: RESPONSE_MIME_TYPE,
                response_schema: response_schema(),
                temperature: self.temperature,
            },
        }
    }

    async fn request_verdict(&self, text: &str) -> Result<Verdict, AnalyzerError> {
        let body = self.build_request(text);

        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnalyzerError::transport(format!(
                        "request timed out after {}s",
                        self.request_timeout.as_secs()
                    ))
                } else if e.is_connect() {
                    AnalyzerError::transport(format!(
                        "could not connect to analysis backend: {}",
                        e
                    ))
                } else {
                    AnalyzerError::transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalyzerError::backend(
                status.as_u16(),
                format!(
                    "backend returned HTTP {}: {}",
                    status.as_u16(),
                    sanitize::truncate_for_log(&body)
                ),
            ));
        }

        let payload: GenerateContentResponse = response.json().await.map_err(|e| {
            AnalyzerError::invalid_response(format!("malformed backend payload: {}", e))
        })?;

        let candidate = candidate_text(payload)?;
        debug!("Analyzer returned {} bytes of verdict JSON", candidate.len());

        parse_verdict(&candidate)
    }
}

#[async_trait]
impl DocumentAnalyzer for GeminiClient {
    async fn analyze(&self, text: &str) -> Result<Verdict, AnalyzerError> {
        debug!("Submitting {} bytes for analysis", text.len());

        let result = self.request_verdict(text).await;
        if let Err(ref e) = result {
            error!("Error analyzing document: {}", e);
        }
        result
    }
}

fn generate_content_url(base_url: &str, model: &str) -> String {
    format!(
        "{}/v1beta/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model
    )
}

/// Joins the text parts of the first candidate.
fn candidate_text(payload: GenerateContentResponse) -> Result<String, AnalyzerError> {
    let text: String = payload
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AnalyzerError::invalid_response(
            "response contained no candidate text",
        ));
    }

    Ok(text)
}
