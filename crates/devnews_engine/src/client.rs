use std::sync::{Mutex, PoisonError};

use devnews_core::{ConnectivityResult, NewsItem, ResultSet};
use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;

use crate::{ClientSettings, GenerateError};

/// Receives diagnostic lines (status line, error body) while a call runs.
pub trait TraceSink: Send + Sync {
    fn line(&self, line: String);
}

/// Discards trace lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTrace;

impl TraceSink for NullTrace {
    fn line(&self, _line: String) {}
}

/// Keeps trace lines in arrival order until the caller drains them.
#[derive(Debug, Default)]
pub struct BufferedTrace {
    lines: Mutex<Vec<String>>,
}

impl BufferedTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TraceSink for BufferedTrace {
    fn line(&self, line: String) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line);
    }
}

/// Remote generation service as seen by the controller.
#[async_trait::async_trait]
pub trait GenerationClient: Send + Sync {
    /// One `POST /generate-news` with the already trimmed topic. Never retries.
    async fn generate(
        &self,
        topic: &str,
        trace: &dyn TraceSink,
    ) -> Result<ResultSet, GenerateError>;

    /// Diagnostic `GET /`; failures are reported, never raised.
    async fn probe(&self) -> ConnectivityResult;

    /// Human-readable target for the diagnostic trace.
    fn target(&self) -> String {
        "generation service".to_string()
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Clone)]
pub struct ReqwestGenerationClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestGenerationClient {
    pub fn new(settings: ClientSettings) -> Result<Self, GenerateError> {
        let client = build_client(&settings)?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<String, GenerateError> {
        let max_bytes = self.settings.max_response_bytes;
        if response
            .content_length()
            .is_some_and(|content_len| content_len > max_bytes)
        {
            return Err(GenerateError::TooLarge { max_bytes });
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if bytes.len() as u64 + chunk.len() as u64 > max_bytes {
                return Err(GenerateError::TooLarge { max_bytes });
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[async_trait::async_trait]
impl GenerationClient for ReqwestGenerationClient {
    async fn generate(
        &self,
        topic: &str,
        trace: &dyn TraceSink,
    ) -> Result<ResultSet, GenerateError> {
        let body = serde_json::to_vec(&GenerateRequest { prompt: topic })
            .map_err(|err| GenerateError::Config(err.to_string()))?;

        let response = self
            .client
            .post(self.settings.endpoint("generate-news"))
            .header(CONTENT_TYPE, "application/json")
            .timeout(self.settings.request_timeout)
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        trace.line(format!(
            "Response status: {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or_default()
        ));
        if !status.is_success() {
            let body = match self.read_body(response).await {
                Ok(text) => text,
                Err(_) => status.canonical_reason().unwrap_or_default().to_string(),
            };
            trace.line(format!("Error response: {body}"));
            return Err(GenerateError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let text = self.read_body(response).await?;
        decode_generate_body(&text)
    }

    async fn probe(&self) -> ConnectivityResult {
        let response = match self
            .client
            .get(self.settings.endpoint(""))
            .timeout(self.settings.probe_timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                return ConnectivityResult::Unreachable {
                    message: map_reqwest_error(err).to_string(),
                }
            }
        };

        let status = response.status();
        if !status.is_success() {
            return ConnectivityResult::BadStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            };
        }
        match self.read_body(response).await {
            Ok(body) => ConnectivityResult::Reachable { body },
            Err(err) => ConnectivityResult::Unreachable {
                message: err.to_string(),
            },
        }
    }

    fn target(&self) -> String {
        self.settings.endpoint("generate-news")
    }
}

fn build_client(settings: &ClientSettings) -> Result<reqwest::Client, GenerateError> {
    let mut headers = HeaderMap::new();
    for (name, value) in &settings.extra_headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|err| GenerateError::Config(format!("header {name}: {err}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|err| GenerateError::Config(format!("header {name}: {err}")))?;
        headers.insert(name, value);
    }

    reqwest::Client::builder()
        .connect_timeout(settings.connect_timeout)
        .default_headers(headers)
        .build()
        .map_err(|err| GenerateError::Config(err.to_string()))
}

/// Accepts only `{"success": true, "data": [...]}`; anything else is a rejection.
pub(crate) fn decode_generate_body(body: &str) -> Result<ResultSet, GenerateError> {
    let value: Value =
        serde_json::from_str(body).map_err(|err| GenerateError::MalformedBody(err.to_string()))?;

    let succeeded = value.get("success").and_then(Value::as_bool) == Some(true);
    match value.get("data") {
        Some(data @ Value::Array(_)) if succeeded => {
            serde_json::from_value::<Vec<NewsItem>>(data.clone())
                .map_err(|err| GenerateError::MalformedBody(err.to_string()))
        }
        _ => {
            let message = value
                .get("message")
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty())
                .map(str::to_string);
            Err(GenerateError::rejected(message))
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> GenerateError {
    if err.is_timeout() {
        return GenerateError::Timeout(err.to_string());
    }
    GenerateError::Network(err.to_string())
}
