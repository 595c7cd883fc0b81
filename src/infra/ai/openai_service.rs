use crate::domain::ports::LlmService;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};

const MAX_RETRIES: u32 = 3;
const INITIAL_BACKOFF_MS: u64 = 500;
const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const MODEL: &str = "gpt-4o";

pub struct OpenAiService {
    client: Client,
    api_key: String,
}

impl OpenAiService {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_key,
        }
    }

    async fn send_request_with_retry(&self, payload: &Value) -> Result<String, AppError> {
        let mut retries = 0;
        let mut backoff = INITIAL_BACKOFF_MS;

        loop {
            let res = self.client.post(CHAT_COMPLETIONS_URL)
                .bearer_auth(&self.api_key)
                .header("Content-Type", "application/json")
                .json(payload)
                .send()
                .await;

            match res {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let body: Value = response.json().await.map_err(|e| {
                            error!("Failed to parse chat completion JSON: {:?}", e);
                            AppError::Internal
                        })?;
                        return extract_content(body);
                    } else if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                        if retries >= MAX_RETRIES {
                            error!("LLM API failed after {} retries. Status: {}", retries, status);
                            let text = response.text().await.unwrap_or_default();
                            return Err(AppError::InternalWithMsg(format!("AI Provider Error: {} - {}", status, text)));
                        }
                        warn!("LLM API transient error {}. Retrying in {}ms...", status, backoff);
                    } else {
                        let text = response.text().await.unwrap_or_default();
                        error!("LLM API Terminal Error {}: {}", status, text);
                        return Err(AppError::Validation(format!("AI Request Rejected: {} - {}", status, text)));
                    }
                }
                Err(e) => {
                    if retries >= MAX_RETRIES {
                        error!("LLM Network Error after {} retries: {:?}", retries, e);
                        return Err(AppError::InternalWithMsg(format!("AI Network Error: {}", e)));
                    }
                    warn!("LLM Network Error. Retrying in {}ms... {:?}", backoff, e);
                }
            }

            sleep(Duration::from_millis(backoff)).await;
            retries += 1;
            backoff *= 2;
        }
    }
}

fn extract_content(body: Value) -> Result<String, AppError> {
    if let Some(choices) = body.get("choices").and_then(|c| c.as_array())
        && let Some(first) = choices.first() {

        if let Some(finish_reason) = first.get("finish_reason").and_then(|s| s.as_str())
            && finish_reason == "content_filter" {
            warn!("AI generation stopped by content filter");
            return Err(AppError::Validation("AI response blocked by content filters.".to_string()));
        }

        if let Some(content) = first
            .pointer("/message/content")
            .and_then(|t| t.as_str())
        {
            return Ok(content.trim().to_string());
        }
    }

    error!("Invalid or unexpected chat completion structure: {:?}", body);
    Err(AppError::InternalWithMsg("AI response missing content".to_string()))
}

#[async_trait]
impl LlmService for OpenAiService {
    #[instrument(skip(self, system_instruction), fields(message_len = message.len()))]
    async fn chat(&self, message: &str, system_instruction: &str) -> Result<String, AppError> {
        if self.api_key.is_empty() {
            return Err(AppError::Validation("AI API key is not configured".into()));
        }

        let payload = json!({
            "model": MODEL,
            "messages": [
                { "role": "system", "content": system_instruction },
                { "role": "user", "content": message }
            ],
            "temperature": 0.7,
            "max_tokens": 1000
        });

        info!("Sending chat request to LLM provider...");
        let result = self.send_request_with_retry(&payload).await?;
        info!("Received chat completion from LLM provider.");
        Ok(result)
    }
}
