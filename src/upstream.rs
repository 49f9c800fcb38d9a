use async_trait::async_trait;
use std::time::Duration;

use crate::error::AdvisorError;
use crate::models::{ChatCompletionRequest, ChatCompletionResponse};

// external chat completion service
#[async_trait]
pub trait CompletionClient: Send + Sync {
    // one call, decoded response
    async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, AdvisorError>;
}

// OpenAI compatible /chat/completions client, Groq by default
pub struct ChatCompletionsClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl ChatCompletionsClient {
    pub fn new(
        api_base: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AdvisorError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, api_base, api_key))
    }

    pub fn with_client(client: reqwest::Client, api_base: &str, api_key: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: completions_endpoint(api_base),
            api_key: api_key.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

// "api.groq.com/openai/v1/" -> "http://api.groq.com/openai/v1/chat/completions"
fn completions_endpoint(api_base: &str) -> String {
    let base = api_base.trim().trim_end_matches('/');
    // add http:// if not present
    let base = if base.starts_with("http") {
        base.to_string()
    } else {
        format!("http://{}", base)
    };
    format!("{}/chat/completions", base)
}

#[async_trait]
impl CompletionClient for ChatCompletionsClient {
    async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, AdvisorError> {
        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AdvisorError::upstream(format!(
                "Upstream returned {}: {}",
                status,
                body.trim()
            )));
        }

        res.json::<ChatCompletionResponse>()
            .await
            .map_err(|e| AdvisorError::upstream(format!("Parse Error: {}", e)))
    }
}
