use crate::constants::endpoints;
use crate::error::{Result, StarError};
use crate::llm::traits::*;

pub struct OpenAIClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAIClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: endpoints::OPENAI_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn completions_url(&self) -> String {
        format!("{}{}", self.base_url, endpoints::CHAT_COMPLETIONS_PATH)
    }
}

#[async_trait::async_trait]
impl CompletionService for OpenAIClient {
    async fn complete(&self, request: &ChatRequest<'_>) -> Result<ChatCompletion> {
        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            return Err(StarError::Api {
                status: status.as_u16(),
                body: response_text,
            });
        }

        serde_json::from_str(&response_text)
            .map_err(|e| StarError::malformed(format!("failed to parse response: {e}")))
    }
}
