use super::{CompletionError, CompletionGateway, CompletionRequest};
use crate::config::GenerativeConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::debug;

/// Completion client speaking the OpenAI-style chat endpoint.
///
/// Carries an explicit request timeout so a hung upstream bounds worst-case
/// latency and the caller's fallback path can take over.
pub struct HttpCompletionClient {
    http: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl HttpCompletionClient {
    /// Build a client when the service is configured; `Ok(None)` when no API
    /// key is present, which callers treat as the unconfigured state.
    pub fn from_config(config: &GenerativeConfig) -> Result<Option<Self>, CompletionError> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };

        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| CompletionError::Transport(err.to_string()))?;

        Ok(Some(Self {
            http,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            api_key,
        }))
    }

    fn endpoint(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.ends_with("/chat/completions") {
            base.to_string()
        } else if base.ends_with("/v1") {
            format!("{base}/chat/completions")
        } else {
            format!("{base}/v1/chat/completions")
        }
    }
}

#[async_trait]
impl CompletionGateway for HttpCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let mut body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user },
            ],
            "temperature": request.temperature,
        });
        if request.json_only {
            body["response_format"] = json!({ "type": "json_object" });
        }

        debug!(endpoint = %self.endpoint(), "requesting completion");

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| CompletionError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "unreadable error body".to_string());
            return Err(CompletionError::Upstream {
                status: status.as_u16(),
                detail,
            });
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|err| CompletionError::InvalidResponse(err.to_string()))?;

        let content = payload["choices"]
            .get(0)
            .and_then(|choice| choice["message"]["content"].as_str())
            .ok_or_else(|| {
                CompletionError::InvalidResponse("response carried no message content".to_string())
            })?;

        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured(base_url: &str) -> GenerativeConfig {
        GenerativeConfig {
            api_key: Some("sk-test".to_string()),
            base_url: base_url.to_string(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 8,
        }
    }

    #[test]
    fn from_config_is_none_without_api_key() {
        let config = GenerativeConfig {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 8,
        };
        assert!(HttpCompletionClient::from_config(&config)
            .expect("construction succeeds")
            .is_none());
    }

    #[test]
    fn endpoint_normalizes_base_url_variants() {
        let client = HttpCompletionClient::from_config(&configured("https://llm.internal/v1/"))
            .expect("construction succeeds")
            .expect("configured");
        assert_eq!(client.endpoint(), "https://llm.internal/v1/chat/completions");

        let client = HttpCompletionClient::from_config(&configured("https://llm.internal"))
            .expect("construction succeeds")
            .expect("configured");
        assert_eq!(client.endpoint(), "https://llm.internal/v1/chat/completions");

        let client = HttpCompletionClient::from_config(&configured(
            "https://llm.internal/v1/chat/completions",
        ))
        .expect("construction succeeds")
        .expect("configured");
        assert_eq!(client.endpoint(), "https://llm.internal/v1/chat/completions");
    }
}
