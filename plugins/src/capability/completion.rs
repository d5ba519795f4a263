//! Text completion through the AI proxy.
//!
//! Wire format: `POST <url>` with a bearer token and `{"prompt", "max_tokens"}`;
//! the answer is the `text` field of the JSON response (empty when absent).

use async_trait::async_trait;
use datachore_core::api::{CapabilityError, CompletionCapability, CompletionResult};
use serde::Serialize;

use super::http_error::{from_reqwest, parse_json_response};

pub const CREDENTIAL_VAR: &str = "AIPROXY_TOKEN";

#[derive(Serialize)]
struct CompletionRequest<'a> {
    prompt: &'a str,
    max_tokens: u32,
}

#[derive(Clone)]
pub struct AiProxyCompletion {
    api_key: String,
    url: String,
    max_tokens: u32,
    http: reqwest::Client,
}

impl AiProxyCompletion {
    pub fn new(
        url: String,
        api_key: String,
        timeout_ms: u64,
        max_tokens: u32,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self {
            api_key,
            url,
            max_tokens,
            http,
        })
    }
}

#[async_trait]
impl CompletionCapability for AiProxyCompletion {
    fn name(&self) -> &str {
        "aiproxy"
    }

    async fn complete(&self, prompt: &str) -> CompletionResult {
        // Checked per call: a missing token is not a startup error.
        if self.api_key.trim().is_empty() {
            return Err(CapabilityError::missing_credential(CREDENTIAL_VAR));
        }

        let url = &self.url;
        tracing::debug!(
            target: "datachore.llm",
            stage = "llm.complete.in",
            url = %url,
            prompt_len = prompt.len(),
            max_tokens = self.max_tokens
        );
        let resp = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&CompletionRequest {
                prompt,
                max_tokens: self.max_tokens,
            })
            .send()
            .await
            .map_err(|err| from_reqwest(err, url))?;
        let status = resp.status();
        let v = parse_json_response(resp).await?;
        let text = v
            .get("text")
            .and_then(|t| t.as_str())
            .unwrap_or_default()
            .to_string();
        tracing::debug!(
            target: "datachore.llm",
            stage = "llm.complete.out",
            status = %status,
            text_len = text.len()
        );
        Ok(text)
    }
}
