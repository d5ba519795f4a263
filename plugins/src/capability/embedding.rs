//! Embedding services for text vectorization.
//!
//! Supports both local (Ollama) and remote (OpenAI-compatible) providers.

use async_trait::async_trait;
use datachore_core::api::{CapabilityError, CapabilityErrorKind, EmbeddingCapability};

use super::http_error::{from_reqwest, parse_json_response};

fn client(timeout_ms: u64) -> anyhow::Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(std::time::Duration::from_millis(timeout_ms))
        .build()?)
}

fn decode<T: serde::de::DeserializeOwned>(
    value: serde_json::Value,
    url: &str,
) -> Result<T, CapabilityError> {
    serde_json::from_value(value).map_err(|err| {
        CapabilityError::new(
            CapabilityErrorKind::Decode,
            format!("unexpected embedding response: {err}"),
        )
        .with_url(url)
    })
}

/// Ollama local embedding service.
pub struct OllamaEmbeddingService {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaEmbeddingService {
    pub fn new(base_url: String, model: String, timeout_ms: u64) -> anyhow::Result<Self> {
        Ok(Self {
            client: client(timeout_ms)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }

    async fn embed_one(&self, text: &str) -> Result<Vec<f32>, CapabilityError> {
        let url = format!("{}/api/embeddings", self.base_url);
        tracing::debug!(
            "Sending embedding request to Ollama: url={}, model={}, text_len={}",
            url,
            self.model,
            text.len()
        );

        let resp = self
            .client
            .post(&url)
            .json(&OllamaEmbedRequest {
                model: &self.model,
                prompt: text,
            })
            .send()
            .await
            .map_err(|err| from_reqwest(err, &url))?;
        let result: OllamaEmbedResponse = decode(parse_json_response(resp).await?, &url)?;
        Ok(result.embedding)
    }
}

#[async_trait]
impl EmbeddingCapability for OllamaEmbeddingService {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, CapabilityError> {
        use futures::future::try_join_all;

        // Limit concurrency to avoid overwhelming the embedding service
        let concurrent_limit = 8usize;
        let mut all_results = Vec::with_capacity(texts.len());

        for chunk in texts.chunks(concurrent_limit) {
            let results = try_join_all(chunk.iter().map(|text| self.embed_one(text))).await?;
            all_results.extend(results);
        }

        Ok(all_results)
    }
}

#[derive(serde::Serialize)]
struct OllamaEmbedRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(serde::Deserialize)]
struct OllamaEmbedResponse {
    embedding: Vec<f32>,
}

/// OpenAI-compatible remote embedding service.
pub struct OpenAIEmbeddingService {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAIEmbeddingService {
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        timeout_ms: u64,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            client: client(timeout_ms)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        })
    }
}

#[async_trait]
impl EmbeddingCapability for OpenAIEmbeddingService {
    fn name(&self) -> &str {
        "openai"
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, CapabilityError> {
        if self.api_key.trim().is_empty() {
            return Err(CapabilityError::missing_credential(
                "DATACHORE_EMBEDDING_API_KEY",
            ));
        }

        let url = format!("{}/embeddings", self.base_url);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&OpenAIEmbedBatchRequest {
                input: texts,
                model: &self.model,
                encoding_format: "float",
            })
            .send()
            .await
            .map_err(|err| from_reqwest(err, &url))?;

        let mut result: OpenAIEmbedResponse = decode(parse_json_response(resp).await?, &url)?;
        result.data.sort_by_key(|d| d.index);
        Ok(result.data.into_iter().map(|d| d.embedding).collect())
    }
}

#[derive(serde::Serialize)]
struct OpenAIEmbedBatchRequest<'a> {
    input: &'a [String],
    model: &'a str,
    encoding_format: &'a str,
}

#[derive(serde::Deserialize)]
struct OpenAIEmbedResponse {
    data: Vec<OpenAIEmbedData>,
}

#[derive(serde::Deserialize)]
struct OpenAIEmbedData {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_ollama_embeds_each_text_in_order() {
        let mut server = Server::new_async().await;
        let _a = server
            .mock("POST", "/api/embeddings")
            .match_body(Matcher::PartialJson(serde_json::json!({"prompt": "first"})))
            .with_status(200)
            .with_body(r#"{"embedding":[1.0,0.0]}"#)
            .create_async()
            .await;
        let _b = server
            .mock("POST", "/api/embeddings")
            .match_body(Matcher::PartialJson(serde_json::json!({"prompt": "second"})))
            .with_status(200)
            .with_body(r#"{"embedding":[0.0,1.0]}"#)
            .create_async()
            .await;

        let svc = OllamaEmbeddingService::new(server.url(), "all-minilm".into(), 1_000).unwrap();
        let vectors = svc
            .embed(&["first".to_string(), "second".to_string()])
            .await
            .unwrap();
        assert_eq!(vectors, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[tokio::test]
    async fn test_openai_sorts_by_index() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/embeddings")
            .match_header("authorization", "Bearer key")
            .with_status(200)
            .with_body(
                r#"{"data":[{"index":1,"embedding":[0.5]},{"index":0,"embedding":[0.25]}]}"#,
            )
            .create_async()
            .await;

        let svc =
            OpenAIEmbeddingService::new(server.url(), "key".into(), "m".into(), 1_000).unwrap();
        let vectors = svc.embed(&["a".to_string(), "b".to_string()]).await.unwrap();
        assert_eq!(vectors, vec![vec![0.25], vec![0.5]]);
    }

    #[tokio::test]
    async fn test_openai_requires_key() {
        let svc =
            OpenAIEmbeddingService::new("http://127.0.0.1:9".into(), "".into(), "m".into(), 1_000)
                .unwrap();
        let err = svc.embed(&["a".to_string()]).await.unwrap_err();
        assert_eq!(err.kind(), CapabilityErrorKind::MissingCredential);
    }

    #[tokio::test]
    async fn test_status_error_surfaces() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/api/embeddings")
            .with_status(500)
            .with_body("model not loaded")
            .create_async()
            .await;

        let svc = OllamaEmbeddingService::new(server.url(), "m".into(), 1_000).unwrap();
        let err = svc.embed(&["a".to_string()]).await.unwrap_err();
        assert_eq!(err.kind(), CapabilityErrorKind::Status);
        assert_eq!(err.status(), Some(500));
    }
}
