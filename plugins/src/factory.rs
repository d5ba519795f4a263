use std::sync::Arc;

use anyhow::Result;

use datachore_core::api::{
    AppConfig, CompletionCapability, EmbeddingCapability, EmbeddingProvider,
};

use crate::capability::{AiProxyCompletion, OllamaEmbeddingService, OpenAIEmbeddingService};

pub fn build_completion(cfg: &AppConfig) -> Result<Arc<dyn CompletionCapability>> {
    let llm = &cfg.llm;
    if llm.api_key.trim().is_empty() {
        tracing::warn!("AIPROXY_TOKEN not set; completion-backed tasks will fail or fall back");
    }
    Ok(Arc::new(AiProxyCompletion::new(
        llm.url.clone(),
        llm.api_key.clone(),
        llm.timeout_ms,
        llm.max_tokens,
    )?))
}

pub fn build_embedding(cfg: &AppConfig) -> Result<Arc<dyn EmbeddingCapability>> {
    let emb = &cfg.embedding;
    match emb.provider {
        EmbeddingProvider::Ollama => Ok(Arc::new(OllamaEmbeddingService::new(
            emb.base_url.clone(),
            emb.model.clone(),
            emb.timeout_ms,
        )?)),
        EmbeddingProvider::OpenAI => Ok(Arc::new(OpenAIEmbeddingService::new(
            emb.base_url.clone(),
            emb.api_key.clone(),
            emb.model.clone(),
            emb.timeout_ms,
        )?)),
    }
}
