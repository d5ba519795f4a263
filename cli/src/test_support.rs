//! Offline capabilities and agents for cli tests.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use datachore_core::api::{
    CapabilityError, CapabilityErrorKind, CommandsConfig, CompletionCapability, CompletionResult,
    EmbeddingCapability, Services, TaskAgent, TaskPaths, TaskRegistry,
};

pub struct FixedCompletion(pub Option<String>);

#[async_trait]
impl CompletionCapability for FixedCompletion {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn complete(&self, _prompt: &str) -> CompletionResult {
        self.0.clone().ok_or_else(|| {
            CapabilityError::new(CapabilityErrorKind::Connect, "completion offline")
        })
    }
}

pub struct OfflineEmbedding;

#[async_trait]
impl EmbeddingCapability for OfflineEmbedding {
    fn name(&self) -> &str {
        "offline"
    }

    async fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, CapabilityError> {
        Err(CapabilityError::new(
            CapabilityErrorKind::Connect,
            "embedding offline",
        ))
    }
}

pub fn offline_services() -> Services {
    Services {
        completion: Arc::new(FixedCompletion(None)),
        embedding: Arc::new(OfflineEmbedding),
    }
}

pub fn agent_under(root: &Path) -> TaskAgent {
    TaskAgent::with_parts(
        TaskRegistry::default(),
        TaskPaths::under(root),
        CommandsConfig::default(),
        offline_services(),
    )
}
