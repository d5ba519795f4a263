use std::sync::Arc;

use crate::capability::{CompletionCapability, EmbeddingCapability};
use crate::config::AppConfig;
use crate::error::CliError;

/// External capabilities shared by every request.
#[derive(Clone)]
pub struct Services {
    pub completion: Arc<dyn CompletionCapability>,
    pub embedding: Arc<dyn EmbeddingCapability>,
}

#[async_trait::async_trait]
pub trait ServicesFactory: Send + Sync {
    async fn build_services(&self, cfg: &AppConfig) -> Result<Services, CliError>;
}
