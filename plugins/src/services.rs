//! ServicesFactory implementation: builds the completion and embedding capabilities from config.
use async_trait::async_trait;
use datachore_core::api::{AppConfig, CliError, Services, ServicesFactory};

use crate::factory;

#[derive(Default)]
pub struct PluginServicesFactory;

#[async_trait]
impl ServicesFactory for PluginServicesFactory {
    async fn build_services(&self, cfg: &AppConfig) -> Result<Services, CliError> {
        let completion = factory::build_completion(cfg)?;
        let embedding = factory::build_embedding(cfg)?;
        tracing::debug!(
            completion = completion.name(),
            embedding = embedding.name(),
            "services built"
        );
        Ok(Services {
            completion,
            embedding,
        })
    }
}
