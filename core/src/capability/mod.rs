//! Opaque external capabilities the handlers depend on.
//!
//! Both traits return explicit `Result`s so that handler-level fallbacks
//! (regex before completion, sentinel after completion) stay ordinary branches.

mod similarity;

use async_trait::async_trait;

use crate::error::CapabilityError;

pub use similarity::cosine_similarity;

/// `Ok(text)` or `Err(reason)` from the text-completion capability.
pub type CompletionResult = Result<String, CapabilityError>;

/// Prompt in, text out.
#[async_trait]
pub trait CompletionCapability: Send + Sync {
    fn name(&self) -> &str;

    async fn complete(&self, prompt: &str) -> CompletionResult;
}

/// Texts in, vectors out (one vector per input, same order).
#[async_trait]
pub trait EmbeddingCapability: Send + Sync {
    fn name(&self) -> &str;

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, CapabilityError>;
}

#[cfg(test)]
pub(crate) mod stub;
