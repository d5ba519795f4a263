//! Canned capabilities for handler tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{CompletionCapability, CompletionResult, EmbeddingCapability};
use crate::error::{CapabilityError, CapabilityErrorKind};

pub struct StubCompletion {
    reply: Option<String>,
    failure: CapabilityErrorKind,
    pub prompts: Mutex<Vec<String>>,
}

impl StubCompletion {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            failure: CapabilityErrorKind::Unknown,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(kind: CapabilityErrorKind) -> Self {
        Self {
            reply: None,
            failure: kind,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionCapability for StubCompletion {
    fn name(&self) -> &str {
        "stub"
    }

    async fn complete(&self, prompt: &str) -> CompletionResult {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Some(text) => Ok(text.clone()),
            None => Err(CapabilityError::new(self.failure, "stubbed failure")),
        }
    }
}

/// Embeds each text by looking up a fixed table; unknown texts map to a zero vector.
pub struct StubEmbedding {
    table: Vec<(String, Vec<f32>)>,
    fail: bool,
}

impl StubEmbedding {
    pub fn new(table: &[(&str, &[f32])]) -> Self {
        Self {
            table: table
                .iter()
                .map(|(t, v)| (t.to_string(), v.to_vec()))
                .collect(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            table: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl EmbeddingCapability for StubEmbedding {
    fn name(&self) -> &str {
        "stub"
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, CapabilityError> {
        if self.fail {
            return Err(CapabilityError::new(
                CapabilityErrorKind::Connect,
                "embedding service unreachable",
            ));
        }
        Ok(texts
            .iter()
            .map(|t| {
                self.table
                    .iter()
                    .find(|(k, _)| k == t)
                    .map(|(_, v)| v.clone())
                    .unwrap_or_else(|| vec![0.0, 0.0, 0.0])
            })
            .collect())
    }
}
