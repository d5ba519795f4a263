use std::path::Path;

use anyhow::Context;
use lazy_static::lazy_static;
use regex::Regex;

use crate::capability::CompletionCapability;
use crate::error::TaskError;
use crate::util::write_atomic_async;

lazy_static! {
    static ref SENDER_RE: Regex = Regex::new(r"From:.*?([\w.-]+@[\w.-]+)").unwrap();
}

/// Address following the first `From:` marker, if any.
pub fn sender_from_headers(content: &str) -> Option<String> {
    SENDER_RE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

pub fn extraction_prompt(content: &str) -> String {
    format!("Extract the sender's email address from the following email content:\n{content}")
}

/// Pattern match first; ask the completion capability only when that finds
/// nothing. An empty answer from the capability is written as-is.
pub async fn extract_sender_email(
    input: &Path,
    output: &Path,
    completion: &dyn CompletionCapability,
) -> Result<String, TaskError> {
    let content = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("failed to read {}", input.display()))?;

    let sender = match sender_from_headers(&content) {
        Some(addr) => addr,
        None => {
            tracing::info!(
                capability = completion.name(),
                "no From: header match, asking completion capability"
            );
            completion
                .complete(&extraction_prompt(&content))
                .await?
                .trim()
                .to_string()
        }
    };

    write_atomic_async(output, sender.as_str()).await?;
    Ok(sender)
}
