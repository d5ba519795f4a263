use std::path::Path;

use anyhow::Context;

use crate::capability::{cosine_similarity, EmbeddingCapability};
use crate::error::TaskError;
use crate::util::write_atomic_async;

/// Indices `(i, j)` with `i < j` of the pair with the highest similarity.
///
/// Only a strictly greater score replaces the current best, so the first pair
/// found wins ties. `None` when there are fewer than two vectors.
pub fn most_similar_pair(vectors: &[Vec<f32>]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize, f32)> = None;
    for i in 0..vectors.len() {
        for j in (i + 1)..vectors.len() {
            let sim = cosine_similarity(&vectors[i], &vectors[j]);
            if best.map_or(true, |(_, _, top)| sim > top) {
                best = Some((i, j, sim));
            }
        }
    }
    best.map(|(i, j, _)| (i, j))
}

async fn read_comments(input: &Path) -> anyhow::Result<Vec<String>> {
    let content = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("failed to read {}", input.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

pub async fn most_similar_comment_pair(
    input: &Path,
    output: &Path,
    embedding: &dyn EmbeddingCapability,
) -> Result<(String, String), TaskError> {
    let comments = read_comments(input).await?;
    if comments.len() < 2 {
        return Err(TaskError::InsufficientInput(format!(
            "need at least 2 comments to compare, found {}",
            comments.len()
        )));
    }

    let vectors = embedding
        .embed(&comments)
        .await
        .map_err(|e| TaskError::handler(format!("embedding comments failed: {e}")))?;
    if vectors.len() != comments.len() {
        return Err(TaskError::handler(format!(
            "embedding returned {} vectors for {} comments",
            vectors.len(),
            comments.len()
        )));
    }

    let (i, j) = most_similar_pair(&vectors)
        .ok_or_else(|| TaskError::handler("no comment pair to compare"))?;
    tracing::debug!(first = i, second = j, comments = comments.len(), "most similar pair");

    write_atomic_async(output, format!("{}\n{}", comments[i], comments[j])).await?;
    Ok((comments[i].clone(), comments[j].clone()))
}
