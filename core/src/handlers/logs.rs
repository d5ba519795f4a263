use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::Context;

use crate::util::write_atomic_str;

pub const RECENT_LOG_LIMIT: usize = 10;

/// `*.log` files directly under `dir`, newest first.
///
/// Files sharing a modification time keep their name order.
pub fn logs_by_recency(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let pattern = format!("{}/*.log", glob::Pattern::escape(&dir.to_string_lossy()));

    let mut entries: Vec<(SystemTime, PathBuf)> = Vec::new();
    for entry in glob::glob(&pattern).with_context(|| format!("bad log pattern {pattern}"))? {
        let path = entry?;
        let modified = std::fs::metadata(&path)
            .and_then(|m| m.modified())
            .with_context(|| format!("failed to stat {}", path.display()))?;
        entries.push((modified, path));
    }

    entries.sort_by(|a, b| b.0.cmp(&a.0));
    Ok(entries.into_iter().map(|(_, p)| p).collect())
}

fn first_line(path: &Path) -> anyhow::Result<String> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut line = String::new();
    BufReader::new(file)
        .read_line(&mut line)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(line.trim().to_string())
}

/// Write the first line of each of the most recent `limit` logs, newest first,
/// one per line.
pub fn recent_log_headlines(
    dir: &Path,
    output: &Path,
    limit: usize,
) -> anyhow::Result<Vec<String>> {
    let headlines = logs_by_recency(dir)?
        .iter()
        .take(limit)
        .map(|p| first_line(p))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut out = String::new();
    for line in &headlines {
        out.push_str(line);
        out.push('\n');
    }
    write_atomic_str(output, &out)?;
    Ok(headlines)
}
