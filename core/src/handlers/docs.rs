use std::collections::BTreeMap;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use crate::util::write_atomic;

/// Title of a markdown document: the first line starting with `#`, with the
/// marker run and surrounding whitespace removed.
pub fn first_heading<R: BufRead>(reader: R) -> anyhow::Result<Option<String>> {
    for line in reader.lines() {
        let line = line?;
        if line.starts_with('#') {
            return Ok(Some(line.trim_start_matches('#').trim().to_string()));
        }
    }
    Ok(None)
}

/// Map every `*.md` directly under `dir` to its title. Files without a heading
/// are left out.
pub fn collect_titles(dir: &Path) -> anyhow::Result<BTreeMap<String, String>> {
    let pattern = format!("{}/*.md", glob::Pattern::escape(&dir.to_string_lossy()));
    let mut index = BTreeMap::new();

    for entry in glob::glob(&pattern).with_context(|| format!("bad docs pattern {pattern}"))? {
        let path = entry?;
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
            continue;
        };
        let file = std::fs::File::open(&path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        match first_heading(BufReader::new(file))
            .with_context(|| format!("failed to read {}", path.display()))?
        {
            Some(title) => {
                index.insert(name, title);
            }
            None => tracing::debug!(file = %path.display(), "no heading, skipped"),
        }
    }
    Ok(index)
}

fn to_json_4_spaces<T: Serialize>(value: &T) -> anyhow::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}

pub fn build_doc_index(dir: &Path, output: &Path) -> anyhow::Result<BTreeMap<String, String>> {
    let index = collect_titles(dir)?;
    write_atomic(output, &to_json_4_spaces(&index)?)?;
    Ok(index)
}
