use std::path::Path;

use anyhow::Context;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};

use crate::util::write_atomic_str;

/// Parse one line of the dates file, trying each accepted format in turn.
pub fn parse_date(line: &str) -> Option<NaiveDate> {
    let line = line.trim();
    NaiveDate::parse_from_str(line, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(line, "%Y/%m/%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Count lines falling on `weekday`; lines that do not parse are skipped.
pub fn count_weekday<'a, I>(lines: I, weekday: Weekday) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .filter_map(parse_date)
        .filter(|d| d.weekday() == weekday)
        .count()
}

pub fn count_weekday_occurrences(
    input: &Path,
    output: &Path,
    weekday: Weekday,
) -> anyhow::Result<usize> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let count = count_weekday(content.lines(), weekday);
    tracing::debug!(input = %input.display(), weekday = %weekday, count, "dates counted");
    write_atomic_str(output, &count.to_string())?;
    Ok(count)
}
