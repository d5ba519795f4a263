use std::path::Path;

use datachore_core::api::CliError;

/// Parse `KEY=VALUE` lines; blank lines and `#` comments are skipped.
pub fn parse_env_file(path: &Path) -> Result<Vec<(String, String)>, CliError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        CliError::Config(format!("failed to read env file {}: {e}", path.display()))
    })?;
    parse_env_content(&content)
}

pub fn parse_env_content(content: &str) -> Result<Vec<(String, String)>, CliError> {
    let mut out = Vec::new();

    for (idx, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let (k, v) = line.split_once('=').ok_or_else(|| {
            CliError::Config(format!(
                "invalid env line at {} (expected KEY=VALUE)",
                idx + 1
            ))
        })?;
        let key = k.trim();
        if key.is_empty() {
            return Err(CliError::Config(format!(
                "invalid env line at {} (empty key)",
                idx + 1
            )));
        }
        let value = parse_env_value(v.trim(), idx + 1)?;
        out.push((key.to_string(), value));
    }

    Ok(out)
}

/// Export the pairs of an env file into the process environment, keeping
/// variables that are already set. A missing file is not an error.
pub fn load_env_file(path: &Path) -> Result<usize, CliError> {
    if !path.is_file() {
        return Ok(0);
    }
    let mut applied = 0;
    for (key, value) in parse_env_file(path)? {
        if std::env::var_os(&key).is_none() {
            std::env::set_var(&key, value);
            applied += 1;
        }
    }
    tracing::debug!(path = %path.display(), applied, "env file loaded");
    Ok(applied)
}

fn parse_env_value(value: &str, line_no: usize) -> Result<String, CliError> {
    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));
    if quoted {
        return unescape_env_value(&value[1..value.len() - 1], line_no);
    }
    Ok(value.to_string())
}

fn unescape_env_value(value: &str, line_no: usize) -> Result<String, CliError> {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let Some(next) = chars.next() else {
            return Err(CliError::Config(format!(
                "invalid escape at line {} (trailing backslash)",
                line_no
            )));
        };
        match next {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            other => out.push(other),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_quoted_and_exported_values() {
        let pairs = parse_env_content(
            "# comment\n\nAIPROXY_TOKEN=abc\nexport NAME=\"a b\\n\"\nSINGLE='x'\n",
        )
        .unwrap();
        assert_eq!(
            pairs,
            vec![
                ("AIPROXY_TOKEN".to_string(), "abc".to_string()),
                ("NAME".to_string(), "a b\n".to_string()),
                ("SINGLE".to_string(), "x".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_lines_without_equals() {
        let err = parse_env_content("JUSTAKEY\n").unwrap_err();
        assert!(err.to_string().contains("line at 1"));
    }

    #[test]
    fn rejects_trailing_backslash_in_quotes() {
        assert!(parse_env_content("K=\"oops\\\"\n").is_err());
    }

    #[test]
    fn load_keeps_existing_variables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(
            &path,
            "DATACHORE_UTILS_TEST_KEEP=from-file\nDATACHORE_UTILS_TEST_NEW=fresh\n",
        )
        .unwrap();
        std::env::set_var("DATACHORE_UTILS_TEST_KEEP", "from-env");

        let applied = load_env_file(&path).unwrap();

        assert_eq!(applied, 1);
        assert_eq!(
            std::env::var("DATACHORE_UTILS_TEST_KEEP").unwrap(),
            "from-env"
        );
        assert_eq!(std::env::var("DATACHORE_UTILS_TEST_NEW").unwrap(), "fresh");
    }

    #[test]
    fn missing_env_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_env_file(&dir.path().join("absent.env")).unwrap(), 0);
    }
}
