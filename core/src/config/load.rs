use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default datachore directory: ~/.datachore
pub fn get_datachore_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".datachore"))
}

pub fn get_datachore_env_file_path() -> anyhow::Result<PathBuf> {
    Ok(get_datachore_data_dir()?.join(".env"))
}

/// `.env` files to load, highest priority first: next to an explicit config,
/// then `~/.datachore/.env`, then `./.env`.
pub fn env_file_candidates(config: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(dir) = config.and_then(Path::parent) {
        let dir = if dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            dir
        };
        candidates.push(dir.join(".env"));
    }
    if let Ok(home_env) = get_datachore_env_file_path() {
        candidates.push(home_env);
    }
    let local = PathBuf::from(".env");
    if !candidates.iter().any(|c| c == &local || c == Path::new("./.env")) {
        candidates.push(local);
    }
    candidates
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.datachore/config.toml (highest)
    let home_config = get_datachore_data_dir()?.join("config.toml");

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let mut cfg = if home_config.exists() {
        parse_file(&home_config)?
    } else if local_config.exists() {
        parse_file(local_config)?
    } else {
        AppConfig::default()
    };

    apply_env_overrides(&mut cfg);
    Ok(cfg)
}

/// Load an explicit config file (used by `--config`), still honouring env overrides.
pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let mut cfg = parse_file(path)?;
    apply_env_overrides(&mut cfg);
    Ok(cfg)
}

fn parse_file(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    toml::from_str::<AppConfig>(&s)
        .map_err(|e| anyhow::anyhow!("failed to parse {}: {e}", path.display()))
}

// Environment variable overrides (Priority 0: highest)
fn apply_env_overrides(cfg: &mut AppConfig) {
    if let Some(v) = non_empty_env("AIPROXY_TOKEN") {
        cfg.llm.api_key = v;
    }
    if let Some(v) = non_empty_env("DATACHORE_LLM_URL") {
        cfg.llm.url = v;
    }
    if let Some(v) = non_empty_env("DATACHORE_DATA_ROOT") {
        cfg.data.root = v;
    }
    if let Some(v) = non_empty_env("DATACHORE_EMBEDDING_API_KEY") {
        cfg.embedding.api_key = v;
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_from_path_reads_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            [server]
            port = 9100

            [data]
            root = "/srv/chores"

            [llm]
            timeout_ms = 2500
            "#,
        )
        .unwrap();

        let cfg = load_from_path(&path).unwrap();
        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.llm.timeout_ms, 2500);
    }

    #[test]
    fn env_candidates_put_config_sibling_first() {
        let candidates = env_file_candidates(Some(Path::new("/etc/datachore/config.toml")));
        assert_eq!(candidates[0], PathBuf::from("/etc/datachore/.env"));
        assert_eq!(candidates.last(), Some(&PathBuf::from(".env")));
    }

    #[test]
    fn env_candidates_without_config_end_with_local_file() {
        let candidates = env_file_candidates(None);
        assert_eq!(candidates.last(), Some(&PathBuf::from(".env")));
        assert!(candidates.iter().all(|c| c.ends_with(".env")));
    }

    #[test]
    fn env_candidates_do_not_repeat_local_file() {
        let candidates = env_file_candidates(Some(Path::new("config.toml")));
        let local = candidates
            .iter()
            .filter(|c| *c == Path::new(".env") || *c == Path::new("./.env"))
            .count();
        assert_eq!(local, 1);
    }

    #[test]
    fn load_from_path_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();

        let err = load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }
}
