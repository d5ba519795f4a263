use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub embedding: EmbeddingConfig,

    #[serde(default)]
    pub commands: CommandsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,

    #[serde(default = "default_server_port")]
    pub port: u16,
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8002
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default = "default_logging_file")]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "datachore_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_file() -> bool {
    false
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: default_logging_file(),
            level: default_logging_level(),
            directory: None,
        }
    }
}

/// Location of the data directory and of every file a handler reads or writes.
///
/// Each entry is optional; unset entries resolve against `root` using the
/// built-in layout (see [`TaskPaths::under`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_root")]
    pub root: String,

    #[serde(default)]
    pub format_file: Option<String>,
    #[serde(default)]
    pub dates: Option<String>,
    #[serde(default)]
    pub dates_output: Option<String>,
    #[serde(default)]
    pub contacts: Option<String>,
    #[serde(default)]
    pub contacts_output: Option<String>,
    #[serde(default)]
    pub logs_dir: Option<String>,
    #[serde(default)]
    pub logs_output: Option<String>,
    #[serde(default)]
    pub docs_dir: Option<String>,
    #[serde(default)]
    pub docs_index: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_output: Option<String>,
    #[serde(default)]
    pub credit_card_output: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub comments_output: Option<String>,
    #[serde(default)]
    pub ticket_db: Option<String>,
    #[serde(default)]
    pub ticket_output: Option<String>,
}

fn default_data_root() -> String {
    "/data".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self::with_root(default_data_root())
    }
}

impl DataConfig {
    pub fn with_root(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            format_file: None,
            dates: None,
            dates_output: None,
            contacts: None,
            contacts_output: None,
            logs_dir: None,
            logs_output: None,
            docs_dir: None,
            docs_index: None,
            email: None,
            email_output: None,
            credit_card_output: None,
            comments: None,
            comments_output: None,
            ticket_db: None,
            ticket_output: None,
        }
    }

    /// Resolve the configured layout into concrete paths.
    pub fn resolve(&self) -> TaskPaths {
        let root = if self.root.trim().is_empty() {
            default_data_root()
        } else {
            self.root.clone()
        };
        let root = PathBuf::from(shellexpand::tilde(&root).into_owned());
        let base = TaskPaths::under(&root);
        let pick = |opt: &Option<String>, fallback: PathBuf| -> PathBuf {
            opt.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| PathBuf::from(shellexpand::tilde(s).into_owned()))
                .unwrap_or(fallback)
        };

        TaskPaths {
            format_file: pick(&self.format_file, base.format_file),
            dates: pick(&self.dates, base.dates),
            dates_output: pick(&self.dates_output, base.dates_output),
            contacts: pick(&self.contacts, base.contacts),
            contacts_output: pick(&self.contacts_output, base.contacts_output),
            logs_dir: pick(&self.logs_dir, base.logs_dir),
            logs_output: pick(&self.logs_output, base.logs_output),
            docs_dir: pick(&self.docs_dir, base.docs_dir),
            docs_index: pick(&self.docs_index, base.docs_index),
            email: pick(&self.email, base.email),
            email_output: pick(&self.email_output, base.email_output),
            credit_card_output: pick(&self.credit_card_output, base.credit_card_output),
            comments: pick(&self.comments, base.comments),
            comments_output: pick(&self.comments_output, base.comments_output),
            ticket_db: pick(&self.ticket_db, base.ticket_db),
            ticket_output: pick(&self.ticket_output, base.ticket_output),
            root,
        }
    }
}

/// Concrete file layout handed to the handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPaths {
    pub root: PathBuf,
    pub format_file: PathBuf,
    pub dates: PathBuf,
    pub dates_output: PathBuf,
    pub contacts: PathBuf,
    pub contacts_output: PathBuf,
    pub logs_dir: PathBuf,
    pub logs_output: PathBuf,
    pub docs_dir: PathBuf,
    pub docs_index: PathBuf,
    pub email: PathBuf,
    pub email_output: PathBuf,
    pub credit_card_output: PathBuf,
    pub comments: PathBuf,
    pub comments_output: PathBuf,
    pub ticket_db: PathBuf,
    pub ticket_output: PathBuf,
}

impl TaskPaths {
    /// The built-in layout rooted at `root`.
    pub fn under(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            format_file: root.join("format.md"),
            dates: root.join("dates.txt"),
            dates_output: root.join("dates-wednesdays.txt"),
            contacts: root.join("contacts.json"),
            contacts_output: root.join("contacts-sorted.json"),
            logs_dir: root.join("logs"),
            logs_output: root.join("logs-recent.txt"),
            docs_dir: root.join("docs"),
            docs_index: root.join("docs").join("index.json"),
            email: root.join("email.txt"),
            email_output: root.join("email-sender.txt"),
            credit_card_output: root.join("credit-card.txt"),
            comments: root.join("comments.txt"),
            comments_output: root.join("comments-similar.txt"),
            ticket_db: root.join("ticket-sales.db"),
            ticket_output: root.join("ticket-sales-gold.txt"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_url")]
    pub url: String,

    /// Bearer token; usually supplied through `AIPROXY_TOKEN`.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_llm_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_llm_max_tokens")]
    pub max_tokens: u32,
}

fn default_llm_url() -> String {
    "https://api.aiproxy.com/v1/llm".to_string()
}

fn default_llm_timeout_ms() -> u64 {
    10_000
}

fn default_llm_max_tokens() -> u32 {
    100
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            url: default_llm_url(),
            api_key: String::new(),
            timeout_ms: default_llm_timeout_ms(),
            max_tokens: default_llm_max_tokens(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    Ollama,
    OpenAI,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    #[serde(default = "default_embedding_provider")]
    pub provider: EmbeddingProvider,

    #[serde(default = "default_embedding_base_url")]
    pub base_url: String,

    #[serde(default = "default_embedding_model")]
    pub model: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_embedding_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_embedding_provider() -> EmbeddingProvider {
    EmbeddingProvider::Ollama
}

fn default_embedding_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_embedding_model() -> String {
    "all-minilm".to_string()
}

fn default_embedding_timeout_ms() -> u64 {
    30_000
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: default_embedding_provider(),
            base_url: default_embedding_base_url(),
            model: default_embedding_model(),
            api_key: String::new(),
            timeout_ms: default_embedding_timeout_ms(),
        }
    }
}

/// argv templates for the two handlers that shell out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandsConfig {
    /// The email argument is appended as the final argument.
    #[serde(default = "default_generate_data_cmd")]
    pub generate_data: Vec<String>,

    /// The file to format is appended as the final argument.
    #[serde(default = "default_format_cmd")]
    pub format: Vec<String>,
}

fn default_generate_data_cmd() -> Vec<String> {
    vec![
        "python3".to_string(),
        "https://raw.githubusercontent.com/sanand0/tools-in-data-science-public/tds-2025-01/project-1/datagen.py".to_string(),
    ]
}

fn default_format_cmd() -> Vec<String> {
    vec![
        "npx".to_string(),
        "prettier@3.4.2".to_string(),
        "--write".to_string(),
    ]
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            generate_data: default_generate_data_cmd(),
            format: default_format_cmd(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.server.port, 8002);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.data.root, "/data");
        assert_eq!(cfg.llm.timeout_ms, 10_000);
        assert_eq!(cfg.llm.max_tokens, 100);
        assert_eq!(cfg.embedding.provider, EmbeddingProvider::Ollama);
        assert_eq!(cfg.commands.format.last().map(String::as_str), Some("--write"));
    }

    #[test]
    fn resolve_uses_builtin_layout() {
        let paths = DataConfig::with_root("/srv/data").resolve();
        assert_eq!(paths.dates, PathBuf::from("/srv/data/dates.txt"));
        assert_eq!(paths.docs_index, PathBuf::from("/srv/data/docs/index.json"));
        assert_eq!(paths.ticket_db, PathBuf::from("/srv/data/ticket-sales.db"));
    }

    #[test]
    fn resolve_honours_overrides() {
        let cfg: DataConfig = toml::from_str(
            r#"
            root = "/srv/data"
            comments = "/tmp/other-comments.txt"
            "#,
        )
        .unwrap();
        let paths = cfg.resolve();
        assert_eq!(paths.comments, PathBuf::from("/tmp/other-comments.txt"));
        assert_eq!(
            paths.comments_output,
            PathBuf::from("/srv/data/comments-similar.txt")
        );
    }

    #[test]
    fn embedding_provider_parses_lowercase() {
        let cfg: EmbeddingConfig = toml::from_str(r#"provider = "openai""#).unwrap();
        assert_eq!(cfg.provider, EmbeddingProvider::OpenAI);
    }
}
