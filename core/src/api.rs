//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `datachore_core::api` instead of reaching into internal modules.

pub use crate::agent::{TaskAgent, TaskReport};
pub use crate::capability::{
    cosine_similarity, CompletionCapability, CompletionResult, EmbeddingCapability,
};
pub use crate::config::{
    env_file_candidates, get_datachore_data_dir, get_datachore_env_file_path, load_default,
    load_from_path, AppConfig, CommandsConfig, DataConfig, EmbeddingConfig, EmbeddingProvider,
    LlmConfig, LoggingConfig, ServerConfig, TaskPaths,
};
pub use crate::context::{Services, ServicesFactory};
pub use crate::dispatch::{Matcher, Task, TaskKind, TaskRegistry, TaskRule};
pub use crate::error::{CapabilityError, CapabilityErrorKind, CliError, TaskError};
