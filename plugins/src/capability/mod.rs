pub mod completion;
pub mod embedding;
mod http_error;

pub use completion::AiProxyCompletion;
pub use embedding::{OllamaEmbeddingService, OpenAIEmbeddingService};
