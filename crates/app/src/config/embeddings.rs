//! Embeddings Config

use clap::Args;

/// Settings for the OpenAI-compatible embeddings endpoint.
#[derive(Clone, Args)]
pub struct EmbeddingsConfig {
    /// Embeddings API base URL
    #[arg(long, env = "EMBEDDINGS_BASE_URL", default_value = "https://api.openai.com")]
    pub embeddings_base_url: String,

    /// Embeddings API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub embeddings_api_key: String,

    /// Embedding model name
    #[arg(long, env = "EMBEDDINGS_MODEL", default_value = "text-embedding-3-small")]
    pub embeddings_model: String,
}

impl std::fmt::Debug for EmbeddingsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingsConfig")
            .field("embeddings_base_url", &self.embeddings_base_url)
            .field("embeddings_model", &self.embeddings_model)
            .finish_non_exhaustive()
    }
}
