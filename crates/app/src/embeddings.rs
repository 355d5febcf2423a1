//! Text embedding client.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroizing;

use crate::config::embeddings::EmbeddingsConfig;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding request failed")]
    Http(#[from] reqwest::Error),

    #[error("embedding response contained no vectors")]
    EmptyResponse,
}

#[automock]
#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    /// Embed `text` into a vector.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingDatum {
    embedding: Vec<f32>,
}

impl EmbeddingResponse {
    fn into_first(self) -> Result<Vec<f32>, EmbeddingError> {
        self.data
            .into_iter()
            .next()
            .map(|datum| datum.embedding)
            .ok_or(EmbeddingError::EmptyResponse)
    }
}

/// Client for an OpenAI-compatible `/v1/embeddings` endpoint.
#[derive(Clone)]
pub struct OpenAiEmbeddingClient {
    http: Client,
    base_url: String,
    api_key: Zeroizing<String>,
    model: String,
}

impl OpenAiEmbeddingClient {
    #[must_use]
    pub fn new(config: &EmbeddingsConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.embeddings_base_url.trim_end_matches('/').to_string(),
            api_key: Zeroizing::new(config.embeddings_api_key.clone()),
            model: config.embeddings_model.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/embeddings", self.base_url)
    }
}

impl Debug for OpenAiEmbeddingClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("OpenAiEmbeddingClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl EmbeddingClient for OpenAiEmbeddingClient {
    #[tracing::instrument(name = "embeddings.embed", skip(self, text), fields(model = %self.model, chars = text.len()))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(self.api_key.as_str())
            .json(&EmbeddingRequest {
                model: &self.model,
                input: text,
            })
            .send()
            .await?
            .error_for_status()?;

        response.json::<EmbeddingResponse>().await?.into_first()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn config() -> EmbeddingsConfig {
        EmbeddingsConfig {
            embeddings_base_url: "https://api.openai.com/".to_string(),
            embeddings_api_key: "sk-test".to_string(),
            embeddings_model: "text-embedding-3-small".to_string(),
        }
    }

    #[test]
    fn endpoint_joins_base_url() {
        let client = OpenAiEmbeddingClient::new(&config());

        assert_eq!(client.endpoint(), "https://api.openai.com/v1/embeddings");
    }

    #[test]
    fn request_body_has_model_and_input() -> TestResult {
        let body = serde_json::to_value(EmbeddingRequest {
            model: "text-embedding-3-small",
            input: "chair Furniture New",
        })?;

        assert_eq!(
            body,
            serde_json::json!({ "model": "text-embedding-3-small", "input": "chair Furniture New" })
        );

        Ok(())
    }

    #[test]
    fn response_yields_first_vector() -> TestResult {
        let response: EmbeddingResponse = serde_json::from_str(
            r#"{ "object": "list", "data": [ { "index": 0, "embedding": [0.5, -0.25] } ] }"#,
        )?;

        assert_eq!(response.into_first()?, vec![0.5, -0.25]);

        Ok(())
    }

    #[test]
    fn empty_response_is_an_error() -> TestResult {
        let response: EmbeddingResponse = serde_json::from_str(r#"{ "data": [] }"#)?;

        assert!(matches!(
            response.into_first(),
            Err(EmbeddingError::EmptyResponse)
        ));

        Ok(())
    }
}
