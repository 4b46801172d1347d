//! Local embedding model provider (requires the `fastembed` feature).
//!
//! Wraps a fastembed ONNX text-embedding model so it can be shared as an
//! [`EmbeddingProvider`]. Load it once per process; loading downloads the
//! model on first use and is far more expensive than any single batch.

use tracing::info;

use crate::{EmbeddingProvider, Error, Result};

pub use fastembed::EmbeddingModel;

/// Sentence-embedding provider backed by fastembed.
///
/// ## Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use quarry::{DocumentIndex, FastEmbedProvider};
///
/// // all-MiniLM-L6-v2, 384 dimensions
/// let provider = Arc::new(FastEmbedProvider::try_default()?);
/// let mut index = DocumentIndex::new(provider);
/// index.upsert(1, &std::fs::read_to_string("handbook.txt")?)?;
/// ```
pub struct FastEmbedProvider {
    model: fastembed::TextEmbedding,
    name: String,
    dimension: usize,
    batch_size: Option<usize>,
}

impl FastEmbedProvider {
    /// Load `all-MiniLM-L6-v2`.
    ///
    /// # Errors
    ///
    /// Returns an error if the model fails to load.
    pub fn try_default() -> Result<Self> {
        Self::try_new(EmbeddingModel::AllMiniLML6V2)
    }

    /// Load the given model and measure its output dimension.
    ///
    /// # Errors
    ///
    /// Returns an error if the model fails to load or cannot embed a probe text.
    pub fn try_new(model: EmbeddingModel) -> Result<Self> {
        let name = format!("{model:?}");
        info!(model = %name, "loading embedding model");

        let model = fastembed::TextEmbedding::try_new(fastembed::InitOptions::new(model))
            .map_err(|e| Error::Embedding(e.to_string()))?;

        let dimension = model
            .embed(vec!["dimension probe"], None)
            .map_err(|e| Error::Embedding(e.to_string()))?
            .first()
            .map(Vec::len)
            .ok_or_else(|| Error::Embedding("model returned no probe vector".into()))?;

        info!(model = %name, dimension, "embedding model loaded");
        Ok(Self {
            model,
            name,
            dimension,
            batch_size: None,
        })
    }

    /// Set the inference batch size used inside one provider call.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    /// The model's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl EmbeddingProvider for FastEmbedProvider {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        self.model
            .embed(texts.to_vec(), self.batch_size)
            .map_err(|e| Error::Embedding(e.to_string()))
    }

    fn dimension(&self) -> Option<usize> {
        Some(self.dimension)
    }
}

impl std::fmt::Debug for FastEmbedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FastEmbedProvider")
            .field("name", &self.name)
            .field("dimension", &self.dimension)
            .field("batch_size", &self.batch_size)
            .finish_non_exhaustive()
    }
}
