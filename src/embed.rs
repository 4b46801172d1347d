//! Embedding providers and batch orchestration.
//!
//! The model itself lives outside this crate behind [`EmbeddingProvider`].
//! [`Embedder`] owns the contract around it: one provider call per batch, and
//! every returned batch checked before it is used.
//!
//! ```text
//! chunks:   [C0, C1, C2]
//! batch:    ["c0 text", "c1 text", "c2 text"]   -> one provider call
//! vectors:  [V0, V1, V2]                        <- length must be 3
//! attached: C0.embedding = V0, C1.embedding = V1, ...
//! ```
//!
//! A provider that drops or duplicates a vector would otherwise shift every
//! later embedding onto the wrong chunk.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::vector::check_dimension;
use crate::{Chunk, ChunkingConfig, Error, Result, WordChunker};

/// Maps a batch of texts to fixed-dimension vectors.
///
/// Implementations return exactly one vector per input text, in order, and
/// use the same dimension for every call. Failures are reported as
/// [`Error::Embedding`].
///
/// No retry, pooling, or timeout is layered on top of a provider; callers that
/// need those wrap the provider themselves.
///
/// ```rust
/// use quarry::{EmbeddingProvider, Result};
///
/// /// Counts vowels and consonants.
/// struct Letters;
///
/// impl EmbeddingProvider for Letters {
///     fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
///         Ok(texts
///             .iter()
///             .map(|t| {
///                 let vowels = t.chars().filter(|c| "aeiou".contains(*c)).count();
///                 let letters = t.chars().filter(|c| c.is_alphabetic()).count();
///                 vec![vowels as f32, (letters - vowels) as f32]
///             })
///             .collect())
///     }
///
///     fn dimension(&self) -> Option<usize> {
///         Some(2)
///     }
/// }
/// ```
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of texts.
    ///
    /// # Errors
    ///
    /// [`Error::Embedding`] when the model cannot produce vectors.
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// The vector dimension, if known ahead of time.
    fn dimension(&self) -> Option<usize> {
        None
    }
}

/// Embed `texts` with a single call to `provider`, checking the returned batch.
///
/// An empty batch returns immediately without calling the provider.
///
/// # Errors
///
/// - [`Error::Embedding`] if the provider fails.
/// - [`Error::BatchLengthMismatch`] if it returns the wrong number of vectors.
/// - [`Error::DimensionMismatch`] if the vectors disagree on dimension, with
///   each other or with [`EmbeddingProvider::dimension`].
pub fn embed_batch(provider: &dyn EmbeddingProvider, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
    if texts.is_empty() {
        return Ok(vec![]);
    }

    let vectors = provider.embed(texts).inspect_err(|e| {
        warn!(batch = texts.len(), error = %e, "embedding provider failed");
    })?;

    if vectors.len() != texts.len() {
        return Err(Error::BatchLengthMismatch {
            expected: texts.len(),
            actual: vectors.len(),
        });
    }

    let dim = provider.dimension().unwrap_or_else(|| vectors[0].len());
    for v in &vectors {
        check_dimension(dim, v)?;
    }

    debug!(batch = texts.len(), dim, "embedded batch");
    Ok(vectors)
}

/// Embed a single query string.
pub(crate) fn embed_query(provider: &dyn EmbeddingProvider, query: &str) -> Result<Vec<f32>> {
    let mut vectors = embed_batch(provider, &[query])?;
    // embed_batch guarantees exactly one vector for one text
    Ok(vectors.swap_remove(0))
}

/// Batch orchestration over a shared provider.
#[derive(Clone)]
pub struct Embedder {
    provider: Arc<dyn EmbeddingProvider>,
}

impl Embedder {
    /// Wrap a provider. Construct the provider once and share it.
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self { provider }
    }

    /// The underlying provider.
    pub fn provider(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.provider
    }

    /// Embed `texts` with a single provider call. See [`embed_batch`].
    ///
    /// # Errors
    ///
    /// Provider failure, wrong batch length, or inconsistent dimensions.
    pub fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        embed_batch(self.provider.as_ref(), texts)
    }

    /// Embed a single query string.
    ///
    /// # Errors
    ///
    /// Same as [`Embedder::embed_batch`].
    pub fn embed_query(&self, query: &str) -> Result<Vec<f32>> {
        embed_query(self.provider.as_ref(), query)
    }

    /// Attach an embedding to every chunk using one provider call.
    ///
    /// Chunks are only modified if the whole batch succeeds.
    ///
    /// # Errors
    ///
    /// Same as [`Embedder::embed_batch`].
    pub fn embed_chunks(&self, chunks: &mut [Chunk]) -> Result<()> {
        let texts: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        let vectors = self.embed_batch(&texts)?;

        for (chunk, vector) in chunks.iter_mut().zip(vectors) {
            chunk.embedding = Some(vector);
        }
        Ok(())
    }

    /// Chunk a document and embed the result.
    ///
    /// # Errors
    ///
    /// Fails on an invalid `config` (before the provider is called) or on any
    /// embedding error.
    pub fn process_document(&self, text: &str, config: &ChunkingConfig) -> Result<Vec<Chunk>> {
        let mut chunks = WordChunker::from_config(*config)?.chunk(text);
        self.embed_chunks(&mut chunks)?;
        Ok(chunks)
    }
}

impl std::fmt::Debug for Embedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Embedder")
            .field("dimension", &self.provider.dimension())
            .finish_non_exhaustive()
    }
}
