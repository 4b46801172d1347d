//! Top-k retrieval by cosine similarity.
//!
//! ## How It Works
//!
//! ```text
//! query    "python web frameworks"  -> provider -> q
//! vectors  [v0, v1, v2, v3]
//! scores   [cos(v0,q)=0.41, cos(v1,q)=0.87, cos(v2,q)=0.87, cos(v3,q)=0.02]
//! ranked   (1, 0.87) (2, 0.87) (0, 0.41) (3, 0.02)
//!                     ^ equal scores keep ascending index order
//! top_k=2  (1, 0.87) (2, 0.87)
//! ```
//!
//! Scoring is a brute-force scan: every candidate is compared with the query.
//! The query norm is computed once. The scan is exact, and for the few
//! hundred chunks a document set usually holds it is not the bottleneck; the
//! provider call is.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::debug;

use crate::embed::embed_query;
use crate::vector::{check_dimension, dot, norm, scored};
use crate::{Embedder, EmbeddingProvider, Result, RetrievalConfig, ZeroNormPolicy};

/// One ranked candidate: its position in the input and its cosine score.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimilarityResult {
    /// Position in the candidate sequence passed to the search.
    pub index: usize,
    /// Cosine similarity to the query, in `[-1, 1]`.
    pub score: f32,
}

/// Rank `candidates` against an already-embedded query.
///
/// Returns at most `top_k` results, best first. Equal scores are ordered by
/// ascending index.
///
/// ```rust
/// use quarry::{rank, ZeroNormPolicy};
///
/// let candidates: Vec<Vec<f32>> = vec![vec![1.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0]];
/// let hits = rank(&[1.0, 0.0], &candidates, 2, ZeroNormPolicy::Reject).unwrap();
///
/// assert_eq!(hits.len(), 2);
/// assert_eq!((hits[0].index, hits[1].index), (0, 1));
/// assert!((hits[0].score - 1.0).abs() < 1e-6);
/// ```
///
/// # Errors
///
/// - [`Error::DimensionMismatch`](crate::Error::DimensionMismatch) if any
///   candidate's length differs from the query's.
/// - [`Error::DegenerateVector`](crate::Error::DegenerateVector) for a
///   zero-norm vector under [`ZeroNormPolicy::Reject`], or a non-finite score.
pub fn rank<V: AsRef<[f32]>>(
    query: &[f32],
    candidates: &[V],
    top_k: usize,
    policy: ZeroNormPolicy,
) -> Result<Vec<SimilarityResult>> {
    if candidates.is_empty() {
        return Ok(vec![]);
    }

    let query_norm = norm(query);
    let mut results = candidates
        .iter()
        .enumerate()
        .map(|(index, v)| {
            let v = v.as_ref();
            check_dimension(query.len(), v)?;
            let score = scored(dot(query, v), query_norm, norm(v), Some(index), policy)?;
            Ok(SimilarityResult { index, score })
        })
        .collect::<Result<Vec<_>>>()?;

    results.sort_by(by_score_then_index);
    results.truncate(top_k);

    debug!(
        candidates = candidates.len(),
        returned = results.len(),
        best = results.first().map(|r| r.score),
        "ranked candidates"
    );
    Ok(results)
}

/// Descending score, then ascending index.
fn by_score_then_index(a: &SimilarityResult, b: &SimilarityResult) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.index.cmp(&b.index))
}

/// Embed `query` with `provider` and rank `candidates` against it.
///
/// An empty candidate set returns no results without calling the provider.
/// Zero-norm vectors are rejected; use [`Retriever`] to choose another policy.
///
/// # Errors
///
/// Any embedding error, plus the errors of [`rank`].
pub fn search<V: AsRef<[f32]>>(
    provider: &dyn EmbeddingProvider,
    query: &str,
    candidates: &[V],
    top_k: usize,
) -> Result<Vec<SimilarityResult>> {
    if candidates.is_empty() {
        return Ok(vec![]);
    }
    let query_vector = embed_query(provider, query)?;
    rank(&query_vector, candidates, top_k, ZeroNormPolicy::Reject)
}

/// Similarity search over caller-supplied vectors with a shared provider.
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use quarry::{Retriever, RetrievalConfig};
///
/// let retriever = Retriever::new(Arc::new(my_provider), RetrievalConfig::default());
/// let stored: Vec<Vec<f32>> = load_chunk_vectors();
/// for hit in retriever.search("how is overlap chosen?", &stored)? {
///     println!("{} {:.3}", hit.index, hit.score);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Retriever {
    embedder: Embedder,
    config: RetrievalConfig,
}

impl Retriever {
    /// Create a retriever over `provider`.
    pub fn new(provider: Arc<dyn EmbeddingProvider>, config: RetrievalConfig) -> Self {
        Self::with_embedder(Embedder::new(provider), config)
    }

    /// Create a retriever sharing an existing [`Embedder`].
    pub fn with_embedder(embedder: Embedder, config: RetrievalConfig) -> Self {
        Self { embedder, config }
    }

    /// The retrieval config.
    #[must_use]
    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// The embedder used for queries.
    pub fn embedder(&self) -> &Embedder {
        &self.embedder
    }

    /// Return the configured `top_k` best candidates for `query`.
    ///
    /// # Errors
    ///
    /// See [`search`].
    pub fn search<V: AsRef<[f32]>>(
        &self,
        query: &str,
        candidates: &[V],
    ) -> Result<Vec<SimilarityResult>> {
        self.search_top_k(query, candidates, self.config.top_k)
    }

    /// Like [`Retriever::search`] with an explicit `top_k`.
    ///
    /// # Errors
    ///
    /// See [`search`].
    pub fn search_top_k<V: AsRef<[f32]>>(
        &self,
        query: &str,
        candidates: &[V],
        top_k: usize,
    ) -> Result<Vec<SimilarityResult>> {
        if candidates.is_empty() {
            return Ok(vec![]);
        }
        let query_vector = self.embedder.embed_query(query)?;
        rank(&query_vector, candidates, top_k, self.config.zero_norm)
    }
}
