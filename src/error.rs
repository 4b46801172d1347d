//! Error types for quarry.

use crate::index::DocumentId;

/// Errors that can occur during chunking, embedding, or retrieval.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid chunk size (must be > 0).
    #[error("invalid chunk size: {0} (must be > 0)")]
    InvalidChunkSize(usize),

    /// Overlap is not smaller than the chunk size, so the window would never advance.
    #[error("overlap {overlap} must be smaller than chunk size {size}")]
    OverlapExceedsSize {
        /// The chunk size.
        size: usize,
        /// The overlap that reached or exceeded the size.
        overlap: usize,
    },

    /// The embedding provider failed.
    #[error("embedding error: {0}")]
    Embedding(String),

    /// The embedding provider returned a different number of vectors than texts.
    #[error("embedding provider returned {actual} vectors for a batch of {expected}")]
    BatchLengthMismatch {
        /// Number of texts sent to the provider.
        expected: usize,
        /// Number of vectors it returned.
        actual: usize,
    },

    /// Two vectors that must be compared have different dimensionality.
    #[error("vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The reference dimension (query or provider).
        expected: usize,
        /// The offending vector's dimension.
        actual: usize,
    },

    /// A vector made cosine similarity undefined (zero norm or non-finite score).
    ///
    /// `index` is the candidate position, or `None` for the query vector.
    #[error("degenerate vector ({})", describe_position(*.index))]
    DegenerateVector {
        /// Candidate index, `None` for the query.
        index: Option<usize>,
    },

    /// A scoped search named a document the index does not hold.
    #[error("unknown document: {0}")]
    UnknownDocument(DocumentId),
}

impl Error {
    /// Whether this error comes from an invalid chunking configuration.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidChunkSize(_) | Self::OverlapExceedsSize { .. }
        )
    }

    /// Whether this error originates from the embedding provider (failure or bad batch).
    #[must_use]
    pub fn is_provider(&self) -> bool {
        matches!(self, Self::Embedding(_) | Self::BatchLengthMismatch { .. })
    }
}

fn describe_position(index: Option<usize>) -> String {
    match index {
        Some(i) => format!("candidate {i}"),
        None => "query".to_string(),
    }
}

/// Result type for quarry operations.
pub type Result<T> = std::result::Result<T, Error>;
