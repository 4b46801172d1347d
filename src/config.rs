//! Chunking and retrieval configuration.
//!
//! Both structs are plain values with defaults matching the usual document-QA
//! setup: 1000-word windows, 200 words of overlap, top 5 results.
//!
//! ```rust
//! use quarry::{ChunkingConfig, RetrievalConfig, ZeroNormPolicy};
//!
//! let chunking = ChunkingConfig::new(500, 50).with_min_chunk_words(20);
//! assert!(chunking.validate().is_ok());
//!
//! let retrieval = RetrievalConfig::default().with_zero_norm(ZeroNormPolicy::ZeroScore);
//! assert_eq!(retrieval.top_k, 5);
//! ```

use crate::{Error, Result};

/// Default window size in words.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;
/// Default overlap between adjacent windows, in words.
pub const DEFAULT_OVERLAP: usize = 200;
/// Windows with fewer words than this are dropped.
pub const MIN_CHUNK_WORDS: usize = 10;
/// Default number of results returned by a search.
pub const DEFAULT_TOP_K: usize = 5;

/// Word-window chunking parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChunkingConfig {
    /// Words per window.
    pub chunk_size: usize,
    /// Words shared by adjacent windows. Must be smaller than `chunk_size`.
    pub overlap: usize,
    /// Minimum words for a window to be emitted.
    pub min_chunk_words: usize,
}

impl ChunkingConfig {
    /// Config with the given size and overlap and the default word floor.
    #[must_use]
    pub const fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
            min_chunk_words: MIN_CHUNK_WORDS,
        }
    }

    /// Override the minimum words per emitted chunk.
    #[must_use]
    pub const fn with_min_chunk_words(mut self, min: usize) -> Self {
        self.min_chunk_words = min;
        self
    }

    /// Check that the window can advance.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidChunkSize`] if `chunk_size == 0`,
    /// [`Error::OverlapExceedsSize`] if `overlap >= chunk_size`.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::InvalidChunkSize(self.chunk_size));
        }
        if self.overlap >= self.chunk_size {
            return Err(Error::OverlapExceedsSize {
                size: self.chunk_size,
                overlap: self.overlap,
            });
        }
        Ok(())
    }

    /// Words between consecutive window starts. Only meaningful after `validate`.
    #[must_use]
    pub(crate) const fn step(&self) -> usize {
        self.chunk_size - self.overlap
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP)
    }
}

/// What to do when a zero-norm vector shows up in a similarity comparison.
///
/// Cosine similarity divides by both norms, so a zero vector has no defined
/// score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ZeroNormPolicy {
    /// Fail the search with [`Error::DegenerateVector`].
    #[default]
    Reject,
    /// Score the comparison as 0.0 and keep ranking.
    ZeroScore,
}

/// Similarity search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RetrievalConfig {
    /// Maximum number of results.
    pub top_k: usize,
    /// Zero-norm handling.
    pub zero_norm: ZeroNormPolicy,
}

impl RetrievalConfig {
    /// Config returning at most `top_k` results.
    #[must_use]
    pub const fn new(top_k: usize) -> Self {
        Self {
            top_k,
            zero_norm: ZeroNormPolicy::Reject,
        }
    }

    /// Set the zero-norm policy.
    #[must_use]
    pub const fn with_zero_norm(mut self, policy: ZeroNormPolicy) -> Self {
        self.zero_norm = policy;
        self
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ChunkingConfig::default();
        assert_eq!(cfg.chunk_size, 1000);
        assert_eq!(cfg.overlap, 200);
        assert_eq!(cfg.min_chunk_words, 10);
        assert_eq!(cfg.step(), 800);
        assert!(cfg.validate().is_ok());

        let ret = RetrievalConfig::default();
        assert_eq!(ret.top_k, 5);
        assert_eq!(ret.zero_norm, ZeroNormPolicy::Reject);
    }

    #[test]
    fn test_zero_size_rejected() {
        let err = ChunkingConfig::new(0, 0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidChunkSize(0)));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_overlap_equal_to_size_rejected() {
        let err = ChunkingConfig::new(10, 10).validate().unwrap_err();
        assert!(matches!(
            err,
            Error::OverlapExceedsSize {
                size: 10,
                overlap: 10
            }
        ));
    }

    #[test]
    fn test_overlap_larger_than_size_rejected() {
        assert!(ChunkingConfig::new(10, 25).validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_config_fills_defaults() {
        let cfg: ChunkingConfig = serde_json::from_str(r#"{"chunk_size": 300}"#).unwrap();
        assert_eq!(cfg.chunk_size, 300);
        assert_eq!(cfg.overlap, 200);

        let ret: RetrievalConfig = serde_json::from_str(r#"{"zero_norm": "zero_score"}"#).unwrap();
        assert_eq!(ret.top_k, 5);
        assert_eq!(ret.zero_norm, ZeroNormPolicy::ZeroScore);
    }
}
