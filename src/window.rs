//! Word-window chunking with overlap.
//!
//! Split a document into words, then slide a window of `chunk_size` words
//! across them, advancing `chunk_size - overlap` words per step.
//!
//! ## How It Works
//!
//! ```text
//! chunk_size = 4, overlap = 1, min_chunk_words = 2
//!
//! Words:   w0 w1 w2 w3 w4 w5 w6 w7 w8 w9
//!
//! Chunk 0: w0 w1 w2 w3        [0..4)
//! Chunk 1: w3 w4 w5 w6        [3..7)   <- starts at 4 - 1 = 3
//! Chunk 2: w6 w7 w8 w9        [6..10)
//! Window:  w9                 [9..10)  <- 1 word < min_chunk_words, dropped
//! ```
//!
//! Every window whose start lies inside the document is considered, so the
//! tail window may be entirely contained in the previous one. Windows below
//! the word floor are skipped, and `index` counts emitted chunks only.
//!
//! ## Word Boundaries
//!
//! Words are runs of non-whitespace (Unicode `White_Space`). Runs of spaces,
//! tabs, and newlines collapse, so a chunk's `content` is always single-spaced
//! regardless of the source layout.

use tracing::{debug, trace};

use crate::{Chunk, ChunkingConfig, Result};

/// Word-window chunker with configurable overlap.
///
/// ## Example
///
/// ```rust
/// use quarry::WordChunker;
///
/// let text = (0..25).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
/// let chunker = WordChunker::new(12, 2).unwrap();
/// let chunks = chunker.chunk(&text);
///
/// // starts at 0, 10, 20; the window at 20 has only 5 words and is dropped
/// assert_eq!(chunks.len(), 2);
/// assert_eq!(chunks[1].start, 10);
/// assert_eq!(chunks[1].word_count(), 12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WordChunker {
    config: ChunkingConfig,
}

impl WordChunker {
    /// Create a chunker with the default word floor.
    ///
    /// # Errors
    ///
    /// Fails if `chunk_size == 0` or `overlap >= chunk_size`.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        Self::from_config(ChunkingConfig::new(chunk_size, overlap))
    }

    /// Create a chunker from a full config.
    ///
    /// # Errors
    ///
    /// Fails if the config does not validate.
    pub fn from_config(config: ChunkingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The config this chunker was built with.
    #[must_use]
    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Split text into overlapping word windows.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return vec![];
        }

        let step = self.config.step();
        let mut chunks = Vec::with_capacity(self.estimate_chunks(words.len()));
        let mut start = 0;

        while start < words.len() {
            let end = start.saturating_add(self.config.chunk_size).min(words.len());
            let count = end - start;

            if count >= self.config.min_chunk_words {
                chunks.push(Chunk::new(words[start..end].join(" "), start, end, chunks.len()));
            } else {
                trace!(start, count, "dropping short window");
            }

            start += step;
        }

        debug!(
            words = words.len(),
            chunks = chunks.len(),
            chunk_size = self.config.chunk_size,
            overlap = self.config.overlap,
            "chunked document"
        );
        chunks
    }

    /// Upper bound on the number of windows for `word_count` words.
    #[must_use]
    pub fn estimate_chunks(&self, word_count: usize) -> usize {
        word_count.div_ceil(self.config.step())
    }
}

/// Chunk `text` into windows of `chunk_size` words overlapping by `overlap`.
///
/// Equivalent to `WordChunker::new(chunk_size, overlap)?.chunk(text)`; the
/// configuration is checked even when `text` is empty.
///
/// # Errors
///
/// Fails if `chunk_size == 0` or `overlap >= chunk_size`.
pub fn chunk(text: &str, chunk_size: usize, overlap: usize) -> Result<Vec<Chunk>> {
    Ok(WordChunker::new(chunk_size, overlap)?.chunk(text))
}
