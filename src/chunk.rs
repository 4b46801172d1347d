//! The Chunk type: a window of words with position metadata.

/// A contiguous slice of a document's word sequence.
///
/// ## Word Offsets
///
/// `start` and `end` are word offsets into the whitespace-split source, not
/// byte offsets. The range is half-open:
///
/// ```rust
/// use quarry::Chunk;
///
/// let words: Vec<&str> = "alpha beta gamma delta".split_whitespace().collect();
/// let chunk = Chunk::new("beta gamma", 1, 3, 0);
///
/// assert_eq!(words[chunk.span()].join(" "), chunk.content);
/// assert_eq!(chunk.word_count(), 2);
/// ```
///
/// ## Overlap
///
/// Adjacent chunks share `overlap` words; starts are strictly increasing:
///
/// ```text
/// size = 5, overlap = 2
/// Chunk 0: words [0..5)
/// Chunk 1: words [3..8)   <- shares words 3 and 4 with chunk 0
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chunk {
    /// Zero-based position among the chunks emitted for one document.
    pub index: usize,
    /// The window's words joined by single spaces.
    pub content: String,
    /// Word offset where this chunk starts.
    pub start: usize,
    /// Word offset where this chunk ends (exclusive).
    pub end: usize,
    /// Embedding vector, present once the embedding step has run.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub embedding: Option<Vec<f32>>,
}

impl Chunk {
    /// Create a chunk without an embedding.
    #[must_use]
    pub fn new(content: impl Into<String>, start: usize, end: usize, index: usize) -> Self {
        Self {
            index,
            content: content.into(),
            start,
            end,
            embedding: None,
        }
    }

    /// Number of source words in this chunk.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.end - self.start
    }

    /// The word span of this chunk in the source document.
    #[must_use]
    pub fn span(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    /// Whether an embedding has been attached.
    #[must_use]
    pub fn is_embedded(&self) -> bool {
        self.embedding.is_some()
    }
}

impl std::fmt::Display for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chunk {{ index: {}, words: {}..{}, embedded: {} }}",
            self.index,
            self.start,
            self.end,
            self.is_embedded()
        )
    }
}
