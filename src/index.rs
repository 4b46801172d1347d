//! In-memory per-document chunk index.
//!
//! Holds the embedded chunks of many documents and searches across all of
//! them or across a chosen subset (for example the documents attached to one
//! question-answering session).
//!
//! ## Updates Replace
//!
//! A document's chunks are never patched. [`DocumentIndex::upsert`] re-chunks
//! and re-embeds the full text, then swaps the new sequence in. If that fails
//! the previous chunks stay in place.
//!
//! ```text
//! upsert(7, v1)  -> doc 7: [C0 C1 C2]
//! upsert(7, v2)  -> doc 7: [C0' C1']          <- whole sequence replaced
//! upsert(7, v3)  -> provider error, doc 7 still [C0' C1']
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    rank, Chunk, ChunkingConfig, Embedder, EmbeddingProvider, Error, Result, RetrievalConfig,
    WordChunker,
};

/// Identifier of a document in a [`DocumentIndex`].
pub type DocumentId = u64;

/// A chunk returned by a [`DocumentIndex`] search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit<'a> {
    /// The document the chunk belongs to.
    pub document: DocumentId,
    /// The matching chunk.
    pub chunk: &'a Chunk,
    /// Cosine similarity to the query.
    pub score: f32,
}

/// Embedded chunks keyed by document.
#[derive(Debug)]
pub struct DocumentIndex {
    embedder: Embedder,
    chunker: WordChunker,
    retrieval: RetrievalConfig,
    documents: BTreeMap<DocumentId, Vec<Chunk>>,
}

impl DocumentIndex {
    /// Create an empty index with default chunking and retrieval settings.
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            embedder: Embedder::new(provider),
            chunker: WordChunker::default(),
            retrieval: RetrievalConfig::default(),
            documents: BTreeMap::new(),
        }
    }

    /// Use `config` for subsequent upserts. Existing chunks are kept as they are.
    ///
    /// # Errors
    ///
    /// Fails if `config` does not validate.
    pub fn with_chunking(mut self, config: ChunkingConfig) -> Result<Self> {
        self.chunker = WordChunker::from_config(config)?;
        Ok(self)
    }

    /// Use `config` for searches.
    #[must_use]
    pub fn with_retrieval(mut self, config: RetrievalConfig) -> Self {
        self.retrieval = config;
        self
    }

    /// Chunk, embed, and store `text` as `document`, replacing any previous chunks.
    ///
    /// Returns the number of chunks stored. Text too short to produce a chunk
    /// stores an empty sequence without calling the provider.
    ///
    /// # Errors
    ///
    /// Any embedding error. The previous chunks for `document` are kept.
    pub fn upsert(&mut self, document: DocumentId, text: &str) -> Result<usize> {
        let mut chunks = self.chunker.chunk(text);
        self.embedder.embed_chunks(&mut chunks)?;

        let count = chunks.len();
        let replaced = self.documents.insert(document, chunks);
        info!(
            document,
            chunks = count,
            replaced = replaced.as_ref().map(Vec::len),
            "indexed document"
        );
        Ok(count)
    }

    /// Drop a document and return its chunks.
    pub fn remove(&mut self, document: DocumentId) -> Option<Vec<Chunk>> {
        let removed = self.documents.remove(&document);
        if removed.is_some() {
            debug!(document, "removed document");
        }
        removed
    }

    /// The chunks stored for `document`.
    #[must_use]
    pub fn chunks(&self, document: DocumentId) -> Option<&[Chunk]> {
        self.documents.get(&document).map(Vec::as_slice)
    }

    /// Whether `document` is indexed.
    #[must_use]
    pub fn contains(&self, document: DocumentId) -> bool {
        self.documents.contains_key(&document)
    }

    /// Indexed document ids in ascending order.
    pub fn documents(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.documents.keys().copied()
    }

    /// Number of indexed documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether no document is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Total chunks across all documents.
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.documents.values().map(Vec::len).sum()
    }

    /// Search every indexed document.
    ///
    /// # Errors
    ///
    /// Embedding or ranking errors.
    pub fn search(&self, query: &str, top_k: usize) -> Result<Vec<Hit<'_>>> {
        let scope: Vec<DocumentId> = self.documents().collect();
        self.search_documents(query, &scope, top_k)
    }

    /// Search only the given documents.
    ///
    /// Candidates are ordered by document (in `scope` order) and then by chunk
    /// index, so equal scores favour earlier documents and earlier chunks.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownDocument`] if `scope` names a document that is not
    /// indexed, otherwise embedding or ranking errors.
    pub fn search_documents(
        &self,
        query: &str,
        scope: &[DocumentId],
        top_k: usize,
    ) -> Result<Vec<Hit<'_>>> {
        let mut candidates: Vec<(DocumentId, &Chunk, &[f32])> = Vec::new();
        for &document in scope {
            let chunks = self
                .documents
                .get(&document)
                .ok_or(Error::UnknownDocument(document))?;
            candidates.extend(
                chunks
                    .iter()
                    .filter_map(|c| c.embedding.as_deref().map(|v| (document, c, v))),
            );
        }
        if candidates.is_empty() {
            return Ok(vec![]);
        }

        let vectors: Vec<&[f32]> = candidates.iter().map(|(_, _, v)| *v).collect();
        let query_vector = self.embedder.embed_query(query)?;
        let ranked = rank(&query_vector, &vectors, top_k, self.retrieval.zero_norm)?;

        debug!(
            documents = scope.len(),
            candidates = candidates.len(),
            hits = ranked.len(),
            "searched index"
        );
        Ok(ranked
            .into_iter()
            .map(|r| {
                let (document, chunk, _) = candidates[r.index];
                Hit {
                    document,
                    chunk,
                    score: r.score,
                }
            })
            .collect())
    }

    /// Search with the configured `top_k`.
    ///
    /// # Errors
    ///
    /// See [`DocumentIndex::search`].
    pub fn query(&self, query: &str) -> Result<Vec<Hit<'_>>> {
        self.search(query, self.retrieval.top_k)
    }
}
