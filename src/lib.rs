//! # quarry
//!
//! Word-window chunking and cosine top-k retrieval for retrieval-augmented
//! generation (RAG).
//!
//! ## The Problem
//!
//! A question is asked against a pile of documents. The documents are too long
//! to hand to a language model whole, so they are cut into pieces ("chunks"),
//! each piece is embedded once, and at question time only the few pieces whose
//! embeddings sit closest to the question's embedding are retrieved.
//!
//! ## The Pipeline
//!
//! ```text
//! raw text ──► WordChunker ──► [Chunk 0, Chunk 1, ...]
//!                                     │
//!                                     ▼
//!                   EmbeddingProvider (one batch call)
//!                                     │
//!                                     ▼
//!                 [Chunk 0 + v0, Chunk 1 + v1, ...] ──► stored
//!
//! query ──► EmbeddingProvider ──► q
//! [v0, v1, ...] + q ──► rank ──► [(index, score), ...] best first
//! ```
//!
//! ### Chunking
//!
//! Text is split on whitespace and a window of `chunk_size` words slides
//! across it, advancing `chunk_size - overlap` words at a time. Windows with
//! fewer than 10 words are dropped. See [`WordChunker`].
//!
//! ### Embedding
//!
//! The model is an external collaborator behind [`EmbeddingProvider`].
//! [`Embedder`] sends a whole document's chunks in one call and rejects any
//! batch whose length or dimensions do not line up with the input.
//!
//! ### Retrieval
//!
//! Cosine similarity of every stored vector against the query vector, sorted
//! descending, ties broken by ascending index. Zero vectors have no defined
//! cosine; [`ZeroNormPolicy`] decides whether they fail the search or score 0.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use quarry::{chunk, search, EmbeddingProvider, Embedder, Result};
//!
//! /// Toy provider: counts of two marker words.
//! struct Markers;
//!
//! impl EmbeddingProvider for Markers {
//!     fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
//!         Ok(texts
//!             .iter()
//!             .map(|t| {
//!                 let n = |w: &str| t.matches(w).count() as f32 + 0.5;
//!                 vec![n("rust"), n("python")]
//!             })
//!             .collect())
//!     }
//! }
//!
//! let doc = "rust ".repeat(30) + &"python ".repeat(30);
//! let mut chunks = chunk(&doc, 20, 5)?;
//! Embedder::new(Arc::new(Markers)).embed_chunks(&mut chunks)?;
//!
//! let vectors: Vec<&[f32]> = chunks
//!     .iter()
//!     .filter_map(|c| c.embedding.as_deref())
//!     .collect();
//! let hits = search(&Markers, "python", &vectors, 1)?;
//! assert!(chunks[hits[0].index].content.starts_with("python"));
//! # Ok::<(), quarry::Error>(())
//! ```
//!
//! For documents kept in memory, [`DocumentIndex`] does the bookkeeping:
//! re-chunking on update and searching across a chosen set of documents.
//!
//! ## Features
//!
//! | Feature | Adds |
//! |---------|------|
//! | `serde` | `Serialize`/`Deserialize` for chunks, results, and configs |
//! | `fastembed` | `FastEmbedProvider`, a local ONNX sentence-embedding model |
//!
//! ## Logging
//!
//! Chunking, batch embedding, ranking, and index updates emit `tracing`
//! events at `debug`/`trace` (index updates at `info`). No subscriber is
//! installed by the library.

mod chunk;
mod config;
mod embed;
mod error;
mod index;
mod retrieve;
pub mod vector;
mod window;

#[cfg(feature = "fastembed")]
mod model;

pub use chunk::Chunk;
pub use config::{
    ChunkingConfig, RetrievalConfig, ZeroNormPolicy, DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP,
    DEFAULT_TOP_K, MIN_CHUNK_WORDS,
};
pub use embed::{embed_batch, Embedder, EmbeddingProvider};
pub use error::{Error, Result};
pub use index::{DocumentId, DocumentIndex, Hit};
pub use retrieve::{rank, search, Retriever, SimilarityResult};
pub use window::{chunk, WordChunker};

#[cfg(feature = "fastembed")]
pub use model::{EmbeddingModel, FastEmbedProvider};
