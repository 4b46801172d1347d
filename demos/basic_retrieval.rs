//! Basic Retrieval
//!
//! The minimal pipeline: chunk two documents, embed them, ask a question.
//!
//! ```bash
//! RUST_LOG=debug cargo run --example basic_retrieval
//! ```
//!
//! Uses a toy letter-frequency provider so it runs offline. Enable the
//! `fastembed` feature and swap in `FastEmbedProvider::try_default()?` for
//! real sentence embeddings.

use std::sync::Arc;

use quarry::{ChunkingConfig, DocumentIndex, EmbeddingProvider, Result};

/// Letter-frequency vectors: crude, but deterministic and dependency-free.
struct LetterFrequency;

impl EmbeddingProvider for LetterFrequency {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|t| {
                let mut v = vec![0.0; 26];
                for b in t.bytes().filter(u8::is_ascii_alphabetic) {
                    v[(b.to_ascii_lowercase() - b'a') as usize] += 1.0;
                }
                v
            })
            .collect())
    }

    fn dimension(&self) -> Option<usize> {
        Some(26)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let handbook = "Chunks are windows of words cut from a document. \
        Each window overlaps the previous one so that a sentence near a boundary \
        still appears whole in at least one chunk. Very short windows at the end \
        of a document are dropped because they carry too little context.";
    let recipes = "Whisk two eggs with a pinch of salt. Melt butter in a pan over \
        medium heat, pour in the eggs, and stir slowly until just set. Serve \
        immediately with toast and a little chopped chives.";

    let mut index = DocumentIndex::new(Arc::new(LetterFrequency))
        .with_chunking(ChunkingConfig::new(25, 5))?;
    index.upsert(1, handbook)?;
    index.upsert(2, recipes)?;

    println!(
        "Indexed {} documents, {} chunks\n",
        index.len(),
        index.chunk_count()
    );

    for hit in index.search("why do chunk windows overlap?", 3)? {
        println!(
            "[doc {} / chunk {}] {:.3}  \"{}\"",
            hit.document, hit.chunk.index, hit.score, hit.chunk.content
        );
    }

    Ok(())
}
