//! Property-based tests for word-window chunking and ranking.
//!
//! These tests verify the invariants callers rely on:
//! - Dense: chunk indices are exactly 0..N
//! - Floor: every chunk has at least `min_chunk_words` words
//! - Ordered: chunk starts strictly increase by the step
//! - Bounds: offsets are consistent and content matches the source words
//! - Ranking: results are sorted and never longer than `top_k`

use proptest::prelude::*;
use quarry::{chunk, rank, Chunk, ChunkingConfig, WordChunker, ZeroNormPolicy};

// =============================================================================
// Test Generators
// =============================================================================

/// Words separated by arbitrary runs of whitespace.
fn wordy_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (
            prop::string::string_regex("[A-Za-z0-9]{1,12}").unwrap(),
            prop::string::string_regex("[ \t\n]{1,3}").unwrap(),
        ),
        0..400,
    )
    .prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(word, gap)| word + &gap)
            .collect::<String>()
    })
}

/// Valid (chunk_size, overlap) pairs.
fn window_params() -> impl Strategy<Value = (usize, usize)> {
    (1usize..120).prop_flat_map(|size| (Just(size), 0..size))
}

/// Candidate vectors with no zero rows.
fn candidates(dim: usize) -> impl Strategy<Value = Vec<Vec<f32>>> {
    prop::collection::vec(
        prop::collection::vec(0.01f32..10.0, dim..=dim),
        0..40,
    )
}

// =============================================================================
// Invariant Helpers
// =============================================================================

fn indices_dense(chunks: &[Chunk]) -> bool {
    chunks.iter().enumerate().all(|(i, c)| c.index == i)
}

fn content_matches(chunks: &[Chunk], words: &[&str]) -> bool {
    chunks
        .iter()
        .all(|c| c.content == words[c.span()].join(" "))
}

// =============================================================================
// WordChunker Tests
// =============================================================================

proptest! {
    #[test]
    fn indices_are_dense(text in wordy_text(), (size, overlap) in window_params()) {
        let chunks = chunk(&text, size, overlap).unwrap();
        prop_assert!(indices_dense(&chunks));
    }

    #[test]
    fn chunks_respect_word_floor(text in wordy_text(), (size, overlap) in window_params()) {
        let chunks = chunk(&text, size, overlap).unwrap();
        prop_assert!(chunks.iter().all(|c| c.word_count() >= 10));
    }

    #[test]
    fn offsets_round_trip(text in wordy_text(), (size, overlap) in window_params()) {
        let words: Vec<&str> = text.split_whitespace().collect();
        let chunks = chunk(&text, size, overlap).unwrap();
        for c in &chunks {
            prop_assert_eq!(c.start + c.word_count(), c.end);
            prop_assert!(c.end <= words.len());
            prop_assert!(c.word_count() <= size);
        }
        prop_assert!(content_matches(&chunks, &words));
    }

    #[test]
    fn starts_advance_by_step(text in wordy_text(), (size, overlap) in window_params()) {
        let chunks = chunk(&text, size, overlap).unwrap();
        for pair in chunks.windows(2) {
            prop_assert_eq!(pair[1].start - pair[0].start, size - overlap);
        }
    }

    #[test]
    fn custom_floor_respected(text in wordy_text(), floor in 0usize..30) {
        let cfg = ChunkingConfig::new(40, 8).with_min_chunk_words(floor);
        let chunks = WordChunker::from_config(cfg).unwrap().chunk(&text);
        prop_assert!(chunks.iter().all(|c| c.word_count() >= floor));
        prop_assert!(indices_dense(&chunks));
    }

    #[test]
    fn overlap_not_below_size_is_rejected(size in 0usize..50, extra in 0usize..50) {
        let err = chunk("some words here", size, size + extra).unwrap_err();
        prop_assert!(err.is_configuration());
    }

    #[test]
    fn rechunking_is_identical(text in wordy_text(), (size, overlap) in window_params()) {
        prop_assert_eq!(chunk(&text, size, overlap).unwrap(), chunk(&text, size, overlap).unwrap());
    }
}

// =============================================================================
// Ranking Tests
// =============================================================================

proptest! {
    #[test]
    fn ranking_sorted_and_bounded(
        query in prop::collection::vec(0.01f32..10.0, 4..=4),
        vectors in candidates(4),
        top_k in 0usize..50,
    ) {
        let hits = rank(&query, &vectors, top_k, ZeroNormPolicy::Reject).unwrap();

        prop_assert_eq!(hits.len(), top_k.min(vectors.len()));
        for pair in hits.windows(2) {
            prop_assert!(pair[0].score > pair[1].score
                || (pair[0].score == pair[1].score && pair[0].index < pair[1].index));
        }
        for h in &hits {
            prop_assert!(h.index < vectors.len());
            prop_assert!(h.score <= 1.0 + 1e-5);
        }
    }

    #[test]
    fn ranking_prefix_stable(
        query in prop::collection::vec(0.01f32..10.0, 3..=3),
        vectors in candidates(3),
        k in 0usize..40,
    ) {
        let all = rank(&query, &vectors, usize::MAX, ZeroNormPolicy::Reject).unwrap();
        let top = rank(&query, &vectors, k, ZeroNormPolicy::Reject).unwrap();
        prop_assert_eq!(&all[..top.len()], &top[..]);
    }
}
