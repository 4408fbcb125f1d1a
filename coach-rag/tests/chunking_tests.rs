//! Property and edge-case tests for fixed-size chunking.

use coach_rag::{Chunker, Document, FixedSizeChunker, RetrievalError};
use proptest::prelude::*;

fn doc(text: &str) -> Document {
    Document { id: "test.md".to_string(), text: text.to_string() }
}

/// Valid `(chunk_size, overlap)` pairs with `chunk_size > overlap >= 0`.
fn arb_window() -> impl Strategy<Value = (usize, usize)> {
    (1usize..60).prop_flat_map(|size| (Just(size), 0..size))
}

/// **Property: chunking terminates and reconstructs the input.**
/// For any text and valid window, every chunk is at most `chunk_size`
/// characters, consecutive chunks share exactly `overlap` characters, and
/// concatenating the chunks with the overlap removed restores the text.
mod prop_chunk_reconstruction {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn chunks_bounded_and_reconstruct(
            text in ".{0,300}",
            (chunk_size, overlap) in arb_window(),
        ) {
            let chunker = FixedSizeChunker::new(chunk_size, overlap).unwrap();
            let chunks = chunker.chunk(&doc(&text));

            for chunk in &chunks {
                prop_assert!(chunk.text.chars().count() <= chunk_size);
            }

            // Sequence indexes are dense and ordered.
            for (i, chunk) in chunks.iter().enumerate() {
                prop_assert_eq!(chunk.sequence_index, i);
            }

            // Strip the leading `overlap` characters from every chunk after
            // the first; the concatenation must equal the original text.
            let mut reconstructed = String::new();
            for (i, chunk) in chunks.iter().enumerate() {
                if i == 0 {
                    reconstructed.push_str(&chunk.text);
                } else {
                    reconstructed.extend(chunk.text.chars().skip(overlap));
                }
            }
            prop_assert_eq!(reconstructed, text);
        }

        #[test]
        fn consecutive_chunks_share_overlap(
            text in ".{0,300}",
            (chunk_size, overlap) in arb_window(),
        ) {
            let chunker = FixedSizeChunker::new(chunk_size, overlap).unwrap();
            let chunks = chunker.chunk(&doc(&text));

            for window in chunks.windows(2) {
                let prev: Vec<char> = window[0].text.chars().collect();
                let next: Vec<char> = window[1].text.chars().collect();
                // A successor only exists when the previous window was full.
                prop_assert_eq!(prev.len(), chunk_size);
                prop_assert_eq!(&prev[chunk_size - overlap..], &next[..overlap]);
            }
        }
    }
}

#[test]
fn empty_text_yields_no_chunks() {
    let chunker = FixedSizeChunker::new(10, 2).unwrap();
    assert!(chunker.chunk(&doc("")).is_empty());
}

#[test]
fn short_text_yields_single_chunk() {
    let chunker = FixedSizeChunker::new(20, 5).unwrap();
    let chunks = chunker.chunk(&doc("short text"));
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text, "short text");
    assert_eq!(chunks[0].sequence_index, 0);
}

#[test]
fn exact_size_text_yields_single_chunk() {
    let chunker = FixedSizeChunker::new(10, 2).unwrap();
    let chunks = chunker.chunk(&doc("0123456789"));
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text, "0123456789");
}

#[test]
fn windows_advance_by_size_minus_overlap() {
    // 1500 chars with a 1000/200 window: [0..1000] and [800..1500].
    let text = "a".repeat(1500);
    let chunker = FixedSizeChunker::new(1000, 200).unwrap();
    let chunks = chunker.chunk(&doc(&text));
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].text.len(), 1000);
    assert_eq!(chunks[1].text.len(), 700);
}

#[test]
fn multibyte_text_never_splits_code_points() {
    let text = "日本語のキャリアガイド。".repeat(40);
    let chunker = FixedSizeChunker::new(100, 20).unwrap();
    let chunks = chunker.chunk(&doc(&text));
    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(chunk.text.chars().count() <= 100);
    }
    let mut reconstructed = String::new();
    for (i, chunk) in chunks.iter().enumerate() {
        if i == 0 {
            reconstructed.push_str(&chunk.text);
        } else {
            reconstructed.extend(chunk.text.chars().skip(20));
        }
    }
    assert_eq!(reconstructed, text);
}

#[test]
fn overlap_not_less_than_size_is_rejected() {
    assert!(matches!(FixedSizeChunker::new(10, 10), Err(RetrievalError::Config(_))));
    assert!(matches!(FixedSizeChunker::new(10, 15), Err(RetrievalError::Config(_))));
    assert!(matches!(FixedSizeChunker::new(0, 0), Err(RetrievalError::Config(_))));
}
