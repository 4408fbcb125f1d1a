//! Configuration validation tests.

use coach_rag::{RetrievalConfig, RetrievalError};

#[test]
fn defaults_are_valid() {
    let config = RetrievalConfig::builder().build().unwrap();
    assert_eq!(config, RetrievalConfig::default());
    assert_eq!(config.chunk_size, 1000);
    assert_eq!(config.chunk_overlap, 200);
    assert_eq!(config.top_k_results, 5);
}

#[test]
fn overlap_equal_to_chunk_size_is_rejected() {
    let err = RetrievalConfig::builder().chunk_size(100).chunk_overlap(100).build().unwrap_err();
    assert!(matches!(err, RetrievalError::Config(_)));
}

#[test]
fn overlap_greater_than_chunk_size_is_rejected() {
    let err = RetrievalConfig::builder().chunk_size(100).chunk_overlap(250).build().unwrap_err();
    assert!(matches!(err, RetrievalError::Config(_)));
}

#[test]
fn zero_chunk_size_is_rejected() {
    let err = RetrievalConfig::builder().chunk_size(0).chunk_overlap(0).build().unwrap_err();
    assert!(matches!(err, RetrievalError::Config(_)));
}

#[test]
fn zero_top_k_is_rejected() {
    let err = RetrievalConfig::builder().top_k_results(0).build().unwrap_err();
    assert!(matches!(err, RetrievalError::Config(_)));
}

#[test]
fn builder_sets_all_fields() {
    let config = RetrievalConfig::builder()
        .data_dir("/srv/corpus")
        .vector_db_path("/srv/index")
        .chunk_size(512)
        .chunk_overlap(64)
        .embedding_model("text-embedding-3-small")
        .top_k_results(8)
        .build()
        .unwrap();
    assert_eq!(config.data_dir.to_str(), Some("/srv/corpus"));
    assert_eq!(config.vector_db_path.to_str(), Some("/srv/index"));
    assert_eq!(config.chunk_size, 512);
    assert_eq!(config.chunk_overlap, 64);
    assert_eq!(config.embedding_model, "text-embedding-3-small");
    assert_eq!(config.top_k_results, 8);
}
