//! Corpus loading tests.

use coach_rag::{load_documents, RetrievalError};

#[test]
fn loads_text_files_sorted_by_name() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("zeta.md"), "z content").unwrap();
    std::fs::write(dir.path().join("alpha.txt"), "a content").unwrap();
    std::fs::write(dir.path().join("mid.markdown"), "m content").unwrap();

    let documents = load_documents(dir.path()).unwrap();
    let ids: Vec<&str> = documents.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["alpha.txt", "mid.markdown", "zeta.md"]);
    assert_eq!(documents[0].text, "a content");
}

#[test]
fn ignores_unrecognized_extensions_and_subdirectories() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("guide.md"), "guide").unwrap();
    std::fs::write(dir.path().join("image.png"), [0u8, 1, 2]).unwrap();
    std::fs::write(dir.path().join("notes"), "no extension").unwrap();
    std::fs::create_dir(dir.path().join("nested.md")).unwrap();

    let documents = load_documents(dir.path()).unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].id, "guide.md");
}

#[test]
fn empty_directory_yields_no_documents() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_documents(dir.path()).unwrap().is_empty());
}

#[test]
fn missing_directory_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let err = load_documents(&missing).unwrap_err();
    assert!(matches!(err, RetrievalError::Io { .. }));
}
