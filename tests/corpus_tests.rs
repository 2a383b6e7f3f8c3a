//! Corpus seeding tests: the composition root's bulk ingest.

use std::sync::Arc;

use mcp_context_store::corpus::{seed_from_file, CorpusError};
use mcp_context_store::model::QueryParams;
use mcp_context_store::service::ContextService;
use mcp_context_store::store::InMemoryStorage;

fn test_service() -> ContextService {
    ContextService::new(Arc::new(InMemoryStorage::new()))
}

#[tokio::test]
async fn seeds_every_entry_in_file_order() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("corpus.json");
    std::fs::write(
        &path,
        r#"[
            {
                "id": "seed-1",
                "type": "code_example",
                "content": "first entry",
                "metadata": { "title": "First", "tags": ["seed"], "relevanceScore": 0.5 }
            },
            {
                "id": "seed-2",
                "type": "best_practice",
                "content": "second entry",
                "metadata": { "title": "Second", "tags": ["seed"], "relevanceScore": 0.5 }
            }
        ]"#,
    )
    .unwrap();

    let service = test_service();
    let seeded = seed_from_file(&service, &path).await.unwrap();
    assert_eq!(seeded, 2);
    assert_eq!(service.count(None).await.unwrap(), 2);

    // File order is insertion order, which relevance ties preserve.
    let response = service.query(QueryParams::default()).await.unwrap();
    let ids: Vec<&str> = response.results.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["seed-1", "seed-2"]);
}

#[tokio::test]
async fn malformed_corpus_aborts_without_partial_state() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("corpus.json");
    std::fs::write(&path, "this is not json").unwrap();

    let service = test_service();
    let err = seed_from_file(&service, &path).await.unwrap_err();
    assert!(matches!(err, CorpusError::Parse(_)));
    assert_eq!(service.count(None).await.unwrap(), 0);
}

#[tokio::test]
async fn invalid_entry_reports_its_index() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("corpus.json");
    std::fs::write(
        &path,
        r#"[
            {
                "type": "documentation",
                "content": "fine",
                "metadata": { "title": "Fine" }
            },
            {
                "type": "documentation",
                "content": "broken",
                "metadata": { "title": "  " }
            }
        ]"#,
    )
    .unwrap();

    let service = test_service();
    let err = seed_from_file(&service, &path).await.unwrap_err();
    match err {
        CorpusError::Entry { index, .. } => assert_eq!(index, 1),
        other => panic!("expected entry error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_file_is_an_io_error() {
    let tmp = tempfile::tempdir().unwrap();
    let service = test_service();
    let err = seed_from_file(&service, &tmp.path().join("absent.json"))
        .await
        .unwrap_err();
    assert!(matches!(err, CorpusError::Io(_)));
}
