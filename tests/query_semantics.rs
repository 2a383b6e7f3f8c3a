//! Query filtering, ordering, and pagination semantics.
//!
//! These pin the store's observable query contract: filter order, OR tag
//! matching, joint case-insensitive free text, stable relevance ordering,
//! and contiguous non-overlapping pages.

use std::sync::Arc;

use mcp_context_store::model::{ContextPayload, ContextType, QueryParams};
use mcp_context_store::service::ContextService;
use mcp_context_store::store::InMemoryStorage;

fn test_service() -> ContextService {
    ContextService::new(Arc::new(InMemoryStorage::new()))
}

fn payload(id: &str, kind: &str, content: &str, tags: &[&str], score: f64) -> ContextPayload {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "type": kind,
        "content": content,
        "metadata": {
            "title": format!("Entry {id}"),
            "tags": tags,
            "relevanceScore": score
        }
    }))
    .unwrap()
}

async fn ingest_all(service: &ContextService, payloads: Vec<ContextPayload>) {
    for p in payloads {
        service.ingest(p).await.unwrap();
    }
}

// ---------------------------------------------------------------------------
// Filter semantics
// ---------------------------------------------------------------------------

#[tokio::test]
async fn tag_filter_is_or_and_orders_by_relevance() {
    let service = test_service();
    ingest_all(
        &service,
        vec![
            payload("a", "code_example", "storage mapper usage", &["storage"], 0.5),
            payload("b", "code_example", "single value mapper", &["storage", "mapper"], 0.9),
            payload("c", "code_example", "event emission", &["events"], 0.7),
        ],
    )
    .await;

    let response = service
        .query(QueryParams {
            tags: Some(vec!["storage".into()]),
            ..QueryParams::default()
        })
        .await
        .unwrap();

    let ids: Vec<&str> = response.results.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"], "0.9 before 0.5, events excluded");
    assert_eq!(response.total, 2);
}

#[tokio::test]
async fn record_matches_filter_sharing_only_one_tag() {
    let service = test_service();
    ingest_all(
        &service,
        vec![payload("ab", "documentation", "text", &["a", "b"], 0.5)],
    )
    .await;

    let response = service
        .query(QueryParams {
            tags: Some(vec!["b".into(), "z".into()]),
            ..QueryParams::default()
        })
        .await
        .unwrap();

    assert_eq!(response.results.len(), 1, "OR semantics, never AND");
}

#[tokio::test]
async fn free_text_matches_each_searchable_field_case_insensitively() {
    let service = test_service();
    ingest_all(
        &service,
        vec![serde_json::from_value(serde_json::json!({
            "id": "rich",
            "type": "best_practice",
            "content": "always validate the CALLER address",
            "metadata": {
                "title": "Ownership Checks",
                "description": "Guard privileged endpoints",
                "tags": ["AccessControl"],
                "relevanceScore": 0.6
            }
        }))
        .unwrap()],
    )
    .await;

    // One needle per field: content, title, description, tags.
    for needle in ["caller", "OWNERSHIP", "privileged", "accesscontrol"] {
        let response = service
            .query(QueryParams {
                query: Some(needle.into()),
                ..QueryParams::default()
            })
            .await
            .unwrap();
        assert_eq!(response.results.len(), 1, "needle {needle:?} should match");
    }

    let response = service
        .query(QueryParams {
            query: Some("absent-term".into()),
            ..QueryParams::default()
        })
        .await
        .unwrap();
    assert!(response.results.is_empty());
}

#[tokio::test]
async fn type_and_contract_type_filters_compose() {
    let service = test_service();
    ingest_all(
        &service,
        vec![
            serde_json::from_value(serde_json::json!({
                "id": "t1",
                "type": "security_tip",
                "content": "require owner",
                "metadata": { "title": "Tip", "contractType": "token", "relevanceScore": 0.5 }
            }))
            .unwrap(),
            serde_json::from_value(serde_json::json!({
                "id": "t2",
                "type": "security_tip",
                "content": "require owner",
                "metadata": { "title": "Tip", "contractType": "staking", "relevanceScore": 0.5 }
            }))
            .unwrap(),
            payload("t3", "documentation", "require owner", &[], 0.5),
        ],
    )
    .await;

    let response = service
        .query(QueryParams {
            types: Some(vec![ContextType::SecurityTip]),
            contract_type: Some("token".into()),
            ..QueryParams::default()
        })
        .await
        .unwrap();

    let ids: Vec<&str> = response.results.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["t1"]);
}

#[tokio::test]
async fn empty_type_set_applies_no_filter() {
    let service = test_service();
    ingest_all(
        &service,
        vec![
            payload("a", "code_example", "x", &[], 0.5),
            payload("b", "documentation", "y", &[], 0.5),
        ],
    )
    .await;

    let response = service
        .query(QueryParams {
            types: Some(vec![]),
            ..QueryParams::default()
        })
        .await
        .unwrap();
    assert_eq!(response.results.len(), 2);
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[tokio::test]
async fn pages_are_contiguous_and_non_overlapping() {
    let service = test_service();
    let scores = [0.9, 0.8, 0.7, 0.6, 0.5];
    for (i, score) in scores.iter().enumerate() {
        service
            .ingest(payload(&format!("p{i}"), "documentation", "body", &[], *score))
            .await
            .unwrap();
    }

    let page = |offset, limit| {
        let service = service.clone();
        async move {
            service
                .query(QueryParams {
                    offset: Some(offset),
                    limit: Some(limit),
                    ..QueryParams::default()
                })
                .await
                .unwrap()
                .results
                .into_iter()
                .map(|c| c.id)
                .collect::<Vec<_>>()
        }
    };

    let first = page(0, 2).await;
    let second = page(2, 2).await;
    let joined = page(0, 4).await;

    let mut concatenated = first.clone();
    concatenated.extend(second.clone());
    assert_eq!(concatenated, joined);
    assert!(first.iter().all(|id| !second.contains(id)));
}

#[tokio::test]
async fn offset_into_ranked_matches_returns_second_best() {
    let service = test_service();
    // Five records matching "payable", descending scores, plus one decoy.
    let scores = [0.9, 0.8, 0.7, 0.6, 0.5];
    for (i, score) in scores.iter().enumerate() {
        service
            .ingest(payload(
                &format!("pay{i}"),
                "code_example",
                "a payable endpoint example",
                &[],
                *score,
            ))
            .await
            .unwrap();
    }
    service
        .ingest(payload("decoy", "code_example", "nothing relevant", &[], 1.0))
        .await
        .unwrap();

    let response = service
        .query(QueryParams {
            query: Some("payable".into()),
            limit: Some(1),
            offset: Some(1),
            ..QueryParams::default()
        })
        .await
        .unwrap();

    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].id, "pay1");
    assert_eq!(response.results[0].metadata.relevance_score, 0.8);
    assert_eq!(response.total, 5, "total counts all matches, not the page");
}

#[tokio::test]
async fn offset_past_the_end_is_an_empty_page() {
    let service = test_service();
    ingest_all(&service, vec![payload("only", "documentation", "x", &[], 0.5)]).await;

    let response = service
        .query(QueryParams {
            offset: Some(10),
            ..QueryParams::default()
        })
        .await
        .unwrap();
    assert!(response.results.is_empty());
    assert_eq!(response.total, 1);
}

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

#[tokio::test]
async fn include_total_false_reports_page_size() {
    let service = test_service();
    for i in 0..4 {
        service
            .ingest(payload(&format!("c{i}"), "documentation", "body", &[], 0.5))
            .await
            .unwrap();
    }

    let with_total = service
        .query(QueryParams {
            limit: Some(2),
            ..QueryParams::default()
        })
        .await
        .unwrap();
    assert_eq!(with_total.total, 4);

    let without_total = service
        .query(QueryParams {
            limit: Some(2),
            include_total: Some(false),
            ..QueryParams::default()
        })
        .await
        .unwrap();
    assert_eq!(without_total.total, 2, "page size stands in for the total");
}

#[tokio::test]
async fn count_with_filters_matches_unpaginated_query() {
    let service = test_service();
    ingest_all(
        &service,
        vec![
            payload("a", "code_example", "alpha", &["x"], 0.5),
            payload("b", "code_example", "beta", &["x"], 0.6),
            payload("c", "documentation", "alpha", &["y"], 0.7),
        ],
    )
    .await;

    assert_eq!(service.count(None).await.unwrap(), 3);

    let filtered = QueryParams {
        tags: Some(vec!["x".into()]),
        ..QueryParams::default()
    };
    assert_eq!(service.count(Some(&filtered)).await.unwrap(), 2);
}
