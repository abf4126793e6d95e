// tests/audit_query_tests.rs
mod support;

use std::sync::Arc;

use aushadhi_core::application::error::ApplicationError;
use aushadhi_core::application::queries::audit::{
    AuditQueryService, ListAuditLogsByProductQuery, ListAuditLogsQuery,
};
use aushadhi_core::domain::audit::cursor::AuditLogCursor;
use aushadhi_core::domain::audit::entity::{AuditAction, AuditLog};
use aushadhi_core::domain::audit::repository::AuditLogRepository;
use chrono::{Duration, TimeZone, Utc};
use serde_json::Map;
use support::RecordingAuditRepo;

fn log(id: i64, entity_id: i64, document_id: &str, minutes: i64) -> AuditLog {
    let base = Utc
        .with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    AuditLog {
        id: Some(id),
        user_id: Some(1),
        action: AuditAction::Update,
        entity_type: "product".to_owned(),
        entity_id,
        entity_document_id: document_id.to_owned(),
        changes: Map::new(),
        previous_values: Map::new(),
        timestamp: base + Duration::minutes(minutes),
    }
}

async fn seeded_repo() -> Arc<RecordingAuditRepo> {
    let repo = Arc::new(RecordingAuditRepo::new());
    for (id, minutes) in [(1, 0), (2, 1), (3, 2)] {
        repo.insert(log(id, 10, "doc-a", minutes)).await.expect("insert");
    }
    repo.insert(log(4, 11, "doc-b", 3)).await.expect("insert");
    repo
}

#[tokio::test]
async fn listing_returns_newest_entries_first() {
    let repo = seeded_repo().await;
    let service = AuditQueryService::new(repo);

    let page = service
        .list_audit_logs(ListAuditLogsQuery {
            limit: 10,
            cursor: None,
        })
        .await
        .expect("query succeeds");

    let ids: Vec<i64> = page.items.iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![4, 3, 2, 1]);
}

#[tokio::test]
async fn zero_limit_falls_back_to_the_default_page_size() {
    let repo = seeded_repo().await;
    let service = AuditQueryService::new(repo.clone());

    service
        .list_audit_logs(ListAuditLogsQuery {
            limit: 0,
            cursor: None,
        })
        .await
        .expect("query succeeds");

    assert_eq!(*repo.last_limit.lock().expect("lock poisoned"), Some(20));
}

#[tokio::test]
async fn oversized_limit_is_clamped() {
    let repo = seeded_repo().await;
    let service = AuditQueryService::new(repo.clone());

    service
        .list_audit_logs(ListAuditLogsQuery {
            limit: 5_000,
            cursor: None,
        })
        .await
        .expect("query succeeds");

    assert_eq!(*repo.last_limit.lock().expect("lock poisoned"), Some(100));
}

#[tokio::test]
async fn malformed_cursor_is_a_validation_error() {
    let repo = seeded_repo().await;
    let service = AuditQueryService::new(repo);

    let result = service
        .list_audit_logs(ListAuditLogsQuery {
            limit: 10,
            cursor: Some("not base64!".to_owned()),
        })
        .await;

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(_)) | Err(ApplicationError::Validation(_))
    ));
}

#[tokio::test]
async fn cursor_round_trips_through_encode_and_decode() {
    let timestamp = Utc
        .with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    let token = AuditLogCursor::new(timestamp, 42).encode();

    let decoded = AuditLogCursor::decode(&token).expect("valid token");
    assert_eq!(decoded.timestamp, timestamp);
    assert_eq!(decoded.id, 42);
}

#[tokio::test]
async fn product_filter_matches_numeric_and_document_ids() {
    let repo = seeded_repo().await;
    let service = AuditQueryService::new(repo);

    let by_number = service
        .list_by_product(ListAuditLogsByProductQuery {
            key: "10".to_owned(),
            limit: 10,
            cursor: None,
        })
        .await
        .expect("query succeeds");
    assert_eq!(by_number.items.len(), 3);

    let service = AuditQueryService::new(seeded_repo().await);
    let by_document = service
        .list_by_product(ListAuditLogsByProductQuery {
            key: "doc-b".to_owned(),
            limit: 10,
            cursor: None,
        })
        .await
        .expect("query succeeds");
    assert_eq!(by_document.items.len(), 1);
    assert_eq!(by_document.items[0].id, 4);
}

#[tokio::test]
async fn blank_product_key_is_rejected() {
    let repo = seeded_repo().await;
    let service = AuditQueryService::new(repo);

    let result = service
        .list_by_product(ListAuditLogsByProductQuery {
            key: "   ".to_owned(),
            limit: 10,
            cursor: None,
        })
        .await;

    assert!(matches!(result, Err(ApplicationError::Validation(_))));
}
