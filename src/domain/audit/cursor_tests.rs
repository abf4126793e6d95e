// src/domain/audit/cursor_tests.rs
use crate::domain::audit::cursor::AuditLogCursor;
use chrono::Utc;

#[test]
fn cursor_encode_decode_roundtrip() {
    let now = Utc::now();
    let id = 42i64;
    let cursor = AuditLogCursor::new(now, id);
    let token = cursor.encode();
    let decoded = AuditLogCursor::decode(&token).expect("decode should succeed");
    assert_eq!(decoded.id, id);
    assert_eq!(decoded.timestamp.timestamp(), now.timestamp());
}

#[test]
fn garbage_token_is_rejected() {
    assert!(AuditLogCursor::decode("not-a-cursor").is_err());
}
