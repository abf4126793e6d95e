pub mod cursor;
pub mod diff;
pub mod entity;
pub mod repository;

#[cfg(test)]
mod cursor_tests;

pub use cursor::AuditLogCursor;
pub use diff::{ChangeSet, diff};
pub use entity::{AuditAction, AuditLog};
pub use repository::AuditLogRepository;
