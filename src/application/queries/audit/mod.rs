mod common;
mod list;
mod service;

pub use list::{ListAuditLogsByProductQuery, ListAuditLogsQuery};
pub use service::AuditQueryService;
