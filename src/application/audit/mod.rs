pub mod hooks;
pub mod writer;

pub use hooks::{MutationParams, ProductAuditHooks};
pub use writer::AuditWriter;
