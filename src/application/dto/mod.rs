pub mod audit;
pub mod pagination;
pub mod products;

pub use audit::AuditLogDto;
pub use pagination::CursorPage;
pub use products::ProductDto;
