// src/infrastructure/repositories/mod.rs
mod postgres_audit_log;
mod postgres_product;
mod postgres_user;

pub use postgres_audit_log::PostgresAuditLogRepository;
pub use postgres_product::PostgresProductRepository;
pub use postgres_user::PostgresUserRepository;

use crate::domain::errors::DomainError;

const CNT_PRODUCT_DOCUMENT_ID: &str = "products_document_id_key";
const CNT_AUDIT_USER: &str = "audit_logs_user_id_fkey";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_PRODUCT_DOCUMENT_ID => {
                        DomainError::Conflict("document id already exists".into())
                    }
                    CNT_AUDIT_USER => DomainError::NotFound("audit user not found".into()),
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
