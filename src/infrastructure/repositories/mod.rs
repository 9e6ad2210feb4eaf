// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_access_token;
mod postgres_audit_log;
mod postgres_authorization_code;

pub use error::map_sqlx;
pub use postgres_access_token::PostgresAccessTokenStore;
pub use postgres_audit_log::PostgresAuditLogRepository;
pub use postgres_authorization_code::PostgresAuthorizationCodeStore;
