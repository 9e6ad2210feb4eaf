use super::map_sqlx;
use crate::domain::audit::entity::AuditLog;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PostgresAuditLogRepository {
    pool: PgPool,
}

impl PostgresAuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl crate::domain::audit::repository::AuditLogRepository for PostgresAuditLogRepository {
    async fn insert(&self, log: AuditLog) -> DomainResult<()> {
        sqlx::query(
            r#"
            INSERT INTO audit_logs (action, client_id, user_id, code_id, token_id, details, occurred_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(log.action)
        .bind(log.client_id)
        .bind(log.user_id)
        .bind(log.code_id)
        .bind(log.token_id)
        .bind(log.details)
        .bind(log.occurred_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(())
    }
}
