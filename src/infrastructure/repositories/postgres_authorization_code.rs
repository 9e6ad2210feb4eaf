// src/infrastructure/repositories/postgres_authorization_code.rs
use super::map_sqlx;
use crate::application::ApplicationResult;
use crate::application::ports::authorization_code::{AuthorizationCodeStore, CodeLookup};
use crate::application::redact::fingerprint;
use crate::domain::authorization_code::{
    AuthorizationCode, CodeId, CodeState, Scope, TokenBindingReference,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::AuthorizedUser;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::{FromRow, PgPool};

const CODE_COLUMNS: &str = "code_id, client_id, user_id, username, federated_idp, scope, \
     callback_url, pkce_challenge, pkce_challenge_method, issued_at, validity_period_ms, \
     token_binding_reference, state, bound_token_id";

/// Code values are never stored; rows are addressed by `(client_id, code_hash)`.
#[derive(Clone)]
pub struct PostgresAuthorizationCodeStore {
    pool: PgPool,
}

impl PostgresAuthorizationCodeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CodeRow {
    code_id: String,
    client_id: String,
    user_id: Option<String>,
    username: String,
    federated_idp: Option<String>,
    scope: String,
    callback_url: Option<String>,
    pkce_challenge: Option<String>,
    pkce_challenge_method: Option<String>,
    issued_at: DateTime<Utc>,
    validity_period_ms: i64,
    token_binding_reference: String,
    state: String,
    bound_token_id: Option<String>,
}

impl CodeRow {
    /// The row only holds a digest, so the presented code value is put back.
    fn into_domain(self, code: &str) -> DomainResult<AuthorizationCode> {
        Ok(AuthorizationCode {
            code_id: CodeId::new(self.code_id)?,
            client_id: self.client_id,
            code: code.to_string(),
            authorized_user: AuthorizedUser {
                user_id: self.user_id,
                username: self.username,
                federated_idp: self.federated_idp,
            },
            scope: Scope::parse(&self.scope),
            callback_url: self.callback_url,
            pkce_challenge: self.pkce_challenge,
            pkce_challenge_method: self.pkce_challenge_method,
            issued_at: self.issued_at,
            validity_period: Duration::try_milliseconds(self.validity_period_ms).ok_or_else(|| {
                DomainError::Validation("validity period out of range".into())
            })?,
            token_binding_reference: TokenBindingReference::new(Some(self.token_binding_reference.as_str())),
            state: self.state.parse()?,
            bound_token_id: self.bound_token_id,
        })
    }
}

#[async_trait]
impl AuthorizationCodeStore for PostgresAuthorizationCodeStore {
    async fn insert(&self, code: AuthorizationCode) -> ApplicationResult<()> {
        sqlx::query(
            r#"
            INSERT INTO authorization_codes (code_id, client_id, code_hash, user_id, username,
                federated_idp, scope, callback_url, pkce_challenge, pkce_challenge_method,
                issued_at, validity_period_ms, token_binding_reference, state, bound_token_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(code.code_id.as_str())
        .bind(&code.client_id)
        .bind(fingerprint(&code.code))
        .bind(&code.authorized_user.user_id)
        .bind(&code.authorized_user.username)
        .bind(&code.authorized_user.federated_idp)
        .bind(code.scope.as_scope_string())
        .bind(&code.callback_url)
        .bind(&code.pkce_challenge)
        .bind(&code.pkce_challenge_method)
        .bind(code.issued_at)
        .bind(code.validity_period.num_milliseconds())
        .bind(code.token_binding_reference.as_str())
        .bind(code.state.as_str())
        .bind(&code.bound_token_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(())
    }

    async fn validate_and_fetch(
        &self,
        client_id: &str,
        code: &str,
    ) -> ApplicationResult<Option<CodeLookup>> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        // Row lock serializes concurrent presentations of the same code.
        let row = sqlx::query_as::<_, CodeRow>(&format!(
            "SELECT {CODE_COLUMNS} FROM authorization_codes
             WHERE client_id = $1 AND code_hash = $2
             FOR UPDATE"
        ))
        .bind(client_id)
        .bind(fingerprint(code))
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        let Some(row) = row else {
            tx.rollback().await.map_err(map_sqlx)?;
            return Ok(None);
        };
        let snapshot = row.into_domain(code)?;
        let was_active = snapshot.is_active();

        if was_active {
            sqlx::query("UPDATE authorization_codes SET state = $2 WHERE code_id = $1")
                .bind(snapshot.code_id.as_str())
                .bind(CodeState::Revoked.as_str())
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx)?;
        }
        tx.commit().await.map_err(map_sqlx)?;

        Ok(Some(CodeLookup {
            code: snapshot,
            was_active,
        }))
    }

    async fn claim(&self, code_id: &CodeId) -> ApplicationResult<bool> {
        let result = sqlx::query(
            "UPDATE authorization_codes SET state = $2 WHERE code_id = $1 AND state = $3",
        )
        .bind(code_id.as_str())
        .bind(CodeState::Revoked.as_str())
        .bind(CodeState::Active.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(result.rows_affected() == 1)
    }

    async fn set_state(&self, code_id: &CodeId, state: CodeState) -> ApplicationResult<()> {
        if !state.is_terminal() {
            return Err(DomainError::IllegalTransition(state).into());
        }

        let result = sqlx::query("UPDATE authorization_codes SET state = $2 WHERE code_id = $1")
            .bind(code_id.as_str())
            .bind(state.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("authorization code {code_id}")).into());
        }
        Ok(())
    }

    async fn bind_token(&self, code_id: &CodeId, token_id: &str) -> ApplicationResult<()> {
        let result = sqlx::query(
            "UPDATE authorization_codes SET bound_token_id = $2, state = $3
             WHERE code_id = $1 AND (bound_token_id IS NULL OR bound_token_id = $2)",
        )
        .bind(code_id.as_str())
        .bind(token_id)
        .bind(CodeState::Inactive.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM authorization_codes WHERE code_id = $1)",
        )
        .bind(code_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let err = if exists {
            DomainError::Conflict(format!(
                "authorization code {code_id} is already bound to another token"
            ))
        } else {
            DomainError::NotFound(format!("authorization code {code_id}"))
        };
        Err(err.into())
    }
}
