use super::map_sqlx;
use crate::application::ApplicationResult;
use crate::application::ports::access_token::AccessTokenStore;
use crate::domain::access_token::AccessToken;
use crate::domain::authorization_code::{CodeId, Scope, TokenBindingReference};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::AuthorizedUser;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

#[derive(Clone)]
pub struct PostgresAccessTokenStore {
    pool: PgPool,
}

impl PostgresAccessTokenStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AccessTokenRow {
    token_id: String,
    access_token: String,
    client_id: String,
    user_id: Option<String>,
    username: String,
    federated_idp: Option<String>,
    scope: String,
    token_binding_reference: String,
    authorization_code_id: Option<String>,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    revoked: bool,
    revoked_by: Option<String>,
}

impl TryFrom<AccessTokenRow> for AccessToken {
    type Error = DomainError;

    fn try_from(row: AccessTokenRow) -> DomainResult<Self> {
        Ok(AccessToken {
            token_id: row.token_id,
            access_token: row.access_token,
            client_id: row.client_id,
            authorized_user: AuthorizedUser {
                user_id: row.user_id,
                username: row.username,
                federated_idp: row.federated_idp,
            },
            scope: Scope::parse(&row.scope),
            token_binding_reference: TokenBindingReference::new(Some(
                row.token_binding_reference.as_str(),
            )),
            authorization_code_id: row.authorization_code_id.map(CodeId::new).transpose()?,
            issued_at: row.issued_at,
            expires_at: row.expires_at,
            revoked: row.revoked,
            revoked_by: row.revoked_by,
        })
    }
}

#[async_trait]
impl AccessTokenStore for PostgresAccessTokenStore {
    async fn insert(&self, token: AccessToken) -> ApplicationResult<()> {
        sqlx::query(
            r#"
            INSERT INTO access_tokens (token_id, access_token, client_id, user_id, username,
                federated_idp, scope, token_binding_reference, authorization_code_id,
                issued_at, expires_at, revoked, revoked_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(&token.token_id)
        .bind(&token.access_token)
        .bind(&token.client_id)
        .bind(&token.authorized_user.user_id)
        .bind(&token.authorized_user.username)
        .bind(&token.authorized_user.federated_idp)
        .bind(token.scope.as_scope_string())
        .bind(token.token_binding_reference.as_str())
        .bind(token.authorization_code_id.as_ref().map(CodeId::as_str))
        .bind(token.issued_at)
        .bind(token.expires_at)
        .bind(token.revoked)
        .bind(&token.revoked_by)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(())
    }

    async fn get_token_by_id(&self, token_id: &str) -> ApplicationResult<Option<AccessToken>> {
        let row = sqlx::query_as::<_, AccessTokenRow>(
            "SELECT token_id, access_token, client_id, user_id, username, federated_idp, scope,
                    token_binding_reference, authorization_code_id, issued_at, expires_at,
                    revoked, revoked_by
             FROM access_tokens WHERE token_id = $1",
        )
        .bind(token_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(row.map(AccessToken::try_from).transpose()?)
    }

    async fn revoke_token(&self, token_id: &str, revoking_user_id: &str) -> ApplicationResult<()> {
        let result = sqlx::query(
            "UPDATE access_tokens SET revoked = TRUE, revoked_by = $2 WHERE token_id = $1",
        )
        .bind(token_id)
        .bind(revoking_user_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("access token {token_id}")).into());
        }
        Ok(())
    }
}
