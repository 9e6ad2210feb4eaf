use crate::domain::errors::DomainError;

const CNT_CODE_CLIENT_CODE: &str = "authorization_codes_client_code_key";
const CNT_CODE_STATE_CHECK: &str = "authorization_codes_state_chk";
const CNT_TOKEN_VALUE: &str = "access_tokens_access_token_key";
const CNT_TOKEN_CODE: &str = "access_tokens_authorization_code_id_fkey";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_CODE_CLIENT_CODE => {
                        DomainError::Conflict("authorization code already exists".into())
                    }
                    CNT_TOKEN_VALUE => DomainError::Conflict("access token already exists".into()),
                    CNT_TOKEN_CODE => {
                        DomainError::NotFound("authorization code not found".into())
                    }
                    CNT_CODE_STATE_CHECK => {
                        DomainError::Validation("unknown authorization code state".into())
                    }
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
