// src/domain/errors.rs
use crate::domain::authorization_code::CodeState;
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("persistence error: {0}")]
    Persistence(String),
    /// A stored authorization code may never move back to a usable state.
    #[error("illegal authorization code transition to {0}")]
    IllegalTransition(CodeState),
}
