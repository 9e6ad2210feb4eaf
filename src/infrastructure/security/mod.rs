// src/infrastructure/security/mod.rs
pub mod access_token_store;
pub mod app_policy;
pub mod audit_interceptor;
pub mod authorization_code_store;
pub mod pkce;
