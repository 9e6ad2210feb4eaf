// src/application/ports/mod.rs
pub mod access_token;
pub mod app_policy;
pub mod authorization_code;
pub mod cache;
pub mod interceptor;
pub mod security;
pub mod time;

