pub mod cache;
pub mod commands;
pub mod dto;
pub mod error;
pub mod ports;
pub mod redact;
pub mod services;

pub use error::ApplicationResult;
