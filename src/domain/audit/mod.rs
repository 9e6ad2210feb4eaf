pub mod entity;
pub mod repository;

pub use entity::AuditLog;
pub use repository::AuditLogRepository;
