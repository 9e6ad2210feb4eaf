pub mod entity;
pub mod value_objects;

pub use entity::{AuthorizationCode, MIN_VALIDITY_MS, NewAuthorizationCode};
pub use value_objects::{CodeId, CodeState, NO_TOKEN_BINDING, Scope, TokenBindingReference};
