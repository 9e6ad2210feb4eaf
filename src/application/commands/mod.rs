pub mod authorization_code;
pub mod grant_handler;
