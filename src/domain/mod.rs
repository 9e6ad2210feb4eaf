pub mod access_token;
pub mod audit;
pub mod authorization_code;
pub mod errors;
pub mod user;
