pub mod grant;
pub mod token;

pub use grant::ValidatedGrant;
pub use token::{AUTHORIZATION_CODE_GRANT, AccessTokenResponse, TokenRequest, TokenSubject};
