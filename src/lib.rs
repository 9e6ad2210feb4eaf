//! Server-side redemption of the OAuth2 `authorization_code` grant.
//!
//! The crate validates a presented authorization code, enforces its single use,
//! and revokes the token minted from a code that is presented again. Storage,
//! caching, PKCE, token minting and revocation listeners are reached through the
//! ports in [`application::ports`]; in-memory, PostgreSQL and Redis adapters live
//! in [`infrastructure`].

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
