use crate::application::ports::{app_policy::AppPolicy, security::PkceVerifier};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

pub const METHOD_PLAIN: &str = "plain";
pub const METHOD_S256: &str = "S256";

/// RFC 7636 verifier supporting `plain` (when the client allows it) and `S256`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rfc7636PkceVerifier;

impl Rfc7636PkceVerifier {
    pub fn new() -> Self {
        Self
    }

    /// `BASE64URL(SHA256(ASCII(code_verifier)))`
    pub fn s256_challenge(verifier: &str) -> String {
        URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
    }
}

/// 43-128 characters from `[A-Za-z0-9-._~]`.
fn is_well_formed(verifier: &str) -> bool {
    (43..=128).contains(&verifier.len())
        && verifier
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~'))
}

fn ct_matches(expected: &str, presented: &str) -> bool {
    expected.as_bytes().ct_eq(presented.as_bytes()).into()
}

impl PkceVerifier for Rfc7636PkceVerifier {
    fn verify(
        &self,
        challenge: Option<&str>,
        verifier: Option<&str>,
        method: Option<&str>,
        app: &AppPolicy,
    ) -> bool {
        let Some(challenge) = challenge.map(str::trim).filter(|c| !c.is_empty()) else {
            // Nothing recorded at authorization time.
            return !app.pkce_mandatory;
        };
        let Some(verifier) = verifier.filter(|v| is_well_formed(v)) else {
            return false;
        };

        match method.map(str::trim).filter(|m| !m.is_empty()) {
            None | Some(METHOD_PLAIN) => {
                app.pkce_support_plain && ct_matches(challenge, verifier)
            }
            Some(METHOD_S256) => ct_matches(challenge, &Self::s256_challenge(verifier)),
            Some(_) => false,
        }
    }
}
