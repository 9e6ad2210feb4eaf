use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};

/// Stable, non-reversible stand-in for a credential in log lines.
pub fn fingerprint(secret: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(secret.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::fingerprint;

    #[test]
    fn fingerprint_hides_the_value_but_is_stable() {
        let first = fingerprint("abc123");
        assert_eq!(first, fingerprint("abc123"));
        assert_ne!(first, fingerprint("abc124"));
        assert!(!first.contains("abc123"));
        assert_eq!(first.len(), 43);
    }
}
