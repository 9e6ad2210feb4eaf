//! Deterministic cache key construction.

/// Key for an authorization code issued to `client_id`.
pub fn authorization_code(client_id: &str, code: &str) -> String {
    format!("{client_id}:{code}")
}

/// Key for the token issued to a user for a client and scope. The federated
/// IdP and binding reference are appended only when present.
pub fn token_for_user(
    client_id: &str,
    user_id: &str,
    scope: &str,
    federated_idp: Option<&str>,
    binding_reference: Option<&str>,
) -> String {
    let mut key = format!("{client_id}:{user_id}:{scope}");
    if let Some(idp) = federated_idp {
        key.push(':');
        key.push_str(idp);
    }
    if let Some(binding) = binding_reference {
        key.push(':');
        key.push_str(binding);
    }
    key
}

pub fn token_for_client_user(client_id: &str, user_id: &str) -> String {
    format!("{client_id}:{user_id}")
}

/// Tokens are also cached under their raw value.
pub fn token_value(access_token: &str) -> String {
    access_token.to_string()
}
