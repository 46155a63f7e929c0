//! Access token written by the external sign-in flow

use gloo::storage::{LocalStorage, Storage};

pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Token stored by the auth provider, if the user is signed in
pub fn access_token() -> Option<String> {
    LocalStorage::raw()
        .get_item(ACCESS_TOKEN_KEY)
        .ok()
        .flatten()
        .and_then(|token| normalize_token(&token))
}

pub fn is_authenticated() -> bool {
    access_token().is_some()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

fn normalize_token(raw: &str) -> Option<String> {
    let token = raw.trim().trim_matches('"');
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
