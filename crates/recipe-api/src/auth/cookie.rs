// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Credential cookie transport.

use axum::http::{HeaderMap, header};

/// Name of the cookie carrying the credential.
pub const TOKEN_COOKIE: &str = "token";

/// Extracts the credential from the `Cookie` headers.
///
/// Only the first `token` cookie is considered. An empty value is treated
/// the same as an absent cookie.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name.trim() == TOKEN_COOKIE).then(|| value.trim().trim_matches('"'))
        })
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Builds the `Set-Cookie` value delivering a credential to the browser.
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Strict",
        TOKEN_COOKIE,
        token,
        max_age_secs.max(0)
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Builds the `Set-Cookie` value that removes the credential.
pub fn clear_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(values: &[&'static str]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for value in values {
            map.append(header::COOKIE, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_extract_token() {
        assert_eq!(extract_token(&headers(&["token=abc.def.ghi"])), Some("abc.def.ghi".to_string()));
        assert_eq!(
            extract_token(&headers(&["theme=dark; token=abc; lang=en"])),
            Some("abc".to_string())
        );
        assert_eq!(
            extract_token(&headers(&["theme=dark", "token=xyz"])),
            Some("xyz".to_string())
        );
        assert_eq!(extract_token(&headers(&["token=\"quoted\""])), Some("quoted".to_string()));
    }

    #[test]
    fn test_missing_or_empty_token() {
        assert_eq!(extract_token(&HeaderMap::new()), None);
        assert_eq!(extract_token(&headers(&["theme=dark"])), None);
        assert_eq!(extract_token(&headers(&["token="])), None);
        assert_eq!(extract_token(&headers(&["token=\"\""])), None);
        assert_eq!(extract_token(&headers(&["mytoken=abc"])), None);
    }

    #[test]
    fn test_session_cookie() {
        let cookie = session_cookie("abc", 3600, true);
        assert_eq!(
            cookie,
            "token=abc; Path=/; Max-Age=3600; HttpOnly; SameSite=Strict; Secure"
        );
        assert!(!session_cookie("abc", 60, false).contains("Secure"));
    }

    #[test]
    fn test_clear_cookie() {
        assert_eq!(clear_cookie(false), "token=; Path=/; Max-Age=0; HttpOnly; SameSite=Strict");
    }
}
