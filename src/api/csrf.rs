//! CSRF Token
//!
//! Django issues the anti-forgery token in the `csrftoken` cookie and expects
//! it back in the `X-CSRFToken` header on state-changing requests.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlDocument};

pub const CSRF_COOKIE: &str = "csrftoken";
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Find the token in a `document.cookie` string
pub fn csrf_from_cookies(cookies: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|c| c.strip_prefix(CSRF_COOKIE)?.strip_prefix('='))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

pub fn csrf_token(document: &Document) -> Option<String> {
    let cookies = document.dyn_ref::<HtmlDocument>()?.cookie().ok()?;
    let token = csrf_from_cookies(&cookies);
    if token.is_none() {
        log::warn!("[CSRF] No {} cookie on this page", CSRF_COOKIE);
    }
    token
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_among_other_cookies() {
        let cookies = "sessionid=abc; csrftoken=Tk9x; theme=dark";
        assert_eq!(csrf_from_cookies(cookies), Some("Tk9x".to_string()));
    }

    #[test]
    fn test_similar_names_do_not_match() {
        assert_eq!(csrf_from_cookies("csrftoken_old=zz; xcsrftoken=yy"), None);
        assert_eq!(csrf_from_cookies(""), None);
        assert_eq!(csrf_from_cookies("csrftoken="), None);
    }
}
