// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! URL templating: `{name}` path placeholders plus a query string

use lazy_static::lazy_static;
use regex::Regex;
use url::form_urlencoded;

use super::params::Params;

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{([^\s{}]+)\}").expect("valid placeholder pattern");
}

/// Resolve a URL template against a parameter bag.
///
/// Each `{name}` whose parameter is present and non-empty is replaced by the
/// value and the parameter is consumed. Everything left over becomes the
/// query string, in bag order. A placeholder without a usable value stays in
/// the URL verbatim.
pub fn resolve(url: &str, params: &Params) -> String {
    let mut remaining = params.clone();
    let mut resolved = url.to_string();

    for caps in PLACEHOLDER.captures_iter(url) {
        let token = &caps[0];
        let name = &caps[1];
        match remaining.get(name).filter(|v| !v.is_empty()).cloned() {
            Some(value) => {
                resolved = resolved.replacen(token, &value, 1);
                remaining.shift_remove(name);
            }
            None => {
                tracing::debug!(placeholder = %token, url = %url, "Unresolved path placeholder");
            }
        }
    }

    let query = encode_query(&remaining);
    if !query.is_empty() {
        resolved.push('?');
        resolved.push_str(&query);
    }
    resolved
}

/// Serialize a parameter bag as `application/x-www-form-urlencoded`
pub fn encode_query(params: &Params) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish()
}

/// Placeholder names appearing in a template, in order
pub fn placeholders(url: &str) -> Vec<String> {
    PLACEHOLDER
        .captures_iter(url)
        .map(|caps| caps[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::params::params;

    #[test]
    fn test_path_and_query() {
        let p = params([("id", "42"), ("active", "true")]);
        assert_eq!(resolve("/users/{id}", &p), "/users/42?active=true");
    }

    #[test]
    fn test_missing_placeholder_left_intact() {
        let p = params([("active", "true")]);
        assert_eq!(resolve("/users/{id}", &p), "/users/{id}?active=true");
    }

    #[test]
    fn test_empty_value_left_intact_and_still_queried() {
        let p = params([("id", "")]);
        assert_eq!(resolve("/users/{id}", &p), "/users/{id}?id=");
    }

    #[test]
    fn test_multiple_placeholders() {
        let p = params([("org", "acme"), ("repo", "rocket"), ("page", "2")]);
        assert_eq!(
            resolve("/orgs/{org}/repos/{repo}", &p),
            "/orgs/acme/repos/rocket?page=2"
        );
    }

    #[test]
    fn test_query_encoding_and_order() {
        let p = params([("q", "a b&c"), ("lang", "fi")]);
        assert_eq!(resolve("/search", &p), "/search?q=a+b%26c&lang=fi");
    }

    #[test]
    fn test_no_params() {
        assert_eq!(resolve("https://example.com/x", &Params::new()), "https://example.com/x");
    }

    #[test]
    fn test_repeated_placeholder_consumed_once() {
        let p = params([("id", "7")]);
        assert_eq!(resolve("/a/{id}/b/{id}", &p), "/a/7/b/{id}");
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders("/u/{id}/posts/{post}"), vec!["id", "post"]);
        assert!(placeholders("/plain").is_empty());
    }
}
