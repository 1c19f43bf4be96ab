//! Client configuration
//!
//! Plain data shared by the native client and the browser front-end. Nothing
//! here validates the base URL: a malformed URL only surfaces when a request
//! is built from it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Base URL of the evaluation backend
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/evaluation";

pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// Configuration fixed at client construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Origin + prefix every relative request path is resolved against
    pub base_url: String,
    /// Headers sent with every request
    pub headers: BTreeMap<String, String>,
}

impl ClientConfig {
    /// Config for `base_url` with the default JSON content-type header
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string());
        Self {
            base_url: base_url.into(),
            headers,
        }
    }

    /// Builder method: add or replace a default header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Resolve a request path against the base URL
    pub fn url(&self, path: &str) -> String {
        resolve_url(&self.base_url, path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Settings that apply to a single request only
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOverrides {
    pub base_url: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub query: Vec<(String, String)>,
}

impl RequestOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// Join a request path onto a base URL
///
/// - an absolute URL (`scheme://...` or `//host/...`) is returned unchanged
/// - an empty path addresses the base itself
/// - otherwise exactly one `/` separates base and path
pub fn resolve_url(base: &str, path: &str) -> String {
    if path.is_empty() {
        return base.to_string();
    }
    if is_absolute_url(path) {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn is_absolute_url(path: &str) -> bool {
    if path.starts_with("//") {
        return true;
    }
    let Some((scheme, rest)) = path.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    let valid_scheme = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid_scheme && rest.starts_with("//")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080/api/evaluation");
        assert_eq!(config.headers.len(), 1);
        assert_eq!(
            config.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn test_resolve_relative_paths() {
        let base = "http://localhost:8080/api/evaluation";
        assert_eq!(
            resolve_url(base, "/overall"),
            "http://localhost:8080/api/evaluation/overall"
        );
        assert_eq!(
            resolve_url(base, "overall"),
            "http://localhost:8080/api/evaluation/overall"
        );
        assert_eq!(
            resolve_url("http://localhost:8080/api/evaluation/", "42"),
            "http://localhost:8080/api/evaluation/42"
        );
    }

    #[test]
    fn test_empty_path_is_base() {
        assert_eq!(resolve_url("http://h/api", ""), "http://h/api");
    }

    #[test]
    fn test_absolute_urls_bypass_base() {
        let base = "http://localhost:8080/api/evaluation";
        assert_eq!(
            resolve_url(base, "https://example.com/x"),
            "https://example.com/x"
        );
        assert_eq!(resolve_url(base, "//cdn.example.com/x"), "//cdn.example.com/x");
        assert_eq!(
            resolve_url(base, "by-date-range?startDate=a:b"),
            "http://localhost:8080/api/evaluation/by-date-range?startDate=a:b"
        );
    }

    #[test]
    fn test_malformed_base_is_not_validated() {
        let config = ClientConfig::new("not a url");
        assert_eq!(config.url("/overall"), "not a url/overall");
    }

    #[test]
    fn test_overrides_builder() {
        let overrides = RequestOverrides::new()
            .base_url("http://other")
            .header("X-Trace", "1")
            .query("a", "b");
        assert_eq!(overrides.base_url.as_deref(), Some("http://other"));
        assert_eq!(overrides.headers.len(), 1);
        assert_eq!(overrides.query, vec![("a".to_string(), "b".to_string())]);
    }
}
