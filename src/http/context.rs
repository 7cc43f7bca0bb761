use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use tracing::debug;

use crate::error::ContextError;

/// Shared request configuration for one run: base URL plus the headers sent
/// with every request.
///
/// Created once before any case runs and only read afterwards. The pooled
/// client is released by [`TestContext::dispose`] or, at the latest, on drop.
#[derive(Debug)]
pub struct TestContext {
    base_url: String,
    default_headers: HeaderMap,
    client: Option<Client>,
}

impl TestContext {
    pub fn create(
        base_url: &str,
        default_headers: &HashMap<String, String>,
    ) -> Result<Self, ContextError> {
        Self::create_with_timeout(base_url, default_headers, None)
    }

    /// Same as [`TestContext::create`], with an explicit request timeout.
    /// `None` keeps the client's default.
    pub fn create_with_timeout(
        base_url: &str,
        default_headers: &HashMap<String, String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ContextError> {
        let base_url = validate_base_url(base_url)?;
        let headers = build_headers(default_headers)?;

        let mut builder = Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .default_headers(headers.clone());
        if let Some(timeout) = timeout.filter(|t| !t.is_zero()) {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        debug!(base_url = %base_url, headers = headers.len(), "created test context");
        Ok(Self {
            base_url,
            default_headers: headers,
            client: Some(client),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// The pooled client, or `None` once the context has been disposed.
    pub fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    pub fn is_disposed(&self) -> bool {
        self.client.is_none()
    }

    /// Absolute URL for a path such as `/users?page=2`.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    /// Drop the client and its connection pool. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if self.client.take().is_some() {
            debug!(base_url = %self.base_url, "disposed test context");
        }
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn validate_base_url(raw: &str) -> Result<String, ContextError> {
    let trimmed = raw.trim();
    let invalid = |reason: String| ContextError::Configuration {
        url: raw.to_string(),
        reason,
    };

    if trimmed.is_empty() {
        return Err(invalid("base URL is empty".into()));
    }

    let url = Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme `{}`", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".into()));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("base URL cannot carry a query or fragment".into()));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

pub fn build_headers(input: &HashMap<String, String>) -> Result<HeaderMap, ContextError> {
    let mut headers = HeaderMap::new();

    for (key, value) in input {
        if key.is_empty() {
            continue;
        }

        let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|err| {
            ContextError::Header {
                name: key.clone(),
                reason: err.to_string(),
            }
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|err| ContextError::Header {
            name: key.clone(),
            reason: err.to_string(),
        })?;
        headers.insert(header_name, header_value);
    }

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_key() -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert("x-api-key".to_string(), "reqres-free-v1".to_string());
        headers
    }

    #[test]
    fn create_keeps_default_headers() {
        let ctx = TestContext::create("https://reqres.in/api", &api_key()).unwrap();
        assert_eq!(ctx.base_url(), "https://reqres.in/api");
        assert_eq!(ctx.default_headers()["x-api-key"], "reqres-free-v1");
        assert!(!ctx.is_disposed());
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let err = TestContext::create("  ", &api_key()).unwrap_err();
        assert!(matches!(err, ContextError::Configuration { .. }));
    }

    #[test]
    fn malformed_base_url_is_rejected() {
        for url in ["reqres.in/api", "ftp://reqres.in/api", "https://reqres.in/api?x=1"] {
            let err = TestContext::create(url, &api_key()).unwrap_err();
            assert!(
                matches!(err, ContextError::Configuration { .. }),
                "{url} should be rejected"
            );
        }
    }

    #[test]
    fn invalid_header_name_is_rejected() {
        let mut headers = HashMap::new();
        headers.insert("bad header".to_string(), "x".to_string());

        let err = TestContext::create("https://reqres.in/api", &headers).unwrap_err();
        assert!(matches!(err, ContextError::Header { .. }));
    }

    #[test]
    fn url_for_keeps_base_path() {
        let ctx = TestContext::create("https://reqres.in/api/", &HashMap::new()).unwrap();
        assert_eq!(ctx.url_for("/users?page=2"), "https://reqres.in/api/users?page=2");
        assert_eq!(ctx.url_for("login"), "https://reqres.in/api/login");
    }

    #[test]
    fn dispose_is_idempotent() {
        let mut ctx = TestContext::create("https://reqres.in/api", &api_key()).unwrap();
        ctx.dispose();
        ctx.dispose();
        assert!(ctx.is_disposed());
        assert!(ctx.client().is_none());
    }
}
