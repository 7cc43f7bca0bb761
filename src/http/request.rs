use std::collections::HashMap;

use serde_json::Value;
use tracing::warn;

use crate::environment::{interpolate, unresolved};

use super::method::HttpMethod;

/// One outbound call: method, path relative to the context's base URL,
/// optional JSON body and headers added on top of the context defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestSpec {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach a JSON body and the matching `Content-Type` header.
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self.header("Content-Type", "application/json")
    }

    /// Replace `{{key}}` placeholders in the path and header values.
    pub fn resolve(mut self, variables: &HashMap<String, String>) -> Self {
        self.path = interpolate(&self.path, variables);
        for (_, value) in &mut self.headers {
            *value = interpolate(value, variables);
        }
        for name in unresolved(&self.path) {
            warn!(path = %self.path, placeholder = %name, "unresolved placeholder in request path");
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_body_sets_content_type() {
        let spec = RequestSpec::post("/users").json(json!({ "name": "John Doe" }));
        assert_eq!(
            spec.headers,
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
        assert_eq!(spec.body.unwrap()["name"], "John Doe");
    }

    #[test]
    fn bodyless_request_has_no_headers() {
        let spec = RequestSpec::delete("/users/2");
        assert!(spec.headers.is_empty());
        assert!(spec.body.is_none());
    }

    #[test]
    fn resolve_fills_path_placeholders() {
        let mut vars = HashMap::new();
        vars.insert("usersPage".to_string(), "2".to_string());

        let spec = RequestSpec::get("/users?page={{usersPage}}").resolve(&vars);
        assert_eq!(spec.path, "/users?page=2");
    }
}
