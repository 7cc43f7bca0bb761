use bytes::Bytes;
use serde_json::Value;

use crate::error::CaseFailure;

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    /// Raw body as received; never re-encoded.
    pub body: Bytes,
    pub content_type: String,
}

impl ApiResponse {
    /// Parse the body as JSON. Only called when an assertion reads the body.
    pub fn json(&self) -> Result<Value, CaseFailure> {
        serde_json::from_slice(&self.body).map_err(|err| {
            CaseFailure::parse(format!("{err} (content-type `{}`)", self.content_type))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(body: impl Into<Bytes>) -> ApiResponse {
        ApiResponse {
            status: 200,
            body: body.into(),
            content_type: "text/html".into(),
        }
    }

    #[test]
    fn parses_json_body() {
        let value = response(r#"{"page": 2}"#).json().unwrap();
        assert_eq!(value["page"], 2);
    }

    #[test]
    fn html_body_is_a_parse_failure() {
        let err = response("<html></html>").json().unwrap_err();
        assert!(matches!(err, CaseFailure::Parse { .. }));
        assert!(err.to_string().contains("text/html"));
    }

    #[test]
    fn invalid_utf8_inside_string_is_a_parse_failure() {
        let body: &'static [u8] = b"{\"token\": \"ab\xff\xfecd\"}";
        let err = response(body).json().unwrap_err();
        assert!(matches!(err, CaseFailure::Parse { .. }), "{err}");
    }
}
