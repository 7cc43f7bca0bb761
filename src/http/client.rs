use std::time::Instant;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use crate::error::CaseFailure;

use super::context::TestContext;
use super::request::RequestSpec;
use super::response::ApiResponse;

/// Send one request through the shared context.
///
/// Context headers are applied by the client; headers on the spec are added
/// per request and win on conflicts. Exactly one attempt is made.
pub async fn send(ctx: &TestContext, spec: &RequestSpec) -> Result<ApiResponse, CaseFailure> {
    let client = ctx
        .client()
        .ok_or_else(|| CaseFailure::infrastructure("test context has been disposed"))?;

    let url = ctx.url_for(&spec.path);
    let mut request = client.request(spec.method.into(), &url);

    request = request.headers(request_headers(spec)?);

    if let Some(body) = spec.body.as_ref().filter(|_| spec.method.allows_body()) {
        let raw = serde_json::to_string(body)
            .map_err(|err| CaseFailure::infrastructure(format!("invalid request: cannot encode body: {err}")))?;
        request = request.body(raw);
    }

    debug!(method = %spec.method, url = %url, "sending request");
    let start = Instant::now();
    let response = request
        .send()
        .await
        .map_err(|err| CaseFailure::infrastructure(format!("{} {url}: {err}", spec.method)))?;

    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("text/plain")
        .to_string();

    let body = response
        .bytes()
        .await
        .map_err(|err| CaseFailure::infrastructure(format!("Failed to read response: {err}")))?;

    debug!(
        status,
        elapsed_ms = start.elapsed().as_millis() as u64,
        size = body.len(),
        content_type = %content_type,
        "received response"
    );

    Ok(ApiResponse {
        status,
        body,
        content_type,
    })
}

/// Per-request headers of a spec. A malformed entry means the request cannot
/// be built, so nothing is sent.
fn request_headers(spec: &RequestSpec) -> Result<HeaderMap, CaseFailure> {
    let mut headers = HeaderMap::new();
    for (key, value) in &spec.headers {
        let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|err| {
            CaseFailure::infrastructure(format!("invalid request: header name `{key}`: {err}"))
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|err| {
            CaseFailure::infrastructure(format!("invalid request: header value for `{key}`: {err}"))
        })?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}
