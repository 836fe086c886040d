//! Request correlation ids.
//!
//! A well-formed `x-request-id` from an upstream proxy is kept; anything else
//! is replaced with a fresh UUID v4. The id is recorded on the `http_request`
//! span, tagged on the Sentry scope, and echoed in the response.

use axum::{
    extract::Request,
    http::{HeaderValue, header::HeaderName},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header carrying the request id.
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Longest upstream id that is accepted as-is.
const MAX_UPSTREAM_ID_LEN: usize = 128;

/// Request id assigned to the current request, available as an extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// Reuse an upstream id when it is usable, otherwise generate one.
    #[must_use]
    pub fn from_upstream(upstream: Option<&HeaderValue>) -> Self {
        upstream
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|id| is_acceptable(id))
            .map_or_else(|| Self(Uuid::new_v4().to_string()), |id| Self(id.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_acceptable(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_UPSTREAM_ID_LEN
        && id.bytes().all(|b| b.is_ascii_graphic())
}

/// Middleware that assigns every request a [`RequestId`].
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = RequestId::from_upstream(request.headers().get(&REQUEST_ID_HEADER));

    Span::current().record("request_id", request_id.as_str());
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", request_id.as_str());
    });

    request.extensions_mut().insert(request_id.clone());
    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER.clone(), value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_id_is_kept() {
        let header = HeaderValue::from_static("edge-1234");
        assert_eq!(RequestId::from_upstream(Some(&header)).as_str(), "edge-1234");
    }

    #[test]
    fn test_missing_id_is_generated() {
        let id = RequestId::from_upstream(None);
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn test_unusable_upstream_id_is_replaced() {
        let blank = HeaderValue::from_static("   ");
        let spaced = HeaderValue::from_static("two words");
        let long = HeaderValue::from_str(&"x".repeat(MAX_UPSTREAM_ID_LEN + 1)).unwrap_or(blank.clone());

        for header in [blank, spaced, long] {
            let id = RequestId::from_upstream(Some(&header));
            assert!(Uuid::parse_str(id.as_str()).is_ok());
        }
    }
}
