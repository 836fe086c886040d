//! CSP nonce middleware and policy.
//!
//! Every page boots the WebAssembly bundle from one inline module script.
//! That script carries a per-request nonce, and the same nonce is written
//! into the `Content-Security-Policy` header by
//! [`security_headers_middleware`](super::security_headers_middleware).

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use rand::RngCore;

/// A CSP nonce value for the inline bootstrap script.
///
/// Each request gets a unique, cryptographically random nonce (128-bit, base64-encoded).
#[derive(Clone, Debug)]
pub struct CspNonce(pub String);

impl CspNonce {
    /// Generate a new random nonce.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; 16];
        rand::rng().fill_bytes(&mut bytes);
        Self(STANDARD.encode(bytes))
    }

    /// Get the nonce value for use in templates.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }

    /// The `Content-Security-Policy` value allowing this nonce.
    ///
    /// `'wasm-unsafe-eval'` lets the page compile the bundle; media is
    /// same-origin only.
    #[must_use]
    pub fn policy(&self) -> String {
        let script_src = if self.0.is_empty() {
            "script-src 'self' 'wasm-unsafe-eval'".to_string()
        } else {
            format!("script-src 'self' 'nonce-{}' 'wasm-unsafe-eval'", self.0)
        };
        format!(
            "default-src 'none'; \
             {script_src}; \
             style-src 'self'; \
             font-src 'self'; \
             img-src 'self' data:; \
             media-src 'self'; \
             connect-src 'self'; \
             frame-src 'none'; \
             object-src 'none'; \
             base-uri 'self'; \
             form-action 'self'; \
             frame-ancestors 'none'"
        )
    }
}

/// Middleware that generates a CSP nonce and stores it in request extensions.
///
/// Must be added before `security_headers_middleware` in the middleware stack
/// so the nonce is available when building the CSP header.
pub async fn csp_nonce_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(CspNonce::generate());
    next.run(request).await
}

/// Extractor to get the CSP nonce from request extensions.
///
/// # Example
///
/// ```ignore
/// async fn handler(nonce: CspNonce) -> impl IntoResponse {
///     ShopTemplate { nonce: nonce.0, /* ... */ }
/// }
/// ```
impl<S> FromRequestParts<S> for CspNonce
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Self>().cloned().unwrap_or_else(|| {
            tracing::warn!(
                "CSP nonce not found in request extensions - middleware may be misconfigured"
            );
            Self(String::new())
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonces_are_unique() {
        assert_ne!(CspNonce::generate().0, CspNonce::generate().0);
    }

    #[test]
    fn test_policy_includes_nonce_and_wasm() {
        let nonce = CspNonce("abc123".to_string());
        let policy = nonce.policy();
        assert!(policy.contains("'nonce-abc123'"));
        assert!(policy.contains("'wasm-unsafe-eval'"));
        assert!(policy.contains("media-src 'self'"));
    }

    #[test]
    fn test_policy_without_nonce() {
        let policy = CspNonce(String::new()).policy();
        assert!(!policy.contains("nonce-"));
    }
}
