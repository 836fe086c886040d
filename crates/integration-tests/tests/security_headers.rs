//! Integration tests for the middleware stack.

use vast_integration_tests::{TestContext, six_product_catalog};

#[tokio::test]
async fn test_csp_nonce_matches_bootstrap_script() {
    let ctx = TestContext::with_catalog(six_product_catalog());
    let resp = ctx.get("/").await;

    let csp = resp.header("content-security-policy").unwrap_or_default();
    assert!(csp.contains("'wasm-unsafe-eval'"));
    assert!(csp.contains("media-src 'self'"));

    let nonce = csp
        .split("'nonce-")
        .nth(1)
        .and_then(|rest| rest.split('\'').next())
        .unwrap_or_default();
    assert!(!nonce.is_empty());
    assert!(resp.body.contains(&format!(r#"<script type="module" nonce="{nonce}">"#)));
}

#[tokio::test]
async fn test_nonce_differs_per_request() {
    let ctx = TestContext::with_catalog(six_product_catalog());
    let first = ctx.get("/health").await;
    let second = ctx.get("/health").await;

    assert_ne!(
        first.header("content-security-policy"),
        second.header("content-security-policy")
    );
}

#[tokio::test]
async fn test_isolation_headers() {
    let ctx = TestContext::with_catalog(six_product_catalog());
    let resp = ctx.get("/shop").await;

    assert_eq!(resp.header("x-frame-options"), Some("DENY"));
    assert_eq!(resp.header("x-content-type-options"), Some("nosniff"));
    assert_eq!(resp.header("cache-control"), Some("no-store, max-age=0"));
    assert!(
        resp.header("permissions-policy")
            .unwrap_or_default()
            .contains("autoplay=(self)")
    );
}

#[tokio::test]
async fn test_request_id_generated_or_echoed() {
    let ctx = TestContext::with_catalog(six_product_catalog());
    let resp = ctx.get("/health").await;

    let id = resp.header("x-request-id").unwrap_or_default();
    assert_eq!(id.len(), 36);

    let echoed = ctx
        .get_with_headers("/health", &[("x-request-id", "edge-42")])
        .await;
    assert_eq!(echoed.header("x-request-id"), Some("edge-42"));
}
