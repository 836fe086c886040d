//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Template rendering failed.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// Serializing a data island failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The catalog did not become available in time.
    #[error("Catalog unavailable")]
    CatalogUnavailable,
}

impl AppError {
    /// Whether the failure is on our side rather than the client's.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::Template(_) | Self::Serialization(_))
    }

    /// HTTP status the error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Template(_) | Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::CatalogUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
            return (self.status(), "Internal server error").into_response();
        }

        tracing::debug!(error = %self, "Request rejected");
        (self.status(), self.to_string()).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("navigation", "Viewed product page", Some(&[("product_id", "vst-001")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn serialization_error() -> AppError {
        AppError::from(serde_json::from_str::<u32>("not json").unwrap_err())
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("vst-123".to_string());
        assert_eq!(err.to_string(), "Not found: vst-123");
        assert_eq!(AppError::CatalogUnavailable.to_string(), "Catalog unavailable");
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::NotFound("p9".to_string()), StatusCode::NOT_FOUND),
            (AppError::CatalogUnavailable, StatusCode::SERVICE_UNAVAILABLE),
            (serialization_error(), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.status(), status);
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_only_render_failures_are_server_errors() {
        assert!(serialization_error().is_server_error());
        assert!(!AppError::NotFound("p9".to_string()).is_server_error());
        assert!(!AppError::CatalogUnavailable.is_server_error());
    }

    #[tokio::test]
    async fn test_internal_details_are_hidden() {
        let response = serialization_error().into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body.as_ref(), b"Internal server error");
    }
}
