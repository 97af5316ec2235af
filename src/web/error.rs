use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};

/// Handler-boundary errors for the web layer.
///
/// Every upstream failure is converted here; none escapes as an unhandled
/// fault.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// No valid session on an authenticated-only route.
    #[error("Not authenticated")]
    Unauthenticated,

    /// OAuth flow failure; lands back on the login page with an error code.
    #[error("OAuth error: {0}")]
    OAuth(String),

    /// Platform call failed on an authenticated route.
    #[error("Platform error: {0}")]
    Upstream(#[from] crate::error::Error),

    /// Session store operation failed.
    #[error("Session store error: {0}")]
    Store(String),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, self.to_string()).into_response()
            }
            Self::OAuth(ref code) => {
                let encoded = urlencoding::encode(code);
                Redirect::to(&format!("/?error={encoded}")).into_response()
            }
            Self::Upstream(ref e) => {
                (StatusCode::BAD_GATEWAY, e.to_string()).into_response()
            }
            Self::Store(_) => {
                tracing::error!(error = %self, "web internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}
