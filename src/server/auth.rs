//! HTTP Basic authentication gate.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::headers::authorization::Basic;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use subtle::ConstantTimeEq;

use crate::config::AuthConfig;
use crate::error::Error;
use crate::server::error::ApiError;
use crate::server::AppState;

/// Reject requests without matching credentials before any handler runs.
///
/// With no password configured every request passes.
pub async fn require_basic_auth(
    State(state): State<AppState>,
    credentials: Option<TypedHeader<Authorization<Basic>>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth = &state.config.auth;
    if !auth.is_enabled() {
        return Ok(next.run(request).await);
    }

    match credentials {
        Some(TypedHeader(header))
            if is_authorized(auth, header.username(), header.password()) =>
        {
            Ok(next.run(request).await)
        }
        _ => {
            tracing::debug!("Rejected unauthenticated request to {}", request.uri().path());
            Err(Error::Unauthorized.into())
        }
    }
}

/// Constant-time comparison of supplied credentials.
pub fn is_authorized(auth: &AuthConfig, username: &str, password: &str) -> bool {
    let user_ok = username.as_bytes().ct_eq(auth.username.as_bytes());
    let pass_ok = password.as_bytes().ct_eq(auth.password.as_bytes());
    bool::from(user_ok & pass_ok)
}
