use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;
use uuid::Uuid;

use crate::{
    auth::{
        cookie::{bearer_token, parse_cookie, SESSION_COOKIE},
        services::AuthService,
    },
    error::AppError,
};

/// Identity attached to the request by [`require_session`].
#[derive(Debug, Clone, Copy)]
pub struct SessionUser {
    pub id: Uuid,
}

/// Resolves the session token from the `token` cookie, or from a bearer
/// header for clients that keep the token themselves, and attaches the
/// caller's identity. Any failure ends the request with 401.
pub async fn require_session(
    State(auth): State<AuthService>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let headers = request.headers();
    let token = parse_cookie(headers, SESSION_COOKIE)
        .or_else(|| bearer_token(headers))
        .ok_or_else(|| {
            warn!(uri = %request.uri(), "session token missing");
            AppError::TokenMissing
        })?;

    let id = auth.verify_and_extract_identity(&token)?;
    request.extensions_mut().insert(SessionUser { id });

    Ok(next.run(request).await)
}
