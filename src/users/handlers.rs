use axum::{
    extract::State,
    http::{header, HeaderMap},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{
        cookie::SessionCookie,
        middleware::{require_session, SessionUser},
        services::AuthService,
    },
    error::AppError,
    state::AppState,
    users::{
        dto::{
            LoginRequest, LoginResponse, MessageResponse, ProfileResponse, SignupRequest,
            SignupResponse, UpdateProfileRequest, UpdateProfileResponse,
        },
        extract::Payload,
        repo_types::ProfileUpdate,
    },
};

/// User-Agent marker sent by the Expo mobile app.
const MOBILE_UA_MARKER: &str = "Expo";

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

pub fn session_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/logout", post(logout))
        .route("/profile", get(get_profile).put(update_profile))
        .route_layer(middleware::from_fn_with_state(state, require_session))
}

fn is_mobile_client(headers: &HeaderMap) -> bool {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ua| ua.contains(MOBILE_UA_MARKER))
}

#[instrument(skip_all)]
pub async fn signup(
    State(auth): State<AuthService>,
    Payload(req): Payload<SignupRequest>,
) -> Result<Json<SignupResponse>, AppError> {
    let user = auth
        .signup(req.email, req.password, req.first_name, req.last_name)
        .await?;

    Ok(Json(SignupResponse {
        status: 200,
        message: "User successfully created".into(),
        body: user,
    }))
}

#[instrument(skip_all)]
pub async fn login(
    State(auth): State<AuthService>,
    State(cookies): State<SessionCookie>,
    headers: HeaderMap,
    Payload(req): Payload<LoginRequest>,
) -> Result<Response, AppError> {
    let grant = auth
        .login(&req.email, &req.password)
        .await
        .map_err(|e| match e {
            AppError::UserNotFound => AppError::InvalidCredentials,
            other => other,
        })?;

    let mobile = is_mobile_client(&headers);
    let mut response_headers = HeaderMap::new();
    let token = if mobile {
        Some(grant.token)
    } else {
        response_headers.insert(header::SET_COOKIE, cookies.issue(&grant.token)?);
        None
    };

    info!(user_id = %grant.user.id, mobile, "session issued");
    Ok((
        response_headers,
        Json(LoginResponse {
            message: "Login successful".into(),
            token,
            body: grant.user.into(),
        }),
    )
        .into_response())
}

#[instrument(skip_all, fields(user_id = %session.id))]
pub async fn logout(
    State(cookies): State<SessionCookie>,
    Extension(session): Extension<SessionUser>,
) -> Result<(HeaderMap, Json<MessageResponse>), AppError> {
    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, cookies.clear()?);
    info!("user logged out");
    Ok((
        headers,
        Json(MessageResponse {
            message: "Logged out successfully".into(),
        }),
    ))
}

#[instrument(skip_all, fields(user_id = %session.id))]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = state
        .users
        .find_by_id(session.id)
        .await?
        .ok_or(AppError::UserNotFound)?;
    Ok(Json(ProfileResponse { body: user }))
}

#[instrument(skip_all, fields(user_id = %session.id))]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Payload(req): Payload<UpdateProfileRequest>,
) -> Result<Json<UpdateProfileResponse>, AppError> {
    let update = ProfileUpdate {
        first_name: req.first_name,
        last_name: req.last_name,
    };

    let user = state
        .users
        .update_profile(session.id, update)
        .await?
        .ok_or(AppError::UserNotFound)?;

    info!("profile updated");
    Ok(Json(UpdateProfileResponse {
        message: "Successfully updated user profile data".into(),
        body: user.into(),
    }))
}
