use std::sync::Arc;

use axum::extract::FromRef;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    auth::{jwt::JwtKeys, password},
    error::AppError,
    state::AppState,
    users::{
        repo::UserStore,
        repo_types::{NewUser, User},
    },
};

/// Token issued by a successful login, plus the record it was issued for.
#[derive(Debug)]
pub struct LoginGrant {
    pub token: String,
    pub user: User,
}

/// Signup, login and token resolution over the user store.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    keys: JwtKeys,
}

impl FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> Self {
        Self::new(state.users.clone(), state.keys.clone())
    }
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, keys: JwtKeys) -> Self {
        Self { users, keys }
    }

    pub async fn signup(
        &self,
        email: String,
        password: String,
        first_name: String,
        last_name: String,
    ) -> Result<User, AppError> {
        // Best-effort pre-check; the store's unique index is the real guard.
        if self.users.find_by_email(&email).await?.is_some() {
            warn!(email = %email, "email already registered");
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = password::hash_password_blocking(password).await?;
        let user = self
            .users
            .insert(NewUser {
                email,
                password_hash,
                first_name,
                last_name,
            })
            .await?;

        info!(user_id = %user.id, email = %user.email, "user registered");
        Ok(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginGrant, AppError> {
        let user = match self.users.find_by_email(email).await? {
            Some(u) => u,
            None => {
                warn!(email = %email, "login unknown email");
                return Err(AppError::UserNotFound);
            }
        };

        let ok =
            password::verify_password_blocking(password.to_string(), user.password_hash.clone())
                .await?;
        if !ok {
            warn!(email = %email, user_id = %user.id, "login invalid password");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.keys.sign(user.id)?;
        info!(user_id = %user.id, "user logged in");
        Ok(LoginGrant { token, user })
    }

    pub fn verify_and_extract_identity(&self, token: &str) -> Result<Uuid, AppError> {
        self.keys.verify(token).map(|claims| claims.sub).map_err(|e| {
            warn!(error = %e, "invalid or expired token");
            AppError::InvalidOrExpiredToken
        })
    }
}
