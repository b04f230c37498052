use serde::{Deserialize, Serialize};

use crate::users::repo_types::User;

/// Request body for signup.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for profile update. Other fields (email, password) are
/// ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub status: u16,
    pub message: String,
    pub body: User,
}

/// Public subset returned after login and profile update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for ProfileSummary {
    fn from(u: User) -> Self {
        Self {
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
        }
    }
}

/// `token` is only filled for mobile clients; browsers get the cookie.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: Option<String>,
    pub body: ProfileSummary,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub body: User,
}

#[derive(Debug, Serialize)]
pub struct UpdateProfileResponse {
    pub message: String,
    pub body: ProfileSummary,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
