use std::time::Duration;

use anyhow::Context;
use axum::{
    extract::FromRef,
    http::{header, HeaderMap, HeaderValue},
};

use crate::state::AppState;

pub const SESSION_COOKIE: &str = "token";

/// Attributes of the session cookie. Production cookies are `Secure` and
/// `SameSite=None` so the cross-site frontend can send them; anything else
/// gets `SameSite=Lax`.
#[derive(Debug, Clone, Copy)]
pub struct SessionCookie {
    secure: bool,
    max_age: Duration,
}

impl FromRef<AppState> for SessionCookie {
    fn from_ref(state: &AppState) -> Self {
        state.cookies
    }
}

impl SessionCookie {
    pub fn new(secure: bool, max_age: Duration) -> Self {
        Self { secure, max_age }
    }

    fn attributes(&self) -> &'static str {
        if self.secure {
            "HttpOnly; Path=/; Secure; SameSite=None"
        } else {
            "HttpOnly; Path=/; SameSite=Lax"
        }
    }

    pub fn issue(&self, token: &str) -> anyhow::Result<HeaderValue> {
        let value = format!(
            "{}={}; Max-Age={}; {}",
            SESSION_COOKIE,
            token,
            self.max_age.as_secs(),
            self.attributes()
        );
        HeaderValue::from_str(&value).context("session cookie value")
    }

    pub fn clear(&self) -> anyhow::Result<HeaderValue> {
        let value = format!(
            "{}=; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT; {}",
            SESSION_COOKIE,
            self.attributes()
        );
        HeaderValue::from_str(&value).context("session cookie value")
    }
}

/// Returns the value of cookie `name`, looking through every `Cookie` header.
pub fn parse_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, v)| *k == name && !v.is_empty())
        .map(|(_, v)| v.to_string())
}

pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    auth.strip_prefix("Bearer ")
        .or_else(|| auth.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
