use std::time::Duration;

use anyhow::Context;

const DEFAULT_SECRET: &str = "default-secret-key";
const PROD_CORS_ORIGIN: &str = "https://argent-bank-gamma.vercel.app";
const DEV_CORS_ORIGIN: &str = "http://localhost:5173";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub database_url: String,
    pub jwt: JwtConfig,
    pub cors_origin: String,
    pub host: String,
    pub port: u16,
    pub ping_interval_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source; `from_env` feeds it the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") => Environment::Production,
            _ => Environment::Development,
        };

        let url_key = if environment.is_production() {
            "DATABASE_URL_PROD"
        } else {
            "DATABASE_URL_DEV"
        };
        let database_url = lookup(url_key)
            .filter(|v| !v.is_empty())
            .with_context(|| format!("{url_key} is not set (APP_ENV={environment:?})"))?;

        let secret = match lookup("SECRET_KEY").filter(|v| !v.is_empty()) {
            Some(secret) => secret,
            None => {
                tracing::warn!("SECRET_KEY is not set; signing tokens with the built-in default key");
                DEFAULT_SECRET.to_string()
            }
        };

        let jwt = JwtConfig {
            secret,
            issuer: lookup("JWT_ISSUER").unwrap_or_else(|| "argentbank".into()),
            audience: lookup("JWT_AUDIENCE").unwrap_or_else(|| "argentbank-users".into()),
            ttl_minutes: lookup("JWT_TTL_MINUTES")
                .and_then(|v| v.parse::<i64>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(60 * 24),
        };

        let cors_origin = lookup("CORS_ORIGIN").unwrap_or_else(|| {
            if environment.is_production() {
                PROD_CORS_ORIGIN.into()
            } else {
                DEV_CORS_ORIGIN.into()
            }
        });

        let port = match lookup("PORT") {
            Some(v) => v.parse::<u16>().with_context(|| format!("invalid PORT {v:?}"))?,
            None => 3001,
        };

        Ok(Self {
            environment,
            database_url,
            jwt,
            cors_origin,
            host: lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            ping_interval_secs: lookup("PING_INTERVAL_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(600),
        })
    }

    pub fn ping_interval(&self) -> Duration {
        Duration::from_secs(self.ping_interval_secs)
    }
}
