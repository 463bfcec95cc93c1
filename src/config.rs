use std::str::FromStr;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub name: String,
    pub host: String,
    pub port: u16,
    pub debug: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_lifetime_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup; `DATABASE_URL` and `JWT_SECRET` are required.
    pub fn from_vars<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server = ServerConfig {
            name: var("APP_NAME").unwrap_or_else(|| "auth-backend".into()),
            host: var("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&var, "APP_PORT", 8080)?,
            debug: parse_or(&var, "APP_DEBUG", false)?,
        };
        let database = DatabaseConfig {
            url: var("DATABASE_URL").context("DATABASE_URL must be set")?,
            max_connections: parse_or(&var, "DB_MAX_CONNECTIONS", 10)?,
            min_connections: parse_or(&var, "DB_MIN_CONNECTIONS", 0)?,
            max_lifetime_secs: parse_or(&var, "DB_MAX_LIFETIME_SECS", 300)?,
        };
        let jwt = JwtConfig {
            secret: var("JWT_SECRET").context("JWT_SECRET must be set")?,
            issuer: var("JWT_ISSUER").unwrap_or_else(|| "auth-backend".into()),
            audience: var("JWT_AUDIENCE").unwrap_or_else(|| "auth-backend-users".into()),
            ttl_minutes: ttl_minutes(&var, "JWT_TTL_MINUTES", 60)?,
            refresh_ttl_minutes: ttl_minutes(&var, "JWT_REFRESH_TTL_MINUTES", 60 * 24 * 14)?,
        };
        Ok(Self {
            server,
            database,
            jwt,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Ten years.
pub const MAX_TTL_MINUTES: i64 = 60 * 24 * 365 * 10;

fn ttl_minutes<F>(var: &F, key: &str, default: i64) -> anyhow::Result<i64>
where
    F: Fn(&str) -> Option<String>,
{
    let minutes = parse_or(var, key, default)?;
    anyhow::ensure!(
        (1..=MAX_TTL_MINUTES).contains(&minutes),
        "{key}: must be between 1 and {MAX_TTL_MINUTES} minutes, got {minutes}"
    );
    Ok(minutes)
}

fn parse_or<F, T>(var: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{key}: {e}")),
        None => Ok(default),
    }
}
