use std::str::FromStr;

use axum::http::HeaderValue;

use crate::auth::jwt::JwtConfig;

/// Default bind port.
const DEFAULT_PORT: u16 = 3001;
/// Default mount point of every route.
const DEFAULT_BASE_PATH: &str = "/api";
/// Default HTTP request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Accepted token lifetimes, in days.
const JWT_EXPIRY_DAYS_RANGE: std::ops::RangeInclusive<i64> = 1..=3650;

/// Startup configuration errors. `main` logs these and exits.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Which [`DataService`](rollcall_db::DataService) implementation backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataServiceKind {
    Postgres,
    Memory,
}

impl FromStr for DataServiceKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            _ => Err(()),
        }
    }
}

/// Allowed CORS origins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    /// `CORS_ORIGINS=*`
    Any,
    List(Vec<String>),
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3001`).
    pub port: u16,
    /// Prefix every route is nested under (default: `/api`).
    pub base_path: String,
    pub cors_origins: CorsOrigins,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub data_service: DataServiceKind,
    /// Required when `data_service` is [`DataServiceKind::Postgres`].
    pub database_url: Option<String>,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default    |
    /// |------------------------|------------|
    /// | `HOST`                 | `0.0.0.0`  |
    /// | `PORT`                 | `3001`     |
    /// | `API_BASE_PATH`        | `/api`     |
    /// | `CORS_ORIGINS`         | `*`        |
    /// | `REQUEST_TIMEOUT_SECS` | `30`       |
    /// | `DATA_SERVICE`         | `postgres` |
    /// | `DATABASE_URL`         | --         |
    /// | `JWT_SECRET`           | required   |
    /// | `JWT_EXPIRY_DAYS`      | `30`       |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or("PORT", var("PORT"), DEFAULT_PORT)?;
        let request_timeout_secs = parse_or(
            "REQUEST_TIMEOUT_SECS",
            var("REQUEST_TIMEOUT_SECS"),
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;

        let base_path = normalize_base_path(var("API_BASE_PATH").as_deref());
        let cors_origins = parse_cors_origins(var("CORS_ORIGINS").as_deref())?;

        let data_service = match var("DATA_SERVICE") {
            None => DataServiceKind::Postgres,
            Some(value) => value.parse().map_err(|()| ConfigError::Invalid {
                name: "DATA_SERVICE",
                value,
            })?,
        };
        let database_url = var("DATABASE_URL");
        if data_service == DataServiceKind::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let secret = var("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let expiry_days = parse_or(
            "JWT_EXPIRY_DAYS",
            var("JWT_EXPIRY_DAYS"),
            crate::auth::jwt::DEFAULT_EXPIRY_DAYS,
        )?;
        if !JWT_EXPIRY_DAYS_RANGE.contains(&expiry_days) {
            return Err(ConfigError::Invalid {
                name: "JWT_EXPIRY_DAYS",
                value: expiry_days.to_string(),
            });
        }
        let jwt = JwtConfig {
            secret,
            expiry_days,
        };

        Ok(Self {
            host,
            port,
            base_path,
            cors_origins,
            request_timeout_secs,
            data_service,
            database_url,
            jwt,
        })
    }
}

fn parse_or<T: FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

/// `"api/"` and `"/api"` both become `"/api"`; an empty or `/` prefix mounts at root.
fn normalize_base_path(raw: Option<&str>) -> String {
    let trimmed = raw.unwrap_or(DEFAULT_BASE_PATH).trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

/// `*` (or unset) allows any origin; otherwise a comma list of header-safe origins.
fn parse_cors_origins(raw: Option<&str>) -> Result<CorsOrigins, ConfigError> {
    let list = match raw.map(str::trim) {
        None | Some("*") => return Ok(CorsOrigins::Any),
        Some(list) => list,
    };

    let origins: Vec<String> = list
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if let Some(bad) = origins.iter().find(|o| HeaderValue::from_str(o).is_err()) {
        return Err(ConfigError::Invalid {
            name: "CORS_ORIGINS",
            value: bad.clone(),
        });
    }
    Ok(CorsOrigins::List(origins))
}
