use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub jwt: JwtConfig,
    pub allowed_origins: Vec<String>,
}

/// Token signing configuration
///
/// `secret` signs every new token under `key_id`. `previous_keys` are only
/// used for verification so tokens issued before a rotation stay valid.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub key_id: String,
    pub issuer: String,
    pub ttl_hours: Option<i64>,
    pub previous_keys: Vec<(String, String)>,
}

// Secrets stay out of logs
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let previous: Vec<&str> = self.previous_keys.iter().map(|(kid, _)| kid.as_str()).collect();
        f.debug_struct("JwtConfig")
            .field("key_id", &self.key_id)
            .field("issuer", &self.issuer)
            .field("ttl_hours", &self.ttl_hours)
            .field("previous_keys", &previous)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        if secret.trim().is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        let ttl_hours = match env::var("JWT_TTL_HOURS") {
            Ok(value) => Some(parse_ttl_hours(&value).context("Invalid JWT_TTL_HOURS")?),
            Err(_) => None,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a valid number")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            jwt: JwtConfig {
                secret,
                key_id: env::var("JWT_KEY_ID").unwrap_or_else(|_| "v1".to_string()),
                issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "account-service".to_string()),
                ttl_hours,
                previous_keys: parse_previous_keys(
                    &env::var("JWT_PREVIOUS_KEYS").unwrap_or_default(),
                )?,
            },
            allowed_origins: parse_list(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
        })
    }
}

/// Longest accepted token lifetime (one year)
pub const MAX_TTL_HOURS: i64 = 24 * 365;

/// Parse a token lifetime in whole hours, between 1 and `MAX_TTL_HOURS`.
pub fn parse_ttl_hours(raw: &str) -> Result<i64> {
    let hours: i64 = raw
        .trim()
        .parse()
        .context("JWT_TTL_HOURS must be a whole number of hours")?;
    if !(1..=MAX_TTL_HOURS).contains(&hours) {
        bail!("JWT_TTL_HOURS must be between 1 and {MAX_TTL_HOURS}, got {hours}");
    }
    Ok(hours)
}

/// Parse `kid:secret,kid:secret` into key pairs accepted for verification.
pub fn parse_previous_keys(raw: &str) -> Result<Vec<(String, String)>> {
    parse_list(raw)
        .into_iter()
        .map(|entry| match entry.split_once(':') {
            Some((kid, secret)) if !kid.is_empty() && !secret.is_empty() => {
                Ok((kid.to_string(), secret.to_string()))
            }
            _ => bail!("JWT_PREVIOUS_KEYS entries must look like kid:secret"),
        })
        .collect()
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
