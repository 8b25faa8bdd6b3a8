use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use dotenvy::dotenv;

/// Where the income rows come from.
#[derive(Clone)]
pub enum StoreBackend {
    /// PostgREST endpoint (e.g. Supabase) with an anonymous key.
    Rest { url: String, anon_key: String },
    MySql { database_url: String },
}

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub api_prefix: String,

    pub backend: StoreBackend,
    pub income_table: String,
    pub fetch_timeout: Duration,

    // Rate limiting
    pub rate_refresh_per_min: u32,

    pub log_level: tracing::Level,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).ok_or_else(|| anyhow!("{key} must be set"));

        let backend = match lookup("STORE_BACKEND").as_deref().unwrap_or("rest") {
            "rest" => StoreBackend::Rest {
                url: required("SUPABASE_URL")?,
                anon_key: required("SUPABASE_ANON_KEY")?,
            },
            "mysql" => StoreBackend::MySql {
                database_url: required("DATABASE_URL")?,
            },
            other => bail!("STORE_BACKEND must be `rest` or `mysql`, got `{other}`"),
        };

        let income_table = lookup("INCOME_TABLE").unwrap_or_else(|| "income".to_string());
        if income_table.is_empty()
            || !income_table
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            bail!("INCOME_TABLE must be a plain identifier, got `{income_table}`");
        }

        Ok(Self {
            server_addr: lookup("SERVER_ADDR").unwrap_or_else(|| "127.0.0.1:8080".to_string()),
            api_prefix: lookup("API_PREFIX").unwrap_or_else(|| "/api".to_string()),
            backend,
            income_table,
            fetch_timeout: Duration::from_secs(parse_or(&lookup, "FETCH_TIMEOUT_SECS", 30)?),
            rate_refresh_per_min: parse_or(&lookup, "RATE_REFRESH_PER_MIN", 10)?,
            log_level: parse_or(&lookup, "LOG_LEVEL", tracing::Level::DEBUG)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| anyhow!("{e}"))
            .with_context(|| format!("invalid value for {key}: `{raw}`")),
        None => Ok(default),
    }
}
