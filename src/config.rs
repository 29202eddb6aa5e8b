use anyhow::{Context, Result};
use chrono_tz::Tz;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    /// IANA zone used when rendering timestamps back to clients.
    /// Readings are always stored in UTC.
    pub display_timezone: Tz,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests don't have to
    /// touch the process environment.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| -> Result<String> {
            lookup(key).with_context(|| format!("missing required env var: {key}"))
        };
        let optional =
            |key: &str, default: &str| -> String { lookup(key).unwrap_or_else(|| default.to_owned()) };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            server_host: optional("SERVER_HOST", "0.0.0.0"),
            server_port: optional("PORT", "5000")
                .parse()
                .context("PORT must be a valid port number")?,
            display_timezone: parse_timezone(&optional("DISPLAY_TIMEZONE", DEFAULT_TIMEZONE))?,
        })
    }
}

/// Fixed UTC-6 without DST, the zone the devices report from.
pub const DEFAULT_TIMEZONE: &str = "America/Tegucigalpa";

fn parse_timezone(raw: &str) -> Result<Tz> {
    raw.trim()
        .parse::<Tz>()
        .map_err(|e| anyhow::anyhow!("DISPLAY_TIMEZONE must be an IANA zone name, got {raw:?}: {e}"))
}
