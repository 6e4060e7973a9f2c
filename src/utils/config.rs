use std::ops::RangeInclusive;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
const DEFAULT_PORT: u16 = 9000;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SESSION_TTL_MINUTES: i64 = 60;
const HTTP_TIMEOUT_SECS_RANGE: RangeInclusive<u64> = 1..=3600;
// Up to 7 days; keeps `now + ttl` far from the DateTime limits.
const SESSION_TTL_MINUTES_RANGE: RangeInclusive<i64> = 1..=7 * 24 * 60;
const DEFAULT_STATIC_DIR: &str = "./static";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    pub api_base_url: String,
    pub http_timeout: Duration,
    pub session_ttl: chrono::Duration,
    pub static_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Empty values
    /// count as unset; unparsable or out-of-range numbers fall back to their
    /// default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = parse_or(get("PORT"), "PORT", DEFAULT_PORT, u16::MIN..=u16::MAX);
        let timeout_secs = parse_or(
            get("HTTP_TIMEOUT_SECS"),
            "HTTP_TIMEOUT_SECS",
            DEFAULT_HTTP_TIMEOUT_SECS,
            HTTP_TIMEOUT_SECS_RANGE,
        );
        let ttl_minutes = parse_or(
            get("SESSION_TTL_MINUTES"),
            "SESSION_TTL_MINUTES",
            DEFAULT_SESSION_TTL_MINUTES,
            SESSION_TTL_MINUTES_RANGE,
        );
        let session_ttl = chrono::Duration::try_minutes(ttl_minutes)
            .unwrap_or_else(|| chrono::Duration::minutes(DEFAULT_SESSION_TTL_MINUTES));

        Self {
            port,
            api_base_url: get("GITHUB_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            http_timeout: Duration::from_secs(timeout_secs),
            session_ttl,
            static_dir: get("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T, range: RangeInclusive<T>) -> T
where
    T: FromStr + PartialOrd + std::fmt::Display,
{
    let Some(raw) = value else {
        return default;
    };

    match raw.trim().parse::<T>() {
        Ok(parsed) if range.contains(&parsed) => parsed,
        _ => {
            warn!(
                "Invalid value for {}: {:?} (allowed {}..={}), using default {}",
                key,
                raw,
                range.start(),
                range.end(),
                default
            );
            default
        }
    }
}
