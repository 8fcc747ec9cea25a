use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_SERVICE_BASE_URL: &str = "http://localhost:8900";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Origin of the users/catalog/review/shop services
    pub service_base_url: String,
    /// User shown on the profile page; also owns cart lines
    pub profile_user_id: i64,
    pub delete_confirm_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            service_base_url: DEFAULT_SERVICE_BASE_URL.to_string(),
            profile_user_id: 1,
            delete_confirm_timeout: None,
            request_timeout: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unparseable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let service_base_url = lookup("SERVICE_BASE_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.service_base_url);

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port),
            service_base_url,
            profile_user_id: parse_or(&lookup, "PROFILE_USER_ID", defaults.profile_user_id),
            delete_confirm_timeout: parse_secs(&lookup, "DELETE_CONFIRM_TIMEOUT_SECS"),
            request_timeout: parse_secs(&lookup, "REQUEST_TIMEOUT_SECS"),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("⚠️  Invalid {}='{}', using {}", key, raw, default);
            default
        }),
        None => default,
    }
}

fn parse_secs<F>(lookup: &F, key: &str) -> Option<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(0) => None,
        Ok(secs) => Some(Duration::from_secs(secs)),
        Err(_) => {
            log::warn!("⚠️  Invalid {}='{}', ignoring", key, raw);
            None
        }
    }
}
