//! Environment-sourced configuration, checked before the loop starts.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("required variable {0} is missing or empty")]
    Missing(&'static str),
    #[error("variable {0} has an invalid value")]
    Invalid(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub chat_id: String,
    pub endpoint: String,
    pub retry_period: Duration,
    pub state_db: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let practicum_token = required("PRACTICUM_TOKEN")?;
        let telegram_token = required("TELEGRAM_TOKEN")?;
        let chat_id = required("TELEGRAM_CHAT_ID")?;

        let endpoint = lookup("HOMEWORK_ENDPOINT")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let retry_period = match lookup("RETRY_PERIOD") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid("RETRY_PERIOD"))?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_RETRY_PERIOD_SECS),
        };

        let state_db = lookup("STATE_DB")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            practicum_token,
            telegram_token,
            chat_id,
            endpoint,
            retry_period,
            state_db,
        })
    }
}
