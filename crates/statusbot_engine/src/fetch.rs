use std::time::Duration;

use bot_logging::bot_info;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;

use crate::{FailureKind, FetchError};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub endpoint: String,
    pub token: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl ApiSettings {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// One HTTP GET against the homework-review API per poll.
#[async_trait::async_trait]
pub trait StatusClient: Send + Sync {
    async fn fetch(&self, from_date: i64) -> Result<Value, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestStatusClient {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestStatusClient {
    pub fn new(settings: ApiSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }
}

#[async_trait::async_trait]
impl StatusClient for ReqwestStatusClient {
    async fn fetch(&self, from_date: i64) -> Result<Value, FetchError> {
        bot_info!("Requesting homework statuses from_date={}", from_date);

        let response = self
            .client
            .get(&self.settings.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.settings.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        response
            .json::<Value>()
            .await
            .map_err(|err| FetchError::new(FailureKind::InvalidJson, err.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
