use bot_logging::bot_info;
use reqwest::StatusCode;
use serde_json::json;

use crate::DeliveryError;

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Delivers a text message to the single fixed destination chat.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, text: &str) -> Result<(), DeliveryError>;
}

#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    api_base: String,
    token: String,
    chat_id: String,
    client: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self::with_api_base(TELEGRAM_API_BASE, token, chat_id)
    }

    /// Points the notifier at a different Bot API host. Used by tests.
    pub fn with_api_base(
        api_base: impl Into<String>,
        token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        Self {
            api_base: api_base.into(),
            token: token.into(),
            chat_id: chat_id.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn deliver(&self, text: &str) -> Result<(), DeliveryError> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.token);
        let response = self
            .client
            .post(&url)
            .json(&json!({ "chat_id": self.chat_id, "text": text }))
            .send()
            .await
            .map_err(|err| DeliveryError::Other(err.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                bot_info!("Bot sent message: {}", text);
                Ok(())
            }
            StatusCode::UNAUTHORIZED => Err(DeliveryError::Unauthorized),
            StatusCode::BAD_REQUEST => Err(DeliveryError::BadRequest),
            status => Err(DeliveryError::Other(format!("unexpected status {status}"))),
        }
    }
}
