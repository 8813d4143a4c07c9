//! Statusbot engine: HTTP collaborators and dedup-state persistence.
mod fetch;
mod notify;
mod store;
mod types;

pub use fetch::{ApiSettings, ReqwestStatusClient, StatusClient};
pub use notify::{Notifier, TelegramNotifier, TELEGRAM_API_BASE};
pub use store::{MemoryStore, SqliteStore, StateStore, StoreError};
pub use types::{DeliveryError, FailureKind, FetchError};
