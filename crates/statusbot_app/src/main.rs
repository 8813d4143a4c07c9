mod config;
mod persistence;
mod runner;

use bot_logging::{bot_error, LogDestination};
use statusbot_engine::{
    ApiSettings, MemoryStore, ReqwestStatusClient, SqliteStore, StateStore, TelegramNotifier,
};

use crate::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    bot_logging::initialize(LogDestination::Both);

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            bot_error!("Configuration error: {}", err);
            std::process::exit(1);
        }
    };

    let settings = ApiSettings::new(config.endpoint.clone(), config.practicum_token.clone());
    let client = match ReqwestStatusClient::new(settings) {
        Ok(client) => client,
        Err(err) => {
            bot_error!("Failed to build HTTP client: {}", err);
            std::process::exit(1);
        }
    };
    let notifier = TelegramNotifier::new(config.telegram_token.clone(), config.chat_id.clone());

    let store: Box<dyn StateStore> = match &config.state_db {
        Some(path) => match SqliteStore::open(path) {
            Ok(store) => Box::new(store),
            Err(err) => {
                bot_error!("Failed to open state store at {:?}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => Box::new(MemoryStore::new()),
    };

    let start_timestamp = chrono::Utc::now().timestamp();
    let state = persistence::load_state(store.as_ref(), start_timestamp);

    let fatal = runner::run_loop(
        &client,
        &notifier,
        store.as_ref(),
        state,
        config.retry_period,
    )
    .await;

    bot_error!("Terminating: {}", fatal.reason);
    std::process::exit(1);
}
