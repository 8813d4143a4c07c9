//! Best-effort persistence of dedup slots through a `StateStore`.
//!
//! Store failures never break a poll cycle; they are logged and the
//! in-memory state carries on.

use bot_logging::{bot_info, bot_warn};
use statusbot_core::{HomeworkStatus, PollState};
use statusbot_engine::StateStore;

const LAST_MESSAGE_KEY: &str = "last_message";
const LAST_STATUS_KEY: &str = "last_status";

pub(crate) fn load_state(store: &dyn StateStore, start_timestamp: i64) -> PollState {
    let message = read_slot(store, LAST_MESSAGE_KEY);
    let status = read_slot(store, LAST_STATUS_KEY)
        .and_then(|raw| HomeworkStatus::parse(&raw));

    if message.is_some() || status.is_some() {
        bot_info!("Restored dedup state from the store");
    }
    PollState::restore(start_timestamp, message, status)
}

pub(crate) fn save_state(store: &dyn StateStore, state: &PollState) {
    if let Some(message) = state.last_sent_message() {
        write_slot(store, LAST_MESSAGE_KEY, message);
    }
    if let Some(status) = state.last_sent_status() {
        write_slot(store, LAST_STATUS_KEY, status.as_str());
    }
}

fn read_slot(store: &dyn StateStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(err) => {
            bot_warn!("Failed to read \"{}\" from the store: {}", key, err);
            None
        }
    }
}

fn write_slot(store: &dyn StateStore, key: &str, value: &str) {
    if let Err(err) = store.set(key, value) {
        bot_warn!("Failed to persist \"{}\": {}", key, err);
    }
}
