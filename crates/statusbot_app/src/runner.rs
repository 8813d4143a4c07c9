//! The poll loop: drives the pure state machine with engine I/O.

use std::collections::VecDeque;
use std::time::Duration;

use bot_logging::bot_error;
use statusbot_core::{update, DeliveryFailure, Effect, Msg, PollState};
use statusbot_engine::{DeliveryError, Notifier, StateStore, StatusClient};

use crate::persistence;

/// The only way the loop ends. Recoverable failures loop past.
#[derive(Debug)]
pub(crate) struct FatalError {
    pub reason: String,
}

pub(crate) async fn run_loop(
    client: &dyn StatusClient,
    notifier: &dyn Notifier,
    store: &dyn StateStore,
    mut state: PollState,
    retry_period: Duration,
) -> FatalError {
    loop {
        let (next, fatal) = run_cycle(client, notifier, store, state).await;
        state = next;
        if let Some(fatal) = fatal {
            return fatal;
        }
        tokio::time::sleep(retry_period).await;
    }
}

/// One fetch-validate-notify cycle. The sleep stays in `run_loop` so the
/// cycle itself is testable without waiting.
pub(crate) async fn run_cycle(
    client: &dyn StatusClient,
    notifier: &dyn Notifier,
    store: &dyn StateStore,
    state: PollState,
) -> (PollState, Option<FatalError>) {
    let msg = match client.fetch(state.next_poll_timestamp()).await {
        Ok(response) => Msg::ResponseReceived(response),
        // Logged via the LogFailure effect, like every recoverable failure.
        Err(err) => Msg::FetchFailed {
            detail: err.to_string(),
        },
    };

    let (mut state, effects) = update(state, msg);
    let mut fatal = None;

    let mut queue: VecDeque<Effect> = effects.into();
    while let Some(effect) = queue.pop_front() {
        match effect {
            Effect::Deliver(notice) => {
                let msg = match notifier.deliver(&notice.text).await {
                    Ok(()) => Msg::Delivered { notice },
                    Err(err) => {
                        bot_error!("Delivery failed: {}", err);
                        Msg::DeliveryFailed {
                            failure: map_failure(&err),
                            notice,
                        }
                    }
                };
                let (next, more) = update(state, msg);
                state = next;
                queue.extend(more);
            }
            Effect::LogFailure { detail } => {
                bot_error!("Recoverable failure: {}", detail);
            }
            Effect::Terminate { reason } => {
                fatal = Some(FatalError { reason });
            }
        }
    }

    persistence::save_state(store, &state);
    (state, fatal)
}

fn map_failure(err: &DeliveryError) -> DeliveryFailure {
    match err {
        DeliveryError::Unauthorized => DeliveryFailure::Unauthorized,
        DeliveryError::BadRequest => DeliveryFailure::BadRequest,
        DeliveryError::Other(_) => DeliveryFailure::Other,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::{json, Value};
    use statusbot_core::PollState;
    use statusbot_engine::{
        DeliveryError, FailureKind, FetchError, MemoryStore, Notifier, StateStore, StatusClient,
    };

    use super::run_cycle;

    struct FixedClient {
        responses: Mutex<Vec<Result<Value, FetchError>>>,
    }

    impl FixedClient {
        fn new(responses: Vec<Result<Value, FetchError>>) -> Self {
            Self {
                responses: Mutex::new(responses),
            }
        }
    }

    #[async_trait::async_trait]
    impl StatusClient for FixedClient {
        async fn fetch(&self, _from_date: i64) -> Result<Value, FetchError> {
            self.responses.lock().unwrap().remove(0)
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<String>>,
        fail_with: Mutex<Option<DeliveryError>>,
    }

    impl RecordingNotifier {
        fn failing(err: DeliveryError) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail_with: Mutex::new(Some(err)),
            }
        }

        fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl Notifier for RecordingNotifier {
        async fn deliver(&self, text: &str) -> Result<(), DeliveryError> {
            if let Some(err) = self.fail_with.lock().unwrap().clone() {
                return Err(err);
            }
            self.sent.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn approved(current_date: i64) -> Value {
        json!({
            "homeworks": [{ "homework_name": "hw1", "status": "approved" }],
            "current_date": current_date,
        })
    }

    #[tokio::test]
    async fn cycle_delivers_and_persists() {
        bot_logging::initialize_for_tests();
        let client = FixedClient::new(vec![Ok(approved(1000))]);
        let notifier = RecordingNotifier::default();
        let store = MemoryStore::new();

        let (state, fatal) = run_cycle(&client, &notifier, &store, PollState::new(0)).await;

        assert!(fatal.is_none());
        assert_eq!(state.next_poll_timestamp(), 1000);
        assert_eq!(notifier.sent().len(), 1);
        assert_eq!(
            store.get("last_status").unwrap().as_deref(),
            Some("approved")
        );
    }

    #[tokio::test]
    async fn unauthorized_delivery_is_fatal() {
        bot_logging::initialize_for_tests();
        let client = FixedClient::new(vec![Ok(approved(1000))]);
        let notifier = RecordingNotifier::failing(DeliveryError::Unauthorized);
        let store = MemoryStore::new();

        let (state, fatal) = run_cycle(&client, &notifier, &store, PollState::new(0)).await;

        assert!(fatal.is_some());
        // The failed message stays unsent and eligible for retry.
        assert_eq!(state.last_sent_message(), None);
        assert_eq!(state.next_poll_timestamp(), 0);
    }

    #[tokio::test]
    async fn transport_failure_sends_one_failure_notice() {
        bot_logging::initialize_for_tests();
        let failed = || {
            Err(FetchError {
                kind: FailureKind::HttpStatus(503),
                message: "503 Service Unavailable".to_string(),
            })
        };
        let client = FixedClient::new(vec![failed(), failed()]);
        let notifier = RecordingNotifier::default();
        let store = MemoryStore::new();

        let (state, fatal) = run_cycle(&client, &notifier, &store, PollState::new(0)).await;
        assert!(fatal.is_none());
        let (_state, fatal) = run_cycle(&client, &notifier, &store, state).await;
        assert!(fatal.is_none());

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].starts_with("Сбой в работе программы:"));
    }
}
