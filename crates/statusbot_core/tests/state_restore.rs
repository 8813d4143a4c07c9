use serde_json::json;
use statusbot_core::{update, HomeworkStatus, Msg, PollState};

const HW1_APPROVED: &str = "Изменился статус проверки работы \"hw1\". \
                            Работа проверена: ревьюеру всё понравилось. Ура!";

#[test]
fn should_notify_compares_against_last_sent_message() {
    let mut state = PollState::new(0);
    assert!(state.should_notify(HW1_APPROVED));

    state.record_sent(HW1_APPROVED.to_string(), HomeworkStatus::Approved);
    assert!(!state.should_notify(HW1_APPROVED));
    assert!(state.should_notify("something else"));
}

#[test]
fn failure_slot_is_independent_of_verdict_slot() {
    let mut state = PollState::new(0);
    state.record_sent(HW1_APPROVED.to_string(), HomeworkStatus::Approved);

    assert!(state.should_notify_failure("Сбой в работе программы: timeout"));
    state.record_failure_sent("Сбой в работе программы: timeout".to_string());

    assert!(!state.should_notify_failure("Сбой в работе программы: timeout"));
    assert!(!state.should_notify(HW1_APPROVED));
}

#[test]
fn restored_state_suppresses_the_persisted_message() {
    let state = PollState::restore(
        900,
        Some(HW1_APPROVED.to_string()),
        Some(HomeworkStatus::Approved),
    );
    assert_eq!(state.next_poll_timestamp(), 900);
    assert_eq!(state.last_sent_status(), Some(HomeworkStatus::Approved));

    // A fresh poll observing the same status stays quiet after a restart.
    let payload = json!({
        "homeworks": [{ "homework_name": "hw1", "status": "approved" }],
        "current_date": 1000,
    });
    let (state, effects) = update(state, Msg::ResponseReceived(payload));
    assert!(effects.is_empty());
    assert_eq!(state.next_poll_timestamp(), 1000);
}
