use serde_json::Value;

use crate::extract::{extract, render_message, ExtractError};
use crate::validate::validate;
use crate::{DeliveryFailure, Effect, HomeworkStatus, Msg, Notice, NoticeKind, PollState};

/// Pure update function: applies a message to state and returns any effects.
///
/// One poll cycle feeds `ResponseReceived` or `FetchFailed` in, executes
/// the resulting effects, and feeds the delivery outcome back in as
/// `Delivered` or `DeliveryFailed`.
pub fn update(mut state: PollState, msg: Msg) -> (PollState, Vec<Effect>) {
    let effects = match msg {
        Msg::ResponseReceived(response) => apply_response(&mut state, &response),
        Msg::FetchFailed { detail } => failure_notice(&mut state, &detail),
        Msg::Delivered { notice } => {
            match notice.kind {
                NoticeKind::Verdict(status) => state.record_sent(notice.text, status),
                NoticeKind::Failure => state.record_failure_sent(notice.text),
            }
            Vec::new()
        }
        Msg::DeliveryFailed { notice: _, failure } => match failure {
            DeliveryFailure::Unauthorized => vec![Effect::Terminate {
                reason: "bot token rejected by the messaging API".to_string(),
            }],
            // State stays untouched, so the same notice is retried on the
            // next send attempt.
            DeliveryFailure::BadRequest | DeliveryFailure::Other => Vec::new(),
        },
    };

    (state, effects)
}

fn apply_response(state: &mut PollState, response: &Value) -> Vec<Effect> {
    if let Err(err) = validate(response) {
        return failure_notice(state, &err.to_string());
    }

    // Validation only guarantees the key is present; a non-integer value
    // falls back to the previous timestamp.
    let current_date = response.get("current_date").and_then(Value::as_i64);

    let record = match extract(response) {
        Ok(record) => record,
        Err(ExtractError::NoHomework) => {
            // Nothing to report this cycle.
            state.advance(current_date);
            return Vec::new();
        }
        Err(err) => return failure_notice(state, &err.to_string()),
    };

    let status = match HomeworkStatus::parse(&record.status) {
        Some(status) => status,
        None => {
            let err = ExtractError::UnknownStatus(record.status);
            return failure_notice(state, &err.to_string());
        }
    };

    let message = render_message(&record.name, status);
    if state.should_notify(&message) {
        state.stage_timestamp(current_date);
        vec![Effect::Deliver(Notice {
            kind: NoticeKind::Verdict(status),
            text: message,
        })]
    } else {
        // Unchanged status: a no-op success cycle.
        state.advance(current_date);
        Vec::new()
    }
}

fn failure_notice(state: &mut PollState, detail: &str) -> Vec<Effect> {
    let mut effects = vec![Effect::LogFailure {
        detail: detail.to_string(),
    }];
    let text = format!("Сбой в работе программы: {detail}");
    if state.should_notify_failure(&text) {
        effects.push(Effect::Deliver(Notice {
            kind: NoticeKind::Failure,
            text,
        }));
    }
    effects
}
