use serde_json::Value;

use crate::Notice;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// A poll returned a parsed JSON payload.
    ResponseReceived(Value),
    /// A poll failed at the transport level (network error or non-2xx).
    FetchFailed { detail: String },
    /// The notifier confirmed delivery of a notice.
    Delivered { notice: Notice },
    /// The notifier failed to deliver a notice.
    DeliveryFailed {
        notice: Notice,
        failure: DeliveryFailure,
    },
}

/// Delivery failure classification as seen by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryFailure {
    /// Bad bot credentials; retrying cannot succeed.
    Unauthorized,
    /// The messaging API rejected the request.
    BadRequest,
    /// Any other delivery problem.
    Other,
}
