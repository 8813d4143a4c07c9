use crate::HomeworkStatus;

/// Dedup and scheduling state for the poll loop.
///
/// Verdict slots change only after a confirmed delivery; the failure
/// notice lives in its own slot so failure and verdict notices never
/// suppress each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    last_sent_message: Option<String>,
    last_sent_status: Option<HomeworkStatus>,
    last_failure_notice: Option<String>,
    next_poll_timestamp: i64,
    pending_timestamp: Option<i64>,
}

impl PollState {
    pub fn new(start_timestamp: i64) -> Self {
        Self {
            last_sent_message: None,
            last_sent_status: None,
            last_failure_notice: None,
            next_poll_timestamp: start_timestamp,
            pending_timestamp: None,
        }
    }

    /// Rebuilds state from previously persisted dedup slots.
    pub fn restore(
        start_timestamp: i64,
        last_sent_message: Option<String>,
        last_sent_status: Option<HomeworkStatus>,
    ) -> Self {
        Self {
            last_sent_message,
            last_sent_status,
            last_failure_notice: None,
            next_poll_timestamp: start_timestamp,
            pending_timestamp: None,
        }
    }

    pub fn next_poll_timestamp(&self) -> i64 {
        self.next_poll_timestamp
    }

    pub fn last_sent_message(&self) -> Option<&str> {
        self.last_sent_message.as_deref()
    }

    pub fn last_sent_status(&self) -> Option<HomeworkStatus> {
        self.last_sent_status
    }

    /// True iff the candidate differs from the last delivered verdict.
    pub fn should_notify(&self, candidate: &str) -> bool {
        self.last_sent_message.as_deref() != Some(candidate)
    }

    /// Same rule as [`should_notify`], against the failure notice slot.
    ///
    /// [`should_notify`]: PollState::should_notify
    pub fn should_notify_failure(&self, candidate: &str) -> bool {
        self.last_failure_notice.as_deref() != Some(candidate)
    }

    /// Records a confirmed verdict delivery and applies the staged
    /// timestamp, if any.
    pub fn record_sent(&mut self, message: String, status: HomeworkStatus) {
        self.last_sent_message = Some(message);
        self.last_sent_status = Some(status);
        if let Some(timestamp) = self.pending_timestamp.take() {
            self.next_poll_timestamp = timestamp;
        }
    }

    /// Records a confirmed failure-notice delivery.
    pub fn record_failure_sent(&mut self, message: String) {
        self.last_failure_notice = Some(message);
    }

    /// Stages the response timestamp to apply once delivery is confirmed.
    /// `None` keeps the previous timestamp as the fallback.
    pub(crate) fn stage_timestamp(&mut self, timestamp: Option<i64>) {
        self.pending_timestamp = timestamp;
    }

    /// Advances the poll timestamp for a cycle that needs no delivery.
    pub(crate) fn advance(&mut self, timestamp: Option<i64>) {
        if let Some(timestamp) = timestamp {
            self.next_poll_timestamp = timestamp;
        }
    }
}
