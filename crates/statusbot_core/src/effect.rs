use crate::HomeworkStatus;

/// A message queued for delivery to the destination chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// A rendered verdict for a homework status.
    Verdict(HomeworkStatus),
    /// A generic notice about a recoverable poller failure.
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Deliver the notice to the destination chat.
    Deliver(Notice),
    /// Record a recoverable failure in the log. Emitted on every failing
    /// cycle, whether or not a chat notice goes out for it.
    LogFailure { detail: String },
    /// Stop the process: operator intervention is required.
    Terminate { reason: String },
}
