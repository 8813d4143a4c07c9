//! Statusbot core: pure poll-cycle state machine and verdict rendering.
mod effect;
mod extract;
mod msg;
mod state;
mod status;
mod update;
mod validate;

pub use effect::{Effect, Notice, NoticeKind};
pub use extract::{extract, render, ExtractError, HomeworkRecord};
pub use msg::{DeliveryFailure, Msg};
pub use state::PollState;
pub use status::HomeworkStatus;
pub use update::update;
pub use validate::{validate, ValidationError};
