use serde_json::Value;
use thiserror::Error;

use crate::HomeworkStatus;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The homeworks list is empty. Normal: nothing to report this cycle.
    #[error("no homework to report")]
    NoHomework,
    #[error("homework has no \"{0}\" field")]
    MissingField(&'static str),
    #[error("unknown homework status \"{0}\"")]
    UnknownStatus(String),
}

/// The raw fields of one homework entry, as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkRecord {
    pub name: String,
    pub status: String,
}

/// Picks the most recent homework from a validated response.
///
/// The API orders `homeworks` most-recent-first, so the first element is
/// the one worth reporting.
pub fn extract(response: &Value) -> Result<HomeworkRecord, ExtractError> {
    let first = response
        .get("homeworks")
        .and_then(Value::as_array)
        .and_then(|homeworks| homeworks.first())
        .ok_or(ExtractError::NoHomework)?;

    let name = first
        .get("homework_name")
        .and_then(Value::as_str)
        .ok_or(ExtractError::MissingField("homework_name"))?;
    let status = first
        .get("status")
        .and_then(Value::as_str)
        .ok_or(ExtractError::MissingField("status"))?;

    Ok(HomeworkRecord {
        name: name.to_string(),
        status: status.to_string(),
    })
}

/// Renders the notification text for a homework record.
pub fn render(record: &HomeworkRecord) -> Result<String, ExtractError> {
    let status = HomeworkStatus::parse(&record.status)
        .ok_or_else(|| ExtractError::UnknownStatus(record.status.clone()))?;
    Ok(render_message(&record.name, status))
}

pub(crate) fn render_message(name: &str, status: HomeworkStatus) -> String {
    format!(
        "Изменился статус проверки работы \"{name}\". {}",
        status.verdict()
    )
}
