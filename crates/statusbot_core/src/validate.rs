use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("response is not a JSON object")]
    WrongShape,
    #[error("response has no \"{0}\" key")]
    MissingKey(&'static str),
    #[error("response field \"{0}\" has the wrong type")]
    WrongType(&'static str),
}

/// Checks the shape of an API payload before extraction. No side effects.
pub fn validate(response: &Value) -> Result<(), ValidationError> {
    let object = response.as_object().ok_or(ValidationError::WrongShape)?;

    for key in ["homeworks", "current_date"] {
        if !object.contains_key(key) {
            return Err(ValidationError::MissingKey(key));
        }
    }

    if !object["homeworks"].is_array() {
        return Err(ValidationError::WrongType("homeworks"));
    }

    Ok(())
}
