//! Request value validation.
//!
//! Bodies are deserialized into loosely-typed `serde_json::Value` fields so a
//! missing value and a value of the wrong type can be reported separately.
//! Nothing here touches storage.

use serde_json::Value;

use crate::error::{StatesError, StatesResult};

/// Message for a missing `funfacts` field.
pub const FACTS_REQUIRED: &str = "State fun facts value required";
/// Message for a `funfacts` value that is not an array.
pub const FACTS_NOT_ARRAY: &str = "State fun facts value must be an array";
/// Message for a `funfacts` array holding something other than strings.
pub const FACTS_NOT_STRINGS: &str = "State fun facts must be strings";
/// Message for a missing `index` field.
pub const INDEX_REQUIRED: &str = "State fun fact index value required";
/// Message for an `index` that is not a positive integer.
pub const INDEX_NOT_POSITIVE: &str = "State fun fact index must be a positive integer";
/// Message for a missing or empty `funfact` field.
pub const FACT_REQUIRED: &str = "State fun fact value required";

/// Validates the `funfacts` array of an add request.
pub fn new_facts(value: Option<Value>) -> StatesResult<Vec<String>> {
    let items = match value {
        None | Some(Value::Null) => return Err(StatesError::validation(FACTS_REQUIRED)),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(StatesError::validation(FACTS_NOT_ARRAY)),
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::String(fact) => Ok(fact),
            _ => Err(StatesError::validation(FACTS_NOT_STRINGS)),
        })
        .collect()
}

/// Validates a 1-based fact index.
///
/// Accepts JSON integers and whole-valued floats (`2.0`) greater than zero.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use states_api::services::validation::fact_index;
///
/// assert_eq!(fact_index(Some(&json!(3))).unwrap(), 3);
/// assert!(fact_index(Some(&json!(0))).is_err());
/// assert!(fact_index(Some(&json!(1.5))).is_err());
/// assert!(fact_index(None).is_err());
/// ```
pub fn fact_index(value: Option<&Value>) -> StatesResult<u64> {
    let number = match value {
        None | Some(Value::Null) => return Err(StatesError::validation(INDEX_REQUIRED)),
        Some(Value::Number(number)) => number,
        Some(_) => return Err(StatesError::validation(INDEX_NOT_POSITIVE)),
    };

    if let Some(index) = number.as_u64() {
        return if index > 0 {
            Ok(index)
        } else {
            Err(StatesError::validation(INDEX_NOT_POSITIVE))
        };
    }

    match number.as_f64() {
        Some(float) if float >= 1.0 && float.fract() == 0.0 && float <= u64::MAX as f64 => {
            Ok(float as u64)
        }
        _ => Err(StatesError::validation(INDEX_NOT_POSITIVE)),
    }
}

/// Validates the replacement text of an update request.
pub fn fact_text(value: Option<Value>) -> StatesResult<String> {
    match value {
        Some(Value::String(text)) if !text.is_empty() => Ok(text),
        _ => Err(StatesError::validation(FACT_REQUIRED)),
    }
}
