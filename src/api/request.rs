//! Request types for the states API.
//!
//! Body fields are kept as raw JSON values and checked by
//! [`crate::services::validation`], so a missing field and a field of the
//! wrong type produce different messages.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dataset::Contiguity;
use crate::error::{StatesError, StatesResult};
use crate::services::validation;

/// Query string of `GET /states`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatesQuery {
    /// `true` for the contiguous 48, `false` for Alaska and Hawaii.
    #[serde(default)]
    pub contig: Option<String>,
}

impl StatesQuery {
    /// Parses the `contig` flag. An empty value counts as absent.
    pub fn contiguity(&self) -> StatesResult<Option<Contiguity>> {
        match self.contig.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(flag) if flag.eq_ignore_ascii_case("true") => Ok(Some(Contiguity::Contiguous)),
            Some(flag) if flag.eq_ignore_ascii_case("false") => {
                Ok(Some(Contiguity::NonContiguous))
            }
            Some(other) => Err(StatesError::validation(format!(
                "contig must be true or false, got '{other}'"
            ))),
        }
    }
}

/// Body of `POST /states/:state/funfact`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddFactsRequest {
    /// The facts to add; must be an array of strings.
    #[serde(default)]
    pub funfacts: Option<Value>,
}

impl AddFactsRequest {
    /// Returns the validated facts.
    pub fn into_facts(self) -> StatesResult<Vec<String>> {
        validation::new_facts(self.funfacts)
    }
}

/// Body of `PATCH /states/:state/funfact`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFactRequest {
    /// 1-based position of the fact to replace.
    #[serde(default)]
    pub index: Option<Value>,
    /// The replacement text.
    #[serde(default)]
    pub funfact: Option<Value>,
}

impl UpdateFactRequest {
    /// Returns the validated `(index, text)` pair.
    pub fn into_update(self) -> StatesResult<(u64, String)> {
        let index = validation::fact_index(self.index.as_ref())?;
        let text = validation::fact_text(self.funfact)?;
        Ok((index, text))
    }
}

/// Body of `DELETE /states/:state/funfact`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteFactRequest {
    /// 1-based position of the fact to remove.
    #[serde(default)]
    pub index: Option<Value>,
}

impl DeleteFactRequest {
    /// Returns the validated index.
    pub fn into_index(self) -> StatesResult<u64> {
        validation::fact_index(self.index.as_ref())
    }
}
