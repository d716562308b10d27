//! Persisted fun-fact documents.

use serde::{Deserialize, Serialize};

/// The stored list of fun facts for one state.
///
/// `state_code` is the unique key. Entries are created on the first addition
/// and are never removed; deleting the last fact leaves an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactEntry {
    /// Two-letter state code this entry belongs to.
    pub state_code: String,
    /// The ordered fun facts.
    #[serde(default)]
    pub funfacts: Vec<String>,
}

impl FactEntry {
    /// Creates an entry holding the given facts.
    pub fn new(state_code: impl Into<String>, funfacts: Vec<String>) -> Self {
        Self {
            state_code: state_code.into(),
            funfacts,
        }
    }

    /// Returns true if the entry holds no facts.
    pub fn is_empty(&self) -> bool {
        self.funfacts.is_empty()
    }

    /// Appends each fact that is not already stored, returning how many were added.
    ///
    /// Only stored content is checked, so repeats inside `incoming` are all kept
    /// when the value was not stored before.
    ///
    /// # Examples
    ///
    /// ```
    /// use states_api::models::FactEntry;
    ///
    /// let mut entry = FactEntry::new("OH", vec!["a".to_string()]);
    /// let added = entry.append_new(vec!["a".into(), "b".into(), "b".into()]);
    /// assert_eq!(added, 2);
    /// assert_eq!(entry.funfacts, vec!["a", "b", "b"]);
    /// ```
    pub fn append_new(&mut self, incoming: Vec<String>) -> usize {
        let fresh: Vec<String> = incoming
            .into_iter()
            .filter(|fact| !self.funfacts.contains(fact))
            .collect();
        let added = fresh.len();
        self.funfacts.extend(fresh);
        added
    }
}
