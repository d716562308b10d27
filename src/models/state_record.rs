//! State reference record.
//!
//! A [`StateRecord`] is one entry of the static dataset. Records are loaded
//! once at startup and never mutated afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Codes of the states that are not part of the contiguous 48.
pub const NON_CONTIGUOUS_CODES: [&str; 2] = ["AK", "HI"];

/// Reference data for a single US state.
///
/// Field names on the wire follow the dataset file (`state`, `capital_city`,
/// `admission_date`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    /// The full state name (e.g. "California").
    #[serde(rename = "state")]
    pub name: String,
    /// URL-friendly name (e.g. "new-york").
    pub slug: String,
    /// Two-letter uppercase abbreviation.
    pub code: String,
    /// The state's nickname.
    pub nickname: String,
    /// Date the state was admitted to the Union.
    pub admission_date: NaiveDate,
    /// Order of admission, starting at 1 for Delaware.
    pub admission_number: u32,
    /// The capital city.
    pub capital_city: String,
    /// Resident population.
    pub population: u64,
    /// Rank by population, 1 being the most populous.
    pub population_rank: u32,
}

impl StateRecord {
    /// Returns true if the state belongs to the contiguous 48.
    ///
    /// # Examples
    ///
    /// ```
    /// use states_api::models::StateRecord;
    /// use chrono::NaiveDate;
    ///
    /// let alaska = StateRecord {
    ///     name: "Alaska".to_string(),
    ///     slug: "alaska".to_string(),
    ///     code: "AK".to_string(),
    ///     nickname: "The Last Frontier".to_string(),
    ///     admission_date: NaiveDate::from_ymd_opt(1959, 1, 3).unwrap(),
    ///     admission_number: 49,
    ///     capital_city: "Juneau".to_string(),
    ///     population: 731_545,
    ///     population_rank: 48,
    /// };
    /// assert!(!alaska.is_contiguous());
    /// ```
    pub fn is_contiguous(&self) -> bool {
        !NON_CONTIGUOUS_CODES.contains(&self.code.as_str())
    }

    /// Returns the population grouped with commas, the way en-US locales
    /// print it (`39512223` becomes `"39,512,223"`).
    pub fn formatted_population(&self) -> String {
        group_thousands(self.population)
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
