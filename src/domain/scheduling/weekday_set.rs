//! Weekday recurrence set for weekly schedule rules.
//!
//! Weekdays are indexed 0-6 with Sunday = 0, matching how the platform stores
//! recurrence patterns. The set is a compact bitmask, so membership checks in
//! the expansion loop are a single shift.

use crate::domain::foundation::ValidationError;
use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Set of weekdays a class meets on.
///
/// Serializes as a sorted list of indices (e.g. `[1, 3]` for Monday and
/// Wednesday), which is also the storage representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<u8>", try_from = "Vec<u8>")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// Builds a set from weekday indices (0 = Sunday .. 6 = Saturday).
    ///
    /// Duplicates collapse. An empty slice yields an empty set; whether that
    /// is acceptable depends on the rule's auto-generation flag, so this
    /// constructor does not reject it.
    ///
    /// # Errors
    ///
    /// Returns a validation error if any index is outside 0-6.
    pub fn from_indices(indices: &[u8]) -> Result<Self, ValidationError> {
        let mut bits: u8 = 0;
        for &idx in indices {
            if idx > 6 {
                return Err(ValidationError::out_of_range("weekday", 0, 6, idx as i32));
            }
            bits |= 1 << idx;
        }
        Ok(Self(bits))
    }

    /// Checks whether the given weekday is in the set.
    pub fn contains(&self, day: Weekday) -> bool {
        (self.0 >> day.num_days_from_sunday()) & 1 == 1
    }

    /// Returns true when no weekday is set.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of weekdays in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Sorted weekday indices, for storage round-trips.
    pub fn indices(&self) -> Vec<u8> {
        (0u8..=6).filter(|idx| (self.0 >> idx) & 1 == 1).collect()
    }
}

impl From<WeekdaySet> for Vec<u8> {
    fn from(set: WeekdaySet) -> Self {
        set.indices()
    }
}

impl TryFrom<Vec<u8>> for WeekdaySet {
    type Error = ValidationError;

    fn try_from(indices: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_indices(&indices)
    }
}
