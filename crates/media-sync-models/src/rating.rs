use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lowest and highest value on the IMDb rating scale.
pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 10;

/// A user rating as found in the ratings export.
///
/// Value and date always travel together; list exports never carry either.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemRating {
    pub value: u8,
    pub date: NaiveDate,
}

impl ItemRating {
    /// Returns `None` when `value` falls outside the 1-10 scale.
    pub fn new(value: u8, date: NaiveDate) -> Option<Self> {
        (RATING_MIN..=RATING_MAX)
            .contains(&value)
            .then_some(Self { value, date })
    }
}
