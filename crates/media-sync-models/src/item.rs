use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::rating::ItemRating;

/// One title row from an IMDb list or ratings export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImdbItem {
    pub id: String, // IMDb title id, e.g. tt0111161
    pub title_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<ItemRating>, // Only set for items from the ratings feed
}

impl ImdbItem {
    pub fn new(id: impl Into<String>, title_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title_type: title_type.into(),
            rating: None,
        }
    }

    pub fn rated(id: impl Into<String>, title_type: impl Into<String>, rating: ItemRating) -> Self {
        Self {
            rating: Some(rating),
            ..Self::new(id, title_type)
        }
    }

    pub fn rating(&self) -> Option<u8> {
        self.rating.map(|r| r.value)
    }

    pub fn rating_date(&self) -> Option<NaiveDate> {
        self.rating.map(|r| r.date)
    }
}
