use serde::{Deserialize, Serialize};
use crate::item::ImdbItem;

/// An IMDb list (custom list or the watchlist) with its exported items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImdbList {
    pub list_id: String,
    pub list_name: String,
    /// Normalized form of `list_name`, usable as a Trakt list slug
    pub slug: String,
    pub items: Vec<ImdbItem>,
    #[serde(default)]
    pub is_watchlist: bool,
}

impl ImdbList {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
