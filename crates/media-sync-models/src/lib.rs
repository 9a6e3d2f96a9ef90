pub mod item;
pub mod list;
pub mod rating;

pub use item::ImdbItem;
pub use list::ImdbList;
pub use rating::ItemRating;
