pub mod error;
pub mod imdb;
pub mod traits;

pub use error::{DecodeError, ImdbError};
pub use imdb::{normalize_slug, ImdbClient, SessionCredentials};
pub use traits::ImdbListSource;
