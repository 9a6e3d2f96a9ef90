pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, ExportOptions, ImdbConfig, ImdbSettings, mask_secret, DEFAULT_IMDB_BASE_URL, USER_ID_SCRAPE};
pub use credentials::CredentialStore;
pub use paths::{PathManager, container_base_path};
